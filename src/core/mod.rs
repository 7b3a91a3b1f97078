//! Core engine types: entities, players, RNG, configuration, actions, snapshots.
//!
//! These are the building blocks shared by the card, market and rules modules.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{EntityAllocator, EntityId};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{Action, ActionRecord, Identities};
pub use state::{BoardState, GameSnapshot, PileState, PlayerView};
