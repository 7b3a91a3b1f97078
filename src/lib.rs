//! # market-engine
//!
//! Rules engine for a card-trading board game: players buy and craft
//! resource cards from a shared market, build buildings and activate them
//! for points or products until someone reaches the winning score.
//!
//! ## Design Principles
//!
//! 1. **Check, then commit**: every operation validates against the board and
//!    the current player before touching either. A rejected operation is a
//!    `GameError` and changes nothing.
//!
//! 2. **Conservation**: a card instance is always in exactly one place: a
//!    pile's display, deck or discard, or a player's hand or buildings.
//!    Breaking that is a programming error and panics.
//!
//! 3. **Deterministic**: all shuffling goes through a seeded `GameRng`, so a
//!    seed and a sequence of actions replay the same game.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, RNG, configuration, actions, snapshots
//! - `cards`: Card identities, templates, catalog, quantities, decks
//! - `market`: The three pile layouts and the game board
//! - `players`: Player hand, buildings, coin and score
//! - `rules`: The transaction engine
//! - `sample`: A small built-in catalog

pub mod cards;
pub mod core;
pub mod error;
pub mod market;
pub mod players;
pub mod rules;
pub mod sample;

// Re-export commonly used types
pub use crate::core::{
    EntityId, PlayerId, PlayerMap,
    GameRng, GameRngState, GameConfig,
    Action, ActionRecord,
    BoardState, GameSnapshot, PileState, PlayerView,
};

pub use crate::cards::{
    BuildingCard, Card, CardIdentity, CardInstance, Catalog, Category, CostOptions, Deck,
    DeckFactory, QuantityTable, ResourceCard,
};

pub use crate::error::{ErrorKind, GameError, OwnedKind, SetupError};

pub use crate::market::{
    BoundedColumnsPile, CardBundle, GameBoard, IdentityColumnsPile, MarketPile, UniqueSlotPile,
};

pub use crate::players::Player;

pub use crate::rules::Game;
