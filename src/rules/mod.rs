//! The transaction engine.
//!
//! `Game` validates and applies trades, production and building activations
//! against the board and the current player, and drives the turn rotation.

pub mod engine;

pub use engine::Game;
