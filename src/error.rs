//! Error types for game setup and engine operations.
//!
//! Every rejected engine operation returns a `GameError` and leaves the game
//! untouched. Broken internal invariants (taking a card that is not on display,
//! discarding into the wrong pile) are bugs and panic instead.

use thiserror::Error;

use crate::cards::CardIdentity;

/// What the player was expected to own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnedKind {
    Resource,
    Building,
}

impl std::fmt::Display for OwnedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnedKind::Resource => write!(f, "resource"),
            OwnedKind::Building => write!(f, "building"),
        }
    }
}

/// Broad category of a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request: unknown identities, empty lists, bad trade shape.
    InvalidInput,
    /// Requested cards are not on display together.
    Unavailable,
    /// The player does not hold what the request claims.
    NotOwned,
    /// The hand limit would be exceeded.
    Capacity,
    /// Payment, cost or capital does not satisfy the target.
    RuleMismatch,
    /// Wrong moment: already acted, already activated, or game over.
    Lifecycle,
}

/// A rejected engine operation. No state was changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Card identities are empty or unknown")]
    InvalidIdentities,

    #[error("Trading must be 1:n or n:1")]
    InvalidTradeShape,

    #[error("Requested cards are not available on the game board")]
    NotAvailable,

    #[error("Player does not own the required {0} cards")]
    NotOwned(OwnedKind),

    #[error("Hand would exceed the maximum of {limit} resource cards")]
    HandLimitExceeded { limit: usize },

    #[error("Payment is not enough: offered {offered}, required {required}")]
    PaymentInsufficient { offered: u32, required: u32 },

    #[error("Cost does not match")]
    CostMismatch,

    #[error("Capital does not match")]
    CapitalMismatch,

    #[error("Player has already traded or produced this turn")]
    AlreadyActed,

    #[error("Building has already been activated this turn")]
    AlreadyActivated,

    #[error("Building cannot produce points")]
    CannotProducePoints,

    #[error("Building cannot produce a product")]
    CannotProduceProduct,

    #[error("Game is over")]
    GameOver,
}

impl GameError {
    /// Classify this rejection.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidIdentities | GameError::InvalidTradeShape => ErrorKind::InvalidInput,
            GameError::NotAvailable => ErrorKind::Unavailable,
            GameError::NotOwned(_) => ErrorKind::NotOwned,
            GameError::HandLimitExceeded { .. } => ErrorKind::Capacity,
            GameError::PaymentInsufficient { .. }
            | GameError::CostMismatch
            | GameError::CapitalMismatch
            | GameError::CannotProducePoints
            | GameError::CannotProduceProduct => ErrorKind::RuleMismatch,
            GameError::AlreadyActed | GameError::AlreadyActivated | GameError::GameOver => {
                ErrorKind::Lifecycle
            }
        }
    }
}

/// Failure while building a catalog, deck, board or game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Unsupported number of players: {0}")]
    UnsupportedPlayerCount(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("Card {0} is in the wrong category")]
    CategoryMismatch(CardIdentity),

    #[error("Card {0} has an invalid type number")]
    InvalidTypeNumber(CardIdentity),

    #[error("Card {0} is defined more than once")]
    DuplicateTemplate(CardIdentity),

    #[error("No quantity entry for card {0}")]
    MissingQuantity(CardIdentity),

    #[error("Card {0} appears more than once in a unique-slot deck")]
    DuplicateIdentity(CardIdentity),
}

pub type Result<T> = std::result::Result<T, GameError>;
