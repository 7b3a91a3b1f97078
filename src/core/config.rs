//! Game configuration.
//!
//! `GameConfig` holds the tunable rule constants: hand limit, winning score,
//! starting coin and the display sizes of the market piles. Defaults match
//! the printed rules.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a game can start with.
pub const MAX_PLAYERS: usize = 4;

/// Rule constants for one game.
///
/// ```
/// use market_engine::core::GameConfig;
///
/// let config = GameConfig::default().with_winning_score(12);
/// assert_eq!(config.max_hand_size, 7);
/// assert_eq!(config.winning_score, 12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum resource cards a player may hold. Buildings do not count.
    pub max_hand_size: usize,

    /// Score that ends the game when reached at the start of a turn.
    pub winning_score: u32,

    /// Coin given to the first player in turn order; each later seat gets one more.
    pub starting_coin: u32,

    /// Column bound of the level-one resource pile.
    pub level_one_columns: usize,

    /// Slot count of the level-two resource pile and the building pile.
    pub unique_slots: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hand_size: 7,
            winning_score: 10,
            starting_coin: 3,
            level_one_columns: 5,
            unique_slots: 5,
        }
    }
}

impl GameConfig {
    /// Set the hand limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the winning score.
    #[must_use]
    pub fn with_winning_score(mut self, score: u32) -> Self {
        self.winning_score = score;
        self
    }

    /// Set the coin of the first player in turn order.
    #[must_use]
    pub fn with_starting_coin(mut self, coin: u32) -> Self {
        self.starting_coin = coin;
        self
    }

    /// Set the column bound of the level-one pile.
    #[must_use]
    pub fn with_level_one_columns(mut self, columns: usize) -> Self {
        self.level_one_columns = columns;
        self
    }

    /// Set the slot count of the unique-slot piles.
    #[must_use]
    pub fn with_unique_slots(mut self, slots: usize) -> Self {
        self.unique_slots = slots;
        self
    }

    /// Reject configurations that would leave a pile without display room.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.level_one_columns == 0 {
            return Err(SetupError::InvalidConfig("level_one_columns must be at least 1"));
        }
        if self.unique_slots == 0 {
            return Err(SetupError::InvalidConfig("unique_slots must be at least 1"));
        }
        if self.winning_score == 0 {
            return Err(SetupError::InvalidConfig("winning_score must be at least 1"));
        }
        Ok(())
    }

    /// Check a player count against the supported range.
    pub fn check_player_count(player_count: usize) -> Result<(), SetupError> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            Ok(())
        } else {
            Err(SetupError::UnsupportedPlayerCount(player_count))
        }
    }
}
