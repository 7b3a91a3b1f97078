//! Per-player-count copy counts.

use rustc_hash::FxHashMap;

use super::identity::CardIdentity;
use crate::core::config::{MAX_PLAYERS, MIN_PLAYERS};
use crate::error::SetupError;

const PLAYER_COUNTS: usize = MAX_PLAYERS - MIN_PLAYERS + 1;

/// Copies of each identity, indexed by player count (2, 3, 4).
///
/// ```
/// use market_engine::cards::{CardIdentity, QuantityTable};
///
/// let mut table = QuantityTable::new();
/// table.set(CardIdentity::basic(1), [5, 6, 7]);
///
/// assert_eq!(table.quantity(CardIdentity::basic(1), 3), Ok(6));
/// assert!(table.quantity(CardIdentity::basic(2), 3).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuantityTable {
    counts: FxHashMap<CardIdentity, [u32; PLAYER_COUNTS]>,
}

impl QuantityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the copy counts for two, three and four players.
    pub fn set(&mut self, identity: CardIdentity, counts: [u32; PLAYER_COUNTS]) {
        self.counts.insert(identity, counts);
    }

    /// Same count regardless of player count.
    pub fn set_flat(&mut self, identity: CardIdentity, count: u32) {
        self.set(identity, [count; PLAYER_COUNTS]);
    }

    #[must_use]
    pub fn contains(&self, identity: CardIdentity) -> bool {
        self.counts.contains_key(&identity)
    }

    /// Copies of `identity` in a game of `player_count` players.
    pub fn quantity(&self, identity: CardIdentity, player_count: usize) -> Result<u32, SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(SetupError::UnsupportedPlayerCount(player_count));
        }
        let counts = self
            .counts
            .get(&identity)
            .ok_or(SetupError::MissingQuantity(identity))?;
        Ok(counts[player_count - MIN_PLAYERS])
    }
}
