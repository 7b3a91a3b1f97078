//! Action representation: one variant per engine operation.
//!
//! Actions name cards by `CardIdentity`, never by instance, so the same
//! action value can be submitted by a client that only sees the board.
//! `Game::apply` dispatches an action to the matching typed operation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::CardIdentity;

/// Identity list carried by an action. Most lists hold four or fewer cards.
pub type Identities = SmallVec<[CardIdentity; 4]>;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use market_engine::cards::CardIdentity;
/// use market_engine::core::Action;
///
/// let buy = Action::trade_by_coins([CardIdentity::basic(1), CardIdentity::basic(2)]);
/// assert!(buy.is_turn_action());
/// assert!(!Action::EndTurn.is_turn_action());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    TradeByCoins {
        targets: Identities,
    },
    TradeByCards {
        payment: Identities,
        targets: Identities,
    },
    ProduceBySpentCost {
        cost: Identities,
        product: CardIdentity,
    },
    ProduceByOwningCapital {
        capital: Identities,
        product: CardIdentity,
    },
    ActivateForPoints {
        building: CardIdentity,
        cost: Identities,
    },
    ActivateToProduceBySpentCost {
        building: CardIdentity,
        cost: Identities,
    },
    ActivateToProduceByOwningCapital {
        building: CardIdentity,
        capital: Identities,
    },
    EndTurn,
}

impl Action {
    #[must_use]
    pub fn trade_by_coins(targets: impl IntoIterator<Item = CardIdentity>) -> Self {
        Action::TradeByCoins {
            targets: targets.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn trade_by_cards(
        payment: impl IntoIterator<Item = CardIdentity>,
        targets: impl IntoIterator<Item = CardIdentity>,
    ) -> Self {
        Action::TradeByCards {
            payment: payment.into_iter().collect(),
            targets: targets.into_iter().collect(),
        }
    }

    /// Trade and produce actions consume the once-per-turn action.
    #[must_use]
    pub fn is_turn_action(&self) -> bool {
        matches!(
            self,
            Action::TradeByCoins { .. }
                | Action::TradeByCards { .. }
                | Action::ProduceBySpentCost { .. }
                | Action::ProduceByOwningCapital { .. }
        )
    }

    /// Building activations are free of the once-per-turn action.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        matches!(
            self,
            Action::ActivateForPoints { .. }
                | Action::ActivateToProduceBySpentCost { .. }
                | Action::ActivateToProduceByOwningCapital { .. }
        )
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
