//! Card instances - physical copies in play.
//!
//! `CardInstance` is one copy of a catalog template. Copies are made by value
//! when a deck is built, so no two containers ever share an instance even when
//! they hold cards of the same identity.

use serde::{Deserialize, Serialize};

use super::definition::Card;
use super::identity::{CardIdentity, Category};
use crate::core::entity::EntityId;

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this copy.
    pub entity_id: EntityId,

    /// The copied template data.
    pub card: Card,
}

impl CardInstance {
    /// Copy `template` into a new instance with the given id.
    #[must_use]
    pub fn from_template(entity_id: EntityId, template: &Card) -> Self {
        Self {
            entity_id,
            card: template.clone(),
        }
    }

    #[must_use]
    pub fn identity(&self) -> CardIdentity {
        self.card.identity()
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.card.category()
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.card.value()
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.card.name(), self.identity(), self.entity_id)
    }
}

/// Collect the identities of `cards` in order.
#[must_use]
pub fn identities_of(cards: &[CardInstance]) -> Vec<CardIdentity> {
    cards.iter().map(CardInstance::identity).collect()
}
