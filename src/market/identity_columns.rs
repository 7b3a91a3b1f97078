//! Identity-columns pile: the whole supply always on display.
//!
//! Cards are partitioned into one column per identity when the pile is built.
//! There is no deck and no discard; discarded cards go straight back to their
//! column, and `refill` has nothing to do.

use std::collections::BTreeMap;

use tracing::trace;

use super::{assert_discardable, count_identities, remove_by_id, MarketPile};
use crate::cards::{CardIdentity, CardInstance, Category};
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;
use crate::core::state::PileState;

/// Pile with one permanent column per identity.
#[derive(Clone, Debug)]
pub struct IdentityColumnsPile {
    category: Category,
    columns: BTreeMap<CardIdentity, Vec<CardInstance>>,
}

impl IdentityColumnsPile {
    /// Partition `cards` by identity.
    ///
    /// # Panics
    ///
    /// If a card belongs to another category.
    #[must_use]
    pub fn new(category: Category, cards: Vec<CardInstance>) -> Self {
        let mut columns: BTreeMap<CardIdentity, Vec<CardInstance>> = BTreeMap::new();
        for card in cards {
            assert!(
                card.category() == category,
                "Cannot place {} in the {} pile",
                card,
                category
            );
            columns.entry(card.identity()).or_default().push(card);
        }
        Self { category, columns }
    }

    /// Cards currently in the column of `identity`.
    #[must_use]
    pub fn column_len(&self, identity: CardIdentity) -> usize {
        self.columns.get(&identity).map_or(0, Vec::len)
    }

    /// Identities with a column, including emptied ones.
    pub fn identities(&self) -> impl Iterator<Item = CardIdentity> + '_ {
        self.columns.keys().copied()
    }
}

impl MarketPile for IdentityColumnsPile {
    fn category(&self) -> Category {
        self.category
    }

    fn query(&self, identities: &[CardIdentity]) -> Option<Vec<CardInstance>> {
        if identities.iter().any(|identity| identity.category != self.category) {
            return None;
        }

        let mut found = Vec::with_capacity(identities.len());
        for (identity, count) in count_identities(identities) {
            let column = self.columns.get(&identity)?;
            if column.len() < count {
                return None;
            }
            found.extend(column[..count].iter().cloned());
        }
        Some(found)
    }

    fn take(&mut self, cards: &[CardInstance]) -> Vec<CardInstance> {
        cards
            .iter()
            .map(|card| {
                self.columns
                    .get_mut(&card.identity())
                    .and_then(|column| remove_by_id(column, card.entity_id))
                    .unwrap_or_else(|| panic!("{} is not on display", card))
            })
            .collect()
    }

    fn discard(&mut self, cards: Vec<CardInstance>) {
        assert_discardable(&*self, &cards);
        trace!(category = %self.category, count = cards.len(), "returning cards to columns");
        for card in cards {
            self.columns.entry(card.identity()).or_default().push(card);
        }
    }

    fn refill(&mut self, _rng: &mut GameRng) {}

    fn deck_len(&self) -> usize {
        0
    }

    fn display_len(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    fn discard_len(&self) -> usize {
        0
    }

    fn contains(&self, entity_id: EntityId) -> bool {
        self.columns
            .values()
            .flatten()
            .any(|card| card.entity_id == entity_id)
    }

    fn state(&self) -> PileState {
        PileState {
            category: self.category,
            display: self.columns.values().cloned().collect(),
            deck_size: 0,
            discard: Vec::new(),
        }
    }
}
