//! Bounded-columns pile with discard reshuffle.
//!
//! The display has a fixed number of column positions. A drawn card joins the
//! column already holding its identity, or opens the first empty position.
//! Refill stops once no position is empty, or when deck and discard are both
//! exhausted. Whenever the deck runs dry mid-refill the discard pile is
//! shuffled back in.
//!
//! Taking the last card of a column frees its position for any identity.

use tracing::trace;

use super::{assert_discardable, count_identities, remove_by_id, MarketPile};
use crate::cards::{CardIdentity, CardInstance, Category};
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;
use crate::core::state::PileState;

/// Pile with a bounded number of same-identity columns.
#[derive(Clone, Debug)]
pub struct BoundedColumnsPile {
    category: Category,
    columns: Vec<Vec<CardInstance>>,
    deck: Vec<CardInstance>,
    discard: Vec<CardInstance>,
}

impl BoundedColumnsPile {
    /// Shuffle `cards` into the deck and deal the opening display.
    ///
    /// # Panics
    ///
    /// If `max_columns` is zero or a card belongs to another category.
    #[must_use]
    pub fn new(
        category: Category,
        max_columns: usize,
        cards: Vec<CardInstance>,
        rng: &mut GameRng,
    ) -> Self {
        assert!(max_columns > 0, "A bounded pile needs at least one column");
        for card in &cards {
            assert!(
                card.category() == category,
                "Cannot place {} in the {} pile",
                card,
                category
            );
        }

        let mut pile = Self {
            category,
            columns: vec![Vec::new(); max_columns],
            deck: cards,
            discard: Vec::new(),
        };
        rng.shuffle(&mut pile.deck);
        pile.refill(rng);
        pile
    }

    /// Column bound.
    #[must_use]
    pub fn max_columns(&self) -> usize {
        self.columns.len()
    }

    /// Columns currently holding cards.
    #[must_use]
    pub fn open_columns(&self) -> usize {
        self.columns.iter().filter(|column| !column.is_empty()).count()
    }

    fn column_of(&self, identity: CardIdentity) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.first().is_some_and(|card| card.identity() == identity))
    }

    fn has_room(&self) -> bool {
        self.columns.iter().any(Vec::is_empty)
    }

    fn reshuffle(&mut self, rng: &mut GameRng) {
        trace!(category = %self.category, count = self.discard.len(), "reshuffling discard into deck");
        self.deck.append(&mut self.discard);
        rng.shuffle(&mut self.deck);
    }
}

impl MarketPile for BoundedColumnsPile {
    fn category(&self) -> Category {
        self.category
    }

    fn query(&self, identities: &[CardIdentity]) -> Option<Vec<CardInstance>> {
        if identities.iter().any(|identity| identity.category != self.category) {
            return None;
        }

        let mut found = Vec::with_capacity(identities.len());
        for (identity, count) in count_identities(identities) {
            let column = &self.columns[self.column_of(identity)?];
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
                self.column_of(card.identity())
                    .and_then(|index| remove_by_id(&mut self.columns[index], card.entity_id))
                    .unwrap_or_else(|| panic!("{} is not on display", card))
            })
            .collect()
    }

    fn discard(&mut self, cards: Vec<CardInstance>) {
        assert_discardable(&*self, &cards);
        self.discard.extend(cards);
    }

    fn refill(&mut self, rng: &mut GameRng) {
        let before = self.display_len();

        while self.has_room() {
            if self.deck.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.reshuffle(rng);
            }
            let Some(card) = self.deck.pop() else {
                break;
            };
            let index = match self.column_of(card.identity()) {
                Some(index) => index,
                None => self
                    .columns
                    .iter()
                    .position(Vec::is_empty)
                    .unwrap_or_else(|| unreachable!("has_room checked an empty column")),
            };
            self.columns[index].push(card);
        }

        trace!(
            category = %self.category,
            drawn = self.display_len() - before,
            open_columns = self.open_columns(),
            "refilled bounded columns"
        );
    }

    fn deck_len(&self) -> usize {
        self.deck.len()
    }

    fn display_len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    fn discard_len(&self) -> usize {
        self.discard.len()
    }

    fn contains(&self, entity_id: EntityId) -> bool {
        self.columns
            .iter()
            .flatten()
            .chain(&self.deck)
            .chain(&self.discard)
            .any(|card| card.entity_id == entity_id)
    }

    fn state(&self) -> PileState {
        PileState {
            category: self.category,
            display: self.columns.clone(),
            deck_size: self.deck.len(),
            discard: self.discard.clone(),
        }
    }
}
