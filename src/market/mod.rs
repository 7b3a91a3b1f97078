//! Market piles and the game board.
//!
//! Every pile holds a draw deck, a discard pile and a display. Players see
//! and take only displayed cards. Three layout policies share one contract,
//! the `MarketPile` trait:
//!
//! - `IdentityColumnsPile`: one permanent column per identity, no cycling.
//! - `BoundedColumnsPile`: a bounded number of same-identity columns, with
//!   discard reshuffled into the deck when it runs dry.
//! - `UniqueSlotPile`: fixed slots, at most one card per identity.
//!
//! ## Conservation
//!
//! `deck + display + discard` never changes across `take`, `discard` and
//! `refill`, except that `take` hands cards out and `discard` brings them
//! back. `total_len` is the quantity to check.
//!
//! ## Consistency
//!
//! `take` of cards not on display and `discard` of foreign or duplicate
//! cards are engine bugs and panic.

pub mod board;
pub mod bounded_columns;
pub mod identity_columns;
pub mod unique_slots;

pub use board::{CardBundle, GameBoard};
pub use bounded_columns::BoundedColumnsPile;
pub use identity_columns::IdentityColumnsPile;
pub use unique_slots::UniqueSlotPile;

use std::collections::BTreeMap;

use crate::cards::{CardIdentity, CardInstance, Category};
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;
use crate::core::state::PileState;

/// Contract shared by the three pile layouts.
pub trait MarketPile: std::fmt::Debug {
    /// Category every card in this pile belongs to.
    fn category(&self) -> Category;

    /// Find displayed cards matching `identities` one-to-one, duplicates
    /// counted. Returns `None` unless every request can be met at once, or
    /// if any identity belongs to another category. Read-only.
    fn query(&self, identities: &[CardIdentity]) -> Option<Vec<CardInstance>>;

    /// Remove the given cards from the display and return them.
    ///
    /// # Panics
    ///
    /// If any card is not on display. Only pass the result of a `query`
    /// made against the current state.
    fn take(&mut self, cards: &[CardInstance]) -> Vec<CardInstance>;

    /// Put cards back into the pile.
    ///
    /// # Panics
    ///
    /// If a card belongs to another category or already resides in the pile.
    fn discard(&mut self, cards: Vec<CardInstance>);

    /// Fill the display according to the layout policy.
    fn refill(&mut self, rng: &mut GameRng);

    fn deck_len(&self) -> usize;

    fn display_len(&self) -> usize;

    fn discard_len(&self) -> usize;

    /// Does any part of the pile hold this instance?
    fn contains(&self, entity_id: EntityId) -> bool;

    /// Snapshot for presentation.
    fn state(&self) -> PileState;

    /// Cards held in every part of the pile.
    fn total_len(&self) -> usize {
        self.deck_len() + self.display_len() + self.discard_len()
    }
}

/// Group requested identities into per-identity counts.
pub(crate) fn count_identities(identities: &[CardIdentity]) -> BTreeMap<CardIdentity, usize> {
    let mut counts = BTreeMap::new();
    for identity in identities {
        *counts.entry(*identity).or_insert(0) += 1;
    }
    counts
}

/// Assert the cards may be discarded into `pile`.
pub(crate) fn assert_discardable(pile: &dyn MarketPile, cards: &[CardInstance]) {
    for card in cards {
        assert!(
            card.category() == pile.category(),
            "Cannot discard {} into the {} pile",
            card,
            pile.category()
        );
        assert!(
            !pile.contains(card.entity_id),
            "{} already resides in the {} pile",
            card,
            pile.category()
        );
    }
}

/// Remove the card with `entity_id` from `cards`, if present.
pub(crate) fn remove_by_id(cards: &mut Vec<CardInstance>, entity_id: EntityId) -> Option<CardInstance> {
    let position = cards.iter().position(|card| card.entity_id == entity_id)?;
    Some(cards.remove(position))
}
