//! Unique-slot pile: fixed slots, one card per identity.
//!
//! Used for the level-two resources and the buildings. Each identity has a
//! single physical copy in these tiers, so the deck is rejected at setup if
//! it holds duplicates, and no identity can ever occupy two slots.
//!
//! ## Starting buildings
//!
//! The building pile seeds its earliest slots with up to
//! `min(slots, players + 1)` cards flagged as starting buildings before the
//! normal refill runs. Surplus starting buildings go to the discard pile so a
//! later reshuffle can still bring them out.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::{assert_discardable, MarketPile};
use crate::cards::{CardIdentity, CardInstance, Category};
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;
use crate::core::state::PileState;
use crate::error::SetupError;

/// Pile with a fixed array of single-card slots.
#[derive(Clone, Debug)]
pub struct UniqueSlotPile {
    category: Category,
    slots: Vec<Option<CardInstance>>,
    deck: Vec<CardInstance>,
    discard: Vec<CardInstance>,
}

impl UniqueSlotPile {
    /// Shuffle `cards` into the deck and fill the slots.
    ///
    /// # Panics
    ///
    /// If `slot_count` is zero or a card belongs to another category.
    pub fn new(
        category: Category,
        slot_count: usize,
        cards: Vec<CardInstance>,
        rng: &mut GameRng,
    ) -> Result<Self, SetupError> {
        let mut pile = Self::empty(category, slot_count, cards)?;
        rng.shuffle(&mut pile.deck);
        pile.refill(rng);
        Ok(pile)
    }

    /// Building pile: seed starting buildings, then fill the rest.
    pub fn with_starting_buildings(
        slot_count: usize,
        cards: Vec<CardInstance>,
        player_count: usize,
        rng: &mut GameRng,
    ) -> Result<Self, SetupError> {
        let mut pile = Self::empty(Category::Building, slot_count, cards)?;
        let cards = std::mem::take(&mut pile.deck);

        let (mut starting, rest): (Vec<_>, Vec<_>) = cards.into_iter().partition(is_starting_building);
        rng.shuffle(&mut starting);

        let seeded = slot_count.min(player_count + 1).min(starting.len());
        let surplus = starting.split_off(seeded);
        for (slot, card) in pile.slots.iter_mut().zip(starting) {
            *slot = Some(card);
        }

        trace!(seeded, surplus = surplus.len(), "seeded starting buildings");

        pile.discard = surplus;
        pile.deck = rest;
        rng.shuffle(&mut pile.deck);
        pile.refill(rng);
        Ok(pile)
    }

    fn empty(category: Category, slot_count: usize, deck: Vec<CardInstance>) -> Result<Self, SetupError> {
        assert!(slot_count > 0, "A unique-slot pile needs at least one slot");
        for card in &deck {
            assert!(
                card.category() == category,
                "Cannot place {} in the {} pile",
                card,
                category
            );
        }
        check_unique(&deck)?;

        Ok(Self {
            category,
            slots: vec![None; slot_count],
            deck,
            discard: Vec::new(),
        })
    }

    /// Slot contents in index order.
    #[must_use]
    pub fn slots(&self) -> &[Option<CardInstance>] {
        &self.slots
    }

    /// Identities currently displayed.
    pub fn displayed_identities(&self) -> impl Iterator<Item = CardIdentity> + '_ {
        self.slots.iter().flatten().map(CardInstance::identity)
    }

    fn holds_identity(&self, identity: CardIdentity) -> bool {
        self.slots
            .iter()
            .flatten()
            .chain(&self.deck)
            .chain(&self.discard)
            .any(|card| card.identity() == identity)
    }

    fn reshuffle(&mut self, rng: &mut GameRng) {
        trace!(category = %self.category, count = self.discard.len(), "reshuffling discard into deck");
        self.deck.append(&mut self.discard);
        rng.shuffle(&mut self.deck);
    }
}

impl MarketPile for UniqueSlotPile {
    fn category(&self) -> Category {
        self.category
    }

    fn query(&self, identities: &[CardIdentity]) -> Option<Vec<CardInstance>> {
        let distinct: FxHashSet<_> = identities.iter().collect();
        if distinct.len() != identities.len() {
            return None;
        }

        identities
            .iter()
            .map(|identity| {
                self.slots
                    .iter()
                    .flatten()
                    .find(|card| card.identity() == *identity)
                    .cloned()
            })
            .collect()
    }

    fn take(&mut self, cards: &[CardInstance]) -> Vec<CardInstance> {
        cards
            .iter()
            .map(|card| {
                self.slots
                    .iter_mut()
                    .find(|slot| matches!(slot, Some(held) if held.entity_id == card.entity_id))
                    .and_then(Option::take)
                    .unwrap_or_else(|| panic!("{} is not on display", card))
            })
            .collect()
    }

    fn discard(&mut self, cards: Vec<CardInstance>) {
        assert_discardable(&*self, &cards);
        for card in &cards {
            assert!(
                !self.holds_identity(card.identity()),
                "{} would duplicate an identity in the {} pile",
                card,
                self.category
            );
        }
        self.discard.extend(cards);
    }

    fn refill(&mut self, rng: &mut GameRng) {
        let mut filled = 0;
        for index in 0..self.slots.len() {
            if self.slots[index].is_some() {
                continue;
            }
            if self.deck.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.reshuffle(rng);
            }
            self.slots[index] = self.deck.pop();
            filled += 1;
        }
        trace!(category = %self.category, filled, "refilled unique slots");
    }

    fn deck_len(&self) -> usize {
        self.deck.len()
    }

    fn display_len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    fn discard_len(&self) -> usize {
        self.discard.len()
    }

    fn contains(&self, entity_id: EntityId) -> bool {
        self.slots
            .iter()
            .flatten()
            .chain(&self.deck)
            .chain(&self.discard)
            .any(|card| card.entity_id == entity_id)
    }

    fn state(&self) -> PileState {
        PileState {
            category: self.category,
            display: self
                .slots
                .iter()
                .map(|slot| slot.iter().cloned().collect())
                .collect(),
            deck_size: self.deck.len(),
            discard: self.discard.clone(),
        }
    }
}

fn check_unique(cards: &[CardInstance]) -> Result<(), SetupError> {
    let mut seen = FxHashSet::default();
    for card in cards {
        if !seen.insert(card.identity()) {
            return Err(SetupError::DuplicateIdentity(card.identity()));
        }
    }
    Ok(())
}

fn is_starting_building(card: &CardInstance) -> bool {
    card.card
        .as_building()
        .is_some_and(|building| building.is_starting_building)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BuildingCard, Card};
    use crate::market::test_support::instances;

    fn level_two(count: u32) -> Vec<CardInstance> {
        (1..=count)
            .flat_map(|n| instances(CardIdentity::level_two(n), 1, n))
            .collect()
    }

    fn buildings(starting: u32, normal: u32) -> Vec<CardInstance> {
        (1..=starting + normal)
            .map(|n| {
                let mut card = BuildingCard::new(CardIdentity::building(n), format!("B{n}"), 3);
                if n <= starting {
                    card = card.starting();
                }
                CardInstance::from_template(EntityId(n), &Card::from(card))
            })
            .collect()
    }

    fn assert_unique_display(pile: &UniqueSlotPile) {
        let shown: Vec<_> = pile.displayed_identities().collect();
        let distinct: FxHashSet<_> = shown.iter().collect();
        assert_eq!(shown.len(), distinct.len());
    }

    #[test]
    fn test_fills_all_slots() {
        let pile = UniqueSlotPile::new(Category::LevelTwoResource, 5, level_two(8), &mut GameRng::new(1))
            .unwrap();

        assert_eq!(pile.display_len(), 5);
        assert_eq!(pile.deck_len(), 3);
        assert_unique_display(&pile);
    }

    #[test]
    fn test_small_deck_leaves_slots_empty() {
        let pile = UniqueSlotPile::new(Category::LevelTwoResource, 5, level_two(3), &mut GameRng::new(1))
            .unwrap();

        assert_eq!(pile.display_len(), 3);
        assert!(pile.slots()[3].is_none());
        assert!(pile.slots()[4].is_none());
    }

    #[test]
    fn test_rejects_duplicate_identities() {
        let mut cards = level_two(3);
        cards.extend(instances(CardIdentity::level_two(2), 1, 50));

        let result = UniqueSlotPile::new(Category::LevelTwoResource, 5, cards, &mut GameRng::new(1));
        assert_eq!(
            result.unwrap_err(),
            SetupError::DuplicateIdentity(CardIdentity::level_two(2))
        );
    }

    #[test]
    fn test_query_rejects_repeated_request() {
        let pile = UniqueSlotPile::new(Category::LevelTwoResource, 5, level_two(5), &mut GameRng::new(2))
            .unwrap();
        let shown = CardIdentity::level_two(1);

        assert_eq!(pile.query(&[shown]).unwrap().len(), 1);
        assert!(pile.query(&[shown, shown]).is_none());
        assert!(pile.query(&[CardIdentity::level_two(9)]).is_none());
    }

    #[test]
    fn test_take_nulls_slot_and_refill_fills_lowest_index() {
        let mut rng = GameRng::new(3);
        let mut pile = UniqueSlotPile::new(Category::LevelTwoResource, 5, level_two(7), &mut rng).unwrap();

        let second = pile.slots()[1].clone().unwrap();
        let fourth = pile.slots()[3].clone().unwrap();
        pile.take(&[fourth, second]);
        assert!(pile.slots()[1].is_none());
        assert!(pile.slots()[3].is_none());

        pile.refill(&mut rng);
        assert_eq!(pile.display_len(), 5);
        assert_eq!(pile.deck_len(), 0);
        assert_unique_display(&pile);
    }

    #[test]
    fn test_refill_reshuffles_discard() {
        let mut rng = GameRng::new(4);
        let mut pile = UniqueSlotPile::new(Category::LevelTwoResource, 2, level_two(2), &mut rng).unwrap();

        let shown = pile.slots()[0].clone().unwrap();
        let taken = pile.take(&[shown]);
        pile.discard(taken);
        assert_eq!(pile.discard_len(), 1);

        pile.refill(&mut rng);
        assert_eq!(pile.display_len(), 2);
        assert_eq!(pile.discard_len(), 0);
    }

    #[test]
    fn test_starting_buildings_seed_first_slots() {
        for seed in 0..10 {
            let pile = UniqueSlotPile::with_starting_buildings(5, buildings(4, 6), 2, &mut GameRng::new(seed))
                .unwrap();

            for slot in &pile.slots()[..3] {
                assert!(is_starting_building(slot.as_ref().unwrap()));
            }
            assert_eq!(pile.discard_len(), 1);
            assert!(pile.discard.iter().all(is_starting_building));
            assert_eq!(pile.display_len(), 5);
            assert_eq!(pile.total_len(), 10);
            assert_unique_display(&pile);
        }
    }

    #[test]
    fn test_starting_buildings_bounded_by_slots() {
        let pile = UniqueSlotPile::with_starting_buildings(3, buildings(5, 2), 4, &mut GameRng::new(5))
            .unwrap();

        assert!(pile.slots().iter().flatten().all(is_starting_building));
        assert_eq!(pile.discard_len(), 2);
        assert_eq!(pile.deck_len(), 2);
    }

    #[test]
    #[should_panic(expected = "would duplicate an identity")]
    fn test_discard_duplicate_identity_panics() {
        let mut pile = UniqueSlotPile::new(Category::LevelTwoResource, 5, level_two(5), &mut GameRng::new(6))
            .unwrap();
        pile.discard(instances(CardIdentity::level_two(1), 1, 700));
    }

    #[test]
    #[should_panic(expected = "is not on display")]
    fn test_take_missing_panics() {
        let mut pile = UniqueSlotPile::new(Category::LevelTwoResource, 5, level_two(7), &mut GameRng::new(7))
            .unwrap();
        let in_deck = pile.deck[0].clone();
        pile.take(&[in_deck]);
    }
}
