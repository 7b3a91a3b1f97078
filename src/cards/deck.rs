//! Deck factory: turns a catalog and quantity table into card instances.
//!
//! A `DeckFactory` is built once and passed by reference to every game.
//! Each call to `build_deck` copies the templates afresh, so games never
//! share card instances.

use serde::{Deserialize, Serialize};

use super::definition::Card;
use super::identity::Category;
use super::instance::CardInstance;
use super::quantity::QuantityTable;
use super::registry::Catalog;
use crate::core::config::GameConfig;
use crate::core::entity::EntityAllocator;
use crate::core::rng::GameRng;
use crate::error::SetupError;

/// Freshly built card instances for one game, grouped by category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: [Vec<CardInstance>; 4],
}

impl Deck {
    /// Cards of one category.
    #[must_use]
    pub fn cards(&self, category: Category) -> &[CardInstance] {
        &self.cards[category.index()]
    }

    /// Remove and return the cards of one category.
    pub fn take_category(&mut self, category: Category) -> Vec<CardInstance> {
        std::mem::take(&mut self.cards[category.index()])
    }

    /// Total cards across categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.iter().all(Vec::is_empty)
    }
}

/// Builds per-game decks from shared catalog data.
///
/// ## Example
///
/// ```
/// use market_engine::cards::Category;
/// use market_engine::core::{EntityAllocator, GameRng};
/// use market_engine::sample::sample_factory;
///
/// let factory = sample_factory();
/// let mut alloc = EntityAllocator::new();
/// let mut rng = GameRng::new(7);
///
/// let deck = factory.build_deck(2, &mut alloc, &mut rng).unwrap();
/// assert!(!deck.cards(Category::BasicResource).is_empty());
/// assert_eq!(deck.len() as u32, alloc.allocated());
/// ```
#[derive(Clone, Debug)]
pub struct DeckFactory {
    catalog: Catalog,
    quantities: QuantityTable,
}

impl DeckFactory {
    /// Every catalog template must have a quantity entry.
    pub fn new(catalog: Catalog, quantities: QuantityTable) -> Result<Self, SetupError> {
        if let Some(missing) = catalog.iter().find(|card| !quantities.contains(card.identity())) {
            return Err(SetupError::MissingQuantity(missing.identity()));
        }
        Ok(Self {
            catalog,
            quantities,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn quantities(&self) -> &QuantityTable {
        &self.quantities
    }

    /// Copy every template `quantity(identity, player_count)` times and
    /// shuffle each category.
    pub fn build_deck(
        &self,
        player_count: usize,
        allocator: &mut EntityAllocator,
        rng: &mut GameRng,
    ) -> Result<Deck, SetupError> {
        GameConfig::check_player_count(player_count)?;

        let mut deck = Deck::default();
        for category in Category::ALL {
            let cards = &mut deck.cards[category.index()];
            for template in self.catalog.templates(category) {
                let copies = self.quantities.quantity(template.identity(), player_count)?;
                cards.extend(copy_template(template, copies, allocator));
            }
            rng.shuffle(cards);
        }
        Ok(deck)
    }
}

fn copy_template<'a>(
    template: &'a Card,
    copies: u32,
    allocator: &'a mut EntityAllocator,
) -> impl Iterator<Item = CardInstance> + 'a {
    (0..copies).map(move |_| CardInstance::from_template(allocator.alloc(), template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardIdentity, ResourceCard};
    use rustc_hash::FxHashSet;

    fn small_factory() -> DeckFactory {
        let catalog = Catalog::from_cards([
            ResourceCard::new(CardIdentity::basic(1), "Timber", 1).into(),
            ResourceCard::new(CardIdentity::basic(2), "Ore", 1).into(),
        ])
        .unwrap();
        let mut quantities = QuantityTable::new();
        quantities.set(CardIdentity::basic(1), [2, 3, 4]);
        quantities.set(CardIdentity::basic(2), [1, 1, 1]);
        DeckFactory::new(catalog, quantities).unwrap()
    }

    #[test]
    fn test_quantities_follow_player_count() {
        let factory = small_factory();
        let mut alloc = EntityAllocator::new();
        let mut rng = GameRng::new(1);

        let deck = factory.build_deck(4, &mut alloc, &mut rng).unwrap();
        let basics = deck.cards(Category::BasicResource);

        let timber = basics
            .iter()
            .filter(|c| c.identity() == CardIdentity::basic(1))
            .count();
        assert_eq!(timber, 4);
        assert_eq!(basics.len(), 5);
        assert!(deck.cards(Category::Building).is_empty());
    }

    #[test]
    fn test_instances_have_unique_ids() {
        let factory = small_factory();
        let mut alloc = EntityAllocator::new();
        let mut rng = GameRng::new(2);

        let first = factory.build_deck(2, &mut alloc, &mut rng).unwrap();
        let second = factory.build_deck(2, &mut alloc, &mut rng).unwrap();

        let ids: FxHashSet<_> = first
            .cards(Category::BasicResource)
            .iter()
            .chain(second.cards(Category::BasicResource))
            .map(|c| c.entity_id)
            .collect();
        assert_eq!(ids.len(), first.len() + second.len());
    }

    #[test]
    fn test_missing_quantity_rejected() {
        let catalog = Catalog::from_cards([ResourceCard::new(CardIdentity::basic(1), "Timber", 1).into()])
            .unwrap();

        assert_eq!(
            DeckFactory::new(catalog, QuantityTable::new()).unwrap_err(),
            SetupError::MissingQuantity(CardIdentity::basic(1))
        );
    }

    #[test]
    fn test_rejects_player_count() {
        let factory = small_factory();
        let mut alloc = EntityAllocator::new();
        let mut rng = GameRng::new(3);

        assert_eq!(
            factory.build_deck(1, &mut alloc, &mut rng),
            Err(SetupError::UnsupportedPlayerCount(1))
        );
    }

    #[test]
    fn test_take_category() {
        let factory = small_factory();
        let mut deck = factory
            .build_deck(2, &mut EntityAllocator::new(), &mut GameRng::new(4))
            .unwrap();

        let basics = deck.take_category(Category::BasicResource);
        assert_eq!(basics.len(), 3);
        assert!(deck.is_empty());
    }
}
