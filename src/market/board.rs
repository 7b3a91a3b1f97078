//! The game board: one pile per category.
//!
//! The board routes identity-based queries, takes and discards to the pile
//! of each identity's category. A mixed request is split by category and only
//! succeeds if every pile can satisfy its part.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BoundedColumnsPile, IdentityColumnsPile, MarketPile, UniqueSlotPile};
use crate::cards::{CardIdentity, CardInstance, Category, Deck};
use crate::core::config::GameConfig;
use crate::core::rng::GameRng;
use crate::core::state::BoardState;
use crate::error::SetupError;

/// Card instances grouped by category.
///
/// Produced by `GameBoard::query` and consumed by `GameBoard::take`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBundle {
    cards: BTreeMap<Category, Vec<CardInstance>>,
}

impl CardBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card under its category.
    pub fn push(&mut self, card: CardInstance) {
        self.cards.entry(card.category()).or_default().push(card);
    }

    /// Cards of one category.
    #[must_use]
    pub fn get(&self, category: Category) -> &[CardInstance] {
        self.cards.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of trade values.
    #[must_use]
    pub fn total_value(&self) -> u32 {
        self.iter().map(CardInstance::value).sum()
    }

    /// Cards that count toward the hand limit.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.iter().filter(|card| card.category().is_resource()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate in category order.
    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.values().flatten()
    }

    /// Every card in category order.
    #[must_use]
    pub fn into_cards(self) -> Vec<CardInstance> {
        self.cards.into_values().flatten().collect()
    }
}

impl FromIterator<CardInstance> for CardBundle {
    fn from_iter<I: IntoIterator<Item = CardInstance>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for card in iter {
            bundle.push(card);
        }
        bundle
    }
}

/// The shared market.
///
/// ## Example
///
/// ```
/// use market_engine::cards::CardIdentity;
/// use market_engine::core::{EntityAllocator, GameConfig, GameRng};
/// use market_engine::market::GameBoard;
/// use market_engine::sample::sample_factory;
///
/// let mut rng = GameRng::new(11);
/// let deck = sample_factory()
///     .build_deck(2, &mut EntityAllocator::new(), &mut rng)
///     .unwrap();
/// let board = GameBoard::new(deck, 2, &GameConfig::default(), &mut rng).unwrap();
///
/// let timber = CardIdentity::basic(1);
/// let bundle = board.query(&[timber, timber]).unwrap();
/// assert_eq!(bundle.total_value(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct GameBoard {
    basic: IdentityColumnsPile,
    level_one: BoundedColumnsPile,
    level_two: UniqueSlotPile,
    buildings: UniqueSlotPile,
}

impl GameBoard {
    /// Deal a fresh deck into the four piles.
    pub fn new(
        mut deck: Deck,
        player_count: usize,
        config: &GameConfig,
        rng: &mut GameRng,
    ) -> Result<Self, SetupError> {
        config.validate()?;

        let basic = IdentityColumnsPile::new(
            Category::BasicResource,
            deck.take_category(Category::BasicResource),
        );
        let level_one = BoundedColumnsPile::new(
            Category::LevelOneResource,
            config.level_one_columns,
            deck.take_category(Category::LevelOneResource),
            rng,
        );
        let level_two = UniqueSlotPile::new(
            Category::LevelTwoResource,
            config.unique_slots,
            deck.take_category(Category::LevelTwoResource),
            rng,
        )?;
        let buildings = UniqueSlotPile::with_starting_buildings(
            config.unique_slots,
            deck.take_category(Category::Building),
            player_count,
            rng,
        )?;

        Ok(Self {
            basic,
            level_one,
            level_two,
            buildings,
        })
    }

    /// The pile holding `category`.
    #[must_use]
    pub fn pile(&self, category: Category) -> &dyn MarketPile {
        match category {
            Category::BasicResource => &self.basic,
            Category::LevelOneResource => &self.level_one,
            Category::LevelTwoResource => &self.level_two,
            Category::Building => &self.buildings,
        }
    }

    fn pile_mut(&mut self, category: Category) -> &mut dyn MarketPile {
        match category {
            Category::BasicResource => &mut self.basic,
            Category::LevelOneResource => &mut self.level_one,
            Category::LevelTwoResource => &mut self.level_two,
            Category::Building => &mut self.buildings,
        }
    }

    /// Find displayed cards for a mixed-category request. All or nothing.
    #[must_use]
    pub fn query(&self, identities: &[CardIdentity]) -> Option<CardBundle> {
        let mut by_category: BTreeMap<Category, Vec<CardIdentity>> = BTreeMap::new();
        for identity in identities {
            by_category.entry(identity.category).or_default().push(*identity);
        }

        let mut bundle = CardBundle::new();
        for (category, requested) in by_category {
            for card in self.pile(category).query(&requested)? {
                bundle.push(card);
            }
        }
        Some(bundle)
    }

    /// Remove a previously queried bundle from the display.
    ///
    /// # Panics
    ///
    /// If any card is no longer on display.
    pub fn take(&mut self, bundle: &CardBundle) -> Vec<CardInstance> {
        let mut taken = Vec::with_capacity(bundle.len());
        for (category, cards) in &bundle.cards {
            taken.extend(self.pile_mut(*category).take(cards));
        }
        taken
    }

    /// Return cards to the piles of their categories.
    pub fn discard(&mut self, cards: Vec<CardInstance>) {
        let bundle: CardBundle = cards.into_iter().collect();
        for (category, cards) in bundle.cards {
            self.pile_mut(category).discard(cards);
        }
    }

    /// Refill every pile.
    pub fn refill(&mut self, rng: &mut GameRng) {
        for category in Category::ALL {
            self.pile_mut(category).refill(rng);
        }
    }

    /// Cards held by the board across all piles.
    #[must_use]
    pub fn total_len(&self) -> usize {
        Category::ALL
            .iter()
            .map(|category| self.pile(*category).total_len())
            .sum()
    }

    #[must_use]
    pub fn state(&self) -> BoardState {
        BoardState {
            basic: self.basic.state(),
            level_one: self.level_one.state(),
            level_two: self.level_two.state(),
            buildings: self.buildings.state(),
        }
    }
}
