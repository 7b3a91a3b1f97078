//! Card definitions - immutable catalog data.
//!
//! A `Card` is either a resource or a building. Both share an identity, a
//! display name and a trade value; the variant-specific payloads carry the
//! acquisition cost, capital requirement and building effect.
//!
//! Per-copy data (which instance, where it lives) belongs to `CardInstance`.

use serde::{Deserialize, Serialize};

use super::cost::CostOptions;
use super::identity::{CardIdentity, Category};

/// Resource card template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCard {
    pub identity: CardIdentity,
    pub name: String,
    pub value: u32,

    /// Cards to spend to produce this resource.
    #[serde(default)]
    pub cost: CostOptions,

    /// Cards to own (not spend) to produce this resource.
    #[serde(default)]
    pub capital: CostOptions,
}

impl ResourceCard {
    #[must_use]
    pub fn new(identity: CardIdentity, name: impl Into<String>, value: u32) -> Self {
        Self {
            identity,
            name: name.into(),
            value,
            cost: CostOptions::none(),
            capital: CostOptions::none(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: CostOptions) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_capital(mut self, capital: CostOptions) -> Self {
        self.capital = capital;
        self
    }
}

/// Building card template.
///
/// `points` are scored while the building is owned. The `effect_*` fields
/// govern activation, which is separate from acquisition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingCard {
    pub identity: CardIdentity,
    pub name: String,
    pub value: u32,

    /// Cards to spend to acquire this building.
    #[serde(default)]
    pub cost: CostOptions,

    #[serde(default)]
    pub points: u32,

    #[serde(default)]
    pub effect_cost: CostOptions,

    #[serde(default)]
    pub effect_capital: CostOptions,

    /// What activation produces, if anything.
    #[serde(default)]
    pub effect_product: Option<CardIdentity>,

    /// Points granted per activation.
    #[serde(default)]
    pub effect_points: u32,

    /// Seeds the opening display of the building pile.
    #[serde(default)]
    pub is_starting_building: bool,

    #[serde(default)]
    pub is_extension: bool,
}

impl BuildingCard {
    #[must_use]
    pub fn new(identity: CardIdentity, name: impl Into<String>, value: u32) -> Self {
        Self {
            identity,
            name: name.into(),
            value,
            cost: CostOptions::none(),
            points: 0,
            effect_cost: CostOptions::none(),
            effect_capital: CostOptions::none(),
            effect_product: None,
            effect_points: 0,
            is_starting_building: false,
            is_extension: false,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: CostOptions) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn with_effect_cost(mut self, cost: CostOptions) -> Self {
        self.effect_cost = cost;
        self
    }

    #[must_use]
    pub fn with_effect_capital(mut self, capital: CostOptions) -> Self {
        self.effect_capital = capital;
        self
    }

    #[must_use]
    pub fn with_effect_product(mut self, product: CardIdentity) -> Self {
        self.effect_product = Some(product);
        self
    }

    #[must_use]
    pub fn with_effect_points(mut self, points: u32) -> Self {
        self.effect_points = points;
        self
    }

    #[must_use]
    pub fn starting(mut self) -> Self {
        self.is_starting_building = true;
        self
    }

    #[must_use]
    pub fn extension(mut self) -> Self {
        self.is_extension = true;
        self
    }
}

/// A catalog card: resource or building.
///
/// ## Example
///
/// ```
/// use market_engine::cards::{BuildingCard, Card, CardIdentity, CostOptions};
///
/// let kiln = Card::Building(
///     BuildingCard::new(CardIdentity::building(3), "Kiln", 3)
///         .with_points(1)
///         .with_effect_cost(CostOptions::single([CardIdentity::basic(4)]))
///         .with_effect_points(2),
/// );
///
/// assert_eq!(kiln.points(), 1);
/// assert!(kiln.as_building().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Card {
    Resource(ResourceCard),
    Building(BuildingCard),
}

impl Card {
    #[must_use]
    pub fn identity(&self) -> CardIdentity {
        match self {
            Card::Resource(card) => card.identity,
            Card::Building(card) => card.identity,
        }
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.identity().category
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Card::Resource(card) => &card.name,
            Card::Building(card) => &card.name,
        }
    }

    /// Trade value.
    #[must_use]
    pub fn value(&self) -> u32 {
        match self {
            Card::Resource(card) => card.value,
            Card::Building(card) => card.value,
        }
    }

    /// What must be spent to produce (resource) or acquire (building) this card.
    #[must_use]
    pub fn cost(&self) -> &CostOptions {
        match self {
            Card::Resource(card) => &card.cost,
            Card::Building(card) => &card.cost,
        }
    }

    /// Capital requirement. Buildings have none.
    #[must_use]
    pub fn capital(&self) -> Option<&CostOptions> {
        match self {
            Card::Resource(card) => Some(&card.capital),
            Card::Building(_) => None,
        }
    }

    /// Points scored passively while owned.
    #[must_use]
    pub fn points(&self) -> u32 {
        match self {
            Card::Resource(_) => 0,
            Card::Building(card) => card.points,
        }
    }

    #[must_use]
    pub fn as_building(&self) -> Option<&BuildingCard> {
        match self {
            Card::Building(card) => Some(card),
            Card::Resource(_) => None,
        }
    }

    #[must_use]
    pub fn as_resource(&self) -> Option<&ResourceCard> {
        match self {
            Card::Resource(card) => Some(card),
            Card::Building(_) => None,
        }
    }

    /// Does the variant agree with the identity's category?
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self {
            Card::Resource(card) => card.identity.category.is_resource(),
            Card::Building(card) => card.identity.category == Category::Building,
        }
    }
}

impl From<ResourceCard> for Card {
    fn from(card: ResourceCard) -> Self {
        Card::Resource(card)
    }
}

impl From<BuildingCard> for Card {
    fn from(card: BuildingCard) -> Self {
        Card::Building(card)
    }
}
