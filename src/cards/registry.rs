//! Card catalog for template lookup.
//!
//! The `Catalog` stores the unique template cards of every category in
//! insertion order. It is built once and shared by reference between games.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::Card;
use super::identity::{CardIdentity, Category, IdentityBounds};
use crate::error::SetupError;

/// Catalog of card templates.
///
/// ## Example
///
/// ```
/// use market_engine::cards::{Card, CardIdentity, Catalog, Category, ResourceCard};
///
/// let mut catalog = Catalog::new();
/// catalog.register(ResourceCard::new(CardIdentity::basic(1), "Timber", 1).into()).unwrap();
///
/// let found = catalog.get(CardIdentity::basic(1)).unwrap();
/// assert_eq!(found.name(), "Timber");
/// assert_eq!(catalog.max_type_number(Category::BasicResource), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Catalog {
    templates: [Vec<Card>; 4],
    index: FxHashMap<CardIdentity, (Category, usize)>,
    bounds: IdentityBounds,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template.
    ///
    /// Rejects variants that disagree with their category, type numbers
    /// below 1 and identities already registered.
    pub fn register(&mut self, card: Card) -> Result<(), SetupError> {
        let identity = card.identity();

        if !card.is_well_formed() {
            return Err(SetupError::CategoryMismatch(identity));
        }
        if identity.type_number == 0 {
            return Err(SetupError::InvalidTypeNumber(identity));
        }
        if self.index.contains_key(&identity) {
            return Err(SetupError::DuplicateTemplate(identity));
        }

        let list = &mut self.templates[identity.category.index()];
        self.index.insert(identity, (identity.category, list.len()));
        list.push(card);
        self.bounds.include(identity);
        Ok(())
    }

    /// Build a catalog from a list of templates.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, SetupError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Templates of one category in registration order.
    #[must_use]
    pub fn templates(&self, category: Category) -> &[Card] {
        &self.templates[category.index()]
    }

    /// Look up a template by identity.
    #[must_use]
    pub fn get(&self, identity: CardIdentity) -> Option<&Card> {
        let (category, position) = *self.index.get(&identity)?;
        self.templates[category.index()].get(position)
    }

    /// Check if an identity is registered.
    #[must_use]
    pub fn contains(&self, identity: CardIdentity) -> bool {
        self.index.contains_key(&identity)
    }

    #[must_use]
    pub fn max_type_number(&self, category: Category) -> u32 {
        self.bounds.max_type_number(category)
    }

    /// Known identity range per category.
    #[must_use]
    pub fn bounds(&self) -> IdentityBounds {
        self.bounds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate over every template, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.templates.iter().flatten()
    }
}

impl TryFrom<Vec<Card>> for Catalog {
    type Error = SetupError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::from_cards(cards)
    }
}

impl From<Catalog> for Vec<Card> {
    fn from(catalog: Catalog) -> Self {
        let [basic, level_one, level_two, buildings] = catalog.templates;
        basic
            .into_iter()
            .chain(level_one)
            .chain(level_two)
            .chain(buildings)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BuildingCard, ResourceCard};

    fn timber() -> Card {
        ResourceCard::new(CardIdentity::basic(1), "Timber", 1).into()
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = Catalog::new();
        catalog.register(timber()).unwrap();
        catalog
            .register(BuildingCard::new(CardIdentity::building(3), "Kiln", 3).into())
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(CardIdentity::building(3)));
        assert_eq!(catalog.get(CardIdentity::building(3)).unwrap().name(), "Kiln");
        assert!(catalog.get(CardIdentity::building(1)).is_none());
        assert_eq!(catalog.templates(Category::BasicResource).len(), 1);
        assert!(catalog.templates(Category::LevelTwoResource).is_empty());
    }

    #[test]
    fn test_bounds_follow_highest_type() {
        let catalog = Catalog::from_cards([
            timber(),
            ResourceCard::new(CardIdentity::basic(4), "Clay", 1).into(),
        ])
        .unwrap();

        let bounds = catalog.bounds();
        assert_eq!(bounds.max_type_number(Category::BasicResource), 4);
        assert!(bounds.contains(CardIdentity::basic(3)));
        assert!(!bounds.contains(CardIdentity::level_one(1)));
    }

    #[test]
    fn test_rejects_duplicate() {
        let mut catalog = Catalog::new();
        catalog.register(timber()).unwrap();

        assert_eq!(
            catalog.register(timber()),
            Err(SetupError::DuplicateTemplate(CardIdentity::basic(1)))
        );
    }

    #[test]
    fn test_rejects_category_mismatch() {
        let wrong: Card = ResourceCard::new(CardIdentity::building(1), "Oops", 1).into();
        assert_eq!(
            Catalog::from_cards([wrong]).unwrap_err(),
            SetupError::CategoryMismatch(CardIdentity::building(1))
        );
    }

    #[test]
    fn test_rejects_zero_type_number() {
        let zero: Card = ResourceCard::new(CardIdentity::basic(0), "Nothing", 1).into();
        assert!(matches!(
            Catalog::from_cards([zero]),
            Err(SetupError::InvalidTypeNumber(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let catalog = Catalog::from_cards([
            ResourceCard::new(CardIdentity::basic(2), "Ore", 1).into(),
            timber(),
        ])
        .unwrap();

        let json = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&json).unwrap();

        let names: Vec<_> = back.iter().map(Card::name).collect();
        assert_eq!(names, vec!["Ore", "Timber"]);
    }
}
