//! Card identities: which kind of card, independent of any copy.
//!
//! A `CardIdentity` is the key used everywhere a request names "a card of
//! this kind": market queries, payments, costs and capital requirements.
//! Ordering is by category first, then type number.

use serde::{Deserialize, Serialize};

/// Card category. Each category has its own market pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    BasicResource,
    LevelOneResource,
    LevelTwoResource,
    Building,
}

impl Category {
    /// All categories in pile order.
    pub const ALL: [Category; 4] = [
        Category::BasicResource,
        Category::LevelOneResource,
        Category::LevelTwoResource,
        Category::Building,
    ];

    /// Resource categories count toward the hand limit and can be spent.
    #[must_use]
    pub const fn is_resource(self) -> bool {
        !matches!(self, Category::Building)
    }

    /// Position of this category in `Category::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::BasicResource => "BasicResource",
            Category::LevelOneResource => "LevelOneResource",
            Category::LevelTwoResource => "LevelTwoResource",
            Category::Building => "Building",
        };
        f.write_str(name)
    }
}

/// Identifies a kind of card: category plus a 1-based type number.
///
/// ```
/// use market_engine::cards::{CardIdentity, Category};
///
/// let timber = CardIdentity::new(Category::BasicResource, 1);
/// let plank = CardIdentity::new(Category::LevelOneResource, 1);
///
/// assert!(timber < plank);
/// assert_eq!(timber.to_string(), "BasicResource#1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardIdentity {
    pub category: Category,
    pub type_number: u32,
}

impl CardIdentity {
    #[must_use]
    pub const fn new(category: Category, type_number: u32) -> Self {
        Self {
            category,
            type_number,
        }
    }

    /// Shorthand for a basic resource identity.
    #[must_use]
    pub const fn basic(type_number: u32) -> Self {
        Self::new(Category::BasicResource, type_number)
    }

    /// Shorthand for a level-one resource identity.
    #[must_use]
    pub const fn level_one(type_number: u32) -> Self {
        Self::new(Category::LevelOneResource, type_number)
    }

    /// Shorthand for a level-two resource identity.
    #[must_use]
    pub const fn level_two(type_number: u32) -> Self {
        Self::new(Category::LevelTwoResource, type_number)
    }

    /// Shorthand for a building identity.
    #[must_use]
    pub const fn building(type_number: u32) -> Self {
        Self::new(Category::Building, type_number)
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.category, self.type_number)
    }
}

/// Highest known type number per category, taken from the catalog.
///
/// The engine rejects identities outside `1..=max` before touching any state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityBounds {
    max: [u32; 4],
}

impl IdentityBounds {
    /// Build bounds from per-category maxima in `Category::ALL` order.
    #[must_use]
    pub const fn new(max: [u32; 4]) -> Self {
        Self { max }
    }

    /// Highest type number known for `category`.
    #[must_use]
    pub fn max_type_number(&self, category: Category) -> u32 {
        self.max[category.index()]
    }

    /// Raise the bound for `category` to include `type_number`.
    pub fn include(&mut self, identity: CardIdentity) {
        let slot = &mut self.max[identity.category.index()];
        *slot = (*slot).max(identity.type_number);
    }

    /// Is `identity` a card the catalog knows about?
    #[must_use]
    pub fn contains(&self, identity: CardIdentity) -> bool {
        identity.type_number >= 1 && identity.type_number <= self.max_type_number(identity.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_ordering_is_category_then_type() {
        let mut set = BTreeSet::new();
        set.insert(CardIdentity::building(1));
        set.insert(CardIdentity::basic(3));
        set.insert(CardIdentity::basic(1));
        set.insert(CardIdentity::level_two(2));

        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                CardIdentity::basic(1),
                CardIdentity::basic(3),
                CardIdentity::level_two(2),
                CardIdentity::building(1),
            ]
        );
    }

    #[test]
    fn test_is_resource() {
        assert!(Category::BasicResource.is_resource());
        assert!(Category::LevelTwoResource.is_resource());
        assert!(!Category::Building.is_resource());
    }

    #[test]
    fn test_bounds() {
        let mut bounds = IdentityBounds::default();
        bounds.include(CardIdentity::basic(4));
        bounds.include(CardIdentity::basic(2));

        assert_eq!(bounds.max_type_number(Category::BasicResource), 4);
        assert!(bounds.contains(CardIdentity::basic(1)));
        assert!(bounds.contains(CardIdentity::basic(4)));
        assert!(!bounds.contains(CardIdentity::basic(5)));
        assert!(!bounds.contains(CardIdentity::basic(0)));
        assert!(!bounds.contains(CardIdentity::building(1)));
    }

    #[test]
    fn test_serialization() {
        let identity = CardIdentity::level_one(3);
        let json = serde_json::to_string(&identity).unwrap();
        let deserialized: CardIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(identity, deserialized);
    }
}
