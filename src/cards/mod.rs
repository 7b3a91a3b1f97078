//! Card system: identities, templates, instances and deck building.
//!
//! ## Key Types
//!
//! - `CardIdentity`: Category plus type number, the lookup key for a kind of card
//! - `Card`: Immutable template, either a `ResourceCard` or a `BuildingCard`
//! - `CostOptions`: Disjunctive cost or capital requirement
//! - `CardInstance`: One physical copy of a template
//! - `Catalog`: Template lookup
//! - `DeckFactory`: Builds fresh, shuffled instances for a game

pub mod cost;
pub mod deck;
pub mod definition;
pub mod identity;
pub mod instance;
pub mod quantity;
pub mod registry;

pub use cost::{same_multiset, CostOptions, IdentityBag};
pub use deck::{Deck, DeckFactory};
pub use definition::{BuildingCard, Card, ResourceCard};
pub use identity::{CardIdentity, Category, IdentityBounds};
pub use instance::{identities_of, CardInstance};
pub use quantity::QuantityTable;
pub use registry::Catalog;
