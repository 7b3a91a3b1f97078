//! Card instance identification.
//!
//! Many card instances share a `CardIdentity` (five copies of "Timber" are
//! all the same kind of card), but every physical copy in a game gets its own
//! `EntityId`. Piles and hands track instances by `EntityId` so a card is
//! never in two places at once.
//!
//! ## Usage
//!
//! ```
//! use market_engine::core::{EntityAllocator, EntityId};
//!
//! let mut alloc = EntityAllocator::new();
//! let first = alloc.alloc();
//! let second = alloc.alloc();
//!
//! assert_eq!(first, EntityId(0));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out fresh `EntityId`s in increasing order.
///
/// One allocator is used per game so ids never collide across piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at `EntityId(0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
