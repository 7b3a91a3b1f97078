//! Disjunctive cost and capital requirements.
//!
//! A requirement is a list of alternative options; each option is a multiset
//! of identities. Submitting identities satisfies the requirement when they
//! equal any one option as a multiset: duplicates count, order does not.
//!
//! ```
//! use market_engine::cards::{CardIdentity, CostOptions};
//!
//! let a = CardIdentity::basic(1);
//! let b = CardIdentity::basic(2);
//! let c = CardIdentity::basic(3);
//!
//! let cost = CostOptions::any_of([vec![a, b], vec![c]]);
//!
//! assert!(cost.matches(&[b, a]));
//! assert!(cost.matches(&[c]));
//! assert!(!cost.matches(&[a]));
//! assert!(!cost.matches(&[a, b, c]));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::identity::CardIdentity;

/// A multiset of identities. Most options hold four or fewer cards.
pub type IdentityBag = SmallVec<[CardIdentity; 4]>;

/// Alternative options, any one of which satisfies the requirement.
///
/// An empty `CostOptions` can never be satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostOptions {
    options: Vec<IdentityBag>,
}

impl CostOptions {
    /// A requirement nothing satisfies.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A requirement with exactly one option.
    #[must_use]
    pub fn single(option: impl IntoIterator<Item = CardIdentity>) -> Self {
        Self::any_of([option])
    }

    /// A requirement satisfied by any of the given options.
    #[must_use]
    pub fn any_of<I, O>(options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: IntoIterator<Item = CardIdentity>,
    {
        Self {
            options: options
                .into_iter()
                .map(|option| option.into_iter().collect())
                .collect(),
        }
    }

    /// A capital requirement: one multiset, or nothing if `items` is empty.
    #[must_use]
    pub fn capital(items: impl IntoIterator<Item = CardIdentity>) -> Self {
        let bag: IdentityBag = items.into_iter().collect();
        if bag.is_empty() {
            Self::none()
        } else {
            Self { options: vec![bag] }
        }
    }

    /// The alternative options.
    #[must_use]
    pub fn options(&self) -> &[IdentityBag] {
        &self.options
    }

    /// True when no option exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Does `submitted` equal any option as a multiset?
    #[must_use]
    pub fn matches(&self, submitted: &[CardIdentity]) -> bool {
        self.options
            .iter()
            .any(|option| same_multiset(option, submitted))
    }

    /// Every identity mentioned by any option.
    pub fn identities(&self) -> impl Iterator<Item = CardIdentity> + '_ {
        self.options.iter().flat_map(|option| option.iter().copied())
    }
}

/// Multiset equality of two identity lists.
#[must_use]
pub fn same_multiset(left: &[CardIdentity], right: &[CardIdentity]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut left: IdentityBag = left.iter().copied().collect();
    let mut right: IdentityBag = right.iter().copied().collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}
