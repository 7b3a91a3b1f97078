//! Player record: hand, buildings, coin and score.
//!
//! ## Ownership queries
//!
//! Engine operations name the cards a player pays with by identity. The
//! player resolves those identities to concrete instances in hand
//! (`equivalent_resources`) without mutating anything, so the engine can
//! finish every check before committing.
//!
//! ## Score
//!
//! Score is the sum of owned buildings' passive points plus the points
//! accumulated from activations.

use rustc_hash::FxHashSet;

use crate::cards::{CardIdentity, CardInstance};
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;
use crate::core::state::PlayerView;
use crate::error::{GameError, OwnedKind};

/// One player's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    resources: Vec<CardInstance>,
    buildings: Vec<CardInstance>,
    activated: FxHashSet<EntityId>,
    coin: u32,
    point_tokens: u32,
    has_acted: bool,
}

impl Player {
    /// A player with an empty hand and no buildings.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, coin: u32) -> Self {
        Self {
            id,
            name: name.into(),
            resources: Vec::new(),
            buildings: Vec::new(),
            activated: FxHashSet::default(),
            coin,
            point_tokens: 0,
            has_acted: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resource cards in hand, in the order received.
    #[must_use]
    pub fn resources(&self) -> &[CardInstance] {
        &self.resources
    }

    #[must_use]
    pub fn buildings(&self) -> &[CardInstance] {
        &self.buildings
    }

    #[must_use]
    pub fn coin(&self) -> u32 {
        self.coin
    }

    /// Passive building points plus activation points.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.point_tokens + self.buildings.iter().map(|card| card.card.points()).sum::<u32>()
    }

    /// Has this player traded or produced this turn?
    #[must_use]
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    /// Cards counted against the hand limit.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_activated(&self, building: EntityId) -> bool {
        self.activated.contains(&building)
    }

    /// Buildings activated this turn.
    pub fn activated_buildings(&self) -> impl Iterator<Item = &CardInstance> {
        self.buildings
            .iter()
            .filter(|card| self.activated.contains(&card.entity_id))
    }

    /// Resolve `identities` to distinct resource cards in hand.
    ///
    /// Each identity consumes one matching card, so duplicates need as many
    /// copies. Returns `None` unless every identity is matched. Buildings are
    /// never used as payment.
    #[must_use]
    pub fn equivalent_resources(&self, identities: &[CardIdentity]) -> Option<Vec<EntityId>> {
        let mut used: FxHashSet<EntityId> = FxHashSet::default();
        let mut found = Vec::with_capacity(identities.len());

        for identity in identities {
            let card = self
                .resources
                .iter()
                .find(|card| card.identity() == *identity && !used.contains(&card.entity_id))?;
            used.insert(card.entity_id);
            found.push(card.entity_id);
        }
        Some(found)
    }

    /// Trade value of the given cards in hand.
    #[must_use]
    pub fn resources_value(&self, ids: &[EntityId]) -> u32 {
        self.resources
            .iter()
            .filter(|card| ids.contains(&card.entity_id))
            .map(CardInstance::value)
            .sum()
    }

    /// Does the hand hold every identity, duplicates counted?
    #[must_use]
    pub fn owns_resources(&self, identities: &[CardIdentity]) -> bool {
        self.equivalent_resources(identities).is_some()
    }

    /// Find an owned copy of `identity` that has not been activated this turn.
    pub fn unactivated_building(&self, identity: CardIdentity) -> Result<&CardInstance, GameError> {
        let mut owned = self
            .buildings
            .iter()
            .filter(|card| card.identity() == identity)
            .peekable();

        if owned.peek().is_none() {
            return Err(GameError::NotOwned(OwnedKind::Building));
        }
        owned
            .find(|card| !self.activated.contains(&card.entity_id))
            .ok_or(GameError::AlreadyActivated)
    }

    /// Would taking `take` resource cards and spending `discard` exceed `limit`?
    #[must_use]
    pub fn would_exceed_hand(&self, take: usize, discard: usize, limit: usize) -> bool {
        (self.resources.len() + take).saturating_sub(discard) > limit
    }

    /// Receive cards: resources into the hand, buildings into the tableau.
    pub fn take(&mut self, cards: Vec<CardInstance>) {
        for card in cards {
            if card.category().is_resource() {
                self.resources.push(card);
            } else {
                self.buildings.push(card);
            }
        }
    }

    /// Remove resource cards from the hand.
    ///
    /// # Panics
    ///
    /// If any id is not in hand. Resolve ids with `equivalent_resources` first.
    pub fn discard(&mut self, ids: &[EntityId]) -> Vec<CardInstance> {
        ids.iter()
            .map(|id| {
                let position = self
                    .resources
                    .iter()
                    .position(|card| card.entity_id == *id)
                    .unwrap_or_else(|| panic!("{} holds no resource {}", self.id, id));
                self.resources.remove(position)
            })
            .collect()
    }

    pub fn receive_coin(&mut self, amount: u32) {
        self.coin += amount;
    }

    /// Spending coin always empties the purse.
    pub fn spend_coin(&mut self) {
        self.coin = 0;
    }

    pub fn add_points(&mut self, points: u32) {
        self.point_tokens += points;
    }

    /// Mark an owned building as activated for the rest of the turn.
    ///
    /// # Panics
    ///
    /// If the building is not owned.
    pub fn activate_building(&mut self, building: EntityId) {
        assert!(
            self.buildings.iter().any(|card| card.entity_id == building),
            "{} does not own building {}",
            self.id,
            building
        );
        self.activated.insert(building);
    }

    pub fn reset_activated_buildings(&mut self) {
        self.activated.clear();
    }

    pub fn mark_acted(&mut self) {
        self.has_acted = true;
    }

    pub fn reset_acted(&mut self) {
        self.has_acted = false;
    }

    /// Public view for snapshots.
    #[must_use]
    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id,
            name: self.name.clone(),
            resources: self.resources.clone(),
            buildings: self.buildings.clone(),
            activated_buildings: self.activated_buildings().cloned().collect(),
            coin: self.coin,
            score: self.score(),
            has_acted_this_turn: self.has_acted,
        }
    }
}
