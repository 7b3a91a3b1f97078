//! Serializable snapshots of board and player state.
//!
//! Snapshots are plain data for a presentation layer: they copy what is
//! visible and hold no references back into the game.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{CardInstance, Category};

/// One pile as seen from outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileState {
    pub category: Category,

    /// Display positions. Columns for column piles; slots for unique-slot
    /// piles, where an empty slot is an empty list.
    pub display: Vec<Vec<CardInstance>>,

    /// Cards left in the draw deck. Contents stay hidden.
    pub deck_size: usize,

    /// Discarded cards, face up.
    pub discard: Vec<CardInstance>,
}

impl PileState {
    /// Cards currently on display.
    #[must_use]
    pub fn display_len(&self) -> usize {
        self.display.iter().map(Vec::len).sum()
    }

    /// Deck plus display plus discard.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.deck_size + self.display_len() + self.discard.len()
    }
}

/// All four piles, in `Category::ALL` order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub basic: PileState,
    pub level_one: PileState,
    pub level_two: PileState,
    pub buildings: PileState,
}

impl BoardState {
    #[must_use]
    pub fn pile(&self, category: Category) -> &PileState {
        match category {
            Category::BasicResource => &self.basic,
            Category::LevelOneResource => &self.level_one,
            Category::LevelTwoResource => &self.level_two,
            Category::Building => &self.buildings,
        }
    }
}

/// Everything public about one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub resources: Vec<CardInstance>,
    pub buildings: Vec<CardInstance>,
    pub activated_buildings: Vec<CardInstance>,
    pub coin: u32,
    pub score: u32,
    pub has_acted_this_turn: bool,
}

/// Full public game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: BoardState,

    /// Players in turn order.
    pub players: Vec<PlayerView>,

    pub turn_order: Vec<PlayerId>,
    pub current_player: PlayerId,
    pub turn_number: u32,
    pub winner: Option<PlayerId>,
}

impl GameSnapshot {
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|view| view.id == id)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}
