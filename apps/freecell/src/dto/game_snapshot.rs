use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game_management::cards::{Card, SuitSymbols};
use crate::game_management::state::Selection;

/// Everything a front end needs to draw the table after an intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game: GameInfo,
    pub free_cells: Vec<Option<CardSnapshot>>,
    pub foundations: Vec<Option<CardSnapshot>>, // indexed by suit
    pub columns: Vec<Vec<CardSnapshot>>,        // bottom card first
    pub selection: Option<Selection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: Uuid,
    pub seed: u32,
    pub moves: u32,
    pub undos: u32,
    pub won: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub cards_home: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub rank: u8,
    pub suit: u8,
    pub label: String,
}

impl CardSnapshot {
    pub fn new(card: Card, symbols: &SuitSymbols) -> Self {
        CardSnapshot {
            rank: card.rank(),
            suit: card.suit(),
            label: card.label(symbols),
        }
    }
}
