//! Game state module
//!
//! This module contains the board (free cells, foundations and columns),
//! the selection the player is building a move from, and the invariant
//! check that every board must pass.

use serde::{Deserialize, Serialize};

use crate::game_management::cards::{full_deck, Card, DECK_SIZE, KING, SUIT_COUNT};
use crate::game_management::dealing::deal;
use crate::game_management::error::BoardError;
use crate::game_management::rules::{COLUMN_COUNT, FREE_CELL_COUNT};

/// The cards of one game, wherever they currently lie
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Temporary single-card slots
    pub free_cells: [Option<Card>; FREE_CELL_COUNT],
    /// Top card of each foundation, indexed by suit
    pub foundations: [Option<Card>; SUIT_COUNT],
    /// Tableau columns, last card on top
    pub columns: [Vec<Card>; COLUMN_COUNT],
}

impl Board {
    /// Board with nothing on it; handy for building positions by hand
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fresh board for game number `seed`
    pub fn dealt(seed: u32) -> Self {
        Board {
            columns: deal(seed),
            ..Self::default()
        }
    }

    pub fn column(&self, column: usize) -> Option<&[Card]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    pub fn column_top(&self, column: usize) -> Option<Card> {
        self.columns.get(column).and_then(|c| c.last().copied())
    }

    pub fn free_cell(&self, cell: usize) -> Option<Card> {
        self.free_cells.get(cell).copied().flatten()
    }

    /// Rank on the foundation of `suit`, 0 when empty
    pub fn foundation_rank(&self, suit: usize) -> u8 {
        self.foundations
            .get(suit)
            .copied()
            .flatten()
            .map_or(0, |card| card.rank())
    }

    pub fn first_empty_free_cell(&self) -> Option<usize> {
        self.free_cells.iter().position(Option::is_none)
    }

    pub fn empty_free_cells(&self) -> usize {
        self.free_cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn empty_columns(&self) -> usize {
        self.columns.iter().filter(|column| column.is_empty()).count()
    }

    /// Number of cards already on the foundations
    pub fn cards_home(&self) -> usize {
        (0..SUIT_COUNT).map(|s| self.foundation_rank(s) as usize).sum()
    }

    /// All four foundations are complete
    pub fn is_solved(&self) -> bool {
        (0..SUIT_COUNT).all(|s| self.foundation_rank(s) == KING)
    }

    /// Check that exactly the 52 cards are present, each once.
    ///
    /// A foundation topped by rank r stands for ranks 1..=r of its suit, so
    /// a gap or a duplicate on a foundation shows up as a duplicate here.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut seen = [false; DECK_SIZE];
        let mut mark = |card: Card| -> Result<(), BoardError> {
            if !card.is_valid() {
                return Err(BoardError::InvalidCard(card));
            }
            if std::mem::replace(&mut seen[card.index()], true) {
                return Err(BoardError::DuplicateCard(card));
            }
            Ok(())
        };

        for (slot, top) in self.foundations.iter().enumerate() {
            let Some(top) = top else { continue };
            if !top.is_valid() {
                return Err(BoardError::InvalidCard(*top));
            }
            if top.suit_index() != slot {
                return Err(BoardError::FoundationSuitMismatch { slot, card: *top });
            }
            for rank in 1..=top.rank() {
                mark(Card::from_parts(rank, top.suit()))?;
            }
        }
        for card in self.free_cells.iter().flatten() {
            mark(*card)?;
        }
        for card in self.columns.iter().flatten() {
            mark(*card)?;
        }

        let missing = seen.iter().filter(|&&s| !s).count();
        if missing > 0 {
            return Err(BoardError::MissingCards(missing));
        }
        Ok(())
    }

    /// The solved position: every foundation at king, nothing else
    pub fn solved() -> Self {
        let mut board = Board::empty();
        for card in full_deck().filter(|c| c.rank() == KING) {
            board.foundations[card.suit_index()] = Some(card);
        }
        board
    }
}

/// What the player has picked up, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// The top `count` cards of `column`
    Column { column: usize, count: usize },
    /// The card in free cell `cell`
    FreeCell { cell: usize },
}

impl Selection {
    /// Number of cards the selection carries
    pub fn count(&self) -> usize {
        match self {
            Selection::Column { count, .. } => *count,
            Selection::FreeCell { .. } => 1,
        }
    }
}
