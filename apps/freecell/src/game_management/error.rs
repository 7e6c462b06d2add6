//! Error types for the game engine
//!
//! None of these are fatal. A rejected intent leaves the board untouched and
//! the caller decides whether to tell the player.

use thiserror::Error;

use crate::game_management::cards::Card;

/// Why a requested move or selection was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("nothing is selected")]
    NothingSelected,
    #[error("a selection is already pending")]
    SelectionPending,
    #[error("no such column or free cell")]
    OutOfRange,
    #[error("the source holds no card")]
    EmptySource,
    #[error("the foundation does not accept this card")]
    FoundationRejects,
    #[error("the column does not accept this card")]
    ColumnRejects,
    #[error("the free cell is occupied")]
    FreeCellOccupied,
    #[error("no free cell is empty")]
    NoFreeCell,
    #[error("only a single card may go there")]
    MultipleCards,
    #[error("the cards are not an ordered chain")]
    ChainTooLong,
    #[error("not enough free cells or empty columns for this many cards")]
    NotEnoughBuffers,
    #[error("source and target are the same column")]
    SameColumn,
}

/// Error returned by engine operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),
    #[error("nothing to undo")]
    EmptyHistory,
    #[error("nothing to redo")]
    EmptyRedo,
    #[error("the game is already won")]
    GameWon,
}

/// Broken board invariants; these point at a bug, never at player input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("card {0:?} is out of range")]
    InvalidCard(Card),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("{0} cards are missing")]
    MissingCards(usize),
    #[error("foundation {slot} holds {card}, which belongs to another suit")]
    FoundationSuitMismatch { slot: usize, card: Card },
}

/// Suit symbols that are not four distinct characters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("suit symbols must be four distinct characters, got {0:?}")]
pub struct InvalidSuitSymbols(pub String);
