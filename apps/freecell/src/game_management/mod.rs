//! Game management module
//!
//! This module contains the core game logic for FreeCell: cards, the
//! numbered deal, the board, move legality, undo history and the engine
//! that ties them together.

pub mod cards;
pub mod dealing;
pub mod error;
pub mod history;
pub mod orchestration;
pub mod rules;
pub mod state;

// Re-export the types a front end works with
pub use cards::{Card, SuitSymbols};
pub use error::{BoardError, IllegalMove, InvalidSuitSymbols, MoveError};
pub use orchestration::GameEngine;
pub use state::{Board, Selection};
