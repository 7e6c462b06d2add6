//! Game orchestration module
//!
//! This module drives a single game. It turns player intents into validated
//! board mutations, records history before each one, runs the
//! auto-promotion loop afterwards and detects the win. Rejected intents
//! never touch the board.

use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::dto::game_snapshot::{CardSnapshot, GameInfo, GameSnapshot};
use crate::dto::intent_request::Intent;
use crate::game_management::cards::SuitSymbols;
use crate::game_management::error::{IllegalMove, MoveError};
use crate::game_management::history::History;
use crate::game_management::rules::{
    check_column, check_foundation, check_supermove, is_won, max_movable_chain, may_auto_promote,
    FREE_CELL_COUNT,
};
use crate::game_management::state::{Board, Selection};

/// A validated change to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transfer {
    ColumnToFoundation { column: usize },
    FreeCellToFoundation { cell: usize },
    ColumnToColumn { source: usize, target: usize, count: usize },
    FreeCellToColumn { cell: usize, column: usize },
    ColumnToFreeCell { column: usize, cell: usize },
    FreeCellToFreeCell { from: usize, to: usize },
}

impl Transfer {
    /// Carry out a transfer that has already passed the rules
    fn apply(self, board: &mut Board) {
        match self {
            Transfer::ColumnToFoundation { column } => {
                if let Some(card) = board.columns[column].pop() {
                    board.foundations[card.suit_index()] = Some(card);
                }
            }
            Transfer::FreeCellToFoundation { cell } => {
                if let Some(card) = board.free_cells[cell].take() {
                    board.foundations[card.suit_index()] = Some(card);
                }
            }
            Transfer::ColumnToColumn { source, target, count } => {
                let split = board.columns[source].len().saturating_sub(count);
                let chain = board.columns[source].split_off(split);
                board.columns[target].extend(chain);
            }
            Transfer::FreeCellToColumn { cell, column } => {
                if let Some(card) = board.free_cells[cell].take() {
                    board.columns[column].push(card);
                }
            }
            Transfer::ColumnToFreeCell { column, cell } => {
                board.free_cells[cell] = board.columns[column].pop();
            }
            Transfer::FreeCellToFreeCell { from, to } => {
                board.free_cells[to] = board.free_cells[from].take();
            }
        }
    }
}

/// One game of FreeCell and everything needed to play it
#[derive(Debug, Clone)]
pub struct GameEngine {
    id: Uuid,
    seed: u32,
    board: Board,
    history: History,
    selection: Option<Selection>,
    moves: u32,
    undos: u32,
    won: bool,
}

impl GameEngine {
    /// Deal game number `seed` and promote whatever is already safe
    pub fn new(seed: u32) -> Self {
        let engine = Self::start(Board::dealt(seed), seed);
        info!(game_id = %engine.id, seed, "dealt new game");
        engine
    }

    /// Start from an arbitrary position, mainly for tests and puzzles
    ///
    /// The board is taken as-is; use [`Board::validate`] first if it does
    /// not come from a deal.
    pub fn from_board(board: Board) -> Self {
        Self::start(board, 0)
    }

    fn start(board: Board, seed: u32) -> Self {
        let mut engine = GameEngine {
            id: Uuid::new_v4(),
            seed,
            board,
            history: History::new(),
            selection: None,
            moves: 0,
            undos: 0,
            won: false,
        };
        engine.auto_promote();
        engine
    }

    /// Throw away the current game and deal `seed`
    pub fn new_game(&mut self, seed: u32) {
        *self = GameEngine::new(seed);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    pub fn undo_count(&self) -> u32 {
        self.undos
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Dispatch a front-end intent to the matching operation
    pub fn apply(&mut self, intent: Intent) -> Result<(), MoveError> {
        match intent {
            Intent::SelectColumn { column, count } => self.select_column(column, count).map(|_| ()),
            Intent::SelectFreeCell { cell } => self.select_free_cell(cell).map(|_| ()),
            Intent::ToFoundation => self.move_to_foundation(),
            Intent::ToColumn { column } => self.move_to_column(column),
            Intent::ToFreeCell { cell } => self.move_to_free_cell(cell),
            Intent::Cancel => {
                self.cancel();
                Ok(())
            }
            Intent::Undo => self.undo(),
            Intent::Redo => self.redo(),
            Intent::NewGame { seed } => {
                self.new_game(seed);
                Ok(())
            }
        }
    }

    /// Pick up the top cards of `column`
    ///
    /// `count` is the repeat-count prefix; it defaults to 1 and is clamped
    /// to the ordered chain on top of the column.
    pub fn select_column(&mut self, column: usize, count: Option<usize>) -> Result<Selection, MoveError> {
        self.ensure_playing()?;
        self.ensure_idle()?;

        let chain = match self.board.column(column).map(max_movable_chain) {
            None => return Err(self.reject(IllegalMove::OutOfRange)),
            Some(0) => return Err(self.reject(IllegalMove::EmptySource)),
            Some(chain) => chain,
        };
        let count = count.unwrap_or(1).clamp(1, chain);

        let selection = Selection::Column { column, count };
        self.selection = Some(selection);
        trace!(game_id = %self.id, column, count, "selected column");
        Ok(selection)
    }

    /// Pick up the card in free cell `cell`
    pub fn select_free_cell(&mut self, cell: usize) -> Result<Selection, MoveError> {
        self.ensure_playing()?;
        self.ensure_idle()?;

        if cell >= FREE_CELL_COUNT {
            return Err(self.reject(IllegalMove::OutOfRange));
        }
        if self.board.free_cell(cell).is_none() {
            return Err(self.reject(IllegalMove::EmptySource));
        }

        let selection = Selection::FreeCell { cell };
        self.selection = Some(selection);
        trace!(game_id = %self.id, cell, "selected free cell");
        Ok(selection)
    }

    /// Drop the selection without moving anything
    pub fn cancel(&mut self) {
        self.selection = None;
    }

    /// Send the selected single card to its foundation
    pub fn move_to_foundation(&mut self) -> Result<(), MoveError> {
        let selection = self.take_selection()?;
        let planned = self.plan_to_foundation(selection);
        self.execute(planned)
    }

    /// Move the selection onto column `target`
    pub fn move_to_column(&mut self, target: usize) -> Result<(), MoveError> {
        let selection = self.take_selection()?;
        let planned = self.plan_to_column(selection, target);
        self.execute(planned)
    }

    /// Park the selected single card in a free cell, the first empty one when `target` is `None`
    pub fn move_to_free_cell(&mut self, target: Option<usize>) -> Result<(), MoveError> {
        let selection = self.take_selection()?;
        let planned = self.plan_to_free_cell(selection, target);
        self.execute(planned)
    }

    /// Restore the position before the last move
    pub fn undo(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.selection = None;

        let Some(previous) = self.history.undo(self.board.clone()) else {
            trace!(game_id = %self.id, "nothing to undo");
            return Err(MoveError::EmptyHistory);
        };
        self.board = previous;
        self.moves = self.moves.saturating_sub(1);
        self.undos += 1;
        debug!(game_id = %self.id, moves = self.moves, undos = self.undos, "undid move");
        Ok(())
    }

    /// Re-apply the most recently undone move
    pub fn redo(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.selection = None;

        let Some(next) = self.history.redo(self.board.clone()) else {
            trace!(game_id = %self.id, "nothing to redo");
            return Err(MoveError::EmptyRedo);
        };
        self.board = next;
        self.moves += 1;
        debug!(game_id = %self.id, moves = self.moves, "redid move");
        self.check_won();
        Ok(())
    }

    /// Promote every card that is safe to send home, until none is left
    ///
    /// Each pass looks at the free cells first and then the column tops, in
    /// index order, and restarts after every promotion. Returns how many
    /// cards went home.
    pub fn auto_promote(&mut self) -> usize {
        let mut promoted = 0;
        while let Some(transfer) = self.next_promotion() {
            transfer.apply(&mut self.board);
            promoted += 1;
            debug!(game_id = %self.id, ?transfer, "auto-promoted card");
        }
        self.check_won();
        promoted
    }

    /// Read-only view of the game for a front end
    pub fn snapshot(&self, symbols: &SuitSymbols) -> GameSnapshot {
        let card = |c| CardSnapshot::new(c, symbols);
        GameSnapshot {
            game: GameInfo {
                id: self.id,
                seed: self.seed,
                moves: self.moves,
                undos: self.undos,
                won: self.won,
                can_undo: self.can_undo(),
                can_redo: self.can_redo(),
                cards_home: self.board.cards_home(),
            },
            free_cells: self.board.free_cells.iter().map(|c| c.map(card)).collect(),
            foundations: self.board.foundations.iter().map(|c| c.map(card)).collect(),
            columns: self
                .board
                .columns
                .iter()
                .map(|column| column.iter().copied().map(card).collect::<Vec<_>>())
                .collect(),
            selection: self.selection,
        }
    }

    fn next_promotion(&self) -> Option<Transfer> {
        let foundations = &self.board.foundations;
        let from_cell = self
            .board
            .free_cells
            .iter()
            .position(|slot| slot.is_some_and(|card| may_auto_promote(card, foundations)))
            .map(|cell| Transfer::FreeCellToFoundation { cell });

        from_cell.or_else(|| {
            self.board
                .columns
                .iter()
                .position(|column| column.last().is_some_and(|&card| may_auto_promote(card, foundations)))
                .map(|column| Transfer::ColumnToFoundation { column })
        })
    }

    fn plan_to_foundation(&self, selection: Selection) -> Result<Transfer, IllegalMove> {
        match selection {
            Selection::Column { count, .. } if count != 1 => Err(IllegalMove::MultipleCards),
            Selection::Column { column, .. } => {
                let card = self.board.column_top(column).ok_or(IllegalMove::EmptySource)?;
                check_foundation(card, &self.board.foundations)?;
                Ok(Transfer::ColumnToFoundation { column })
            }
            Selection::FreeCell { cell } => {
                let card = self.board.free_cell(cell).ok_or(IllegalMove::EmptySource)?;
                check_foundation(card, &self.board.foundations)?;
                Ok(Transfer::FreeCellToFoundation { cell })
            }
        }
    }

    fn plan_to_column(&self, selection: Selection, target: usize) -> Result<Transfer, IllegalMove> {
        match selection {
            Selection::Column { column, count } => {
                check_supermove(count, column, target, &self.board)?;
                Ok(Transfer::ColumnToColumn { source: column, target, count })
            }
            Selection::FreeCell { cell } => {
                let destination = self.board.column(target).ok_or(IllegalMove::OutOfRange)?;
                let card = self.board.free_cell(cell).ok_or(IllegalMove::EmptySource)?;
                check_column(card, destination)?;
                Ok(Transfer::FreeCellToColumn { cell, column: target })
            }
        }
    }

    fn plan_to_free_cell(&self, selection: Selection, target: Option<usize>) -> Result<Transfer, IllegalMove> {
        if selection.count() != 1 {
            return Err(IllegalMove::MultipleCards);
        }
        let cell = match target {
            None => self.board.first_empty_free_cell().ok_or(IllegalMove::NoFreeCell)?,
            Some(cell) if cell >= FREE_CELL_COUNT => return Err(IllegalMove::OutOfRange),
            Some(cell) if self.board.free_cells[cell].is_some() => {
                return Err(IllegalMove::FreeCellOccupied)
            }
            Some(cell) => cell,
        };

        match selection {
            Selection::Column { column, .. } => {
                if self.board.column_top(column).is_none() {
                    return Err(IllegalMove::EmptySource);
                }
                Ok(Transfer::ColumnToFreeCell { column, cell })
            }
            Selection::FreeCell { cell: from } => Ok(Transfer::FreeCellToFreeCell { from, to: cell }),
        }
    }

    /// Record, apply and settle a planned transfer, or report why it was refused
    fn execute(&mut self, planned: Result<Transfer, IllegalMove>) -> Result<(), MoveError> {
        let transfer = planned.map_err(|reason| self.reject(reason))?;

        self.history.record(self.board.clone());
        transfer.apply(&mut self.board);
        self.moves += 1;
        debug!(game_id = %self.id, ?transfer, moves = self.moves, "applied move");

        self.auto_promote();
        Ok(())
    }

    fn take_selection(&mut self) -> Result<Selection, MoveError> {
        self.ensure_playing()?;
        self.selection
            .take()
            .ok_or_else(|| self.reject(IllegalMove::NothingSelected))
    }

    fn ensure_playing(&self) -> Result<(), MoveError> {
        if self.won {
            trace!(game_id = %self.id, "intent ignored, game is won");
            return Err(MoveError::GameWon);
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), MoveError> {
        if self.selection.is_some() {
            trace!(game_id = %self.id, "selection already pending");
            return Err(IllegalMove::SelectionPending.into());
        }
        Ok(())
    }

    /// Back to idle after a refused intent
    fn reject(&mut self, reason: IllegalMove) -> MoveError {
        self.selection = None;
        trace!(game_id = %self.id, %reason, "rejected intent");
        reason.into()
    }

    fn check_won(&mut self) {
        if !self.won && is_won(&self.board.foundations) {
            self.won = true;
            info!(game_id = %self.id, moves = self.moves, undos = self.undos, "game won");
        }
    }
}
