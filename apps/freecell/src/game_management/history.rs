//! Undo history
//!
//! Whole-board snapshots taken before each player move. Undone snapshots
//! move to a redo stack until the next fresh move clears it.

use crate::game_management::state::Board;

#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<Board>,
    redo: Vec<Board>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `before` as the position preceding a new move
    ///
    /// A fresh move branches away from anything that was undone, so the
    /// redo stack is dropped.
    pub fn record(&mut self, before: Board) {
        self.undo.push(before);
        self.redo.clear();
    }

    /// Step back: returns the previous position and keeps `current` for redo
    pub fn undo(&mut self, current: Board) -> Option<Board> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: Board) -> Option<Board> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    /// Number of positions that can be undone
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_on_empty_history() {
        let mut history = History::new();
        assert!(history.undo(Board::dealt(1)).is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = History::new();
        let first = Board::dealt(1);
        let mut second = first.clone();
        second.free_cells[0] = second.columns[0].pop();

        history.record(first.clone());
        assert_eq!(history.len(), 1);

        let restored = history.undo(second.clone());
        assert_eq!(restored, Some(first.clone()));
        assert!(history.is_empty());
        assert!(history.can_redo());

        let replayed = history.redo(first);
        assert_eq!(replayed, Some(second));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_drops_redo() {
        let mut history = History::new();
        history.record(Board::dealt(1));
        history.undo(Board::dealt(2));
        assert!(history.can_redo());

        history.record(Board::dealt(3));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }
}
