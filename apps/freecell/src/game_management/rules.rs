//! Game rules module
//!
//! This module contains pure game rules, validation logic,
//! and the auto-promotion safety check. Everything here reads a board
//! snapshot and never mutates it.

use crate::game_management::cards::{Card, ACE, KING, SUIT_COUNT};
use crate::game_management::error::IllegalMove;
use crate::game_management::state::Board;

/// Number of free cells
pub const FREE_CELL_COUNT: usize = 4;

/// Number of tableau columns
pub const COLUMN_COUNT: usize = 8;

/// Rank on top of a foundation slot, 0 when empty
fn rank_of(slot: &Option<Card>) -> i16 {
    slot.map_or(0, |card| card.rank() as i16)
}

/// Check whether `card` can go on its foundation
pub fn check_foundation(card: Card, foundations: &[Option<Card>; SUIT_COUNT]) -> Result<(), IllegalMove> {
    let accepted = match foundations[card.suit_index()] {
        Some(top) => card.rank() == top.rank() + 1,
        None => card.rank() == ACE,
    };
    if accepted {
        Ok(())
    } else {
        Err(IllegalMove::FoundationRejects)
    }
}

/// Foundation accepts the card: an ace on an empty pile, or the next rank up
pub fn foundation_accepts(card: Card, foundations: &[Option<Card>; SUIT_COUNT]) -> bool {
    check_foundation(card, foundations).is_ok()
}

/// Check whether `card` can be placed on `column`
pub fn check_column(card: Card, column: &[Card]) -> Result<(), IllegalMove> {
    match column.last() {
        None => Ok(()),
        Some(top) if card.differs_in_colour(top) && card.rank() + 1 == top.rank() => Ok(()),
        Some(_) => Err(IllegalMove::ColumnRejects),
    }
}

/// Column accepts the card: empty, or opposite colour and one rank lower than its top
pub fn column_accepts(card: Card, column: &[Card]) -> bool {
    check_column(card, column).is_ok()
}

/// A free cell accepts any card while it is empty
pub fn free_cell_accepts(cell: &Option<Card>) -> bool {
    cell.is_none()
}

/// Length of the ordered run at the top of `column`
///
/// Walks down from the top card while each card below is of the other
/// colour and exactly one rank higher. A non-empty column always has a
/// chain of at least 1; an empty one has 0.
pub fn max_movable_chain(column: &[Card]) -> usize {
    if column.is_empty() {
        return 0;
    }
    1 + column
        .windows(2)
        .rev()
        .take_while(|pair| {
            let (below, above) = (pair[0], pair[1]);
            above.differs_in_colour(&below) && above.rank() + 1 == below.rank()
        })
        .count()
}

/// Free cells and empty columns that can hold cards in transit
///
/// An empty target column is the move's own destination, so it does not
/// count as a buffer.
pub fn available_buffers(board: &Board, target: usize) -> usize {
    let target_empty = board.columns.get(target).is_some_and(Vec::is_empty);
    (board.empty_free_cells() + board.empty_columns()).saturating_sub(usize::from(target_empty))
}

/// Check an `n`-card move from column `source` to column `target`
///
/// The chain must be ordered, there must be at least `n - 1` buffers, and
/// the bottom card of the chain must fit on the target.
pub fn check_supermove(n: usize, source: usize, target: usize, board: &Board) -> Result<(), IllegalMove> {
    let (Some(from), Some(to)) = (board.column(source), board.column(target)) else {
        return Err(IllegalMove::OutOfRange);
    };
    if source == target {
        return Err(IllegalMove::SameColumn);
    }
    if from.is_empty() {
        return Err(IllegalMove::EmptySource);
    }
    if n == 0 || n > max_movable_chain(from) {
        return Err(IllegalMove::ChainTooLong);
    }
    if available_buffers(board, target) < n - 1 {
        return Err(IllegalMove::NotEnoughBuffers);
    }
    check_column(from[from.len() - n], to)
}

/// Whether an `n`-card move between two columns is legal
pub fn can_supermove(n: usize, source: usize, target: usize, board: &Board) -> bool {
    check_supermove(n, source, target, board).is_ok()
}

/// Whether it is safe to send `card` home automatically
///
/// The card must be accepted by its foundation, and promoting it must not
/// strand a lower card of the other colour that could still be needed as a
/// landing spot. That holds when both opposite-colour foundations have
/// reached `v - 1`, or when they have reached `v - 2` and the other
/// same-colour foundation has reached `v - 3`.
pub fn may_auto_promote(card: Card, foundations: &[Option<Card>; SUIT_COUNT]) -> bool {
    if !foundation_accepts(card, foundations) {
        return false;
    }

    let v = card.rank() as i16;
    let [o1, o2] = card.opposite_colour_suits();
    let ov1 = rank_of(&foundations[o1]);
    let ov2 = rank_of(&foundations[o2]);
    let sv = rank_of(&foundations[card.same_colour_suit()]);

    let both_opposite_close = ov1 >= v - 1 && ov2 >= v - 1;
    let opposite_and_partner_close = ov1 >= v - 2 && ov2 >= v - 2 && sv >= v - 3;

    both_opposite_close || opposite_and_partner_close
}

/// All four foundations are topped by a king
pub fn is_won(foundations: &[Option<Card>; SUIT_COUNT]) -> bool {
    foundations
        .iter()
        .all(|slot| slot.is_some_and(|card| card.rank() == KING))
}
