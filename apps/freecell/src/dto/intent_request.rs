use serde::{Deserialize, Serialize};

/// A single player intent, as sent by a front end.
///
/// Column indices are 0..8 (a..h), free cells 0..4 (w..z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    SelectColumn {
        column: usize,
        #[serde(default)]
        count: Option<usize>, // repeat-count prefix, 1 when absent
    },
    SelectFreeCell {
        cell: usize,
    },
    ToFoundation,
    ToColumn {
        column: usize,
    },
    ToFreeCell {
        #[serde(default)]
        cell: Option<usize>, // first empty cell when absent
    },
    Cancel,
    Undo,
    Redo,
    NewGame {
        seed: u32,
    },
}
