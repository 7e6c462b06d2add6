use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::game_management::cards::{full_deck, Card, DECK_SIZE, DEFAULT_SUIT_SYMBOLS, RANK_LABELS};
use crate::game_management::state::Board;

static INIT: Once = Once::new();

pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,freecell=debug"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_test_writer())
            .try_init();
    });
}

/// Parse a label such as `Ah` or `Td`; panics on anything else
pub fn card(label: &str) -> Card {
    let mut chars = label.chars();
    let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
        panic!("bad card label {label:?}");
    };
    let rank = RANK_LABELS.iter().position(|&r| r == rank);
    let suit = DEFAULT_SUIT_SYMBOLS.iter().position(|&s| s == suit);
    match (rank, suit) {
        (Some(rank), Some(suit)) => Card::new(rank as u8 + 1, suit as u8).expect("label in range"),
        _ => panic!("bad card label {label:?}"),
    }
}

/// Whitespace-separated labels, bottom card first
pub fn cards(labels: &str) -> Vec<Card> {
    labels.split_whitespace().map(card).collect()
}

/// Put each suit's foundation at the given rank (0 leaves it empty)
pub fn set_foundations(board: &mut Board, ranks: [u8; 4]) {
    for (suit, &rank) in ranks.iter().enumerate() {
        board.foundations[suit] = Card::new(rank, suit as u8);
    }
}

/// Stack every card the board is missing onto `column`, lowest rank at the
/// bottom, so a hand-built position holds the full deck
pub fn fill_remaining(board: &mut Board, column: usize) {
    let mut present = [false; DECK_SIZE];
    for (suit, top) in board.foundations.iter().enumerate() {
        if let Some(top) = top {
            for rank in 1..=top.rank() {
                if let Some(card) = Card::new(rank, suit as u8) {
                    present[card.index()] = true;
                }
            }
        }
    }
    for card in board.free_cells.iter().flatten().chain(board.columns.iter().flatten()) {
        present[card.index()] = true;
    }

    let missing: Vec<Card> = full_deck().filter(|c| !present[c.index()]).collect();
    board.columns[column].extend(missing);
}
