//! Cards module
//!
//! This module contains the immutable card value and the suit/colour
//! arithmetic that the move rules are built on. Suits are numbered so that
//! parity encodes colour: 0 and 2 are black, 1 and 3 are red.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_management::error::{BoardError, InvalidSuitSymbols};

/// Number of ranks in each suit (ace through king)
pub const RANKS_PER_SUIT: u8 = 13;

/// Number of suits in the deck
pub const SUIT_COUNT: usize = 4;

/// Number of cards in the deck
pub const DECK_SIZE: usize = RANKS_PER_SUIT as usize * SUIT_COUNT;

/// Lowest rank, the only card an empty foundation accepts
pub const ACE: u8 = 1;

/// Highest rank, the top of a finished foundation
pub const KING: u8 = 13;

/// Rank labels indexed by `rank - 1`
pub const RANK_LABELS: [char; RANKS_PER_SUIT as usize] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];

/// Default suit symbols indexed by suit: spades, hearts, clubs, diamonds
pub const DEFAULT_SUIT_SYMBOLS: [char; SUIT_COUNT] = ['s', 'h', 'c', 'd'];

/// A single playing card.
///
/// Cards are `Copy` and never change once created; board snapshots share
/// nothing mutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    rank: u8,
    suit: u8,
}

/// Unchecked wire form of a card
#[derive(Deserialize)]
struct RawCard {
    rank: u8,
    suit: u8,
}

impl TryFrom<RawCard> for Card {
    type Error = BoardError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::new(raw.rank, raw.suit).ok_or(BoardError::InvalidCard(Card {
            rank: raw.rank,
            suit: raw.suit,
        }))
    }
}

impl Card {
    /// Build a card, returning `None` unless `rank` is 1..=13 and `suit` is 0..=3
    pub fn new(rank: u8, suit: u8) -> Option<Self> {
        if (ACE..=KING).contains(&rank) && (suit as usize) < SUIT_COUNT {
            Some(Card { rank, suit })
        } else {
            None
        }
    }

    /// Callers guarantee both values are in range.
    pub(crate) const fn from_parts(rank: u8, suit: u8) -> Self {
        Card { rank, suit }
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn suit(&self) -> u8 {
        self.suit
    }

    /// Foundation slot for this card
    pub fn suit_index(&self) -> usize {
        self.suit as usize
    }

    /// Whether the card and its values are within the deck's ranges
    pub fn is_valid(&self) -> bool {
        Card::new(self.rank, self.suit).is_some()
    }

    pub fn is_red(&self) -> bool {
        self.suit & 1 == 1
    }

    /// True when the two cards are of opposite colours
    pub fn differs_in_colour(&self, other: &Card) -> bool {
        self.is_red() != other.is_red()
    }

    /// The two suits of the opposite colour
    pub fn opposite_colour_suits(&self) -> [usize; 2] {
        [(self.suit ^ 1) as usize, (self.suit ^ 3) as usize]
    }

    /// The other suit of the same colour
    pub fn same_colour_suit(&self) -> usize {
        (self.suit ^ 2) as usize
    }

    /// Dense index in 0..52, unique per card
    pub fn index(&self) -> usize {
        (self.rank as usize - 1) * SUIT_COUNT + self.suit as usize
    }

    /// Short label such as `Ts` or `Ah` using the given suit symbols
    pub fn label(&self, symbols: &SuitSymbols) -> String {
        format!("{}{}", self.rank_label(), symbols.symbol(self.suit))
    }

    fn rank_label(&self) -> char {
        RANK_LABELS
            .get(self.rank.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or('?')
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(&SuitSymbols::default()))
    }
}

/// Every card of the deck, ordered by rank then suit
pub fn full_deck() -> impl Iterator<Item = Card> {
    (ACE..=KING).flat_map(|rank| (0..SUIT_COUNT as u8).map(move |suit| Card::from_parts(rank, suit)))
}

/// Display symbols for the four suits.
///
/// Players may substitute their own set, e.g. `lhes` for German suit names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[char; 4]")]
pub struct SuitSymbols([char; SUIT_COUNT]);

impl SuitSymbols {
    /// Parse exactly four distinct characters
    pub fn parse(raw: &str) -> Option<Self> {
        let chars: Vec<char> = raw.chars().collect();
        let symbols: [char; SUIT_COUNT] = chars.as_slice().try_into().ok()?;
        SuitSymbols::try_from(symbols).ok()
    }

    pub fn symbol(&self, suit: u8) -> char {
        self.0.get(suit as usize).copied().unwrap_or('?')
    }
}

impl TryFrom<[char; SUIT_COUNT]> for SuitSymbols {
    type Error = InvalidSuitSymbols;

    fn try_from(symbols: [char; SUIT_COUNT]) -> Result<Self, Self::Error> {
        let distinct = symbols
            .iter()
            .enumerate()
            .all(|(i, c)| !symbols[..i].contains(c));
        if distinct {
            Ok(SuitSymbols(symbols))
        } else {
            Err(InvalidSuitSymbols(symbols.iter().collect()))
        }
    }
}

impl Default for SuitSymbols {
    fn default() -> Self {
        SuitSymbols(DEFAULT_SUIT_SYMBOLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_bounds() {
        assert!(Card::new(1, 0).is_some());
        assert!(Card::new(13, 3).is_some());
        assert!(Card::new(0, 0).is_none());
        assert!(Card::new(14, 0).is_none());
        assert!(Card::new(5, 4).is_none());
    }

    #[test]
    fn test_colour_parity() {
        let spade = Card::from_parts(5, 0);
        let heart = Card::from_parts(4, 1);
        let club = Card::from_parts(4, 2);
        let diamond = Card::from_parts(4, 3);

        assert!(!spade.is_red());
        assert!(heart.is_red());
        assert!(spade.differs_in_colour(&heart));
        assert!(spade.differs_in_colour(&diamond));
        assert!(!spade.differs_in_colour(&club));
    }

    #[test]
    fn test_suit_partners() {
        let heart = Card::from_parts(7, 1);
        assert_eq!(heart.opposite_colour_suits(), [0, 2]);
        assert_eq!(heart.same_colour_suit(), 3);

        let club = Card::from_parts(7, 2);
        assert_eq!(club.opposite_colour_suits(), [3, 1]);
        assert_eq!(club.same_colour_suit(), 0);
    }

    #[test]
    fn test_full_deck_has_unique_indices() {
        let mut seen = [false; DECK_SIZE];
        for card in full_deck() {
            assert!(!seen[card.index()]);
            seen[card.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Card::from_parts(1, 0).to_string(), "As");
        assert_eq!(Card::from_parts(10, 1).to_string(), "Th");
        assert_eq!(Card::from_parts(13, 3).to_string(), "Kd");

        let german = SuitSymbols::parse("lhes").unwrap();
        assert_eq!(Card::from_parts(12, 2).label(&german), "Qe");
    }

    #[test]
    fn test_suit_symbols_parse() {
        assert!(SuitSymbols::parse("shcd").is_some());
        assert!(SuitSymbols::parse("shc").is_none());
        assert!(SuitSymbols::parse("shcdx").is_none());
        assert!(SuitSymbols::parse("sscd").is_none());
    }

    #[test]
    fn test_card_deserialize_checks_range() {
        let card: Card = serde_json::from_str(r#"{"rank":12,"suit":1}"#).unwrap();
        assert_eq!(card.to_string(), "Qh");

        assert!(serde_json::from_str::<Card>(r#"{"rank":255,"suit":0}"#).is_err());
        assert!(serde_json::from_str::<Card>(r#"{"rank":0,"suit":0}"#).is_err());
        assert!(serde_json::from_str::<Card>(r#"{"rank":1,"suit":4}"#).is_err());
    }

    #[test]
    fn test_suit_symbols_deserialize_checks_distinct() {
        let symbols: SuitSymbols = serde_json::from_str(r#"["S","H","C","D"]"#).unwrap();
        assert_eq!(symbols.symbol(1), 'H');

        let round_trip = serde_json::to_string(&SuitSymbols::default()).unwrap();
        assert_eq!(serde_json::from_str::<SuitSymbols>(&round_trip).unwrap(), SuitSymbols::default());

        assert!(serde_json::from_str::<SuitSymbols>(r#"["s","s","c","d"]"#).is_err());
    }
}
