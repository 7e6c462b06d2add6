//! Dealing module
//!
//! This module contains the deterministic deal. It reproduces the
//! linear-congruential shuffle behind the classic numbered FreeCell games,
//! so game numbers published elsewhere give the same layout here.

use crate::game_management::cards::{Card, DECK_SIZE};
use crate::game_management::rules::COLUMN_COUNT;

/// LCG multiplier
const LCG_MULTIPLIER: u32 = 214_013;

/// LCG increment
const LCG_INCREMENT: u32 = 2_531_011;

/// Maps the shuffle's suit order (clubs, diamonds, hearts, spades) onto ours
const SUIT_MAP: [u8; 4] = [2, 3, 1, 0];

/// The generator used by the deal, one draw per card
#[derive(Debug, Clone, Copy)]
pub struct DealRng {
    state: u32,
}

impl DealRng {
    pub fn new(seed: u32) -> Self {
        DealRng { state: seed }
    }

    /// Advance the state and return the next 15-bit value
    pub fn next_value(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        (self.state >> 16) & 0x7fff
    }
}

/// Deal the 52 cards for game `seed` into the eight columns
///
/// This function is PURE - the same seed always yields the same columns.
/// Card `i` of the deal goes to column `i % 8`; within a column the first
/// card dealt is the bottom one. Every `u32`, including 0, is accepted.
pub fn deal(seed: u32) -> [Vec<Card>; COLUMN_COUNT] {
    let mut columns: [Vec<Card>; COLUMN_COUNT] = Default::default();
    let mut deck: [u8; DECK_SIZE] = std::array::from_fn(|i| i as u8);
    let mut rng = DealRng::new(seed);

    for (position, cards_left) in (1..=DECK_SIZE).rev().enumerate() {
        let pick = rng.next_value() as usize % cards_left;
        let drawn = deck[pick];

        let rank = drawn / 4 + 1;
        let suit = SUIT_MAP[(drawn % 4) as usize];
        columns[position % COLUMN_COUNT].push(Card::from_parts(rank, suit));

        // Fill the hole with the last undealt card.
        deck[pick] = deck[cards_left - 1];
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_management::cards::full_deck;

    fn labels(column: &[Card]) -> Vec<String> {
        column.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_deal_is_deterministic() {
        for seed in [0, 1, 617, 11_982, u32::MAX] {
            assert_eq!(deal(seed), deal(seed));
        }
    }

    #[test]
    fn test_deal_column_sizes() {
        let columns = deal(1);
        let sizes: Vec<usize> = columns.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![7, 7, 7, 7, 6, 6, 6, 6]);
    }

    #[test]
    fn test_deal_uses_every_card_once() {
        for seed in [0, 1, 2, 3_000_000_000] {
            let mut dealt: Vec<Card> = deal(seed).into_iter().flatten().collect();
            dealt.sort();
            let mut expected: Vec<Card> = full_deck().collect();
            expected.sort();
            assert_eq!(dealt, expected);
        }
    }

    #[test]
    fn test_game_one_layout() {
        let columns = deal(1);
        assert_eq!(labels(&columns[0]), ["Jd", "Kd", "2s", "4c", "3s", "6d", "6s"]);
        assert_eq!(labels(&columns[1]), ["2d", "Kc", "Ks", "5c", "Td", "8s", "9c"]);
        assert_eq!(labels(&columns[2]), ["9h", "9s", "9d", "Ts", "4s", "8d", "2h"]);
        assert_eq!(labels(&columns[3]), ["Jc", "5s", "Qd", "Qh", "Th", "Qs", "6h"]);
        assert_eq!(labels(&columns[4]), ["5d", "Ad", "Js", "4h", "8h", "6c"]);
        assert_eq!(labels(&columns[5]), ["7h", "Qc", "As", "Ac", "2c", "3d"]);
        assert_eq!(labels(&columns[6]), ["7c", "Kh", "Ah", "4d", "Jh", "8c"]);
        assert_eq!(labels(&columns[7]), ["5h", "3h", "3c", "7s", "7d", "Tc"]);
    }

    #[test]
    fn test_seed_zero_is_a_fixed_deal() {
        let columns = deal(0);
        assert_eq!(labels(&columns[0]), ["Th", "6h", "Td", "9d", "7h", "Ad", "2s"]);
        assert_eq!(labels(&columns[7]), ["6c", "3s", "3d", "Ah", "Jh", "7c"]);
    }

    #[test]
    fn test_rng_first_values() {
        let mut rng = DealRng::new(1);
        // 1 * 214013 + 2531011 = 2745024, >> 16 = 41
        assert_eq!(rng.next_value(), 41);
    }
}
