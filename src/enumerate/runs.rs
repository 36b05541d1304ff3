//! Run enumeration: every valid `Run` an `IndexedHand` can currently lay
//! down in a given suit, direct and LUT-backed variants.

use crate::card::{Card, Rank, Suit};
use crate::combo::Run;
use crate::config::Config;
use crate::indexed_hand::IndexedHand;
use crate::lut::Lut;

fn materialize(positions: u16, vector: u16, suit: Suit) -> Vec<Card> {
    let mut cards = Vec::with_capacity(positions.count_ones() as usize);
    for i in 0..Rank::COUNT {
        if positions & (1 << i) == 0 {
            continue;
        }
        let rank = Rank::ranks()[i];
        if vector & (1 << i) != 0 {
            cards.push(Card::new(rank, suit));
        } else {
            cards.push(Card::materialized_joker(rank, suit));
        }
    }
    cards
}

/// Every contiguous rank window in `suit` of length >= `config.run_min_len`
/// reachable with at most `joker_budget` jokers, scanned directly against
/// the hand's `Rundex` for that suit (no cache).
pub fn iter_runs_in_suit(hand: &IndexedHand, suit: Suit, config: &Config) -> Vec<Run> {
    let vector = hand.rundex(suit).vector();
    let joker_budget = (hand.joker_count() as usize).min(config.max_run_jokers);
    let mut runs = Vec::new();
    for start in 0..Rank::COUNT {
        for end in start..Rank::COUNT {
            let len = end - start + 1;
            if len < config.run_min_len {
                continue;
            }
            let positions: u16 = (start..=end).fold(0, |acc, i| acc | (1 << i));
            let missing = (positions & !vector).count_ones() as usize;
            if missing > joker_budget {
                continue;
            }
            let cards = materialize(positions, vector, suit);
            if let Ok(run) = Run::new(cards, config.run_min_len) {
                runs.push(run);
            }
        }
    }
    runs
}

/// Every valid `Run` the hand can lay down in any suit.
pub fn iter_runs(hand: &IndexedHand, config: &Config) -> Vec<Run> {
    Suit::suits()
        .into_iter()
        .flat_map(|suit| iter_runs_in_suit(hand, suit, config))
        .collect()
}

/// Same result as `iter_runs_in_suit`, but sources its rank windows from
/// the process-wide `Lut` instead of re-scanning the window each call.
pub fn iter_runs_in_suit_lut(hand: &IndexedHand, suit: Suit, config: &Config) -> Vec<Run> {
    let vector = hand.rundex(suit).vector();
    let joker_budget = (hand.joker_count() as usize).min(config.max_run_jokers);
    Lut::global()
        .run_patterns(vector, joker_budget, config)
        .into_iter()
        .filter_map(|pattern| {
            let cards = materialize(pattern.positions, vector, suit);
            Run::new(cards, config.run_min_len).ok()
        })
        .collect()
}

pub fn iter_runs_lut(hand: &IndexedHand, config: &Config) -> Vec<Run> {
    Suit::suits()
        .into_iter()
        .flat_map(|suit| iter_runs_in_suit_lut(hand, suit, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Rank;

    fn hand_with(cards: impl IntoIterator<Item = Card>, config: &Config) -> IndexedHand {
        IndexedHand::from_cards(config, cards)
    }

    #[test]
    fn test_no_runs_in_empty_hand() {
        let config = Config::default();
        let hand = IndexedHand::new(&config);
        assert!(iter_runs(&hand, &config).is_empty());
    }

    #[test]
    fn test_finds_exact_run_no_jokers() {
        let config = Config::default();
        let hand = hand_with(
            [
                Card::new(Rank::Two, Suit::Heart),
                Card::new(Rank::Three, Suit::Heart),
                Card::new(Rank::Four, Suit::Heart),
                Card::new(Rank::Five, Suit::Heart),
            ],
            &config,
        );
        let runs = iter_runs_in_suit(&hand, Suit::Heart, &config);
        assert!(runs.iter().any(|r| r.len() == 4));
    }

    #[test]
    fn test_joker_fills_interior_gap() {
        let config = Config::default();
        let hand = hand_with(
            [
                Card::new(Rank::Two, Suit::Heart),
                Card::new(Rank::Three, Suit::Heart),
                Card::new(Rank::Five, Suit::Heart),
                Card::joker(),
            ],
            &config,
        );
        let runs = iter_runs_in_suit(&hand, Suit::Heart, &config);
        assert!(runs.iter().any(|r| r.len() == 4 && r.start() == Rank::Two && r.end() == Rank::Five));
    }

    #[test]
    fn test_joker_budget_caps_participation() {
        let mut config = Config::default();
        config.max_run_jokers = 0;
        let hand = hand_with(
            [
                Card::new(Rank::Two, Suit::Heart),
                Card::new(Rank::Three, Suit::Heart),
                Card::new(Rank::Five, Suit::Heart),
                Card::joker(),
            ],
            &config,
        );
        let runs = iter_runs_in_suit(&hand, Suit::Heart, &config);
        assert!(runs.iter().all(|r| r.start() != Rank::Two || r.end() != Rank::Five));
    }

    #[test]
    fn test_direct_and_lut_agree() {
        let config = Config::default();
        let hand = hand_with(
            [
                Card::new(Rank::Two, Suit::Club),
                Card::new(Rank::Three, Suit::Club),
                Card::new(Rank::Four, Suit::Club),
                Card::new(Rank::Five, Suit::Club),
                Card::joker(),
            ],
            &config,
        );
        let mut direct = iter_runs(&hand, &config);
        let mut via_lut = iter_runs_lut(&hand, &config);
        direct.sort();
        via_lut.sort();
        assert_eq!(direct, via_lut);
    }
}
