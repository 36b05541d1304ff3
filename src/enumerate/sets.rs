//! Set enumeration: every valid `Set` an `IndexedHand` can currently lay
//! down for a given rank, direct and LUT-backed variants.

use itertools::Itertools;

use crate::card::{Card, Rank, Suit};
use crate::combo::Set;
use crate::config::Config;
use crate::indexed_hand::IndexedHand;
use crate::lut::Lut;

fn materialize(suit_counts: &[u8; Suit::COUNT], joker_count: u8, rank: Rank) -> Vec<Card> {
    let mut cards = Vec::new();
    for (i, &count) in suit_counts.iter().enumerate() {
        let suit = Suit::suits()[i];
        for _ in 0..count {
            cards.push(Card::new(rank, suit));
        }
    }
    for _ in 0..joker_count {
        // pinned suit is irrelevant here: `Set::new` re-canonicalizes
        // every joker to the configured canonical suit on construction.
        cards.push(Card::materialized_joker(rank, Suit::Club));
    }
    cards
}

/// Every valid `Set` for `rank` reachable with the hand's natural cards
/// of that rank plus at most `config.max_set_jokers` jokers, scanned
/// directly against the hand's `Setdex` for that rank (no cache).
pub fn iter_sets_for_rank(hand: &IndexedHand, rank: Rank, config: &Config) -> Vec<Set> {
    let setdex = hand.setdex(rank);
    let joker_budget = (hand.joker_count() as usize).min(config.max_set_jokers);
    let counts: Vec<u8> = Suit::suits()
        .iter()
        .map(|&s| setdex.count(s, config.bits_per_suit))
        .collect();

    let mut sets = Vec::new();
    let choices: Vec<Vec<u8>> = counts.iter().map(|&c| (0..=c).collect()).collect();
    for picks in choices.into_iter().multi_cartesian_product() {
        let natural_total: usize = picks.iter().map(|&p| p as usize).sum();
        for jokers in 0..=joker_budget {
            if natural_total == 0 && jokers == 0 {
                continue;
            }
            if natural_total + jokers < config.set_min_len {
                continue;
            }
            let mut suit_counts = [0u8; Suit::COUNT];
            suit_counts.copy_from_slice(&picks);
            let cards = materialize(&suit_counts, jokers as u8, rank);
            if let Ok(set) = Set::new(cards, config.set_min_len, config.canonical_joker_suit) {
                sets.push(set);
            }
        }
    }
    sets
}

/// Every valid `Set` the hand can lay down for any rank.
pub fn iter_sets(hand: &IndexedHand, config: &Config) -> Vec<Set> {
    Rank::ranks()
        .into_iter()
        .flat_map(|rank| iter_sets_for_rank(hand, rank, config))
        .collect()
}

/// Same result as `iter_sets_for_rank`, sourced from the process-wide
/// `Lut` instead of recomputing the suit-count product each call.
pub fn iter_sets_for_rank_lut(hand: &IndexedHand, rank: Rank, config: &Config) -> Vec<Set> {
    let setdex = hand.setdex(rank);
    let joker_budget = (hand.joker_count() as usize).min(config.max_set_jokers);
    Lut::global()
        .set_patterns(setdex.value(), joker_budget, config)
        .into_iter()
        .filter_map(|pattern| {
            let cards = materialize(&pattern.suit_counts, pattern.joker_count, rank);
            Set::new(cards, config.set_min_len, config.canonical_joker_suit).ok()
        })
        .collect()
}

pub fn iter_sets_lut(hand: &IndexedHand, config: &Config) -> Vec<Set> {
    Rank::ranks()
        .into_iter()
        .flat_map(|rank| iter_sets_for_rank_lut(hand, rank, config))
        .collect()
}
