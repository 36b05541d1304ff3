//! Domain constants and tunables, gathered the way the teacher's
//! `config.rs` gathers its `DEFAULT_*` constants into one `Config`.

use crate::card::Suit;

const DEFAULT_RANK_MIN: u8 = 2;
const DEFAULT_RANK_MAX: u8 = 14;
const DEFAULT_SUIT_COUNT: usize = 4;
const DEFAULT_RUN_MIN_LEN: usize = 4;
const DEFAULT_SET_MIN_LEN: usize = 3;
const DEFAULT_MAX_RUN_JOKERS: usize = 3;
const DEFAULT_MAX_SET_JOKERS: usize = 3;
const DEFAULT_BITS_PER_SUIT: u32 = 2;
const DEFAULT_CANONICAL_JOKER_SUIT: Suit = Suit::Spade;

/// Domain-wide tunables for the move-generation core.
///
/// `bits_per_suit` governs the width of each `Setdex` sub-counter (2
/// bits supports up to 3 copies per suit, enough for a 2-deck game;
/// widen to 3 bits for 3+ decks). `max_run_jokers`/`max_set_jokers` cap
/// joker participation to bound LUT size and search fan-out.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rank_min: u8,
    pub rank_max: u8,
    pub suit_count: usize,
    pub run_min_len: usize,
    pub set_min_len: usize,
    pub max_run_jokers: usize,
    pub max_set_jokers: usize,
    pub bits_per_suit: u32,
    pub canonical_joker_suit: Suit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rank_min: DEFAULT_RANK_MIN,
            rank_max: DEFAULT_RANK_MAX,
            suit_count: DEFAULT_SUIT_COUNT,
            run_min_len: DEFAULT_RUN_MIN_LEN,
            set_min_len: DEFAULT_SET_MIN_LEN,
            max_run_jokers: DEFAULT_MAX_RUN_JOKERS,
            max_set_jokers: DEFAULT_MAX_SET_JOKERS,
            bits_per_suit: DEFAULT_BITS_PER_SUIT,
            canonical_joker_suit: DEFAULT_CANONICAL_JOKER_SUIT,
        }
    }
}

impl Config {
    /// Maximum value a `Setdex` sub-counter can hold before saturating.
    pub fn max_suit_count(&self) -> u8 {
        ((1u16 << self.bits_per_suit) - 1) as u8
    }
}

/// The per-round objective: how many sets and runs must be laid down.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Objective {
    pub num_sets: usize,
    pub num_runs: usize,
}

impl Objective {
    pub fn new(num_sets: usize, num_runs: usize) -> Self {
        Self { num_sets, num_runs }
    }
}
