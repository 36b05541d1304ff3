//! Process-wide lookup-table cache for run and set enumeration.
//!
//! The direct enumerators in `enumerate::runs`/`enumerate::sets` walk a
//! hand's `Rundex`/`Setdex` views and work out which rank windows/suit
//! combinations are reachable given an available joker budget. That
//! computation depends only on the index's bit pattern and the joker
//! budget, not on which specific hand produced it, so it is memoized
//! here the first time a given `(bit_vector, joker_budget)` pair is
//! seen and reused by every later call with the same key, process-wide.
//!
//! Entries are immutable once computed: nothing ever invalidates a key,
//! since the same `(vector, joker_budget, config)` always yields the
//! same pattern set.

use std::collections::HashMap;
use std::sync::RwLock;

use itertools::Itertools;
use once_cell::sync::OnceCell;

use crate::card::Suit;
use crate::config::Config;

/// A rank-window a run can occupy: `positions` is a 13-bit mask (bit i
/// set iff rank index i participates), `joker_count` is how many of
/// those positions are not covered by a natural card and must be
/// filled by a materialized joker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunPattern {
    pub positions: u16,
    pub joker_count: u8,
}

/// How many natural cards of each suit a set draws on, plus how many
/// materialized jokers fill out the rest.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetPattern {
    pub suit_counts: [u8; Suit::COUNT],
    pub joker_count: u8,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RunKey {
    vector: u16,
    joker_budget: u8,
    run_min_len: u8,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SetKey {
    setdex_value: u16,
    bits_per_suit: u32,
    joker_budget: u8,
    set_min_len: u8,
}

#[derive(Default)]
struct Tables {
    runs: HashMap<RunKey, Vec<RunPattern>>,
    sets: HashMap<SetKey, Vec<SetPattern>>,
}

/// The global cache. Lazily initialized on first lookup, then shared
/// by every caller for the remainder of the process.
pub struct Lut {
    tables: RwLock<Tables>,
}

static GLOBAL: OnceCell<Lut> = OnceCell::new();

impl Lut {
    pub fn global() -> &'static Lut {
        GLOBAL.get_or_init(|| Lut {
            tables: RwLock::new(Tables::default()),
        })
    }

    /// Every contiguous rank window of length >= `config.run_min_len`
    /// that `vector` (a `Rundex::vector()`) can support with at most
    /// `joker_budget` of its ranks filled by jokers.
    pub fn run_patterns(&self, vector: u16, joker_budget: usize, config: &Config) -> Vec<RunPattern> {
        let key = RunKey {
            vector,
            joker_budget: joker_budget as u8,
            run_min_len: config.run_min_len as u8,
        };
        if let Some(cached) = self.tables.read().unwrap().runs.get(&key) {
            return cached.clone();
        }
        let computed = compute_run_patterns(vector, joker_budget, config.run_min_len);
        self.tables.write().unwrap().runs.insert(key, computed.clone());
        computed
    }

    /// Every suit-count/joker-count split of length >= `config.set_min_len`
    /// that `setdex_value` (a `Setdex::value()`) can support with at most
    /// `joker_budget` jokers.
    pub fn set_patterns(
        &self,
        setdex_value: u16,
        joker_budget: usize,
        config: &Config,
    ) -> Vec<SetPattern> {
        let key = SetKey {
            setdex_value,
            bits_per_suit: config.bits_per_suit,
            joker_budget: joker_budget as u8,
            set_min_len: config.set_min_len as u8,
        };
        if let Some(cached) = self.tables.read().unwrap().sets.get(&key) {
            return cached.clone();
        }
        let computed = compute_set_patterns(setdex_value, joker_budget, config);
        self.tables.write().unwrap().sets.insert(key, computed.clone());
        computed
    }

    /// Eagerly populate every run/set pattern for every reachable
    /// `(vector, joker_budget)` / `(setdex_value, joker_budget)` pair, up
    /// to `config.max_run_jokers`/`config.max_set_jokers`. Intended for a
    /// startup warmup or for producing a file to ship via `save`.
    pub fn precompute(&self, config: &Config) {
        #[cfg(feature = "tracing")]
        tracing::info!(
            max_run_jokers = config.max_run_jokers,
            max_set_jokers = config.max_set_jokers,
            "precomputing run/set LUT"
        );
        for vector in 0u16..(1 << 13) {
            for budget in 0..=config.max_run_jokers {
                self.run_patterns(vector, budget, config);
            }
        }
        let max_setdex = (1u16 << (config.bits_per_suit * Suit::COUNT as u32)) - 1;
        for value in 0u16..=max_setdex {
            for budget in 0..=config.max_set_jokers {
                self.set_patterns(value, budget, config);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(entries = self.len(), "LUT precompute complete");
    }

    pub fn len(&self) -> usize {
        let tables = self.tables.read().unwrap();
        tables.runs.len() + tables.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut tables = self.tables.write().unwrap();
        tables.runs.clear();
        tables.sets.clear();
    }
}

fn compute_run_patterns(vector: u16, joker_budget: usize, run_min_len: usize) -> Vec<RunPattern> {
    let mut patterns = Vec::new();
    for start in 0..13usize {
        for end in start..13usize {
            let len = end - start + 1;
            if len < run_min_len {
                continue;
            }
            let positions: u16 = ((start..=end).map(|i| 1u16 << i)).fold(0, |acc, bit| acc | bit);
            let missing = (positions & !vector).count_ones() as usize;
            if missing <= joker_budget {
                patterns.push(RunPattern {
                    positions,
                    joker_count: missing as u8,
                });
            }
        }
    }
    patterns
}

fn compute_set_patterns(setdex_value: u16, joker_budget: usize, config: &Config) -> Vec<SetPattern> {
    let mask = (1u16 << config.bits_per_suit) - 1;
    let counts: Vec<u8> = (0..Suit::COUNT)
        .map(|i| ((setdex_value >> (i as u32 * config.bits_per_suit)) & mask) as u8)
        .collect();

    let mut patterns = Vec::new();
    let choices: Vec<Vec<u8>> = counts.iter().map(|&c| (0..=c).collect()).collect();
    for picks in choices.into_iter().multi_cartesian_product() {
        let natural_total: usize = picks.iter().map(|&p| p as usize).sum();
        for jokers in 0..=joker_budget {
            let total = natural_total + jokers;
            if total < config.set_min_len {
                continue;
            }
            if natural_total == 0 && jokers == 0 {
                continue;
            }
            let mut suit_counts = [0u8; Suit::COUNT];
            suit_counts.copy_from_slice(&picks);
            patterns.push(SetPattern {
                suit_counts,
                joker_count: jokers as u8,
            });
        }
    }
    patterns
}

#[cfg(feature = "serde")]
mod persistence {
    use super::*;
    use std::io;
    use std::path::Path;

    #[derive(serde::Serialize, serde::Deserialize)]
    struct Snapshot {
        runs: Vec<(RunKey, Vec<RunPattern>)>,
        sets: Vec<(SetKey, Vec<SetPattern>)>,
    }

    impl Lut {
        /// Serialize the currently-populated cache to JSON at `path`.
        pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
            let tables = self.tables.read().unwrap();
            let snapshot = Snapshot {
                runs: tables.runs.iter().map(|(k, v)| (*k, v.clone())).collect(),
                sets: tables.sets.iter().map(|(k, v)| (*k, v.clone())).collect(),
            };
            let file = std::fs::File::create(path.as_ref())?;
            serde_json::to_writer(file, &snapshot)?;
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %path.as_ref().display(), "LUT cache saved");
            Ok(())
        }

        /// Load a previously saved snapshot at `path`, merging it into
        /// this process's cache (existing entries with the same key are
        /// left untouched).
        pub fn load(&self, path: impl AsRef<Path>) -> io::Result<()> {
            let file = std::fs::File::open(path.as_ref())?;
            let snapshot: Snapshot = serde_json::from_reader(file)?;
            #[cfg(feature = "tracing")]
            tracing::debug!(path = %path.as_ref().display(), "LUT cache loaded");
            let mut tables = self.tables.write().unwrap();
            for (key, patterns) in snapshot.runs {
                tables.runs.entry(key).or_insert(patterns);
            }
            for (key, patterns) in snapshot.sets {
                tables.sets.entry(key).or_insert(patterns);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_pattern_requires_min_len() {
        let patterns = compute_run_patterns(0, 0, 4);
        assert!(patterns.is_empty(), "no naturals, no jokers, nothing reachable");
    }

    #[test]
    fn test_run_pattern_all_jokers_within_budget() {
        let patterns = compute_run_patterns(0, 4, 4);
        assert!(patterns.iter().any(|p| p.joker_count == 4));
    }

    #[test]
    fn test_run_pattern_respects_natural_vector() {
        // ranks 0,1,2,3 present (Two..Five), no jokers needed for that window
        let vector = 0b1111u16;
        let patterns = compute_run_patterns(vector, 0, 4);
        assert!(patterns.iter().any(|p| p.positions == vector && p.joker_count == 0));
    }

    #[test]
    fn test_set_pattern_needs_min_len() {
        let config = Config::default();
        // no suits present at all, no jokers: unreachable
        let patterns = compute_set_patterns(0, 0, &config);
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_set_pattern_with_jokers_filling_gap() {
        let config = Config::default();
        // one suit with a single natural copy (2 bits per suit => value 1)
        let patterns = compute_set_patterns(1, 2, &config);
        assert!(patterns
            .iter()
            .any(|p| p.suit_counts[0] == 1 && p.joker_count == 2));
    }

    #[test]
    fn test_global_lut_memoizes() {
        let lut = Lut::global();
        lut.clear();
        let config = Config::default();
        let first = lut.run_patterns(0b1111, 0, &config);
        let second = lut.run_patterns(0b1111, 0, &config);
        assert_eq!(first, second);
        assert!(lut.len() >= 1);
    }
}
