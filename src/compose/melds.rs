//! The meld composer: `iter_melds` (spec.md §4.6).
//!
//! Backtracks over a fixed candidate list of sets followed by a fixed
//! candidate list of runs, speculatively taking each candidate from a
//! scratch hand cloned from the caller's. Per the "mutable iteration
//! state" design note, the composer owns its own scratch `IndexedHand`
//! rather than mutating the one it was handed, so a caller can safely
//! call `iter_melds` more than once, or interleave it with other reads
//! of the same hand.

use crate::combo::Meld;
use crate::compose::try_take_combo;
use crate::config::{Config, Objective};
use crate::enumerate::{runs, sets};
use crate::indexed_hand::IndexedHand;

/// Every distinct `Meld` of exactly `objective.num_sets` sets and
/// `objective.num_runs` runs that can be taken from `hand`
/// simultaneously. Deterministic order; no two emitted `Meld`s compare
/// equal.
pub fn iter_melds(hand: &IndexedHand, objective: &Objective, config: &Config) -> Vec<Meld> {
    let mut candidate_sets = sets::iter_sets(hand, config);
    candidate_sets.sort();
    candidate_sets.dedup();

    let mut candidate_runs = runs::iter_runs(hand, config);
    candidate_runs.sort();
    candidate_runs.dedup();

    let mut scratch = hand.clone();
    let mut chosen_sets = Vec::with_capacity(objective.num_sets);
    let mut chosen_runs = Vec::with_capacity(objective.num_runs);
    let mut out = Vec::new();

    recurse(
        &mut scratch,
        &candidate_sets,
        &candidate_runs,
        objective,
        0,
        &mut chosen_sets,
        &mut chosen_runs,
        &mut out,
    );

    out.sort_by(|a: &Meld, b: &Meld| a.canonical_cards().cmp(&b.canonical_cards()));
    out.dedup_by(|a, b| a == b);
    out
}

#[allow(clippy::too_many_arguments)]
fn recurse(
    hand: &mut IndexedHand,
    candidate_sets: &[crate::combo::Set],
    candidate_runs: &[crate::combo::Run],
    objective: &Objective,
    pos: usize,
    chosen_sets: &mut Vec<crate::combo::Set>,
    chosen_runs: &mut Vec<crate::combo::Run>,
    out: &mut Vec<Meld>,
) {
    let total = objective.num_sets + objective.num_runs;
    if pos == total {
        // The backtracking order in which a given combination of combos was
        // reached is irrelevant to what a Meld *is* (spec.md §4.6 treats two
        // orderings of the same combos as the same Meld expressed twice); sort
        // each side into canonical order so the later sort-and-unique stage
        // collapses those permutations instead of treating them as distinct.
        let mut sets = chosen_sets.clone();
        let mut runs = chosen_runs.clone();
        sets.sort();
        runs.sort();
        out.push(Meld::new(sets, runs));
        return;
    }

    if pos < objective.num_sets {
        for set in candidate_sets {
            if try_take_combo(hand, set.cards()) {
                hand.commit();
                chosen_sets.push(set.clone());
                recurse(
                    hand,
                    candidate_sets,
                    candidate_runs,
                    objective,
                    pos + 1,
                    chosen_sets,
                    chosen_runs,
                    out,
                );
                chosen_sets.pop();
                hand.undo();
            }
        }
    } else {
        for run in candidate_runs {
            if try_take_combo(hand, run.cards()) {
                hand.commit();
                chosen_runs.push(run.clone());
                recurse(
                    hand,
                    candidate_sets,
                    candidate_runs,
                    objective,
                    pos + 1,
                    chosen_sets,
                    chosen_runs,
                    out,
                );
                chosen_runs.pop();
                hand.undo();
            }
        }
    }
}
