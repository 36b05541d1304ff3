//! The update composer: `iter_adds`, `iter_extends`, `iter_updates_multi`
//! (spec.md §4.7).
//!
//! An owner id identifies whichever player's table meld a combo belongs
//! to; the core treats it as an opaque integer key, the way a table of
//! melds-by-player would be keyed in the surrounding game orchestration
//! (out of scope here per spec.md §1).

use indexmap::IndexMap;
use itertools::Itertools;

use crate::card::{Card, Rank, Suit};
use crate::combo::{Add, Extend, Meld, MeldUpdate, Run, Set};
use crate::compose::try_take_combo;
use crate::config::Config;
use crate::indexed_hand::IndexedHand;

pub type OwnerId = u64;
pub type MeldsByOwner = IndexMap<OwnerId, Meld>;

/// Every distinct `Add` (possibly empty) that can be formed from `hand`
/// and appended to `set` while preserving its validity. Materialized
/// jokers are pinned to `config.canonical_joker_suit`, matching how
/// `Set` itself canonicalizes joker suit on construction.
pub fn iter_adds(hand: &IndexedHand, set: &Set, config: &Config) -> Vec<Add> {
    let rank = set.rank();
    let setdex = hand.setdex(rank);
    let joker_budget = (hand.joker_count() as usize).min(config.max_set_jokers);
    let counts: Vec<u8> = Suit::suits()
        .iter()
        .map(|&s| setdex.count(s, config.bits_per_suit))
        .collect();

    let choices: Vec<Vec<u8>> = counts.iter().map(|&c| (0..=c).collect()).collect();
    let mut adds = Vec::new();
    for picks in choices.into_iter().multi_cartesian_product() {
        for jokers in 0..=joker_budget {
            let mut cards = Vec::new();
            for (i, &n) in picks.iter().enumerate() {
                let suit = Suit::suits()[i];
                for _ in 0..n {
                    cards.push(Card::new(rank, suit));
                }
            }
            for _ in 0..jokers {
                cards.push(Card::materialized_joker(rank, config.canonical_joker_suit));
            }
            adds.push(Add::new(cards));
        }
    }
    adds.sort();
    adds.dedup();
    adds
}

/// Walk contiguous ranks away from `run` in one direction (`step` = -1
/// for a left-prefix walk down from `run.start()`, +1 for a right-
/// suffix walk up from `run.end()`), returning every reachable
/// `(cards, jokers_used)` pair for every length from 0 up to where the
/// hand can no longer supply a natural card or a joker to fill the gap.
/// `cards` is always in ascending-rank order, regardless of walk
/// direction.
fn walk(hand: &IndexedHand, suit: Suit, from_idx: isize, step: isize) -> Vec<(Vec<Card>, usize)> {
    let mut options = vec![(Vec::new(), 0usize)];
    let rundex = hand.rundex(suit);
    let mut idx = from_idx;
    let mut cards = Vec::new();
    let mut jokers_used = 0usize;
    while (0..Rank::COUNT as isize).contains(&idx) {
        let rank = Rank::ranks()[idx as usize];
        if rundex.contains(rank) {
            cards.push(Card::new(rank, suit));
        } else {
            jokers_used += 1;
            cards.push(Card::materialized_joker(rank, suit));
        }
        let ordered = if step < 0 {
            let mut c = cards.clone();
            c.reverse();
            c
        } else {
            cards.clone()
        };
        options.push((ordered, jokers_used));
        idx += step;
    }
    options
}

/// Every distinct `Extend` (possibly empty) for `run`: a left-prefix
/// and/or right-suffix of `run`'s own suit drawn from the hand's
/// natural cards plus jokers, such that `run`'s own cards plus the
/// `Extend`'s cards form one contiguous run. A joker used on one side
/// never reduces the count available to the other beyond the hand's
/// actual joker supply (spec.md §9 Open Question — see DESIGN.md).
pub fn iter_extends(hand: &IndexedHand, run: &Run, config: &Config) -> Vec<Extend> {
    let suit = run.suit();
    let joker_budget = (hand.joker_count() as usize).min(config.max_run_jokers);

    let left_options = walk(hand, suit, run.start().index() as isize - 1, -1);
    let right_options = walk(hand, suit, run.end().index() as isize + 1, 1);

    let mut extends = Vec::new();
    for (left_cards, left_jokers) in &left_options {
        for (right_cards, right_jokers) in &right_options {
            if left_jokers + right_jokers > joker_budget {
                continue;
            }
            extends.push(Extend::new(left_cards.clone(), right_cards.clone()));
        }
    }
    extends.sort();
    extends.dedup();
    extends
}

#[derive(Clone)]
enum ComboCandidates {
    SetAdds { owner: OwnerId, index: usize, adds: Vec<Add> },
    RunExtends { owner: OwnerId, index: usize, extends: Vec<Extend> },
}

/// Flatten every `(owner_id, combo_index, combo)` across `melds`, paired
/// with its candidate updates, in owner-then-combo-index order.
fn flatten(hand: &IndexedHand, melds: &MeldsByOwner, config: &Config) -> Vec<ComboCandidates> {
    let mut flat = Vec::new();
    for (&owner, meld) in melds {
        for (index, set) in meld.sets().iter().enumerate() {
            flat.push(ComboCandidates::SetAdds {
                owner,
                index,
                adds: iter_adds(hand, set, config),
            });
        }
        for (index, run) in meld.runs().iter().enumerate() {
            flat.push(ComboCandidates::RunExtends {
                owner,
                index,
                extends: iter_extends(hand, run, config),
            });
        }
    }
    flat
}

/// A canonical, fully-`Ord` view of a `MeldUpdate` used only to sort and
/// dedup the results of `iter_updates_multi` (`IndexMap` itself has no
/// useful total order).
fn canonical_update(update: &MeldUpdate) -> (Vec<(usize, Add)>, Vec<(usize, Extend)>) {
    let mut adds: Vec<(usize, Add)> = update.set_adds.iter().map(|(&i, a)| (i, a.clone())).collect();
    adds.sort();
    let mut extends: Vec<(usize, Extend)> =
        update.run_extends.iter().map(|(&i, e)| (i, e.clone())).collect();
    extends.sort();
    (adds, extends)
}

fn canonical_key(
    result: &IndexMap<OwnerId, MeldUpdate>,
) -> Vec<(OwnerId, Vec<(usize, Add)>, Vec<(usize, Extend)>)> {
    let mut keyed: Vec<_> = result
        .iter()
        .map(|(&owner, update)| {
            let (adds, extends) = canonical_update(update);
            (owner, adds, extends)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed
}

/// Recursive backtracker over the flattened combo list: at each combo,
/// either pick the empty update or one of its valid `Add`s/`Extend`s,
/// speculatively take the corresponding cards, and recurse. Yields a
/// mapping `owner_id -> MeldUpdate` per leaf.
pub fn iter_updates_multi(hand: &IndexedHand, melds: &MeldsByOwner, config: &Config) -> Vec<IndexMap<OwnerId, MeldUpdate>> {
    let flat = flatten(hand, melds, config);
    let mut scratch = hand.clone();
    let mut chosen: Vec<ChosenUpdate> = Vec::with_capacity(flat.len());
    let mut out = Vec::new();

    recurse(&mut scratch, &flat, 0, &mut chosen, &mut out);

    let mut keyed: Vec<_> = out.into_iter().map(|r| (canonical_key(&r), r)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);
    keyed.into_iter().map(|(_, r)| r).collect()
}

#[derive(Clone)]
enum ChosenUpdate {
    Add(Add),
    Extend(Extend),
}

fn recurse(
    hand: &mut IndexedHand,
    flat: &[ComboCandidates],
    pos: usize,
    chosen: &mut Vec<ChosenUpdate>,
    out: &mut Vec<IndexMap<OwnerId, MeldUpdate>>,
) {
    if pos == flat.len() {
        out.push(assemble(flat, chosen));
        return;
    }

    match &flat[pos] {
        ComboCandidates::SetAdds { adds, .. } => {
            for add in adds {
                if try_take_combo(hand, &add.cards) {
                    hand.commit();
                    chosen.push(ChosenUpdate::Add(add.clone()));
                    recurse(hand, flat, pos + 1, chosen, out);
                    chosen.pop();
                    hand.undo();
                }
            }
        }
        ComboCandidates::RunExtends { extends, .. } => {
            for extend in extends {
                let mut cards = extend.left.clone();
                cards.extend(extend.right.clone());
                if try_take_combo(hand, &cards) {
                    hand.commit();
                    chosen.push(ChosenUpdate::Extend(extend.clone()));
                    recurse(hand, flat, pos + 1, chosen, out);
                    chosen.pop();
                    hand.undo();
                }
            }
        }
    }
}

fn assemble(flat: &[ComboCandidates], chosen: &[ChosenUpdate]) -> IndexMap<OwnerId, MeldUpdate> {
    let mut result: IndexMap<OwnerId, MeldUpdate> = IndexMap::new();
    for (combo, picked) in flat.iter().zip(chosen.iter()) {
        match (combo, picked) {
            (ComboCandidates::SetAdds { owner, index, .. }, ChosenUpdate::Add(add)) => {
                result
                    .entry(*owner)
                    .or_default()
                    .set_adds
                    .insert(*index, add.clone());
            }
            (ComboCandidates::RunExtends { owner, index, .. }, ChosenUpdate::Extend(extend)) => {
                result
                    .entry(*owner)
                    .or_default()
                    .run_extends
                    .insert(*index, extend.clone());
            }
            _ => unreachable!("flattened combo kind must match its chosen update kind"),
        }
    }
    result
}
