//! Run, Set, Meld, Add, Extend, MeldUpdate — the combo value types.
//!
//! Construction validates invariants and returns `CoreError::InvalidCombo`
//! on violation. A failed construction never corrupts hand state, since
//! it only inspects the `Vec<Card>` it's handed.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::card::{Card, Rank, Suit};
use crate::config::Config;
use crate::error::{CoreError, CoreResult};

/// An ordered sequence of >= 4 cards, one suit, strictly ascending by 1.
/// Jokers inside are materialized to the rank/suit they stand for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Eq, Hash)]
pub struct Run {
    cards: Vec<Card>,
}

impl Run {
    /// Build a `Run` from cards already materialized to their final
    /// rank/suit (callers pin jokers before calling this). Validates
    /// length, single suit, and strict +1 ascension.
    pub fn new(mut cards: Vec<Card>, min_len: usize) -> CoreResult<Self> {
        if cards.len() < min_len {
            return Err(CoreError::InvalidCombo(format!(
                "run has {} cards, needs at least {}",
                cards.len(),
                min_len
            )));
        }
        cards.sort_by_key(|c| c.rank().map(|r| r as u8).unwrap_or(0));
        let suit = cards
            .first()
            .and_then(|c| c.suit())
            .ok_or_else(|| CoreError::InvalidCombo("run card has no suit".to_string()))?;
        let mut prev: Option<Rank> = None;
        for card in &cards {
            if card.suit() != Some(suit) {
                return Err(CoreError::InvalidCombo("run cards must share one suit".to_string()));
            }
            let rank = card
                .rank()
                .ok_or_else(|| CoreError::InvalidCombo("run card has no rank".to_string()))?;
            if let Some(p) = prev {
                if rank as u8 != p as u8 + 1 {
                    return Err(CoreError::InvalidCombo(
                        "run ranks must ascend by exactly 1".to_string(),
                    ));
                }
            }
            prev = Some(rank);
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn suit(&self) -> Suit {
        self.cards[0].suit().expect("run card always has a suit")
    }

    pub fn start(&self) -> Rank {
        self.cards[0].rank().expect("run card always has a rank")
    }

    pub fn end(&self) -> Rank {
        self.cards
            .last()
            .and_then(|c| c.rank())
            .expect("run card always has a rank")
    }

    /// Apply a proposed `Extend` to this run: `extend.left` must be an
    /// ascending, contiguous, same-suit run of ranks immediately below
    /// `start()`, and `extend.right` the same immediately above `end()`.
    /// Returns the combined, still-validated `Run` on success, or
    /// `CoreError::InvalidExtend` if either side fails to prefix/suffix
    /// this run contiguously.
    pub fn extended(&self, extend: &Extend) -> CoreResult<Self> {
        let suit = self.suit();
        let mut expected = self.start();
        for card in extend.left.iter().rev() {
            let prev = expected
                .index()
                .checked_sub(1)
                .and_then(|i| Rank::ranks().get(i).copied())
                .ok_or_else(|| CoreError::InvalidExtend("left prefix runs below the minimum rank".to_string()))?;
            if card.suit() != Some(suit) || card.rank() != Some(prev) {
                return Err(CoreError::InvalidExtend(
                    "left prefix is not contiguous with the run's start".to_string(),
                ));
            }
            expected = prev;
        }

        let mut expected = self.end();
        for card in &extend.right {
            let next = expected
                .next()
                .ok_or_else(|| CoreError::InvalidExtend("right suffix runs above the maximum rank".to_string()))?;
            if card.suit() != Some(suit) || card.rank() != Some(next) {
                return Err(CoreError::InvalidExtend(
                    "right suffix is not contiguous with the run's end".to_string(),
                ));
            }
            expected = next;
        }

        let mut cards = extend.left.clone();
        cards.extend(self.cards.clone());
        cards.extend(extend.right.clone());
        let min_len = self.cards.len();
        Self::new(cards, min_len)
    }
}

impl PartialEq for Run {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl PartialOrd for Run {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Run {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cards.cmp(&other.cards)
    }
}

/// An immutable multiset of >= 3 cards of one rank. Jokers inside are
/// materialized; by convention they are all re-pinned to a single fixed
/// canonical suit on construction so that set equality never depends on
/// which suit a joker happened to be taken as.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Eq, Hash)]
pub struct Set {
    cards: Vec<Card>,
}

impl Set {
    pub fn new(cards: Vec<Card>, min_len: usize, canonical_joker_suit: Suit) -> CoreResult<Self> {
        if cards.len() < min_len {
            return Err(CoreError::InvalidCombo(format!(
                "set has {} cards, needs at least {}",
                cards.len(),
                min_len
            )));
        }
        let rank = cards
            .iter()
            .find_map(|c| c.rank())
            .ok_or_else(|| CoreError::InvalidCombo("set has no ranked card".to_string()))?;
        let mut canonical = Vec::with_capacity(cards.len());
        for card in &cards {
            if card.rank() != Some(rank) {
                return Err(CoreError::InvalidCombo("set cards must share one rank".to_string()));
            }
            if card.is_joker() {
                canonical.push(Card::materialized_joker(rank, canonical_joker_suit));
            } else {
                canonical.push(*card);
            }
        }
        canonical.sort();
        Ok(Self { cards: canonical })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn rank(&self) -> Rank {
        self.cards[0].rank().expect("set card always has a rank")
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl PartialOrd for Set {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Set {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cards.cmp(&other.cards)
    }
}

/// A committed collection of sets and runs, laid down together.
/// Equality and hash are over the concatenated card sequence (sets
/// first, in order, then runs, in order).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Eq, Hash)]
pub struct Meld {
    sets: Vec<Set>,
    runs: Vec<Run>,
}

impl Meld {
    pub fn new(sets: Vec<Set>, runs: Vec<Run>) -> Self {
        Self { sets, runs }
    }

    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The concatenated card sequence used for equality/ordering/hash.
    pub fn canonical_cards(&self) -> Vec<Card> {
        let mut out = Vec::new();
        for s in &self.sets {
            out.extend_from_slice(s.cards());
        }
        for r in &self.runs {
            out.extend_from_slice(r.cards());
        }
        out
    }
}

impl PartialEq for Meld {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_cards() == other.canonical_cards()
    }
}

impl PartialOrd for Meld {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meld {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_cards().cmp(&other.canonical_cards())
    }
}

/// An update to a `Set`: cards to append. May be empty (the no-op
/// update the update composer yields for "do nothing here").
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Add {
    pub cards: Vec<Card>,
}

impl Add {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// An update to a `Run`: an ordered left-prefix and/or an ordered
/// right-suffix. Either may be empty; both empty is the no-op update.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Extend {
    pub left: Vec<Card>,
    pub right: Vec<Card>,
}

impl Extend {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(left: Vec<Card>, right: Vec<Card>) -> Self {
        Self { left, right }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// A mapping from set-index -> `Add` and run-index -> `Extend`,
/// targeting one specific `Meld` on the table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeldUpdate {
    pub set_adds: IndexMap<usize, Add>,
    pub run_extends: IndexMap<usize, Extend>,
}

impl MeldUpdate {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.set_adds.values().all(Add::is_empty) && self.run_extends.values().all(Extend::is_empty)
    }
}

/// Convenience wrapper bundling a `Config` with the min-length
/// constants combos are validated against, so callers don't have to
/// thread two numbers through every construction call site.
pub fn run_min_len(config: &Config) -> usize {
    config.run_min_len
}

pub fn set_min_len(config: &Config) -> usize {
    config.set_min_len
}
