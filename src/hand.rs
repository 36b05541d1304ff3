//! `Hand`: a transactional multiset of cards.
//!
//! The take-stack discipline is what lets the meld/update composers
//! speculatively take a whole combo, `commit()` if every card in it was
//! actually present, and `undo()` the entire attempt with one call if a
//! deeper recursive step later fails — rather than hand-tracking which
//! individual `put`s reverse which `take`s.

use crate::card::Card;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackEntry {
    Taken(Card),
    Marker,
}

/// A multiset of cards with a transactional take/rollback history.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Hand {
    counts: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    stack: Vec<StackEntry>,
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl Hand {
    pub fn new() -> Self {
        Self {
            counts: vec![0; Card::HAND_SLOTS],
            stack: Vec::new(),
        }
    }

    /// Build a hand from a list of cards (a dealt prefix).
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut hand = Self::new();
        for card in cards {
            hand.put(card);
        }
        hand
    }

    fn slot(card: Card) -> usize {
        card.code() as usize
    }

    pub fn count(&self, card: Card) -> u32 {
        self.counts[Self::slot(card)]
    }

    /// How many jokers this hand currently holds (all unmaterialized).
    pub fn joker_count(&self) -> u32 {
        self.counts[Card::JOKER_CODE as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// Increment the count for `card`. Never fails.
    pub fn put(&mut self, card: Card) {
        self.counts[Self::slot(card)] += 1;
    }

    /// Decrement the count for `card`, pushing it onto the take-stack.
    /// Fails with `InvalidTake` if the hand holds no more copies.
    pub fn take(&mut self, card: Card) -> CoreResult<()> {
        let slot = Self::slot(card);
        if self.counts[slot] == 0 {
            return Err(CoreError::InvalidTake(card));
        }
        self.counts[slot] -= 1;
        self.stack.push(StackEntry::Taken(card));
        Ok(())
    }

    /// Push a transaction sentinel marking everything taken so far as
    /// part of a completed, about-to-be-committed transaction.
    pub fn commit(&mut self) {
        self.stack.push(StackEntry::Marker);
    }

    /// Put back every card taken since the topmost sentinel, without
    /// popping that sentinel. If there is no sentinel, unwinds to the
    /// bottom of the stack.
    pub fn rollback(&mut self) {
        while let Some(StackEntry::Taken(card)) = self.stack.last().copied() {
            self.stack.pop();
            self.put(card);
        }
    }

    /// Unwind one full transaction: pops the topmost sentinel (panics
    /// if the stack top is not a marker — every `commit()` must be
    /// balanced by exactly one `undo()`), then rolls back everything
    /// taken within that transaction.
    pub fn undo(&mut self) {
        match self.stack.pop() {
            Some(StackEntry::Marker) => {}
            other => panic!("undo() called without a matching commit(); found {other:?}"),
        }
        self.rollback();
    }

    /// Discard the take-stack history without restoring any counts.
    pub fn truncate(&mut self) {
        self.stack.clear();
    }

    /// Iterate every card in the hand, each copy once, in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.counts.iter().enumerate().flat_map(|(code, &n)| {
            let card = Card::from_code(code as u8);
            std::iter::repeat_with(move || card.unwrap()).take(n as usize)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn seven_hearts() -> Card {
        Card::new(Rank::Seven, Suit::Heart)
    }

    #[test]
    fn test_put_take_round_trip() {
        let mut hand = Hand::new();
        hand.put(seven_hearts());
        assert_eq!(hand.count(seven_hearts()), 1);
        hand.take(seven_hearts()).unwrap();
        assert_eq!(hand.count(seven_hearts()), 0);
    }

    #[test]
    fn test_take_empty_fails() {
        let mut hand = Hand::new();
        assert_eq!(
            hand.take(seven_hearts()),
            Err(CoreError::InvalidTake(seven_hearts()))
        );
    }

    #[test]
    fn test_rollback_restores_state() {
        let mut hand = Hand::from_cards([seven_hearts(), seven_hearts()]);
        hand.take(seven_hearts()).unwrap();
        hand.take(seven_hearts()).unwrap();
        assert_eq!(hand.count(seven_hearts()), 0);
        hand.rollback();
        assert_eq!(hand.count(seven_hearts()), 2);
    }

    #[test]
    fn test_commit_then_undo_round_trip() {
        let mut hand = Hand::from_cards([seven_hearts()]);
        hand.take(seven_hearts()).unwrap();
        hand.commit();
        hand.undo();
        assert_eq!(hand.count(seven_hearts()), 1);
    }

    #[test]
    fn test_nested_transactions() {
        let two = Card::new(Rank::Two, Suit::Club);
        let mut hand = Hand::from_cards([seven_hearts(), two]);

        hand.take(seven_hearts()).unwrap();
        hand.commit(); // outer transaction committed

        hand.take(two).unwrap();
        hand.rollback(); // inner attempt failed, unwind just `two`
        assert_eq!(hand.count(two), 1);
        assert_eq!(hand.count(seven_hearts()), 0, "outer transaction untouched");

        hand.undo(); // unwind the outer transaction too
        assert_eq!(hand.count(seven_hearts()), 1);
    }

    #[test]
    fn test_joker_uses_single_slot() {
        let mut hand = Hand::new();
        hand.put(Card::joker());
        hand.put(Card::joker());
        assert_eq!(hand.joker_count(), 2);
    }

    #[test]
    fn test_iter_yields_each_copy() {
        let mut hand = Hand::new();
        hand.put(seven_hearts());
        hand.put(seven_hearts());
        hand.put(Card::joker());
        let cards: Vec<Card> = hand.iter().collect();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards.iter().filter(|c| **c == seven_hearts()).count(), 2);
        assert_eq!(cards.iter().filter(|c| c.is_joker()).count(), 1);
    }

    #[test]
    fn test_truncate_discards_history_without_restoring() {
        let mut hand = Hand::from_cards([seven_hearts()]);
        hand.take(seven_hearts()).unwrap();
        hand.truncate();
        assert_eq!(hand.count(seven_hearts()), 0);
    }
}
