//! `IndexedHand`: a `Hand` that maintains `Rundex`/`Setdex` indices in
//! lock-step with every `put`/`take`, so enumerators can read off the
//! indices directly instead of re-scanning the hand's cards.

use crate::card::{Card, Rank, Suit};
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::rundex::Rundex;
use crate::setdex::Setdex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackEntry {
    Taken(Card),
    Marker,
}

/// A `Hand` (transactional multiset) plus a `Rundex` per suit and a
/// `Setdex` per rank, kept consistent with the multiset on every
/// mutation. See `Hand` for the plain (unindexed) variant; the two
/// duplicate their transactional discipline rather than share it,
/// because keeping the index update inside the same `put`/`take` call
/// that mutates the base count is what makes the "index state is
/// derivable from the multiset at any commit boundary" invariant
/// trivially true.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct IndexedHand {
    counts: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    stack: Vec<StackEntry>,
    rundex: [Rundex; 4],
    setdex: [Setdex; Rank::COUNT],
    bits_per_suit: u32,
}

impl IndexedHand {
    pub fn new(config: &Config) -> Self {
        Self {
            counts: vec![0; Card::HAND_SLOTS],
            stack: Vec::new(),
            rundex: [Rundex::new(); 4],
            setdex: [Setdex::new(); Rank::COUNT],
            bits_per_suit: config.bits_per_suit,
        }
    }

    pub fn from_cards(config: &Config, cards: impl IntoIterator<Item = Card>) -> Self {
        let mut hand = Self::new(config);
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

    pub fn joker_count(&self) -> u32 {
        self.counts[Card::JOKER_CODE as usize]
    }

    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn rundex(&self, suit: Suit) -> &Rundex {
        &self.rundex[suit.index()]
    }

    pub fn setdex(&self, rank: Rank) -> &Setdex {
        &self.setdex[rank.index()]
    }

    pub fn bits_per_suit(&self) -> u32 {
        self.bits_per_suit
    }

    /// Every non-joker card of suit `s` currently in the hand, once per
    /// copy, in ascending rank order.
    pub fn iter_suit(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        let rundex = self.rundex(suit);
        Rank::ranks().into_iter().flat_map(move |rank| {
            std::iter::repeat(Card::new(rank, suit)).take(rundex.count(rank) as usize)
        })
    }

    pub fn put(&mut self, card: Card) {
        self.counts[Self::slot(card)] += 1;
        if !card.is_joker() {
            if let (Some(rank), Some(suit)) = (card.rank(), card.suit()) {
                self.rundex[suit.index()].add(rank);
                self.setdex[rank.index()].append(suit, self.bits_per_suit);
            }
        }
    }

    pub fn take(&mut self, card: Card) -> CoreResult<()> {
        let slot = Self::slot(card);
        if self.counts[slot] == 0 {
            return Err(CoreError::InvalidTake(card));
        }
        self.counts[slot] -= 1;
        if !card.is_joker() {
            if let (Some(rank), Some(suit)) = (card.rank(), card.suit()) {
                self.rundex[suit.index()].remove(rank);
                self.setdex[rank.index()].remove(suit, self.bits_per_suit);
            }
        }
        self.stack.push(StackEntry::Taken(card));
        Ok(())
    }

    pub fn commit(&mut self) {
        self.stack.push(StackEntry::Marker);
    }

    pub fn rollback(&mut self) {
        while let Some(StackEntry::Taken(card)) = self.stack.last().copied() {
            self.stack.pop();
            self.put(card);
        }
    }

    pub fn undo(&mut self) {
        match self.stack.pop() {
            Some(StackEntry::Marker) => {}
            other => panic!("undo() called without a matching commit(); found {other:?}"),
        }
        self.rollback();
    }

    pub fn truncate(&mut self) {
        self.stack.clear();
    }

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

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn test_put_updates_rundex_and_setdex() {
        let mut hand = IndexedHand::new(&cfg());
        hand.put(Card::new(Rank::Seven, Suit::Heart));
        assert!(hand.rundex(Suit::Heart).contains(Rank::Seven));
        assert_eq!(hand.setdex(Rank::Seven).count(Suit::Heart, hand.bits_per_suit()), 1);
    }

    #[test]
    fn test_take_updates_rundex_and_setdex() {
        let mut hand = IndexedHand::from_cards(&cfg(), [Card::new(Rank::Seven, Suit::Heart)]);
        hand.take(Card::new(Rank::Seven, Suit::Heart)).unwrap();
        assert!(!hand.rundex(Suit::Heart).contains(Rank::Seven));
        assert_eq!(hand.setdex(Rank::Seven).count(Suit::Heart, hand.bits_per_suit()), 0);
    }

    #[test]
    fn test_joker_does_not_touch_indices() {
        let mut hand = IndexedHand::new(&cfg());
        hand.put(Card::joker());
        assert_eq!(hand.joker_count(), 1);
        for suit in Suit::suits() {
            assert_eq!(hand.rundex(suit).vector(), 0);
        }
    }

    #[test]
    fn test_rollback_restores_indices() {
        let mut hand = IndexedHand::from_cards(&cfg(), [Card::new(Rank::Seven, Suit::Heart)]);
        hand.take(Card::new(Rank::Seven, Suit::Heart)).unwrap();
        hand.rollback();
        assert!(hand.rundex(Suit::Heart).contains(Rank::Seven));
    }

    #[test]
    fn test_iter_suit_yields_ascending_by_copy() {
        let mut hand = IndexedHand::new(&cfg());
        hand.put(Card::new(Rank::Five, Suit::Club));
        hand.put(Card::new(Rank::Two, Suit::Club));
        hand.put(Card::new(Rank::Two, Suit::Club));
        hand.put(Card::new(Rank::Three, Suit::Heart));
        let clubs: Vec<Card> = hand.iter_suit(Suit::Club).collect();
        assert_eq!(clubs.len(), 3);
        assert_eq!(clubs[0].rank(), Some(Rank::Two));
        assert_eq!(clubs[1].rank(), Some(Rank::Two));
        assert_eq!(clubs[2].rank(), Some(Rank::Five));
    }
}
