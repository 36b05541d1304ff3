use std::cmp::Ordering;
use std::fmt;

/// Card rank. Spans the full domain range; jacks/queens/kings/aces sort
/// above the numbered cards, and `Ace` is high (14).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

/// All ranks in ascending order. This is what `Rank::ranks()` returns.
const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 14;
    pub const COUNT: usize = 13;

    pub const fn ranks() -> [Self; 13] {
        RANKS
    }

    /// Convert from the numeric domain value (2..=14) to a `Rank`.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Zero-based index into a 13-slot rank array (`Two` -> 0, `Ace` -> 12).
    pub fn index(&self) -> usize {
        (*self as u8 - Self::MIN) as usize
    }

    /// Rank one higher, if any (`Ace` has no successor).
    pub fn next(&self) -> Option<Self> {
        Self::from_u8(*self as u8 + 1)
    }
}

impl From<Rank> for char {
    fn from(rank: Rank) -> Self {
        match rank {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

/// Suit, in the canonical order fixed by the domain constants
/// (Club=0, Spade=1, Heart=2, Diamond=3).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub enum Suit {
    Club = 0,
    Spade = 1,
    Heart = 2,
    Diamond = 3,
}

/// All suits in canonical order. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Club, Suit::Spade, Suit::Heart, Suit::Diamond];

impl Suit {
    pub const COUNT: usize = 4;

    pub const fn suits() -> [Self; 4] {
        SUITS
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn unicode(&self) -> &'static str {
        match self {
            Self::Club => "♧",
            Self::Spade => "♤",
            Self::Heart => "♡",
            Self::Diamond => "♢",
        }
    }
}

impl From<Suit> for char {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Club => 'c',
            Suit::Spade => 's',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }
}

/// The joker bit in a card's canonical encoding (bit 6).
const JOKER_BIT: u8 = 1 << 6;

/// A single card: a natural `rank`/`suit` pair, or a joker.
///
/// An unmaterialized joker has no rank/suit. A joker that has been
/// *materialized* — pinned to a specific rank/suit to stand inside a
/// `Run` or `Set` — carries that rank/suit but keeps its joker bit set,
/// so it never compares equal to the natural card of the same rank/suit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy)]
pub struct Card {
    rank: Option<Rank>,
    suit: Option<Suit>,
    joker: bool,
}

impl Card {
    /// A natural (non-joker) card.
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank: Some(rank),
            suit: Some(suit),
            joker: false,
        }
    }

    /// An unmaterialized joker: wild, no rank/suit.
    pub fn joker() -> Self {
        Self {
            rank: None,
            suit: None,
            joker: true,
        }
    }

    /// A joker pinned to stand for `rank`/`suit` inside a combo.
    pub fn materialized_joker(rank: Rank, suit: Suit) -> Self {
        Self {
            rank: Some(rank),
            suit: Some(suit),
            joker: true,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.joker
    }

    pub fn is_materialized(&self) -> bool {
        self.joker && self.rank.is_some()
    }

    /// `None` for an unmaterialized joker.
    pub fn rank(&self) -> Option<Rank> {
        self.rank
    }

    /// `None` for an unmaterialized joker.
    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    /// The canonical encoding. An unmaterialized joker is `0`, sorting
    /// below every other card. A natural card is `1 + rank.index() +
    /// suit.index() * Rank::COUNT`, so naturals occupy `1..=52`. A
    /// materialized joker carries the same `1..=52` rank/suit component
    /// with bit 6 (`JOKER_BIT`) set on top, landing in `65..=116` —
    /// disjoint from both the plain-joker sentinel and every natural
    /// card, including `materialized_joker(Two, Club)`, whose rank/suit
    /// component alone would otherwise be indistinguishable from the
    /// unmaterialized joker's.
    pub fn code(&self) -> u8 {
        match (self.rank, self.suit) {
            (Some(rank), Some(suit)) => {
                let base = 1 + rank.index() as u8 + suit.index() as u8 * Rank::COUNT as u8;
                if self.joker {
                    base | JOKER_BIT
                } else {
                    base
                }
            }
            _ => Self::JOKER_CODE,
        }
    }

    /// The canonical code of an unmaterialized joker: the single slot a
    /// `Hand` reserves for every joker it holds, regardless of suit/rank
    /// (hands never hold materialized jokers — materialization only
    /// happens once a joker has been taken out to build a combo).
    pub const JOKER_CODE: u8 = 0;

    /// Size of the count array a `Hand` needs to index the joker slot
    /// plus every natural card (`1..=Rank::COUNT * Suit::COUNT`).
    pub const HAND_SLOTS: usize = 1 + Rank::COUNT * Suit::COUNT;

    /// Decode a natural-card code (`1..=52`) or the reserved joker slot
    /// code (`0`) back into a `Card`. Returns `None` for any other value,
    /// including a materialized joker's code (never stored in a `Hand`,
    /// so never round-tripped through this).
    pub fn from_code(code: u8) -> Option<Self> {
        if code == Self::JOKER_CODE {
            return Some(Self::joker());
        }
        if code as usize > Rank::COUNT * Suit::COUNT {
            return None;
        }
        let index = code as usize - 1;
        let rank_idx = index % Rank::COUNT;
        let suit_idx = index / Rank::COUNT;
        let rank = Rank::ranks()[rank_idx];
        let suit = Suit::suits()[suit_idx];
        Some(Self::new(rank, suit))
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}
impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.rank, self.suit) {
            (Some(rank), Some(suit)) if self.joker => {
                write!(f, "Card(Joker->{}{})", char::from(rank), suit.unicode())
            }
            (Some(rank), Some(suit)) => write!(f, "Card({}{})", char::from(rank), suit.unicode()),
            _ => write!(f, "Card(Joker)"),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.rank, self.suit) {
            (Some(rank), Some(suit)) if self.joker => {
                write!(f, "{}{}*", char::from(rank), suit.unicode())
            }
            (Some(rank), Some(suit)) => write!(f, "{}{}", char::from(rank), suit.unicode()),
            _ => write!(f, "Joker"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor() {
        let c = Card::new(Rank::King, Suit::Heart);
        assert_eq!(Some(Rank::King), c.rank());
        assert_eq!(Some(Suit::Heart), c.suit());
        assert!(!c.is_joker());
    }

    #[test]
    fn test_joker_has_no_rank_or_suit() {
        let j = Card::joker();
        assert!(j.is_joker());
        assert!(!j.is_materialized());
        assert_eq!(None, j.rank());
        assert_eq!(None, j.suit());
    }

    #[test]
    fn test_materialized_joker_not_equal_to_natural() {
        let natural = Card::new(Rank::Seven, Suit::Heart);
        let materialized = Card::materialized_joker(Rank::Seven, Suit::Heart);
        assert_ne!(natural, materialized);
        assert_ne!(natural.code(), materialized.code());
        assert!(materialized.is_materialized());
    }

    #[test]
    fn test_joker_sorts_below_naturals() {
        let joker = Card::joker();
        let two = Card::new(Rank::Two, Suit::Club);
        assert!(joker < two);
    }

    #[test]
    fn test_code_is_stable_total_order() {
        let mut cards: Vec<Card> = Rank::ranks()
            .iter()
            .flat_map(|&r| Suit::suits().iter().map(move |&s| Card::new(r, s)))
            .collect();
        cards.push(Card::joker());
        let mut sorted = cards.clone();
        sorted.sort();
        // the unmaterialized joker, being code 0 with the joker bit unset
        // in its rank/suit component, sorts first
        assert_eq!(sorted[0], Card::joker());
        for w in sorted.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn test_equal_natural_cards_are_equal() {
        let a = Card::new(Rank::Ten, Suit::Diamond);
        let b = Card::new(Rank::Ten, Suit::Diamond);
        assert_eq!(a, b);
        assert_eq!(a.code(), b.code());
    }

    #[test]
    fn test_materialized_joker_at_rank_two_club_does_not_collide_with_plain_joker() {
        // Two/Club is the rank/suit pair whose index component is 0, the
        // same as an unset rank/suit would contribute — the case that
        // actually exercises the disjointness of the two encodings.
        let materialized = Card::materialized_joker(Rank::Two, Suit::Club);
        assert_ne!(materialized.code(), Card::joker().code());
        assert_ne!(materialized, Card::joker());
    }
}
