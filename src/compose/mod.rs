//! Backtracking composers: `iter_melds` (spec.md §4.6) and the update
//! composer `iter_adds`/`iter_extends`/`iter_updates_multi` (§4.7).
//!
//! Both share the same speculative take/commit/undo discipline over an
//! `IndexedHand`, so the one helper below — which accounts for the fact
//! that a hand only ever stores *unmaterialized* jokers, never the
//! materialized ones that show up inside a `Run`/`Set`/`Add`/`Extend` —
//! is used by both.

use crate::card::Card;
use crate::indexed_hand::IndexedHand;

pub mod melds;
pub mod updates;

/// Speculatively take every card of `cards` from `hand`. A materialized
/// joker is taken as a plain `Card::joker()`, since that's the only form
/// a hand ever holds one in. On the first failure, rolls back whatever
/// was taken for this attempt (but nothing committed earlier) and
/// returns `false`; the caller must not call `commit()` in that case.
pub(crate) fn try_take_combo(hand: &mut IndexedHand, cards: &[Card]) -> bool {
    for &card in cards {
        let to_take = if card.is_joker() { Card::joker() } else { card };
        if hand.take(to_take).is_err() {
            hand.rollback();
            return false;
        }
    }
    true
}
