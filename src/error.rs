//! Error taxonomy for the move-generation core.
//!
//! `InvalidTake` is the pruning signal the meld/update composers expect
//! to see constantly during backtracking — it is never a surprise and
//! never propagated past the composer that issued the speculative take.
//! Every other variant indicates a programmer error (a malformed combo,
//! a malformed extend) and is meant to reach the caller.

use thiserror::Error;

use crate::card::Card;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Attempted to take a card the hand does not currently hold.
    #[error("hand does not contain {0:?}")]
    InvalidTake(Card),

    /// A `Run`/`Set`/`Meld` was constructed in violation of its
    /// invariants (wrong length, non-ascending ranks, mixed suits,
    /// mixed ranks).
    #[error("invalid combo: {0}")]
    InvalidCombo(String),

    /// A proposed `Extend` does not prefix/suffix its target run
    /// contiguously.
    #[error("invalid extend: {0}")]
    InvalidExtend(String),

    /// A deck-backed helper was asked to draw from an empty deck.
    #[error("deck is empty")]
    EmptyDeck,

    /// A deck-backed helper was asked to take a card it does not hold.
    #[error("deck does not contain that card")]
    InvalidDeckTake,
}

pub type CoreResult<T> = Result<T, CoreError>;
