//! Combinatorial move-generation core for Contract Rummy ("Liverpool"):
//! set/run/meld enumeration and meld-update enumeration over a
//! bit-indexed hand, with joker-aware, LUT-accelerated search.
//!
//! Game orchestration (turn loop, dealer, discard pile), player policy,
//! persistence beyond the LUT cache, CLI/display, and shuffling/RNG are
//! all out of scope: this crate answers "what can be laid down from
//! this hand" and nothing about how a hand came to be or what happens
//! next.

pub mod card;
pub mod combo;
pub mod compose;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod hand;
pub mod indexed_hand;
pub mod lut;
pub mod rundex;
pub mod setdex;

/// Re-exports the public surface so callers can `use
/// contract_rummy_core::prelude::*;` instead of naming each module.
pub mod prelude {
    pub use crate::card::{Card, Rank, Suit};
    pub use crate::combo::{Add, Extend, Meld, MeldUpdate, Run, Set};
    pub use crate::compose::melds::iter_melds;
    pub use crate::compose::updates::{iter_adds, iter_extends, iter_updates_multi, MeldsByOwner, OwnerId};
    pub use crate::config::{Config, Objective};
    pub use crate::enumerate::runs::{iter_runs, iter_runs_lut};
    pub use crate::enumerate::sets::{iter_sets, iter_sets_lut};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::hand::Hand;
    pub use crate::indexed_hand::IndexedHand;
    pub use crate::lut::Lut;
}
