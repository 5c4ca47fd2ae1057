//! Unit duel played with the roster turn order.
//!
//! Every participant fields the same line-up. Each unit activates once per
//! round, in roster order, and either strikes an enemy unit or guards. A
//! participant whose units have all fallen is eliminated; the last one
//! standing wins. At a round limit, remaining hit points decide.

mod game;

pub use game::{active_unit, Duel, DuelAction, DuelData, DuelSequence, Unit, UnitSpec};
