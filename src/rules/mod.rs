//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Their action, sequence, data and turn order types
//! - Setup from parameters and loaded content
//! - Legal main-cycle actions
//! - Scoring, end of turn, end of round and termination
//!
//! The forward model calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
