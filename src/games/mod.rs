//! Bundled games.
//!
//! - `skirmish`: area control on a clearing graph with marches, campaigns and
//!   an alliance that reacts to moves into sympathetic clearings.
//! - `duel`: unit skirmish played with the roster turn order.

pub mod duel;
pub mod skirmish;
