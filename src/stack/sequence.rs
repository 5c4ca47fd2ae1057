//! The extended sequence protocol.

use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{GameState, PlayerId};
use crate::rules::RulesEngine;

/// A short-lived nested decision process.
///
/// Created by an action's `apply` and installed with
/// [`GameState::push_sequence`]. Sequences carry orchestration state only
/// (stage, accumulated choices, completion); all effects are applied to the
/// game state by the sub-actions they offer.
///
/// ## Contract
///
/// - `compute_actions` is never empty while `is_complete` is false. When no
///   substantive choice exists, offer a pass.
/// - `current_player` may differ from the participant who opened the sequence.
/// - A sequence reaches completion within a bounded number of decisions.
pub trait ExtendedSequence<R: RulesEngine>:
    Clone + Debug + Eq + Hash + Serialize + DeserializeOwned + Send + Sync
{
    /// Participant who decides at the current stage.
    fn current_player(&self, state: &GameState<R>) -> PlayerId;

    /// Sub-actions available at the current stage.
    fn compute_actions(&self, rules: &R, state: &GameState<R>) -> Vec<R::Action>;

    /// Record a sub-action's outcome and move to the next stage.
    ///
    /// Called after `action` was applied, also when `action` opened a child
    /// sequence above this one.
    fn after_action(&mut self, rules: &R, state: &mut GameState<R>, action: &R::Action);

    /// Whether the sequence has finished.
    fn is_complete(&self, state: &GameState<R>) -> bool;

    /// A child sequence opened while this one was on top has completed.
    fn on_child_resolved(&mut self, _rules: &R, _state: &mut GameState<R>, _child: &Self) {}
}
