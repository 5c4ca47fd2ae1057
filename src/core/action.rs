//! The action contract and action history.
//!
//! Actions are the engine's only unit of mutation. Each game supplies a closed
//! enum of actions that is matched exhaustively; an action is a plain value
//! identified by the participant, target and choice ids it encodes, so two
//! independently constructed actions with the same ids compare and hash equal.
//!
//! Execution is split in two:
//! - `validate` checks preconditions against the current state, read-only
//! - `apply` performs the mutation and cannot fail
//!
//! A rejected action therefore never leaves partial changes behind.

use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::ActionError;
use super::player::PlayerId;
use super::state::GameState;
use crate::rules::RulesEngine;

/// An atomic, value-typed unit of change.
///
/// Actions that open an extended sequence push it onto the state's resolution
/// stack from `apply`; the engine then routes decisions to the sequence until
/// it reports completion.
pub trait GameAction<R: RulesEngine>:
    Clone + Debug + Eq + Hash + Serialize + DeserializeOwned + Send + Sync
{
    /// Participant taking this action.
    fn actor(&self) -> PlayerId;

    /// Check preconditions without mutating.
    ///
    /// Ownership of the decision is checked by the forward model before this
    /// is called.
    fn validate(&self, rules: &R, state: &GameState<R>) -> Result<(), ActionError>;

    /// Apply the effect. Only called after `validate` succeeded.
    fn apply(&self, rules: &R, state: &mut GameState<R>);

    /// Validate, then apply.
    fn execute(&self, rules: &R, state: &mut GameState<R>) -> Result<(), ActionError> {
        self.validate(rules, state)?;
        self.apply(rules, state);
        Ok(())
    }

    /// Non-authoritative rendering for logs.
    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord<A> {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: A,

    /// Round in which the action was taken.
    pub round: u32,

    /// Main-cycle turn counter within the round.
    pub turn: u32,

    /// Game tick (applied actions so far).
    pub tick: u64,
}

impl<A> ActionRecord<A> {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: A, round: u32, turn: u32, tick: u64) -> Self {
        Self {
            player,
            action,
            round,
            turn,
            tick,
        }
    }
}
