//! Rules engine trait for game implementations.
//!
//! A game supplies:
//! - `Action`: closed enum of atomic actions
//! - `Sequence`: closed enum of its extended sequences
//! - `Data`: the mutable world (board occupancy, hands, units, counters)
//! - `TurnOrder`: which main-cycle order it plays with
//!
//! Static content (board topology, decks, unit stats) lives in the type
//! implementing this trait and is read-only after setup.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{GameAction, GameParameters, GameRng, GameState, PlayerId, SetupError};
use crate::stack::ExtendedSequence;
use crate::turns::TurnOrder;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `compute_actions`: never empty for a live turn owner; offer a pass
/// - `score`: used to rank the participants still playing at game end
/// - Hooks with default implementations cover the common case: every main
///   action ends the turn, and the game ends when at most one participant
///   is left
pub trait RulesEngine: Sized + Send + Sync + 'static {
    /// Atomic actions.
    type Action: GameAction<Self>;

    /// Extended sequences.
    type Sequence: ExtendedSequence<Self>;

    /// Mutable game data.
    type Data: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync;

    /// Main-cycle turn order.
    type TurnOrder: TurnOrder<Self>;

    /// Build the initial game data.
    ///
    /// `rng` is the new state's generator, for shuffles and random placement.
    fn initial_data(
        &self,
        params: &GameParameters,
        rng: &mut GameRng,
    ) -> Result<Self::Data, SetupError>;

    /// Build the turn order.
    fn initial_turn_order(&self, params: &GameParameters) -> Self::TurnOrder;

    /// Legal main-cycle actions for the turn owner.
    fn compute_actions(&self, state: &GameState<Self>, player: PlayerId) -> Vec<Self::Action>;

    /// Score used for the final ranking.
    fn score(&self, state: &GameState<Self>, player: PlayerId) -> i64;

    // === Hooks ===

    /// Called after every applied action, once the stack has been resolved.
    fn after_action(&self, _state: &mut GameState<Self>, _action: &Self::Action) {}

    /// Whether the owner's turn ends. Only asked with an empty stack.
    fn is_turn_over(&self, _state: &GameState<Self>, _action: &Self::Action) -> bool {
        true
    }

    /// Per-round reset of game data. Must be idempotent.
    fn on_round_end(&self, _state: &mut GameState<Self>) {}

    /// Whether the game has ended.
    fn is_game_over(&self, state: &GameState<Self>) -> bool {
        let alive = state.alive_count();
        alive == 0 || (state.player_count() > 1 && alive == 1)
    }

    /// Hide what `observer` cannot know.
    ///
    /// Called on a fresh copy; implementations redetermine hidden fields
    /// using the copy's own RNG.
    fn redact(&self, _state: &mut GameState<Self>, _observer: PlayerId) {}
}
