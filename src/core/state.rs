//! Game state: the full mutable snapshot.
//!
//! ## GameState
//!
//! Owns everything that changes during play:
//! - Game status and per-participant results
//! - Phase marker
//! - Turn order record
//! - Resolution stack of pending extended sequences
//! - Game-specific data (`RulesEngine::Data`)
//! - Deterministic RNG
//! - Action history and tick counter
//!
//! Static content (board layout, card definitions) lives in the rules object
//! and is never part of the state.
//!
//! ## Copying
//!
//! `copy()` is a deep copy: no mutable data is shared with the original.
//! History uses `im::Vector`, whose structural sharing is copy-on-write and
//! therefore observationally a deep copy. `branch()` is a copy whose RNG is
//! forked, for search code that wants distinct random futures.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::PhaseId;
use super::player::{PlayerId, PlayerMap, PlayerResult};
use super::rng::GameRng;
use crate::rules::{GameResult, RulesEngine};
use crate::stack::{ExtendedSequence, ResolutionStack};
use crate::turns::{RoundEnd, TurnOrder, TurnStep, TurnView};

/// Lifecycle status of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Being built by setup.
    Setup,
    /// Running the main cycle.
    Running,
    /// Terminal; every result is final.
    Ended,
}

/// Full game state for rules `R`.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GameState<R: RulesEngine> {
    player_count: usize,
    pub(crate) status: GameStatus,
    pub(crate) results: PlayerMap<PlayerResult>,
    phase: PhaseId,
    pub(crate) turn_order: R::TurnOrder,
    pub(crate) stack: ResolutionStack<R::Sequence>,
    data: R::Data,
    rng: GameRng,
    pub(crate) history: Vector<ActionRecord<R::Action>>,
    pub(crate) tick: u64,
    observer: Option<PlayerId>,
}

impl<R: RulesEngine> GameState<R> {
    pub(crate) fn new(
        player_count: usize,
        data: R::Data,
        turn_order: R::TurnOrder,
        rng: GameRng,
    ) -> Self {
        Self {
            player_count,
            status: GameStatus::Setup,
            results: PlayerMap::with_default(player_count),
            phase: PhaseId::default(),
            turn_order,
            stack: ResolutionStack::new(),
            data,
            rng,
            history: Vector::new(),
            tick: 0,
            observer: None,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status == GameStatus::Ended
    }

    // === Decision ownership ===

    /// Participant whose decision it is.
    ///
    /// The innermost pending sequence decides; with an empty stack the turn
    /// order's owner does.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        match self.stack.top() {
            Some(sequence) => sequence.current_player(self),
            None => self.turn_owner(),
        }
    }

    /// Owner of the current main-cycle turn.
    #[must_use]
    pub fn turn_owner(&self) -> PlayerId {
        TurnOrder::<R>::turn_owner(&self.turn_order)
    }

    /// Read-only access to the turn order.
    ///
    /// Actions and sequences never advance the turn order themselves; the
    /// forward model is its only driver.
    #[must_use]
    pub fn turn_order(&self) -> &R::TurnOrder {
        &self.turn_order
    }

    /// Completed rounds.
    #[must_use]
    pub fn round(&self) -> u32 {
        TurnOrder::<R>::record(&self.turn_order).round_counter
    }

    /// Turns taken in the current round.
    #[must_use]
    pub fn turn(&self) -> u32 {
        TurnOrder::<R>::record(&self.turn_order).turn_counter
    }

    /// Open a round through the turn order.
    pub(crate) fn start_round(&mut self) -> Option<PlayerId> {
        let view = TurnView {
            results: &self.results,
            data: &self.data,
        };
        TurnOrder::<R>::start_round(&mut self.turn_order, &view)
    }

    /// End the current turn through the turn order.
    pub(crate) fn end_player_turn(&mut self) -> TurnStep {
        let view = TurnView {
            results: &self.results,
            data: &self.data,
        };
        TurnOrder::<R>::end_player_turn(&mut self.turn_order, &view)
    }

    /// Close the current round through the turn order.
    pub(crate) fn end_round(&mut self) -> RoundEnd {
        TurnOrder::<R>::end_round(&mut self.turn_order)
    }

    // === Resolution stack ===

    /// Pending extended sequences, innermost last.
    #[must_use]
    pub fn stack(&self) -> &ResolutionStack<R::Sequence> {
        &self.stack
    }

    /// Install a sequence as the new innermost decision process.
    pub fn push_sequence(&mut self, sequence: R::Sequence) {
        tracing::trace!(depth = self.stack.depth() + 1, ?sequence, "sequence pushed");
        self.stack.push(sequence);
    }

    // === Game data ===

    /// Game-specific data.
    #[must_use]
    pub fn data(&self) -> &R::Data {
        &self.data
    }

    /// Game-specific data, mutably.
    pub fn data_mut(&mut self) -> &mut R::Data {
        &mut self.data
    }

    /// The state's RNG.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Game data and RNG together, for effects that draw while mutating.
    pub fn data_and_rng_mut(&mut self) -> (&mut R::Data, &mut GameRng) {
        (&mut self.data, &mut self.rng)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> PhaseId {
        self.phase
    }

    /// Set the phase.
    pub fn set_phase(&mut self, phase: PhaseId) {
        self.phase = phase;
    }

    // === Results ===

    /// Result of a participant.
    #[must_use]
    pub fn result(&self, player: PlayerId) -> PlayerResult {
        self.results[player]
    }

    /// All results.
    #[must_use]
    pub fn results(&self) -> &PlayerMap<PlayerResult> {
        &self.results
    }

    /// Set a participant's result.
    pub fn set_player_result(&mut self, player: PlayerId, result: PlayerResult) {
        self.results[player] = result;
    }

    /// Remove a participant from play with `Lose`.
    ///
    /// The turn order skips eliminated participants from then on.
    pub fn eliminate(&mut self, player: PlayerId) {
        if self.results[player].is_ongoing() {
            tracing::debug!(%player, tick = self.tick, "participant eliminated");
            self.results[player] = PlayerResult::Lose;
        }
    }

    /// Check if a participant still takes decisions.
    #[must_use]
    pub fn is_playing(&self, player: PlayerId) -> bool {
        self.results[player].is_ongoing()
    }

    /// Participants still taking decisions.
    #[must_use]
    pub fn alive_players(&self) -> Vec<PlayerId> {
        self.results.players_where(|r| r.is_ongoing())
    }

    /// Number of participants still taking decisions.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.results.values().filter(|r| r.is_ongoing()).count()
    }

    /// Summary of a finished game. `None` while running.
    #[must_use]
    pub fn game_result(&self) -> Option<GameResult> {
        if !self.is_terminal() {
            return None;
        }
        let winners = self.results.players_where(|r| *r == PlayerResult::Win);
        Some(match winners.len() {
            0 => GameResult::Draw,
            1 => GameResult::Winner(winners[0]),
            _ => GameResult::Winners(winners),
        })
    }

    // === History ===

    /// Applied actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<R::Action>> {
        &self.history
    }

    /// Number of applied actions.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    // === Copying ===

    /// Perspective this state was copied for, if it was redacted.
    #[must_use]
    pub fn observer(&self) -> Option<PlayerId> {
        self.observer
    }

    pub(crate) fn set_observer(&mut self, observer: Option<PlayerId>) {
        self.observer = observer;
    }

    /// Exact deep copy, RNG position included.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Deep copy with a forked RNG.
    ///
    /// Takes `&mut self` because forking advances this state's fork counter.
    #[must_use]
    pub fn branch(&mut self) -> Self {
        let mut copy = self.clone();
        copy.rng = self.rng.fork();
        copy
    }

    /// Canonical byte image of the whole state.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}

impl<R: RulesEngine> Clone for GameState<R> {
    fn clone(&self) -> Self {
        Self {
            player_count: self.player_count,
            status: self.status,
            results: self.results.clone(),
            phase: self.phase,
            turn_order: self.turn_order.clone(),
            stack: self.stack.clone(),
            data: self.data.clone(),
            rng: self.rng.clone(),
            history: self.history.clone(),
            tick: self.tick,
            observer: self.observer,
        }
    }
}

impl<R: RulesEngine> PartialEq for GameState<R> {
    fn eq(&self, other: &Self) -> bool {
        self.player_count == other.player_count
            && self.status == other.status
            && self.results == other.results
            && self.phase == other.phase
            && self.turn_order == other.turn_order
            && self.stack == other.stack
            && self.data == other.data
            && self.rng == other.rng
            && self.history == other.history
            && self.tick == other.tick
            && self.observer == other.observer
    }
}

impl<R: RulesEngine> std::fmt::Debug for GameState<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("status", &self.status)
            .field("results", &self.results)
            .field("phase", &self.phase)
            .field("turn_order", &self.turn_order)
            .field("stack", &self.stack)
            .field("data", &self.data)
            .field("tick", &self.tick)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}
