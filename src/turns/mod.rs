//! Turn order state machines.
//!
//! The turn order decides the main-cycle decision owner whenever the
//! resolution stack is empty. It is the only authority over turn and round
//! counters; actions and sequences read it but never advance it.
//!
//! ## Lifecycle
//!
//! ```text
//! start_round ──► owner acts ──► end_player_turn ──┬─► Next(p) ──► p acts ...
//!      ▲                                           ├─► RoundOver ──► end_round ─┐
//!      └───────────────────────────────────────────┼────────────────────────────┘
//!                                                  └─► Exhausted (nobody can act)
//! ```
//!
//! Ineligible participants (eliminated, or with nothing to activate) are
//! skipped in at most `n` steps for `n` seated participants.

mod roster;
mod standard;

pub use roster::{Roster, RosterTurnOrder};
pub use standard::StandardTurnOrder;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{GameParameters, PlayerId, PlayerMap, PlayerResult};
use crate::rules::RulesEngine;

/// Counters shared by every turn order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Participant opening each round.
    pub first_player: PlayerId,
    /// Owner of the current turn.
    pub turn_owner: PlayerId,
    /// Turns ended in the current round.
    pub turn_counter: u32,
    /// Completed rounds.
    pub round_counter: u32,
    /// Round limit, if any.
    pub max_rounds: Option<u32>,
    /// Participants whose turn (or whole group) is done this round.
    pub acted: PlayerMap<bool>,
}

impl TurnRecord {
    /// Fresh record from setup parameters.
    #[must_use]
    pub fn new(params: &GameParameters) -> Self {
        Self {
            first_player: params.first_player,
            turn_owner: params.first_player,
            turn_counter: 0,
            round_counter: 0,
            max_rounds: params.max_rounds,
            acted: PlayerMap::with_value(params.player_count, false),
        }
    }

    /// Check if `player` already finished this round.
    #[must_use]
    pub fn has_acted(&self, player: PlayerId) -> bool {
        self.acted[player]
    }
}

/// Read-only view of the state parts a turn order may consult.
pub struct TurnView<'a, R: RulesEngine> {
    /// Per-participant results.
    pub results: &'a PlayerMap<PlayerResult>,
    /// Game data.
    pub data: &'a R::Data,
}

impl<R: RulesEngine> TurnView<'_, R> {
    /// Number of seated participants.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.results.player_count()
    }
}

/// What a turn order wants after a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Hand the turn to this candidate (skipped forward if ineligible).
    Next(PlayerId),
    /// The round is complete.
    RoundOver,
}

/// Outcome of ending a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStep {
    /// The turn passed to this participant.
    Next(PlayerId),
    /// The round ended; the forward model closes it.
    RoundOver,
    /// No participant is eligible.
    Exhausted,
}

/// Outcome of closing a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEnd {
    /// Play continues with a new round.
    Continue,
    /// The round limit was reached.
    LimitReached,
}

/// Main-cycle turn order.
pub trait TurnOrder<R: RulesEngine>:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync
{
    /// Shared counters.
    fn record(&self) -> &TurnRecord;

    /// Shared counters, mutably.
    fn record_mut(&mut self) -> &mut TurnRecord;

    /// Decide what follows a turn. `turn_counter` already counts that turn.
    ///
    /// The round is over once no eligible participant is left that has not
    /// acted, so eliminations later in a round never cut it short.
    fn advance(&mut self, view: &TurnView<'_, R>) -> Advance;

    /// Per-round reset. Must be idempotent.
    fn reset_round(&mut self, _view: &TurnView<'_, R>) {}

    /// Whether `player` may own a turn.
    fn is_eligible(&self, view: &TurnView<'_, R>, player: PlayerId) -> bool {
        view.results[player].is_ongoing()
    }

    /// Owner of the current turn.
    fn turn_owner(&self) -> PlayerId {
        self.record().turn_owner
    }

    /// Make the first eligible participant at or after `candidate` the owner.
    ///
    /// Looks at no more than `n` participants. Returns `None` (leaving the
    /// owner unchanged) when nobody is eligible.
    fn move_to(&mut self, view: &TurnView<'_, R>, candidate: PlayerId) -> Option<PlayerId> {
        let n = view.player_count();
        let mut owner = candidate;
        for _ in 0..n {
            if self.is_eligible(view, owner) {
                self.record_mut().turn_owner = owner;
                return Some(owner);
            }
            owner = owner.following(n);
        }
        None
    }

    /// First eligible participant after `from` that has not acted this round.
    ///
    /// Looks at no more than `n` participants.
    fn next_unacted(&self, view: &TurnView<'_, R>, from: PlayerId) -> Option<PlayerId> {
        let n = view.player_count();
        let mut candidate = from;
        for _ in 0..n {
            candidate = candidate.following(n);
            if !self.record().has_acted(candidate) && self.is_eligible(view, candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// End the current turn.
    fn end_player_turn(&mut self, view: &TurnView<'_, R>) -> TurnStep {
        self.record_mut().turn_counter += 1;
        match self.advance(view) {
            Advance::RoundOver => TurnStep::RoundOver,
            Advance::Next(candidate) => match self.move_to(view, candidate) {
                Some(owner) => TurnStep::Next(owner),
                None => TurnStep::Exhausted,
            },
        }
    }

    /// Count a finished round and check the round limit.
    fn end_round(&mut self) -> RoundEnd {
        let record = self.record_mut();
        record.round_counter += 1;
        match record.max_rounds {
            Some(limit) if record.round_counter >= limit => RoundEnd::LimitReached,
            _ => RoundEnd::Continue,
        }
    }

    /// Begin a round with the first eligible participant from `first_player`.
    fn start_round(&mut self, view: &TurnView<'_, R>) -> Option<PlayerId> {
        self.reset_round(view);
        let record = self.record_mut();
        record.turn_counter = 0;
        record.acted.iter_mut().for_each(|(_, acted)| *acted = false);
        let first = record.first_player;
        self.move_to(view, first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::skirmish::{Skirmish, SkirmishData};

    #[test]
    fn test_record_from_parameters() {
        let params = GameParameters::new(3)
            .with_first_player(PlayerId::new(2))
            .with_max_rounds(4);
        let record = TurnRecord::new(&params);

        assert_eq!(record.first_player, PlayerId::new(2));
        assert_eq!(record.turn_owner, PlayerId::new(2));
        assert_eq!(record.max_rounds, Some(4));
        assert!(PlayerId::all(3).all(|p| !record.has_acted(p)));
    }

    #[test]
    fn test_next_unacted_wraps_and_stops() {
        let data = SkirmishData::new(4, 0, 0, im::Vector::new(), None);
        let mut results = PlayerMap::with_value(4, PlayerResult::Ongoing);
        results[PlayerId::new(0)] = PlayerResult::Lose;
        let view = TurnView::<Skirmish> {
            results: &results,
            data: &data,
        };

        let mut order = StandardTurnOrder::new(&GameParameters::new(4));
        TurnOrder::<Skirmish>::record_mut(&mut order).acted[PlayerId::new(1)] = true;
        assert_eq!(order.next_unacted(&view, PlayerId::new(3)), Some(PlayerId::new(2)));

        TurnOrder::<Skirmish>::record_mut(&mut order).acted[PlayerId::new(2)] = true;
        TurnOrder::<Skirmish>::record_mut(&mut order).acted[PlayerId::new(3)] = true;
        assert_eq!(order.next_unacted(&view, PlayerId::new(3)), None);
    }

    #[test]
    fn test_start_round_clears_acted() {
        let data = SkirmishData::new(2, 0, 0, im::Vector::new(), None);
        let results = PlayerMap::with_value(2, PlayerResult::Ongoing);
        let view = TurnView::<Skirmish> {
            results: &results,
            data: &data,
        };

        let mut order = StandardTurnOrder::new(&GameParameters::new(2));
        assert_eq!(order.end_player_turn(&view), TurnStep::Next(PlayerId::new(1)));
        assert!(TurnOrder::<Skirmish>::record(&order).has_acted(PlayerId::new(0)));

        assert_eq!(order.start_round(&view), Some(PlayerId::new(0)));
        let record = TurnOrder::<Skirmish>::record(&order);
        assert!(!record.has_acted(PlayerId::new(0)));
        assert_eq!(record.turn_counter, 0);
    }
}
