//! Unit-roster turn order.
//!
//! Each participant activates every unit of its roster in turn before the
//! next participant's group starts. The round ends once every eligible group
//! has been activated.

use serde::{Deserialize, Serialize};

use super::{Advance, TurnOrder, TurnRecord, TurnView};
use crate::core::{GameParameters, PlayerId};
use crate::rules::RulesEngine;

/// Game data exposing per-participant rosters.
pub trait Roster {
    /// Units `player` can currently activate.
    fn roster_size(&self, player: PlayerId) -> usize;
}

/// Turn order cycling through each participant's roster.
///
/// Every activation is one turn. Participants with an empty roster are
/// skipped like eliminated ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterTurnOrder {
    record: TurnRecord,
    unit: usize,
}

impl RosterTurnOrder {
    /// Create from setup parameters.
    #[must_use]
    pub fn new(params: &GameParameters) -> Self {
        Self {
            record: TurnRecord::new(params),
            unit: 0,
        }
    }

    /// Roster index of the unit the turn owner activates now.
    #[must_use]
    pub fn active_unit(&self) -> usize {
        self.unit
    }

    /// Groups that finished activating this round.
    #[must_use]
    pub fn groups_done(&self) -> usize {
        self.record.acted.values().filter(|&&done| done).count()
    }
}

impl<R> TurnOrder<R> for RosterTurnOrder
where
    R: RulesEngine,
    R::Data: Roster,
{
    fn record(&self) -> &TurnRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut TurnRecord {
        &mut self.record
    }

    fn is_eligible(&self, view: &TurnView<'_, R>, player: PlayerId) -> bool {
        view.results[player].is_ongoing() && view.data.roster_size(player) > 0
    }

    fn advance(&mut self, view: &TurnView<'_, R>) -> Advance {
        let owner = self.record.turn_owner;
        if self.is_eligible(view, owner) && self.unit + 1 < view.data.roster_size(owner) {
            self.unit += 1;
            return Advance::Next(owner);
        }

        self.unit = 0;
        self.record.acted[owner] = true;
        match self.next_unacted(view, owner) {
            Some(next) => Advance::Next(next),
            None => Advance::RoundOver,
        }
    }

    fn reset_round(&mut self, _view: &TurnView<'_, R>) {
        self.unit = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerMap, PlayerResult};
    use crate::forward::ForwardModel;
    use crate::games::duel::Duel;
    use crate::turns::TurnStep;

    #[test]
    fn test_lone_survivor_owns_every_activation() {
        let model = ForwardModel::new(Duel::standard());
        let state = model.setup(&GameParameters::new(4)).unwrap();
        let mut results = PlayerMap::with_value(4, PlayerResult::Lose);
        results[PlayerId::new(2)] = PlayerResult::Ongoing;
        let view = TurnView::<Duel> {
            results: &results,
            data: state.data(),
        };

        let mut order = RosterTurnOrder::new(&GameParameters::new(4));
        assert_eq!(order.start_round(&view), Some(PlayerId::new(2)));
        assert_eq!(order.end_player_turn(&view), TurnStep::Next(PlayerId::new(2)));
        assert_eq!(order.active_unit(), 1);
        assert_eq!(order.end_player_turn(&view), TurnStep::Next(PlayerId::new(2)));
        assert_eq!(order.end_player_turn(&view), TurnStep::RoundOver);
        assert_eq!(order.groups_done(), 1);
    }

    #[test]
    fn test_nobody_left_to_activate() {
        let model = ForwardModel::new(Duel::standard());
        let state = model.setup(&GameParameters::new(3)).unwrap();
        let results = PlayerMap::with_value(3, PlayerResult::Lose);
        let view = TurnView::<Duel> {
            results: &results,
            data: state.data(),
        };

        let mut order = RosterTurnOrder::new(&GameParameters::new(3));
        assert_eq!(order.start_round(&view), None);
    }

    #[test]
    fn test_reset_round_is_idempotent() {
        let model = ForwardModel::new(Duel::standard());
        let state = model.setup(&GameParameters::new(2)).unwrap();
        let view = TurnView::<Duel> {
            results: state.results(),
            data: state.data(),
        };

        let mut order = RosterTurnOrder::new(&GameParameters::new(2));
        order.start_round(&view);
        order.end_player_turn(&view);
        assert_eq!(order.active_unit(), 1);

        order.reset_round(&view);
        let once = order.clone();
        order.reset_round(&view);
        assert_eq!(order, once);
        assert_eq!(order.active_unit(), 0);
    }

    #[test]
    fn test_new_round_forgets_finished_groups() {
        let model = ForwardModel::new(Duel::standard());
        let state = model.setup(&GameParameters::new(2)).unwrap();
        let view = TurnView::<Duel> {
            results: state.results(),
            data: state.data(),
        };

        let mut order = RosterTurnOrder::new(&GameParameters::new(2));
        order.start_round(&view);
        for _ in 0..5 {
            order.end_player_turn(&view);
        }
        assert_eq!(order.groups_done(), 1);
        assert_eq!(order.end_player_turn(&view), TurnStep::RoundOver);
        assert_eq!(order.groups_done(), 2);

        assert_eq!(order.start_round(&view), Some(PlayerId::new(0)));
        assert_eq!(order.groups_done(), 0);
    }
}
