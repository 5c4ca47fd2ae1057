//! Round-robin turn order.

use serde::{Deserialize, Serialize};

use super::{Advance, TurnOrder, TurnRecord, TurnView};
use crate::core::GameParameters;
use crate::rules::RulesEngine;

/// Round-robin over live participants.
///
/// A round gives one turn to every participant still live when its seat
/// comes up. Participants eliminated before their seat are skipped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardTurnOrder {
    record: TurnRecord,
}

impl StandardTurnOrder {
    /// Create from setup parameters.
    #[must_use]
    pub fn new(params: &GameParameters) -> Self {
        Self {
            record: TurnRecord::new(params),
        }
    }
}

impl<R: RulesEngine> TurnOrder<R> for StandardTurnOrder {
    fn record(&self) -> &TurnRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut TurnRecord {
        &mut self.record
    }

    fn advance(&mut self, view: &TurnView<'_, R>) -> Advance {
        let owner = self.record.turn_owner;
        self.record.acted[owner] = true;
        match self.next_unacted(view, owner) {
            Some(next) => Advance::Next(next),
            None => Advance::RoundOver,
        }
    }
}
