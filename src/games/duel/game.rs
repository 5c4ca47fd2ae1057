//! Duel rules, data and actions.

use serde::{Deserialize, Serialize};

use crate::core::{
    ActionError, Arena, EntityId, GameAction, GameParameters, GameRng, GameState, PlayerId, PlayerMap,
    SetupError,
};
use crate::rules::RulesEngine;
use crate::stack::ExtendedSequence;
use crate::turns::{Roster, RosterTurnOrder};

/// A unit kind every participant fields one of.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    pub hp: u32,
    pub power: u32,
}

impl UnitSpec {
    pub fn new(name: impl Into<String>, hp: u32, power: u32) -> Self {
        Self {
            name: name.into(),
            hp,
            power,
        }
    }
}

/// A fielded unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub owner: PlayerId,
    pub hp: u32,
    pub power: u32,
    /// Halves the next strike taken this round.
    pub guarded: bool,
}

impl Unit {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Units and rosters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelData {
    pub(crate) units: Arena<Unit>,
    rosters: PlayerMap<Vec<EntityId>>,
}

impl DuelData {
    /// Look up a unit.
    #[must_use]
    pub fn unit(&self, id: EntityId) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Living units of `player`, in roster order.
    #[must_use]
    pub fn live_units(&self, player: PlayerId) -> Vec<EntityId> {
        self.rosters[player]
            .iter()
            .copied()
            .filter(|&id| self.units.get(id).is_some_and(Unit::is_alive))
            .collect()
    }

    /// Remaining hit points of `player`'s units.
    #[must_use]
    pub fn total_hp(&self, player: PlayerId) -> u32 {
        self.rosters[player]
            .iter()
            .filter_map(|&id| self.units.get(id))
            .map(|u| u.hp)
            .sum()
    }

    fn clear_guards(&mut self) {
        for (_, unit) in self.units.iter_mut() {
            unit.guarded = false;
        }
    }
}

impl Roster for DuelData {
    fn roster_size(&self, player: PlayerId) -> usize {
        self.live_units(player).len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelAction {
    /// Hit an enemy unit with the active unit.
    Strike {
        player: PlayerId,
        attacker: EntityId,
        target: EntityId,
    },
    /// Brace the active unit for the rest of the round.
    Guard { player: PlayerId, unit: EntityId },
}

/// Duels push no sequences.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuelSequence {}

impl ExtendedSequence<Duel> for DuelSequence {
    fn current_player(&self, _state: &GameState<Duel>) -> PlayerId {
        match *self {}
    }

    fn compute_actions(&self, _rules: &Duel, _state: &GameState<Duel>) -> Vec<DuelAction> {
        match *self {}
    }

    fn after_action(&mut self, _rules: &Duel, _state: &mut GameState<Duel>, _action: &DuelAction) {
        match *self {}
    }

    fn is_complete(&self, _state: &GameState<Duel>) -> bool {
        match *self {}
    }
}

/// Unit the turn owner activates now, if any.
///
/// The roster shrinks as units fall, so the index is clamped to the last
/// living unit.
pub fn active_unit(state: &GameState<Duel>) -> Option<EntityId> {
    let live = state.data().live_units(state.turn_owner());
    let index = state.turn_order().active_unit().min(live.len().checked_sub(1)?);
    live.get(index).copied()
}

impl GameAction<Duel> for DuelAction {
    fn actor(&self) -> PlayerId {
        match *self {
            DuelAction::Strike { player, .. } | DuelAction::Guard { player, .. } => player,
        }
    }

    fn validate(&self, _rules: &Duel, state: &GameState<Duel>) -> Result<(), ActionError> {
        let active = active_unit(state);
        match *self {
            DuelAction::Strike {
                player,
                attacker,
                target,
            } => {
                if active != Some(attacker) {
                    return Err(ActionError::Rule("only the active unit may strike"));
                }
                match state.data().unit(target) {
                    Some(unit) if unit.is_alive() && unit.owner != player => Ok(()),
                    _ => Err(ActionError::InvalidTarget(target)),
                }
            }
            DuelAction::Guard { unit, .. } => {
                if active != Some(unit) {
                    return Err(ActionError::InvalidTarget(unit));
                }
                Ok(())
            }
        }
    }

    fn apply(&self, _rules: &Duel, state: &mut GameState<Duel>) {
        match *self {
            DuelAction::Strike {
                attacker, target, ..
            } => {
                let (data, rng) = state.data_and_rng_mut();
                let power = data.units.get(attacker).map_or(0, |u| u.power);
                let roll = rng.gen_range(0..3);
                if let Some(unit) = data.units.get_mut(target) {
                    let mut damage = power + roll;
                    if unit.guarded {
                        damage /= 2;
                    }
                    unit.hp = unit.hp.saturating_sub(damage);
                    tracing::trace!(%attacker, %target, damage, hp = unit.hp, "strike");
                }
            }
            DuelAction::Guard { unit, .. } => {
                if let Some(unit) = state.data_mut().units.get_mut(unit) {
                    unit.guarded = true;
                }
            }
        }
    }
}

/// Duel rules: every participant fields the same line-up.
#[derive(Clone, Debug)]
pub struct Duel {
    lineup: Vec<UnitSpec>,
}

impl Duel {
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 4;

    pub fn new(lineup: Vec<UnitSpec>) -> Self {
        Self { lineup }
    }

    /// Knight, archer and squire.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            UnitSpec::new("knight", 10, 3),
            UnitSpec::new("archer", 6, 4),
            UnitSpec::new("squire", 4, 2),
        ])
    }

    #[must_use]
    pub fn lineup(&self) -> &[UnitSpec] {
        &self.lineup
    }
}

impl RulesEngine for Duel {
    type Action = DuelAction;
    type Sequence = DuelSequence;
    type Data = DuelData;
    type TurnOrder = RosterTurnOrder;

    fn initial_data(&self, params: &GameParameters, _rng: &mut GameRng) -> Result<DuelData, SetupError> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&params.player_count) {
            return Err(SetupError::InvalidPlayerCount {
                count: params.player_count,
                min: Self::MIN_PLAYERS,
                max: Self::MAX_PLAYERS,
            });
        }
        if self.lineup.is_empty() {
            return Err(SetupError::Content("empty line-up".to_string()));
        }

        let mut units = Arena::new();
        let mut rosters: PlayerMap<Vec<EntityId>> = PlayerMap::with_default(params.player_count);
        for owner in PlayerId::all(params.player_count) {
            for spec in &self.lineup {
                let id = units.alloc(Unit {
                    owner,
                    hp: spec.hp,
                    power: spec.power,
                    guarded: false,
                });
                rosters[owner].push(id);
            }
        }
        Ok(DuelData { units, rosters })
    }

    fn initial_turn_order(&self, params: &GameParameters) -> RosterTurnOrder {
        RosterTurnOrder::new(params)
    }

    fn compute_actions(&self, state: &GameState<Duel>, player: PlayerId) -> Vec<DuelAction> {
        let Some(attacker) = active_unit(state) else {
            return Vec::new();
        };
        let data = state.data();
        let mut actions: Vec<DuelAction> = state
            .player_ids()
            .filter(|&p| p != player)
            .flat_map(|p| data.live_units(p))
            .map(|target| DuelAction::Strike {
                player,
                attacker,
                target,
            })
            .collect();
        actions.push(DuelAction::Guard {
            player,
            unit: attacker,
        });
        actions
    }

    fn score(&self, state: &GameState<Duel>, player: PlayerId) -> i64 {
        i64::from(state.data().total_hp(player))
    }

    fn after_action(&self, state: &mut GameState<Duel>, _action: &DuelAction) {
        let fallen: Vec<PlayerId> = state
            .alive_players()
            .into_iter()
            .filter(|&p| state.data().live_units(p).is_empty())
            .collect();
        for player in fallen {
            state.eliminate(player);
        }
    }

    fn on_round_end(&self, state: &mut GameState<Duel>) {
        state.data_mut().clear_guards();
    }
}
