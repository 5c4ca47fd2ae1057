//! March and campaign sequences.
//!
//! ## March
//!
//! ```text
//! ChooseOrigin ─► ChooseAmount ─► ChooseDestination ─┬─► (next move or done)
//!                                                    └─► Outrage ─┬─► AddSupporter ─► (next move or done)
//!                                                                 └─► Pass ─► Confiscation (alliance decides)
//! ```
//!
//! Moving into a clearing with sympathy outrages the alliance: the mover
//! donates a card matching the clearing, or passes, reveals their hand to the
//! alliance, and the alliance picks a card from it. Two moves complete a
//! march; a pass at any other stage ends it early.
//!
//! ## Campaign
//!
//! Offers up to two marches, each pushed as a child sequence on top of the
//! campaign. The campaign counts a march when the child resolves.

use serde::{Deserialize, Serialize};

use super::actions::SkirmishAction;
use super::game::Skirmish;
use crate::core::{EntityId, GameState, PlayerId};
use crate::stack::ExtendedSequence;

const MOVES_PER_MARCH: u8 = 2;
const MARCHES_PER_CAMPAIGN: u8 = 2;

/// Offer a pass when a stage has nothing substantive.
fn or_pass(actions: Vec<SkirmishAction>, player: PlayerId) -> Vec<SkirmishAction> {
    if actions.is_empty() {
        vec![SkirmishAction::Pass { player }]
    } else {
        actions
    }
}

/// Stage of a march.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarchStage {
    ChooseOrigin,
    ChooseAmount,
    ChooseDestination,
    Outrage,
    Confiscation,
}

/// Two moves of warriors between adjacent clearings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarchSequence {
    player: PlayerId,
    stage: MarchStage,
    origin: Option<EntityId>,
    amount: u8,
    destination: Option<EntityId>,
    moves: u8,
    done: bool,
}

impl MarchSequence {
    pub(crate) fn new(player: PlayerId) -> Self {
        Self {
            player,
            stage: MarchStage::ChooseOrigin,
            origin: None,
            amount: 0,
            destination: None,
            moves: 0,
            done: false,
        }
    }

    /// Participant who opened the march.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> MarchStage {
        self.stage
    }

    /// Moves completed.
    #[must_use]
    pub fn moves(&self) -> u8 {
        self.moves
    }

    fn finish_move(&mut self) {
        if self.moves >= MOVES_PER_MARCH {
            self.done = true;
        } else {
            self.stage = MarchStage::ChooseOrigin;
            self.origin = None;
            self.amount = 0;
            self.destination = None;
        }
    }

    fn owner(&self, state: &GameState<Skirmish>) -> PlayerId {
        match self.stage {
            MarchStage::Confiscation => state.data().alliance().unwrap_or(self.player),
            _ => self.player,
        }
    }

    fn actions(&self, rules: &Skirmish, state: &GameState<Skirmish>) -> Vec<SkirmishAction> {
        let data = state.data();
        let player = self.player;

        let actions = match (self.stage, self.origin, self.destination) {
            (MarchStage::ChooseOrigin, _, _) => rules
                .movable_origins(data, player)
                .into_iter()
                .map(|clearing| SkirmishAction::ChooseOrigin { player, clearing })
                .collect(),
            (MarchStage::ChooseAmount, Some(origin), _) => (1..=data.warriors(origin, player))
                .map(|amount| SkirmishAction::ChooseAmount { player, amount })
                .collect(),
            (MarchStage::ChooseDestination, Some(from), _) => rules
                .destinations(data, player, from)
                .into_iter()
                .map(|to| SkirmishAction::Move {
                    player,
                    from,
                    to,
                    amount: self.amount,
                })
                .collect(),
            (MarchStage::Outrage, _, Some(to)) => {
                let suit = rules.board().suit(to);
                data.hand(player)
                    .iter()
                    .filter(|&&card| match (rules.card_suit(card), suit) {
                        (Some(card_suit), Some(clearing)) => card_suit.matches(clearing),
                        _ => false,
                    })
                    .map(|&card| SkirmishAction::AddSupporter { player, card })
                    .collect()
            }
            (MarchStage::Confiscation, _, _) => {
                let chooser = self.owner(state);
                let actions = data
                    .hand(player)
                    .iter()
                    .map(|&card| SkirmishAction::Confiscate {
                        chooser,
                        victim: player,
                        card,
                    })
                    .collect();
                return or_pass(actions, chooser);
            }
            _ => Vec::new(),
        };
        or_pass(actions, player)
    }

    fn advance(&mut self, state: &mut GameState<Skirmish>, action: &SkirmishAction) {
        match (self.stage, action) {
            (MarchStage::ChooseOrigin, SkirmishAction::ChooseOrigin { clearing, .. }) => {
                self.origin = Some(*clearing);
                self.stage = MarchStage::ChooseAmount;
            }
            (MarchStage::ChooseAmount, SkirmishAction::ChooseAmount { amount, .. }) => {
                self.amount = *amount;
                self.stage = MarchStage::ChooseDestination;
            }
            (MarchStage::ChooseDestination, SkirmishAction::Move { to, .. }) => {
                self.moves += 1;
                self.destination = Some(*to);
                let alliance = state.data().alliance();
                let outraged = state.data().has_sympathy(*to)
                    && alliance.is_some_and(|a| a != self.player && state.is_playing(a));
                if outraged {
                    self.stage = MarchStage::Outrage;
                } else {
                    self.finish_move();
                }
            }
            (MarchStage::Outrage, SkirmishAction::Pass { .. }) => {
                if let Some(alliance) = state.data().alliance() {
                    state.data_mut().reveal(self.player, alliance);
                }
                self.stage = MarchStage::Confiscation;
            }
            (MarchStage::Outrage, SkirmishAction::AddSupporter { .. })
            | (MarchStage::Confiscation, _) => self.finish_move(),
            (_, SkirmishAction::Pass { .. }) => self.done = true,
            _ => {}
        }
    }
}

/// Up to two marches paid for with a bird card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignSequence {
    player: PlayerId,
    marches: u8,
    done: bool,
}

impl CampaignSequence {
    pub(crate) fn new(player: PlayerId) -> Self {
        Self {
            player,
            marches: 0,
            done: false,
        }
    }

    /// Marches completed.
    #[must_use]
    pub fn marches(&self) -> u8 {
        self.marches
    }

    fn actions(&self, rules: &Skirmish, state: &GameState<Skirmish>) -> Vec<SkirmishAction> {
        let player = self.player;
        let mut actions = Vec::with_capacity(2);
        if self.marches < MARCHES_PER_CAMPAIGN && !rules.movable_origins(state.data(), player).is_empty() {
            actions.push(SkirmishAction::March { player });
        }
        actions.push(SkirmishAction::Pass { player });
        actions
    }
}

/// Every sequence a skirmish can push.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkirmishSequence {
    March(MarchSequence),
    Campaign(CampaignSequence),
}

impl ExtendedSequence<Skirmish> for SkirmishSequence {
    fn current_player(&self, state: &GameState<Skirmish>) -> PlayerId {
        match self {
            SkirmishSequence::March(march) => march.owner(state),
            SkirmishSequence::Campaign(campaign) => campaign.player,
        }
    }

    fn compute_actions(&self, rules: &Skirmish, state: &GameState<Skirmish>) -> Vec<SkirmishAction> {
        match self {
            SkirmishSequence::March(march) => march.actions(rules, state),
            SkirmishSequence::Campaign(campaign) => campaign.actions(rules, state),
        }
    }

    fn after_action(&mut self, _rules: &Skirmish, state: &mut GameState<Skirmish>, action: &SkirmishAction) {
        match self {
            SkirmishSequence::March(march) => march.advance(state, action),
            SkirmishSequence::Campaign(campaign) => {
                if matches!(action, SkirmishAction::Pass { player } if *player == campaign.player) {
                    campaign.done = true;
                }
            }
        }
    }

    fn is_complete(&self, _state: &GameState<Skirmish>) -> bool {
        match self {
            SkirmishSequence::March(march) => march.done,
            SkirmishSequence::Campaign(campaign) => campaign.done,
        }
    }

    fn on_child_resolved(&mut self, _rules: &Skirmish, _state: &mut GameState<Skirmish>, child: &Self) {
        if let (SkirmishSequence::Campaign(campaign), SkirmishSequence::March(_)) = (self, child) {
            campaign.marches += 1;
            if campaign.marches >= MARCHES_PER_CAMPAIGN {
                campaign.done = true;
            }
        }
    }
}
