//! Skirmish actions.
//!
//! One closed enum covers both main-cycle actions and the sub-actions the
//! march and campaign sequences offer. While a sequence is pending, an action
//! is valid exactly when the active sequence offers it.

use serde::{Deserialize, Serialize};

use super::content::CardId;
use super::game::Skirmish;
use super::sequences::{CampaignSequence, MarchSequence, SkirmishSequence};
use crate::core::{ActionError, EntityId, GameAction, GameState, PlayerId};
use crate::stack::ExtendedSequence;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkirmishAction {
    // === Main cycle ===
    /// Place one warrior from supply.
    Recruit { player: PlayerId, clearing: EntityId },
    /// Draw the top card of the deck.
    Draw { player: PlayerId },
    /// Fight `defender` in `clearing`.
    Battle {
        player: PlayerId,
        clearing: EntityId,
        defender: PlayerId,
    },
    /// Open a march: up to two moves.
    March { player: PlayerId },
    /// Discard a bird card to open a campaign: up to two marches.
    Campaign { player: PlayerId, card: CardId },
    /// End the turn, or decline at a sequence stage.
    Pass { player: PlayerId },

    // === Sequence stages ===
    ChooseOrigin { player: PlayerId, clearing: EntityId },
    ChooseAmount { player: PlayerId, amount: u8 },
    Move {
        player: PlayerId,
        from: EntityId,
        to: EntityId,
        amount: u8,
    },
    /// Outrage: donate a matching card to the alliance's supporters.
    AddSupporter { player: PlayerId, card: CardId },
    /// Outrage refused: the alliance takes a card from the revealed hand.
    Confiscate {
        chooser: PlayerId,
        victim: PlayerId,
        card: CardId,
    },
}

impl GameAction<Skirmish> for SkirmishAction {
    fn actor(&self) -> PlayerId {
        match *self {
            SkirmishAction::Recruit { player, .. }
            | SkirmishAction::Draw { player }
            | SkirmishAction::Battle { player, .. }
            | SkirmishAction::March { player }
            | SkirmishAction::Campaign { player, .. }
            | SkirmishAction::Pass { player }
            | SkirmishAction::ChooseOrigin { player, .. }
            | SkirmishAction::ChooseAmount { player, .. }
            | SkirmishAction::Move { player, .. }
            | SkirmishAction::AddSupporter { player, .. } => player,
            SkirmishAction::Confiscate { chooser, .. } => chooser,
        }
    }

    fn validate(&self, rules: &Skirmish, state: &GameState<Skirmish>) -> Result<(), ActionError> {
        if let Some(top) = state.stack().top() {
            return if top.compute_actions(rules, state).contains(self) {
                Ok(())
            } else {
                Err(ActionError::OutOfWindow)
            };
        }

        let data = state.data();
        match *self {
            SkirmishAction::Recruit { player, clearing } => {
                if data.supply(player) == 0 {
                    return Err(ActionError::InsufficientResources {
                        resource: "supply",
                        needed: 1,
                        available: 0,
                    });
                }
                if !rules.can_recruit_in(data, player, clearing) {
                    return Err(ActionError::InvalidTarget(clearing));
                }
                Ok(())
            }
            SkirmishAction::Draw { player } => {
                if data.deck_len() == 0 {
                    return Err(ActionError::Rule("deck is empty"));
                }
                if data.hand(player).len() >= rules.hand_limit() {
                    return Err(ActionError::Rule("hand is full"));
                }
                Ok(())
            }
            SkirmishAction::Battle {
                player,
                clearing,
                defender,
            } => {
                if defender == player
                    || defender.index() >= state.player_count()
                    || data.warriors(clearing, player) == 0
                    || data.warriors(clearing, defender) == 0
                {
                    return Err(ActionError::InvalidTarget(clearing));
                }
                Ok(())
            }
            SkirmishAction::March { player } => {
                if rules.movable_origins(data, player).is_empty() {
                    return Err(ActionError::Rule("no warriors can move"));
                }
                Ok(())
            }
            SkirmishAction::Campaign { player, card } => {
                if !rules.is_bird(card) || !data.hand(player).contains(&card) {
                    return Err(ActionError::Rule("campaign needs a bird card from hand"));
                }
                if rules.movable_origins(data, player).is_empty() {
                    return Err(ActionError::Rule("no warriors can move"));
                }
                Ok(())
            }
            SkirmishAction::Pass { .. } => Ok(()),
            SkirmishAction::ChooseOrigin { .. }
            | SkirmishAction::ChooseAmount { .. }
            | SkirmishAction::Move { .. }
            | SkirmishAction::AddSupporter { .. }
            | SkirmishAction::Confiscate { .. } => Err(ActionError::OutOfWindow),
        }
    }

    fn apply(&self, rules: &Skirmish, state: &mut GameState<Skirmish>) {
        match *self {
            SkirmishAction::Recruit { player, clearing } => {
                state.data_mut().recruit(clearing, player);
            }
            SkirmishAction::Draw { player } => {
                state.data_mut().draw(player);
            }
            SkirmishAction::Battle {
                player,
                clearing,
                defender,
            } => rules.resolve_battle(state, player, clearing, defender),
            SkirmishAction::March { player } => {
                state.push_sequence(SkirmishSequence::March(MarchSequence::new(player)));
            }
            SkirmishAction::Campaign { player, card } => {
                let data = state.data_mut();
                if data.take_from_hand(player, card) {
                    data.discard_card(card);
                }
                state.push_sequence(SkirmishSequence::Campaign(CampaignSequence::new(player)));
            }
            SkirmishAction::Move {
                player,
                from,
                to,
                amount,
            } => {
                let data = state.data_mut();
                let moved = data.remove(from, player, amount);
                data.place(to, player, moved);
            }
            SkirmishAction::AddSupporter { player, card } => {
                let data = state.data_mut();
                if data.take_from_hand(player, card) {
                    data.add_supporter(card);
                }
            }
            SkirmishAction::Confiscate { victim, card, .. } => {
                let data = state.data_mut();
                if data.take_from_hand(victim, card) {
                    data.add_supporter(card);
                }
            }
            SkirmishAction::Pass { .. }
            | SkirmishAction::ChooseOrigin { .. }
            | SkirmishAction::ChooseAmount { .. } => {}
        }
    }

    fn describe(&self) -> String {
        match self {
            SkirmishAction::Recruit { player, clearing } => format!("{player} recruits in {clearing}"),
            SkirmishAction::Draw { player } => format!("{player} draws"),
            SkirmishAction::Battle {
                player,
                clearing,
                defender,
            } => format!("{player} battles {defender} in {clearing}"),
            SkirmishAction::March { player } => format!("{player} marches"),
            SkirmishAction::Campaign { player, card } => {
                format!("{player} campaigns with card {}", card.0)
            }
            SkirmishAction::Pass { player } => format!("{player} passes"),
            SkirmishAction::ChooseOrigin { player, clearing } => {
                format!("{player} moves out of {clearing}")
            }
            SkirmishAction::ChooseAmount { player, amount } => {
                format!("{player} moves {amount} warriors")
            }
            SkirmishAction::Move {
                player,
                from,
                to,
                amount,
            } => format!("{player} moves {amount} from {from} to {to}"),
            SkirmishAction::AddSupporter { player, card } => {
                format!("{player} gives card {} as supporter", card.0)
            }
            SkirmishAction::Confiscate {
                chooser,
                victim,
                card,
            } => format!("{chooser} confiscates card {} from {victim}", card.0),
        }
    }
}
