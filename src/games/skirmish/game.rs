//! Skirmish rules.

use im::Vector;

use super::actions::SkirmishAction;
use super::content::{Board, CardId, SkirmishContent, Suit};
use super::data::SkirmishData;
use super::sequences::SkirmishSequence;
use crate::core::{EntityId, GameParameters, GameRng, GameState, PhaseId, PlayerId, SetupError};
use crate::rules::RulesEngine;
use crate::turns::StandardTurnOrder;

const WOODLAND: &str = include_str!("woodland.json");

/// Skirmish rules with their loaded content.
#[derive(Clone, Debug)]
pub struct Skirmish {
    content: SkirmishContent,
    board: Board,
    homes: Vec<EntityId>,
    sympathy: Vec<EntityId>,
    cards: Vec<Suit>,
}

impl Skirmish {
    /// Opening phase: cards can still be drawn.
    pub const DAYLIGHT: PhaseId = PhaseId::new(0);
    /// Starts once the deck runs dry and lasts for the rest of the game.
    pub const DUSK: PhaseId = PhaseId::new(1);

    /// Validate content and build the rules.
    pub fn from_content(content: SkirmishContent) -> Result<Self, SetupError> {
        let loaded = content.load()?;
        Ok(Self {
            content,
            board: loaded.board,
            homes: loaded.homes,
            sympathy: loaded.sympathy,
            cards: loaded.cards,
        })
    }

    /// Parse and validate JSON content.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        Self::from_content(SkirmishContent::from_json(json)?)
    }

    /// The bundled seven-clearing woodland for up to four seats.
    pub fn woodland() -> Result<Self, SetupError> {
        Self::from_json(WOODLAND)
    }

    /// The clearing graph.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Home clearing of a seat.
    #[must_use]
    pub fn home(&self, player: PlayerId) -> Option<EntityId> {
        self.homes.get(player.index()).copied()
    }

    /// Most cards a hand may hold.
    #[must_use]
    pub fn hand_limit(&self) -> usize {
        self.content.hand_limit
    }

    /// Suit of a card.
    #[must_use]
    pub fn card_suit(&self, card: CardId) -> Option<Suit> {
        self.cards.get(card.0 as usize).copied()
    }

    /// Check if a card is a bird.
    #[must_use]
    pub fn is_bird(&self, card: CardId) -> bool {
        self.card_suit(card) == Some(Suit::Bird)
    }

    /// Recruiting is allowed where the player has warriors, and at home.
    #[must_use]
    pub fn can_recruit_in(&self, data: &SkirmishData, player: PlayerId, clearing: EntityId) -> bool {
        clearing.index() < self.board.len()
            && (data.warriors(clearing, player) > 0 || self.home(player) == Some(clearing))
    }

    /// Neighbours of `from` that `player` may move into: the player must rule
    /// the origin or the destination.
    #[must_use]
    pub fn destinations(&self, data: &SkirmishData, player: PlayerId, from: EntityId) -> Vec<EntityId> {
        let rules_origin = data.ruler(from) == Some(player);
        self.board
            .neighbours(from)
            .iter()
            .copied()
            .filter(|&to| rules_origin || data.ruler(to) == Some(player))
            .collect()
    }

    /// Clearings `player` can start a move from.
    #[must_use]
    pub fn movable_origins(&self, data: &SkirmishData, player: PlayerId) -> Vec<EntityId> {
        self.board
            .clearings()
            .filter(|&c| data.warriors(c, player) > 0 && !self.destinations(data, player, c).is_empty())
            .collect()
    }

    /// Roll two dice (0-3): the attacker deals the higher, the defender the
    /// lower, each capped by its warriors in the clearing. Removed warriors
    /// are destroyed.
    pub(crate) fn resolve_battle(
        &self,
        state: &mut GameState<Self>,
        attacker: PlayerId,
        clearing: EntityId,
        defender: PlayerId,
    ) {
        let (data, rng) = state.data_and_rng_mut();
        let a = rng.gen_range(0..4) as u8;
        let b = rng.gen_range(0..4) as u8;

        let attacker_hits = a.max(b).min(data.warriors(clearing, attacker));
        let defender_hits = a.min(b).min(data.warriors(clearing, defender));
        data.remove(clearing, defender, attacker_hits);
        data.remove(clearing, attacker, defender_hits);

        tracing::trace!(%attacker, %defender, %clearing, attacker_hits, defender_hits, "battle");
    }
}

impl RulesEngine for Skirmish {
    type Action = SkirmishAction;
    type Sequence = SkirmishSequence;
    type Data = SkirmishData;
    type TurnOrder = StandardTurnOrder;

    fn initial_data(&self, params: &GameParameters, rng: &mut GameRng) -> Result<SkirmishData, SetupError> {
        let seats = self.homes.len();
        if params.player_count < 2 || params.player_count > seats {
            return Err(SetupError::InvalidPlayerCount {
                count: params.player_count,
                min: 2,
                max: seats,
            });
        }

        let alliance = self
            .content
            .alliance_seat
            .map(PlayerId::new)
            .filter(|a| a.index() < params.player_count);

        let mut deck: Vec<CardId> = (0..self.cards.len() as u16).map(CardId).collect();
        rng.shuffle(&mut deck);

        let mut data = SkirmishData::new(
            params.player_count,
            self.board.len(),
            self.content.supply,
            deck.into_iter().collect::<Vector<_>>(),
            alliance,
        );
        for player in PlayerId::all(params.player_count) {
            data.place(self.homes[player.index()], player, self.content.starting_warriors);
        }
        for &clearing in &self.sympathy {
            data.set_sympathy(clearing);
        }
        for _ in 0..self.content.starting_hand {
            for player in PlayerId::all(params.player_count) {
                data.draw(player);
            }
        }
        Ok(data)
    }

    fn initial_turn_order(&self, params: &GameParameters) -> StandardTurnOrder {
        StandardTurnOrder::new(params)
    }

    fn compute_actions(&self, state: &GameState<Self>, player: PlayerId) -> Vec<SkirmishAction> {
        let data = state.data();
        let mut actions = Vec::new();

        if data.supply(player) > 0 {
            actions.extend(
                self.board
                    .clearings()
                    .filter(|&c| self.can_recruit_in(data, player, c))
                    .map(|clearing| SkirmishAction::Recruit { player, clearing }),
            );
        }

        if state.phase() == Self::DAYLIGHT && data.hand(player).len() < self.hand_limit() {
            actions.push(SkirmishAction::Draw { player });
        }

        for clearing in self.board.clearings() {
            if data.warriors(clearing, player) == 0 {
                continue;
            }
            for defender in state.player_ids() {
                if defender != player && data.warriors(clearing, defender) > 0 {
                    actions.push(SkirmishAction::Battle {
                        player,
                        clearing,
                        defender,
                    });
                }
            }
        }

        if !self.movable_origins(data, player).is_empty() {
            actions.push(SkirmishAction::March { player });
            let mut birds: Vec<CardId> = data
                .hand(player)
                .iter()
                .copied()
                .filter(|&c| self.is_bird(c))
                .collect();
            birds.sort_unstable();
            birds.dedup();
            actions.extend(birds.into_iter().map(|card| SkirmishAction::Campaign { player, card }));
        }

        actions.push(SkirmishAction::Pass { player });
        actions
    }

    fn score(&self, state: &GameState<Self>, player: PlayerId) -> i64 {
        let data = state.data();
        let mut score = data.ruled_count(player) as i64;
        if data.alliance() == Some(player) {
            score += (data.supporters().len() + data.sympathy_count()) as i64;
        }
        score
    }

    fn after_action(&self, state: &mut GameState<Self>, _action: &SkirmishAction) {
        if state.phase() == Self::DAYLIGHT && state.data().deck_len() == 0 {
            tracing::debug!(round = state.round(), "deck exhausted, dusk falls");
            state.set_phase(Self::DUSK);
        }

        let beaten: Vec<PlayerId> = state
            .alive_players()
            .into_iter()
            .filter(|&p| state.data().warriors_on_board(p) == 0 && state.data().supply(p) == 0)
            .collect();
        for player in beaten {
            state.eliminate(player);
        }
    }

    fn redact(&self, state: &mut GameState<Self>, observer: PlayerId) {
        let (data, rng) = state.data_and_rng_mut();
        data.redetermine(observer, rng);
    }
}
