use std::sync::Arc;

use crate::core::{
    ActionError, ActionRecord, EngineError, GameAction, GameParameters, GameRng, GameState,
    GameStatus, PlayerId, PlayerResult, SetupError,
};
use super::filter::{ActionFilter, FilterChain};
use crate::events::{GameListener, LifecycleEvent, ListenerRegistry};
use crate::rules::RulesEngine;
use crate::stack::ExtendedSequence;
use crate::turns::{RoundEnd, TurnStep};

/// Driver tying rules, resolution stack and turn order together.
///
/// The model holds only read-only rules and listeners, so one model can
/// drive any number of independent states, including from several threads.
///
/// ## Example
///
/// ```
/// use rust_fm::core::GameParameters;
/// use rust_fm::forward::ForwardModel;
/// use rust_fm::games::duel::Duel;
///
/// let model = ForwardModel::new(Duel::standard());
/// let mut state = model.setup(&GameParameters::new(2).with_seed(7)).unwrap();
///
/// let actions = model.legal_actions(&state).unwrap();
/// model.apply(&mut state, &actions[0]).unwrap();
/// assert_eq!(state.tick(), 1);
/// ```
#[derive(Debug)]
pub struct ForwardModel<R: RulesEngine> {
    rules: R,
    listeners: ListenerRegistry<R>,
    filters: FilterChain<R>,
    strict: bool,
}

impl<R: RulesEngine> ForwardModel<R> {
    /// Create a model for the given rules.
    #[must_use]
    pub fn new(rules: R) -> Self {
        Self {
            rules,
            listeners: ListenerRegistry::new(),
            filters: FilterChain::default(),
            strict: false,
        }
    }

    /// Register a lifecycle listener.
    #[must_use]
    pub fn with_listener(mut self, listener: impl GameListener<R> + 'static) -> Self {
        self.listeners.add(Arc::new(listener));
        self
    }

    /// Register a shared lifecycle listener.
    pub fn add_listener(&mut self, listener: Arc<dyn GameListener<R>>) {
        self.listeners.add(listener);
    }

    /// Register an action filter.
    #[must_use]
    pub fn with_filter(mut self, filter: impl ActionFilter<R> + 'static) -> Self {
        self.filters.add(Arc::new(filter));
        self
    }

    /// Register a shared action filter.
    pub fn add_filter(&mut self, filter: Arc<dyn ActionFilter<R>>) {
        self.filters.add(filter);
    }

    /// Reject actions that are not among the current legal actions.
    ///
    /// Costs one enumeration per `apply`; meant for tests and debugging.
    #[must_use]
    pub fn with_strict_legality(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The rules this model drives.
    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    // === Setup ===

    /// Build the initial state and start the first round.
    pub fn setup(&self, params: &GameParameters) -> Result<GameState<R>, EngineError> {
        params.validate()?;

        let mut rng = GameRng::new(params.seed);
        let data = self.rules.initial_data(params, &mut rng)?;
        let turn_order = self.rules.initial_turn_order(params);
        let mut state = GameState::new(params.player_count, data, turn_order, rng);

        let first = state.start_round().ok_or(SetupError::NoEligiblePlayer)?;
        state.status = GameStatus::Running;

        tracing::info!(
            players = params.player_count,
            seed = params.seed,
            %first,
            "game set up"
        );
        self.listeners.notify(LifecycleEvent::GameStarted, &state, None);
        Ok(state)
    }

    // === Queries ===

    /// Participant whose decision it is.
    #[must_use]
    pub fn current_player(&self, state: &GameState<R>) -> PlayerId {
        state.current_player()
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_terminal(&self, state: &GameState<R>) -> bool {
        state.is_terminal()
    }

    /// Result of a participant.
    #[must_use]
    pub fn result(&self, state: &GameState<R>, player: PlayerId) -> PlayerResult {
        state.result(player)
    }

    /// Legal actions for the current decision owner.
    ///
    /// Empty only when the game has ended. A pending sequence or a live turn
    /// owner with nothing to offer is a rules bug and reported as fatal.
    /// Registered filters narrow the list afterwards.
    pub fn legal_actions(&self, state: &GameState<R>) -> Result<Vec<R::Action>, EngineError> {
        match state.status() {
            GameStatus::Setup => return Err(EngineError::NotStarted),
            GameStatus::Ended => return Ok(Vec::new()),
            GameStatus::Running => {}
        }

        if let Some(top) = state.stack().top() {
            let actions = top.compute_actions(&self.rules, state);
            if actions.is_empty() {
                return Err(EngineError::MalformedSequence {
                    depth: state.stack().depth(),
                    owner: top.current_player(state),
                });
            }
            return Ok(self.filters.apply(state, actions));
        }

        let owner = state.turn_owner();
        let actions = self.rules.compute_actions(state, owner);
        if actions.is_empty() {
            return Err(EngineError::NoLegalActions(owner));
        }
        Ok(self.filters.apply(state, actions))
    }

    /// Copy a state, redacted for `observer` when given.
    ///
    /// The copy shares nothing mutable with `state`. Hidden information is
    /// redetermined with the copy's own RNG, so `state` is not touched.
    #[must_use]
    pub fn copy_for(&self, state: &GameState<R>, observer: Option<PlayerId>) -> GameState<R> {
        let mut copy = state.copy();
        if let Some(player) = observer {
            self.rules.redact(&mut copy, player);
            copy.set_observer(Some(player));
        }
        copy
    }

    // === Execution ===

    /// Apply an action in place.
    ///
    /// On `IllegalAction` the state is unchanged. Fatal errors are reported
    /// after the action was applied, when the rules left the state without a
    /// valid decision owner.
    pub fn apply(&self, state: &mut GameState<R>, action: &R::Action) -> Result<(), EngineError> {
        match state.status() {
            GameStatus::Setup => return Err(EngineError::NotStarted),
            GameStatus::Ended => return Err(EngineError::GameOver),
            GameStatus::Running => {}
        }

        let owner = state.current_player();
        let actor = action.actor();
        if actor != owner {
            return Err(self.reject(
                action,
                ActionError::NotYourTurn {
                    expected: owner,
                    actual: actor,
                },
            ));
        }
        if self.strict && !self.legal_actions(state)?.contains(action) {
            return Err(self.reject(action, ActionError::NotOffered));
        }
        if let Err(source) = action.validate(&self.rules, state) {
            return Err(self.reject(action, source));
        }

        let depth_before = state.stack().depth();
        let record = ActionRecord::new(actor, action.clone(), state.round(), state.turn(), state.tick);
        state.history.push_back(record);

        action.apply(&self.rules, state);
        tracing::trace!(%actor, action = %action.describe(), tick = state.tick, "action applied");

        // The sequence on top before the action hears about it even when the
        // action pushed a child above it.
        if depth_before > 0 {
            self.notify_sequence(state, depth_before - 1, action);
        }
        self.resolve_completed(state);

        self.rules.after_action(state, action);

        if state.stack().is_empty()
            && (self.rules.is_turn_over(state, action) || !state.is_playing(state.turn_owner()))
        {
            self.end_player_turn(state);
        }
        if state.status() == GameStatus::Running && self.rules.is_game_over(state) {
            self.end_game(state);
        }

        state.tick += 1;
        self.listeners
            .notify(LifecycleEvent::ActionTaken, state, Some(action));

        if state.status() == GameStatus::Running {
            self.check_owner(state)?;
        }
        Ok(())
    }

    /// Remove `player` from play with `Disqualified`.
    ///
    /// If `player` owns the turn or the pending decision, every pending
    /// sequence is abandoned (effects already applied stay) and the turn
    /// ends. Otherwise the turn order skips `player` from its next seat on.
    /// Nothing is recorded in the history.
    pub fn disqualify(&self, state: &mut GameState<R>, player: PlayerId) -> Result<(), EngineError> {
        match state.status() {
            GameStatus::Setup => return Err(EngineError::NotStarted),
            GameStatus::Ended => return Err(EngineError::GameOver),
            GameStatus::Running => {}
        }
        if player.index() >= state.player_count() {
            return Err(EngineError::UnknownPlayer(player));
        }
        if !state.is_playing(player) {
            return Ok(());
        }

        let owns_turn = state.turn_owner() == player || state.current_player() == player;
        state.set_player_result(player, PlayerResult::Disqualified);
        tracing::info!(%player, tick = state.tick, "participant disqualified");

        if owns_turn {
            let abandoned = state.stack.clear();
            if abandoned > 0 {
                tracing::debug!(%player, abandoned, "pending sequences abandoned");
            }
            self.end_player_turn(state);
        }
        if state.status() == GameStatus::Running && self.rules.is_game_over(state) {
            self.end_game(state);
        }
        if state.status() == GameStatus::Running {
            self.check_owner(state)?;
        }
        Ok(())
    }

    fn reject(&self, action: &R::Action, source: ActionError) -> EngineError {
        let player = action.actor();
        tracing::debug!(%player, action = %action.describe(), error = %source, "illegal action rejected");
        EngineError::IllegalAction {
            player,
            action: action.describe(),
            source,
        }
    }

    fn notify_sequence(&self, state: &mut GameState<R>, index: usize, action: &R::Action) {
        if let Some(mut sequence) = state.stack().get(index).cloned() {
            sequence.after_action(&self.rules, state, action);
            state.stack.replace(index, sequence);
        }
    }

    /// Pop completed sequences, telling each exposed parent about its child.
    fn resolve_completed(&self, state: &mut GameState<R>) {
        loop {
            match state.stack().top() {
                Some(top) if top.is_complete(state) => {}
                _ => break,
            }
            let Some(child) = state.stack.pop() else {
                break;
            };
            let depth = state.stack().depth();
            tracing::trace!(depth, sequence = ?child, "sequence resolved");

            if depth > 0 {
                if let Some(mut parent) = state.stack().get(depth - 1).cloned() {
                    parent.on_child_resolved(&self.rules, state, &child);
                    state.stack.replace(depth - 1, parent);
                }
            }
        }
    }

    // === Turn and round advancement ===

    fn end_player_turn(&self, state: &mut GameState<R>) {
        self.listeners.notify(LifecycleEvent::TurnOver, state, None);

        let finished = state.turn_owner();
        match state.end_player_turn() {
            TurnStep::Next(next) => {
                tracing::debug!(%finished, %next, "turn over");
            }
            TurnStep::RoundOver => {
                tracing::debug!(%finished, round = state.round(), "turn over, round complete");
                self.end_round(state);
            }
            TurnStep::Exhausted => {
                tracing::warn!(%finished, "no eligible participant left");
                self.end_game(state);
            }
        }
    }

    fn end_round(&self, state: &mut GameState<R>) {
        self.listeners.notify(LifecycleEvent::RoundOver, state, None);

        let end = state.end_round();
        if end == RoundEnd::LimitReached {
            tracing::info!(round = state.round(), "round limit reached");
            self.end_game(state);
            return;
        }

        self.rules.on_round_end(state);
        match state.start_round() {
            Some(first) => tracing::debug!(round = state.round(), %first, "round started"),
            None => self.end_game(state),
        }
    }

    /// Rank the participants still playing by score.
    ///
    /// Ties at the top draw; everyone below the top loses. Results fixed
    /// earlier (eliminations) are kept.
    fn end_game(&self, state: &mut GameState<R>) {
        if state.status() == GameStatus::Ended {
            return;
        }

        let scores: Vec<(PlayerId, i64)> = state
            .alive_players()
            .into_iter()
            .map(|p| (p, self.rules.score(state, p)))
            .collect();

        if let Some(best) = scores.iter().map(|&(_, s)| s).max() {
            let leaders = scores.iter().filter(|&&(_, s)| s == best).count();
            for &(player, score) in &scores {
                let result = match (score == best, leaders) {
                    (true, 1) => PlayerResult::Win,
                    (true, _) => PlayerResult::Draw,
                    (false, _) => PlayerResult::Lose,
                };
                state.set_player_result(player, result);
            }
        }
        state.status = GameStatus::Ended;

        tracing::info!(
            round = state.round(),
            tick = state.tick,
            result = ?state.game_result(),
            "game over"
        );
        self.listeners.notify(LifecycleEvent::GameOver, state, None);
    }

    fn check_owner(&self, state: &GameState<R>) -> Result<(), EngineError> {
        let owner = state.current_player();
        if owner.index() >= state.player_count() {
            return Err(EngineError::InconsistentOwner {
                owner,
                detail: "participant is not seated",
            });
        }
        if state.stack().is_empty() && !state.is_playing(owner) {
            return Err(EngineError::InconsistentOwner {
                owner,
                detail: "turn owner is no longer playing",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::skirmish::{CampaignSequence, MarchSequence, Skirmish, SkirmishAction, SkirmishSequence};

    const P0: PlayerId = PlayerId::new(0);

    fn woodland(players: usize) -> (ForwardModel<Skirmish>, GameState<Skirmish>) {
        let model = ForwardModel::new(Skirmish::woodland().unwrap());
        let state = model.setup(&GameParameters::new(players).with_seed(5)).unwrap();
        (model, state)
    }

    fn campaign_with_march(state: &mut GameState<Skirmish>) {
        state.push_sequence(SkirmishSequence::Campaign(CampaignSequence::new(P0)));
        state.push_sequence(SkirmishSequence::March(MarchSequence::new(P0)));
    }

    #[test]
    fn test_resolve_pops_through_completed_parents() {
        let (model, mut state) = woodland(2);
        campaign_with_march(&mut state);

        // Both levels finish on the same pass.
        let pass = SkirmishAction::Pass { player: P0 };
        model.notify_sequence(&mut state, 0, &pass);
        model.notify_sequence(&mut state, 1, &pass);
        model.resolve_completed(&mut state);

        assert!(state.stack().is_empty());
    }

    #[test]
    fn test_resolve_stops_at_open_parent() {
        let (model, mut state) = woodland(2);
        campaign_with_march(&mut state);

        model.notify_sequence(&mut state, 1, &SkirmishAction::Pass { player: P0 });
        model.resolve_completed(&mut state);

        assert_eq!(state.stack().depth(), 1);
        match state.stack().top() {
            Some(SkirmishSequence::Campaign(campaign)) => assert_eq!(campaign.marches(), 1),
            other => panic!("unexpected top {other:?}"),
        }
    }

    #[test]
    fn test_check_owner() {
        let (model, mut state) = woodland(3);
        assert!(model.check_owner(&state).is_ok());

        state.eliminate(P0);
        assert_eq!(
            model.check_owner(&state),
            Err(EngineError::InconsistentOwner {
                owner: P0,
                detail: "turn owner is no longer playing",
            })
        );

        // A pending decision may still belong to anyone seated.
        state.push_sequence(SkirmishSequence::March(MarchSequence::new(P0)));
        assert!(model.check_owner(&state).is_ok());
    }

    #[test]
    fn test_legal_actions_before_setup_finishes() {
        let (model, mut state) = woodland(2);
        state.status = GameStatus::Setup;
        assert_eq!(model.legal_actions(&state), Err(EngineError::NotStarted));
        assert_eq!(
            model.apply(&mut state, &SkirmishAction::Pass { player: P0 }),
            Err(EngineError::NotStarted)
        );
    }
}
