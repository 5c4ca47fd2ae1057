use std::sync::Arc;

use crate::core::{GameState, PlayerId};
use crate::rules::RulesEngine;

/// Narrows every legal-action list, whatever produced it.
///
/// Filters run after the resolution stack or the rules enumerated the
/// actions, in registration order. A filter that would remove every action is
/// skipped for that query so the decision owner always has a move.
pub trait ActionFilter<R: RulesEngine>: Send + Sync {
    /// Check if this filter applies while `player` owns the decision.
    fn applies_to(&self, _player: PlayerId) -> bool {
        true
    }

    /// Keep the actions this filter allows.
    fn filter(&self, state: &GameState<R>, actions: Vec<R::Action>) -> Vec<R::Action>;
}

/// Filter built from a closure, optionally bound to one decision owner.
///
/// ```
/// use rust_fm::core::{GameParameters, GameState, PlayerId};
/// use rust_fm::forward::{ForwardModel, FnFilter};
/// use rust_fm::games::skirmish::{Skirmish, SkirmishAction};
///
/// let no_pass = FnFilter::new(|_state: &GameState<Skirmish>, actions: Vec<SkirmishAction>| {
///     actions
///         .into_iter()
///         .filter(|a| !matches!(a, SkirmishAction::Pass { .. }))
///         .collect()
/// })
/// .for_player(PlayerId::new(0));
///
/// let model = ForwardModel::new(Skirmish::woodland().unwrap()).with_filter(no_pass);
/// let state = model.setup(&GameParameters::new(2)).unwrap();
/// let actions = model.legal_actions(&state).unwrap();
/// assert!(!actions.iter().any(|a| matches!(a, SkirmishAction::Pass { .. })));
/// ```
pub struct FnFilter<F> {
    player: Option<PlayerId>,
    f: F,
}

impl<F> FnFilter<F> {
    /// Filter every decision owner's actions with `f`.
    pub fn new(f: F) -> Self {
        Self { player: None, f }
    }

    /// Only filter while `player` owns the decision.
    #[must_use]
    pub fn for_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }
}

impl<R, F> ActionFilter<R> for FnFilter<F>
where
    R: RulesEngine,
    F: Fn(&GameState<R>, Vec<R::Action>) -> Vec<R::Action> + Send + Sync,
{
    fn applies_to(&self, player: PlayerId) -> bool {
        self.player.map_or(true, |p| p == player)
    }

    fn filter(&self, state: &GameState<R>, actions: Vec<R::Action>) -> Vec<R::Action> {
        (self.f)(state, actions)
    }
}

/// Filters registered on a forward model.
pub(crate) struct FilterChain<R: RulesEngine> {
    filters: Vec<Arc<dyn ActionFilter<R>>>,
}

impl<R: RulesEngine> Default for FilterChain<R> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<R: RulesEngine> std::fmt::Debug for FilterChain<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl<R: RulesEngine> FilterChain<R> {
    pub(crate) fn add(&mut self, filter: Arc<dyn ActionFilter<R>>) {
        self.filters.push(filter);
    }

    pub(crate) fn apply(&self, state: &GameState<R>, mut actions: Vec<R::Action>) -> Vec<R::Action> {
        let owner = state.current_player();
        for filter in self.filters.iter().filter(|f| f.applies_to(owner)) {
            let kept = filter.filter(state, actions.clone());
            if kept.is_empty() {
                tracing::warn!(%owner, offered = actions.len(), "action filter removed every action, skipped");
                continue;
            }
            actions = kept;
        }
        actions
    }
}
