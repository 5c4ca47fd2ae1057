use std::sync::Arc;

use super::LifecycleEvent;
use crate::core::{GameAction, GameState};
use crate::rules::RulesEngine;

/// Observer of lifecycle events.
///
/// `action` is the action just applied for `ActionTaken`, and `None` for
/// every other event.
pub trait GameListener<R: RulesEngine>: Send + Sync {
    fn on_event(&self, event: LifecycleEvent, state: &GameState<R>, action: Option<&R::Action>);
}

/// Listeners registered on a forward model, called in registration order.
pub struct ListenerRegistry<R: RulesEngine> {
    listeners: Vec<Arc<dyn GameListener<R>>>,
}

impl<R: RulesEngine> Default for ListenerRegistry<R> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<R: RulesEngine> Clone for ListenerRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<R: RulesEngine> std::fmt::Debug for ListenerRegistry<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<R: RulesEngine> ListenerRegistry<R> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn add(&mut self, listener: Arc<dyn GameListener<R>>) {
        self.listeners.push(listener);
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver an event to every listener.
    pub fn notify(&self, event: LifecycleEvent, state: &GameState<R>, action: Option<&R::Action>) {
        for listener in &self.listeners {
            listener.on_event(event, state, action);
        }
    }
}

/// Listener that logs every event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceListener;

impl<R: RulesEngine> GameListener<R> for TraceListener {
    fn on_event(&self, event: LifecycleEvent, state: &GameState<R>, action: Option<&R::Action>) {
        match event {
            LifecycleEvent::GameStarted | LifecycleEvent::GameOver => tracing::info!(
                %event,
                tick = state.tick(),
                round = state.round(),
                result = ?state.game_result(),
                "lifecycle"
            ),
            LifecycleEvent::ActionTaken => tracing::debug!(
                %event,
                tick = state.tick(),
                action = %action.map(|a| a.describe()).unwrap_or_default(),
                next = %state.current_player(),
                "lifecycle"
            ),
            LifecycleEvent::TurnOver | LifecycleEvent::RoundOver => tracing::debug!(
                %event,
                tick = state.tick(),
                round = state.round(),
                owner = %state.turn_owner(),
                "lifecycle"
            ),
        }
    }
}
