//! Lifecycle hooks.
//!
//! The forward model reports game start, every applied action, turn and
//! round ends, and game end to registered [`GameListener`]s. Listeners
//! observe only: they get a shared reference to the state and cannot alter
//! the course of the game.
//!
//! Listeners belong to the forward model, not to the state, so copies made
//! for search never carry them along.

mod event;
mod listener;

pub use event::LifecycleEvent;
pub use listener::{GameListener, ListenerRegistry, TraceListener};
