//! Core engine types: entities, players, state, actions, RNG, configuration, errors.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games plug into them through `RulesEngine` rather than modifying the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use entity::{Arena, EntityId};
pub use player::{PlayerId, PlayerMap, PlayerResult};
pub use rng::{GameRng, GameRngState};
pub use config::{GameParameters, NameTable, PhaseId};
pub use error::{ActionError, EngineError, ErrorSeverity, SetupError};
pub use action::{ActionRecord, GameAction};
pub use state::{GameState, GameStatus};
