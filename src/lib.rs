//! # rust-fm
//!
//! A turn-based rules engine with extended action sequences, built as a
//! forward model for search agents.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The engine knows participants, turns, rounds and a
//!    resolution stack. Boards, cards and units belong to games, which plug in
//!    through `RulesEngine`.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    Turn orders skip eliminated participants.
//!
//! 3. **Copy-Friendly State**: History and collections use `im-rs`, so
//!    copying a state for a search branch is cheap and copies never alias.
//!
//! ## Architecture
//!
//! - **Extended Sequences**: A multi-step decision (choose origin, amount,
//!   destination...) is an explicit sequence object pushed onto a LIFO
//!   stack. While the stack is non-empty, its top owns the decision.
//!
//! - **Turn Orders**: Standard participant order and per-unit roster order,
//!   both deciding turn and round boundaries from the same counters.
//!
//! - **Determinism**: Each state owns a seeded ChaCha generator that is part
//!   of the state. Same seed and same actions give byte-identical states.
//!
//! ## Modules
//!
//! - `core`: Entity ids, players, state, actions, RNG, parameters, errors
//! - `stack`: Extended sequence protocol and resolution stack
//! - `turns`: Turn order trait and the standard and roster orders
//! - `rules`: RulesEngine trait for game implementations
//! - `forward`: Setup, legal actions, apply, turn and round advancement
//! - `events`: Lifecycle listeners
//! - `rollout`: Random playouts
//! - `games`: Bundled games (skirmish, duel)

pub mod core;
pub mod events;
pub mod forward;
pub mod games;
pub mod rollout;
pub mod rules;
pub mod stack;
pub mod turns;

// Re-export commonly used types
pub use crate::core::{
    ActionError, ActionRecord, Arena, EngineError, EntityId, ErrorSeverity, GameAction, GameParameters,
    GameRng, GameRngState, GameState, GameStatus, NameTable, PhaseId, PlayerId, PlayerMap, PlayerResult,
    SetupError,
};

pub use crate::events::{GameListener, LifecycleEvent, ListenerRegistry, TraceListener};

pub use crate::forward::{ActionFilter, FnFilter, ForwardModel};

pub use crate::rollout::{RandomRollout, RolloutReport};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::stack::{ExtendedSequence, ResolutionStack};

pub use crate::turns::{
    Advance, RoundEnd, Roster, RosterTurnOrder, StandardTurnOrder, TurnOrder, TurnRecord, TurnStep,
    TurnView,
};

/// Everything a game implementation usually needs.
pub mod prelude {
    pub use crate::core::{
        ActionError, EntityId, GameAction, GameParameters, GameRng, GameState, PlayerId, PlayerMap,
        SetupError,
    };
    pub use crate::forward::ForwardModel;
    pub use crate::rules::RulesEngine;
    pub use crate::stack::ExtendedSequence;
    pub use crate::turns::{StandardTurnOrder, TurnOrder};
}
