//! Error types.
//!
//! Two layers:
//! - [`ActionError`]: why an action's preconditions failed. Produced by
//!   `GameAction::validate`, never after mutation has started.
//! - [`EngineError`]: what the driver reports to its caller. Illegal actions
//!   wrap an `ActionError`; liveness and ownership violations are fatal.
//!
//! Errors are returned, never panicked across a rollout boundary.

use super::{EntityId, PlayerId};

/// Severity of an engine error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Caller error. The state is untouched and the caller may pick another action.
    Validation,
    /// Rules or engine bug. The state can no longer be driven.
    Fatal,
}

impl ErrorSeverity {
    /// Human-readable name of this severity.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Precondition failure of a single action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("not {actual}'s decision (current owner is {expected})")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("invalid target {0}")]
    InvalidTarget(EntityId),

    #[error("insufficient {resource}: need {needed}, have {available}")]
    InsufficientResources {
        resource: &'static str,
        needed: u32,
        available: u32,
    },

    #[error("action is not valid in the current stage")]
    OutOfWindow,

    #[error("action is not among the current legal actions")]
    NotOffered,

    #[error("rule violated: {0}")]
    Rule(&'static str),
}

/// Setup failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("invalid player count {count} (expected {min}..={max})")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    #[error("first player {0} is not seated")]
    InvalidFirstPlayer(PlayerId),

    #[error("no participant is eligible to take the first turn")]
    NoEligiblePlayer,

    #[error("invalid content: {0}")]
    Content(String),
}

/// Error reported by the forward model.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("illegal action {action} by {player}: {source}")]
    IllegalAction {
        player: PlayerId,
        action: String,
        #[source]
        source: ActionError,
    },

    #[error("sequence at stack depth {depth} owned by {owner} offers no actions while incomplete")]
    MalformedSequence { depth: usize, owner: PlayerId },

    #[error("inconsistent decision owner {owner}: {detail}")]
    InconsistentOwner {
        owner: PlayerId,
        detail: &'static str,
    },

    #[error("{0} has no legal actions in the main cycle")]
    NoLegalActions(PlayerId),

    #[error("{0} is not seated")]
    UnknownPlayer(PlayerId),

    #[error("game has not been set up")]
    NotStarted,

    #[error("game is over")]
    GameOver,

    #[error("setup failed: {0}")]
    Setup(#[from] SetupError),
}

impl EngineError {
    /// Classify this error.
    #[must_use]
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::IllegalAction { .. }
            | EngineError::UnknownPlayer(_)
            | EngineError::NotStarted
            | EngineError::GameOver
            | EngineError::Setup(_) => ErrorSeverity::Validation,
            EngineError::MalformedSequence { .. }
            | EngineError::InconsistentOwner { .. }
            | EngineError::NoLegalActions(_) => ErrorSeverity::Fatal,
        }
    }

    /// Check if this is an illegal-action rejection.
    #[must_use]
    pub const fn is_illegal_action(&self) -> bool {
        matches!(self, EngineError::IllegalAction { .. })
    }
}
