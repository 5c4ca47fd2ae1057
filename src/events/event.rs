use serde::{Deserialize, Serialize};

/// Point in the game lifecycle at which listeners are called.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Setup finished; the first owner is about to decide.
    GameStarted,
    /// An action was applied and fully resolved.
    ActionTaken,
    /// A main-cycle turn ended.
    TurnOver,
    /// A round ended.
    RoundOver,
    /// The game reached a terminal state.
    GameOver,
}

impl LifecycleEvent {
    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GameStarted => "game_started",
            Self::ActionTaken => "action_taken",
            Self::TurnOver => "turn_over",
            Self::RoundOver => "round_over",
            Self::GameOver => "game_over",
        }
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
