//! Setup configuration.
//!
//! - `GameParameters`: the explicit per-setup value threaded through
//!   [`ForwardModel::setup`](crate::forward::ForwardModel::setup)
//! - `NameTable`: interning of content names into dense ids
//! - `PhaseId`: opaque phase marker
//!
//! There are no process-wide registries. Everything a game needs to start is
//! either in the parameters or in the rules object built from loaded content.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::SetupError;
use super::PlayerId;

/// Opaque phase identifier. Games define their own phases.
///
/// The engine doesn't interpret phase IDs, it only stores and compares them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

impl PhaseId {
    /// Create a new phase ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Parameters for a single game setup.
///
/// ```
/// use rust_fm::core::{GameParameters, PlayerId};
///
/// let params = GameParameters::new(3)
///     .with_seed(7)
///     .with_max_rounds(20)
///     .with_first_player(PlayerId::new(1));
///
/// assert!(params.validate().is_ok());
/// assert_eq!(params.max_rounds, Some(20));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParameters {
    /// Number of participants (1-255).
    pub player_count: usize,

    /// Seed for the state's random generator.
    #[serde(default)]
    pub seed: u64,

    /// Round limit. The game ends after this many completed rounds.
    #[serde(default)]
    pub max_rounds: Option<u32>,

    /// Participant owning the first main-cycle turn.
    #[serde(default)]
    pub first_player: PlayerId,
}

impl GameParameters {
    /// Most participants a game can hold.
    pub const MAX_PLAYERS: usize = 255;

    /// Parameters with seed 0, no round limit and participant 0 first.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            seed: 0,
            max_rounds: None,
            first_player: PlayerId::new(0),
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the round limit.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Set the first participant.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Check the parameters against engine limits.
    ///
    /// Games check their own player-count range in `initial_data`.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.player_count == 0 || self.player_count > Self::MAX_PLAYERS {
            return Err(SetupError::InvalidPlayerCount {
                count: self.player_count,
                min: 1,
                max: Self::MAX_PLAYERS,
            });
        }
        if self.first_player.index() >= self.player_count {
            return Err(SetupError::InvalidFirstPlayer(self.first_player));
        }
        Ok(())
    }
}

/// Interning table mapping content names to dense ids.
///
/// Owned by loaded content, one per setup. Ids are assigned in first-seen
/// order starting at 0.
///
/// ```
/// use rust_fm::core::NameTable;
///
/// let mut names = NameTable::new();
/// let fox = names.intern("fox");
/// let hare = names.intern("hare");
///
/// assert_eq!(names.intern("fox"), fox);
/// assert_eq!(names.lookup("hare"), Some(hare));
/// assert_eq!(names.name(fox), Some("fox"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTable {
    names: Vec<String>,
    ids: FxHashMap<String, u32>,
}

impl NameTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the id for `name`, assigning the next one if unseen.
    pub fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Get the id for `name` without interning.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// Get the name behind an id.
    #[must_use]
    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Number of interned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_builder() {
        let params = GameParameters::new(4)
            .with_seed(99)
            .with_max_rounds(3)
            .with_first_player(PlayerId::new(2));

        assert_eq!(params.player_count, 4);
        assert_eq!(params.seed, 99);
        assert_eq!(params.max_rounds, Some(3));
        assert_eq!(params.first_player, PlayerId::new(2));
    }

    #[test]
    fn test_parameters_reject_zero_players() {
        let err = GameParameters::new(0).validate().unwrap_err();
        assert_eq!(
            err,
            SetupError::InvalidPlayerCount { count: 0, min: 1, max: 255 }
        );
    }

    #[test]
    fn test_parameters_reject_first_player_out_of_range() {
        let err = GameParameters::new(2)
            .with_first_player(PlayerId::new(2))
            .validate()
            .unwrap_err();
        assert_eq!(err, SetupError::InvalidFirstPlayer(PlayerId::new(2)));
    }

    #[test]
    fn test_parameters_from_json_defaults() {
        let params: GameParameters = serde_json::from_str(r#"{"player_count": 3}"#).unwrap();
        assert_eq!(params, GameParameters::new(3));
    }

    #[test]
    fn test_name_table_dense_ids() {
        let mut names = NameTable::new();
        assert!(names.is_empty());

        assert_eq!(names.intern("a"), 0);
        assert_eq!(names.intern("b"), 1);
        assert_eq!(names.intern("a"), 0);

        assert_eq!(names.len(), 2);
        assert_eq!(names.lookup("c"), None);
        assert_eq!(names.name(5), None);
    }

    #[test]
    fn test_phase_id() {
        assert_eq!(PhaseId::new(5).0, 5);
        assert_eq!(PhaseId::default(), PhaseId(0));
    }
}
