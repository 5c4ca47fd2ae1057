//! Participant identification, per-participant storage and results.
//!
//! ## PlayerId
//!
//! Participants are addressed by a dense 0-based index supporting 1-255
//! participants. Decision ownership, action actors and turn records all use it.
//!
//! ## PlayerMap
//!
//! `Vec`-backed storage with one slot per participant, indexable by `PlayerId`.
//! Cloning a map clones every slot, so copies never alias.
//!
//! ## PlayerResult
//!
//! Per-participant outcome. A participant whose result is anything other than
//! `Ongoing` while the game is still running is eliminated and skipped by the
//! turn order.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Participant identifier supporting 1-255 participants.
/// Defaults to participant 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The participant after this one, wrapping at `player_count`.
    ///
    /// ```
    /// use rust_fm::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).following(3), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(2).following(3), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn following(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` participants.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Outcome of a single participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerResult {
    /// Still taking decisions.
    #[default]
    Ongoing,
    /// Finished first (alone).
    Win,
    /// Finished below first, or eliminated while the game runs.
    Lose,
    /// Shared first place.
    Draw,
    /// Removed for rule violations.
    Disqualified,
}

impl PlayerResult {
    /// Check if this participant still takes decisions.
    #[must_use]
    pub const fn is_ongoing(self) -> bool {
        matches!(self, PlayerResult::Ongoing)
    }
}

/// Per-participant data storage with O(1) access.
///
/// ```
/// use rust_fm::core::{PlayerId, PlayerMap};
///
/// let mut supply: PlayerMap<u8> = PlayerMap::with_value(3, 5);
/// supply[PlayerId::new(1)] -= 2;
///
/// assert_eq!(supply[PlayerId::new(0)], 5);
/// assert_eq!(supply[PlayerId::new(1)], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map whose slots come from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Create a map with every slot set to `value`.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a map with default slots.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Number of participants.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values in participant order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Participants whose slot satisfies `predicate`.
    pub fn players_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<PlayerId> {
        self.iter()
            .filter(|(_, v)| predicate(v))
            .map(|(p, _)| p)
            .collect()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_following_wraps() {
        assert_eq!(PlayerId::new(0).following(4), PlayerId::new(1));
        assert_eq!(PlayerId::new(3).following(4), PlayerId::new(0));
        assert_eq!(PlayerId::new(0).following(1), PlayerId::new(0));
    }

    #[test]
    fn test_player_id_default_is_first_seat() {
        assert_eq!(PlayerId::default(), PlayerId::new(0));
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(format!("{}", PlayerId::new(2)), "Player 2");
    }

    #[test]
    fn test_player_map_factory() {
        let map: PlayerMap<usize> = PlayerMap::new(4, |p| p.index() * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_players_where() {
        let mut results: PlayerMap<PlayerResult> = PlayerMap::with_default(4);
        results[PlayerId::new(1)] = PlayerResult::Lose;
        results[PlayerId::new(2)] = PlayerResult::Disqualified;

        let alive = results.players_where(|r| r.is_ongoing());
        assert_eq!(alive, vec![PlayerId::new(0), PlayerId::new(3)]);
    }

    #[test]
    fn test_player_map_clone_is_independent() {
        let original: PlayerMap<Vec<u8>> = PlayerMap::with_default(2);
        let mut copy = original.clone();
        copy[PlayerId::new(0)].push(7);

        assert!(original[PlayerId::new(0)].is_empty());
    }

    #[test]
    fn test_player_result_serialization() {
        let json = serde_json::to_string(&PlayerResult::Draw).unwrap();
        let back: PlayerResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlayerResult::Draw);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<u8> = PlayerMap::with_value(0, 0);
    }
}
