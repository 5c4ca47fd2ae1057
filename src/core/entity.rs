//! Entity identification and arena storage.
//!
//! Every mutable game object (unit, clearing, token) lives in an [`Arena`]
//! and is addressed by a stable [`EntityId`]. Cross references between
//! objects are stored as ids and resolved through the arena on demand, so
//! there are no ownership cycles and copying a state is a matter of cloning
//! its arenas.
//!
//! ```
//! use rust_fm::core::{Arena, EntityId};
//!
//! let mut units: Arena<&str> = Arena::new();
//! let scout = units.alloc("scout");
//! let guard = units.alloc("guard");
//!
//! assert_eq!(scout, EntityId(0));
//! assert_eq!(units.get(guard), Some(&"guard"));
//! assert_eq!(units.get(EntityId(9)), None);
//! ```

use serde::{Deserialize, Serialize};

/// Stable identifier of an arena entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of this entity in its arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Append-only entity storage addressed by [`EntityId`].
///
/// Entries are never removed, so ids stay valid for the lifetime of the game.
/// Games mark defeated entities in their own data instead of deleting them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Arena<T> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entity and return its id.
    pub fn alloc(&mut self, item: T) -> EntityId {
        let id = EntityId(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Resolve an id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(id.index())
    }

    /// Resolve an id mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.get_mut(id.index())
    }

    /// Check whether an id resolves in this arena.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        id.index() < self.items.len()
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the arena holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> {
        (0..self.items.len() as u32).map(EntityId)
    }

    /// Iterate over (EntityId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (EntityId(i as u32), item))
    }

    /// Iterate over (EntityId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (EntityId(i as u32), item))
    }
}
