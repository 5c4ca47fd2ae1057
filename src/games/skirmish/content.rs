//! Static content: clearing graph, seats and deck, loaded from JSON.
//!
//! Content is plain serde data. [`Skirmish::from_content`](super::Skirmish::from_content) validates it
//! and builds the read-only [`Board`] and card table the rules consult.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Arena, EntityId, NameTable, SetupError};

/// Clearing and card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Fox,
    Rabbit,
    Mouse,
    /// Wild: matches every clearing.
    Bird,
}

impl Suit {
    /// Check if a card of this suit counts for a clearing of `clearing`.
    #[must_use]
    pub fn matches(self, clearing: Suit) -> bool {
        self == Suit::Bird || self == clearing
    }
}

/// Card identifier, an index into the content's card table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

/// One clearing as written in content files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearingSpec {
    pub name: String,
    pub suit: Suit,
    pub neighbours: Vec<String>,
}

/// A run of identical cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSpec {
    pub suit: Suit,
    pub count: u16,
}

/// Complete content file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkirmishContent {
    pub clearings: Vec<ClearingSpec>,
    /// Home clearing per seat. Also bounds the player count.
    pub homes: Vec<String>,
    pub starting_warriors: u8,
    /// Warriors each seat keeps off the board for recruiting.
    pub supply: u8,
    /// Seat playing the alliance, if any.
    #[serde(default)]
    pub alliance_seat: Option<u8>,
    /// Clearings holding a sympathy token at setup.
    #[serde(default)]
    pub sympathy: Vec<String>,
    pub deck: Vec<CardSpec>,
    pub starting_hand: usize,
    pub hand_limit: usize,
}

/// Why content failed to load.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("malformed content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown clearing '{0}'")]
    UnknownClearing(String),

    #[error("duplicate clearing '{0}'")]
    DuplicateClearing(String),

    #[error("content seats no players")]
    NoSeats,

    #[error("deck of {cards} cards does not outlast an opening deal of {dealt}")]
    ShortDeck { cards: usize, dealt: usize },
}

impl From<ContentError> for SetupError {
    fn from(err: ContentError) -> Self {
        SetupError::Content(err.to_string())
    }
}

/// A validated clearing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clearing {
    pub suit: Suit,
    pub neighbours: SmallVec<[EntityId; 4]>,
}

/// The clearing graph. Clearing ids are dense and follow content order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    names: NameTable,
    clearings: Arena<Clearing>,
}

impl Board {
    /// Look up a clearing by name.
    #[must_use]
    pub fn clearing(&self, name: &str) -> Option<EntityId> {
        self.names.lookup(name).map(EntityId)
    }

    /// Name of a clearing.
    #[must_use]
    pub fn name(&self, clearing: EntityId) -> Option<&str> {
        self.names.name(clearing.raw())
    }

    /// Suit of a clearing.
    #[must_use]
    pub fn suit(&self, clearing: EntityId) -> Option<Suit> {
        self.clearings.get(clearing).map(|c| c.suit)
    }

    /// Adjacent clearings.
    #[must_use]
    pub fn neighbours(&self, clearing: EntityId) -> &[EntityId] {
        self.clearings
            .get(clearing)
            .map(|c| c.neighbours.as_slice())
            .unwrap_or_default()
    }

    /// All clearing ids.
    pub fn clearings(&self) -> impl Iterator<Item = EntityId> {
        self.clearings.ids()
    }

    /// Number of clearings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clearings.len()
    }

    /// Check if the board has no clearings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clearings.is_empty()
    }
}

/// Content validated into lookup-friendly form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LoadedContent {
    pub board: Board,
    pub homes: Vec<EntityId>,
    pub sympathy: Vec<EntityId>,
    pub cards: Vec<Suit>,
}

impl SkirmishContent {
    /// Parse content from JSON.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate names and build the board. Edges are made symmetric.
    pub(crate) fn load(&self) -> Result<LoadedContent, ContentError> {
        if self.homes.is_empty() {
            return Err(ContentError::NoSeats);
        }

        let mut names = NameTable::new();
        for spec in &self.clearings {
            if names.lookup(&spec.name).is_some() {
                return Err(ContentError::DuplicateClearing(spec.name.clone()));
            }
            names.intern(&spec.name);
        }
        let resolve = |name: &str| {
            names
                .lookup(name)
                .map(EntityId)
                .ok_or_else(|| ContentError::UnknownClearing(name.to_string()))
        };

        let mut adjacency: Vec<SmallVec<[EntityId; 4]>> = vec![SmallVec::new(); self.clearings.len()];
        for (index, spec) in self.clearings.iter().enumerate() {
            let here = EntityId(index as u32);
            for neighbour in &spec.neighbours {
                let there = resolve(neighbour)?;
                if there == here {
                    continue;
                }
                if !adjacency[here.index()].contains(&there) {
                    adjacency[here.index()].push(there);
                }
                if !adjacency[there.index()].contains(&here) {
                    adjacency[there.index()].push(here);
                }
            }
        }

        let homes = self
            .homes
            .iter()
            .map(|h| resolve(h))
            .collect::<Result<Vec<_>, _>>()?;
        let sympathy = self
            .sympathy
            .iter()
            .map(|s| resolve(s))
            .collect::<Result<Vec<_>, _>>()?;

        let mut clearings = Arena::new();
        for (spec, mut neighbours) in self.clearings.iter().zip(adjacency) {
            neighbours.sort_unstable();
            clearings.alloc(Clearing {
                suit: spec.suit,
                neighbours,
            });
        }

        let cards = self
            .deck
            .iter()
            .flat_map(|spec| std::iter::repeat(spec.suit).take(spec.count as usize))
            .collect::<Vec<_>>();
        let dealt = self.starting_hand * homes.len();
        if cards.len() <= dealt {
            return Err(ContentError::ShortDeck {
                cards: cards.len(),
                dealt,
            });
        }

        Ok(LoadedContent {
            board: Board { names, clearings },
            homes,
            sympathy,
            cards,
        })
    }
}
