//! Mutable world data of a skirmish.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::content::CardId;
use crate::core::{EntityId, PlayerId, PlayerMap};

/// Board occupancy, tokens, supplies and cards.
///
/// Clearing-indexed vectors follow the board's clearing ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkirmishData {
    warriors: Vec<PlayerMap<u8>>,
    sympathy: Vec<bool>,
    supply: PlayerMap<u8>,
    hands: PlayerMap<Vec<CardId>>,
    deck: Vector<CardId>,
    discard: Vector<CardId>,
    supporters: Vector<CardId>,
    /// `revealed[owner][viewer]`: `viewer` knows `owner`'s hand.
    revealed: PlayerMap<PlayerMap<bool>>,
    alliance: Option<PlayerId>,
}

impl SkirmishData {
    pub(crate) fn new(
        player_count: usize,
        clearings: usize,
        supply: u8,
        deck: Vector<CardId>,
        alliance: Option<PlayerId>,
    ) -> Self {
        Self {
            warriors: vec![PlayerMap::with_value(player_count, 0); clearings],
            sympathy: vec![false; clearings],
            supply: PlayerMap::with_value(player_count, supply),
            hands: PlayerMap::with_default(player_count),
            deck,
            discard: Vector::new(),
            supporters: Vector::new(),
            revealed: PlayerMap::new(player_count, |owner| {
                PlayerMap::new(player_count, |viewer| viewer == owner)
            }),
            alliance,
        }
    }

    // === Board ===

    /// Warriors `player` has in `clearing`.
    #[must_use]
    pub fn warriors(&self, clearing: EntityId, player: PlayerId) -> u8 {
        self.warriors
            .get(clearing.index())
            .map_or(0, |w| w[player])
    }

    /// Warriors `player` has on the whole board.
    #[must_use]
    pub fn warriors_on_board(&self, player: PlayerId) -> u32 {
        self.warriors.iter().map(|w| u32::from(w[player])).sum()
    }

    /// Player with strictly the most warriors in `clearing`.
    #[must_use]
    pub fn ruler(&self, clearing: EntityId) -> Option<PlayerId> {
        let occupancy = self.warriors.get(clearing.index())?;
        let mut best: Option<(PlayerId, u8)> = None;
        let mut tied = false;
        for (player, &count) in occupancy.iter() {
            match best {
                _ if count == 0 => {}
                Some((_, top)) if count == top => tied = true,
                Some((_, top)) if count < top => {}
                _ => {
                    best = Some((player, count));
                    tied = false;
                }
            }
        }
        if tied {
            None
        } else {
            best.map(|(player, _)| player)
        }
    }

    /// Clearings ruled by `player`.
    #[must_use]
    pub fn ruled_count(&self, player: PlayerId) -> usize {
        (0..self.warriors.len() as u32)
            .filter(|&c| self.ruler(EntityId(c)) == Some(player))
            .count()
    }

    /// Check for a sympathy token.
    #[must_use]
    pub fn has_sympathy(&self, clearing: EntityId) -> bool {
        self.sympathy.get(clearing.index()).copied().unwrap_or(false)
    }

    /// Sympathy tokens on the board.
    #[must_use]
    pub fn sympathy_count(&self) -> usize {
        self.sympathy.iter().filter(|&&s| s).count()
    }

    /// Seat playing the alliance.
    #[must_use]
    pub fn alliance(&self) -> Option<PlayerId> {
        self.alliance
    }

    /// Warriors `player` can still recruit.
    #[must_use]
    pub fn supply(&self, player: PlayerId) -> u8 {
        self.supply[player]
    }

    // === Cards ===

    /// Cards in `player`'s hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[CardId] {
        &self.hands[player]
    }

    /// Cards left to draw.
    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Face-up discard pile.
    #[must_use]
    pub fn discard(&self) -> &Vector<CardId> {
        &self.discard
    }

    /// Alliance supporters.
    #[must_use]
    pub fn supporters(&self) -> &Vector<CardId> {
        &self.supporters
    }

    /// Whether `viewer` knows `owner`'s hand.
    #[must_use]
    pub fn is_revealed(&self, owner: PlayerId, viewer: PlayerId) -> bool {
        self.revealed[owner][viewer]
    }

    // === Mutation ===

    pub(crate) fn place(&mut self, clearing: EntityId, player: PlayerId, count: u8) {
        if let Some(w) = self.warriors.get_mut(clearing.index()) {
            w[player] = w[player].saturating_add(count);
        }
    }

    /// Remove up to `count` warriors; returns how many were removed.
    pub(crate) fn remove(&mut self, clearing: EntityId, player: PlayerId, count: u8) -> u8 {
        match self.warriors.get_mut(clearing.index()) {
            Some(w) => {
                let removed = count.min(w[player]);
                w[player] -= removed;
                removed
            }
            None => 0,
        }
    }

    pub(crate) fn set_sympathy(&mut self, clearing: EntityId) {
        if let Some(s) = self.sympathy.get_mut(clearing.index()) {
            *s = true;
        }
    }

    pub(crate) fn recruit(&mut self, clearing: EntityId, player: PlayerId) {
        if self.supply[player] > 0 {
            self.supply[player] -= 1;
            self.place(clearing, player, 1);
        }
    }

    pub(crate) fn draw(&mut self, player: PlayerId) -> Option<CardId> {
        let card = self.deck.pop_back()?;
        self.hands[player].push(card);
        Some(card)
    }

    pub(crate) fn take_from_hand(&mut self, player: PlayerId, card: CardId) -> bool {
        let hand = &mut self.hands[player];
        match hand.iter().position(|&c| c == card) {
            Some(pos) => {
                hand.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn discard_card(&mut self, card: CardId) {
        self.discard.push_back(card);
    }

    pub(crate) fn add_supporter(&mut self, card: CardId) {
        self.supporters.push_back(card);
    }

    pub(crate) fn reveal(&mut self, owner: PlayerId, viewer: PlayerId) {
        self.revealed[owner][viewer] = true;
    }

    /// Hide the hands `observer` does not know.
    ///
    /// Unknown hands are pooled with the deck, shuffled, and dealt back in
    /// their original sizes.
    pub(crate) fn redetermine(&mut self, observer: PlayerId, rng: &mut crate::core::GameRng) {
        let hidden: Vec<PlayerId> = self
            .hands
            .iter()
            .map(|(p, _)| p)
            .filter(|&p| !self.revealed[p][observer])
            .collect();

        let mut pool: Vec<CardId> = self.deck.iter().copied().collect();
        let mut sizes = Vec::with_capacity(hidden.len());
        for &player in &hidden {
            let hand = std::mem::take(&mut self.hands[player]);
            sizes.push(hand.len());
            pool.extend(hand);
        }

        rng.shuffle(&mut pool);

        for (&player, size) in hidden.iter().zip(sizes) {
            let split = pool.len() - size;
            self.hands[player] = pool.split_off(split);
        }
        self.deck = pool.into_iter().collect();
    }
}
