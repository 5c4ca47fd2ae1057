//! Woodland skirmish.
//!
//! Two to four factions fight over a graph of clearings. On their turn a
//! participant recruits, draws, battles, marches, spends a bird card on a
//! campaign, or passes. Marches and campaigns are extended sequences: they
//! push onto the resolution stack and hand decisions to the mover, and to the
//! alliance when a move outrages it.
//!
//! The board, seats and deck come from JSON content; [`Skirmish::woodland`]
//! loads the bundled map. The game opens in [`Skirmish::DAYLIGHT`]; once the
//! last card is drawn it turns to [`Skirmish::DUSK`] and drawing stops.
//!
//! A participant with no warriors on the board and none left to recruit is
//! eliminated. Scores count ruled clearings; the alliance also scores its
//! supporters and sympathy tokens.

mod actions;
mod content;
mod data;
mod game;
mod sequences;

pub use actions::SkirmishAction;
pub use content::{Board, CardId, CardSpec, Clearing, ClearingSpec, ContentError, SkirmishContent, Suit};
pub use data::SkirmishData;
pub use game::Skirmish;
pub use sequences::{CampaignSequence, MarchSequence, MarchStage, SkirmishSequence};
