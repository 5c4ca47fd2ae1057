//! The forward model: setup, legal actions, action execution and
//! turn/round advancement.
//!
//! ## State machine
//!
//! ```text
//! setup ──► Setup ──► Running ──► Ended
//!                      ▲   │
//!                      └───┘ apply
//! ```
//!
//! ## Step
//!
//! A decision agent asks for [`ForwardModel::legal_actions`], picks one and
//! calls [`ForwardModel::apply`]. Applying either completes immediately or
//! pushes an extended sequence; while sequences are pending the stack's top
//! answers every query. Once the stack is empty the turn order advances.
//!
//! A rejected action leaves the state exactly as it was: it is not recorded,
//! not counted as a turn and not reported to listeners.
//!
//! ## Disqualification
//!
//! [`ForwardModel::disqualify`] removes a participant with `Disqualified`.
//! When that participant owns the turn or the pending decision, the pending
//! sequences are abandoned and the turn ends through the turn order.

mod filter;
mod model;

pub use filter::{ActionFilter, FnFilter};
pub use model::ForwardModel;
