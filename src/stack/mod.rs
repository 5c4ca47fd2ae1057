//! Extended action sequences and the resolution stack.
//!
//! An action that cannot complete in one step pushes an extended sequence
//! onto the state's [`ResolutionStack`]. While the stack is non-empty the
//! innermost (top) sequence answers both "whose decision is it" and "what may
//! they do"; the main turn cycle is suspended until the stack drains.
//!
//! ## Resolution rules
//!
//! After every applied action the forward model:
//! 1. Notifies the sequence that was on top *before* the action, even if the
//!    action pushed a new child above it.
//! 2. Pops every completed sequence from the top, telling each newly exposed
//!    parent which child just finished.
//! 3. Returns control to the turn order once the stack is empty.
//!
//! The stack is plain data: cloning a state clones it, and it serializes with
//! the rest of the state.

mod resolution;
mod sequence;

pub use resolution::ResolutionStack;
pub use sequence::ExtendedSequence;
