//! Stack of pending extended sequences.

use serde::{Deserialize, Serialize};

/// Ordered collection of pending sequences. Index 0 is the bottom, the last
/// entry is the top (most recently pushed, active).
///
/// ```
/// use rust_fm::stack::ResolutionStack;
///
/// let mut stack = ResolutionStack::new();
/// stack.push("campaign");
/// stack.push("march");
///
/// assert_eq!(stack.top(), Some(&"march"));
/// assert_eq!(stack.depth(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionStack<S> {
    entries: Vec<S>,
}

impl<S> Default for ResolutionStack<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> ResolutionStack<S> {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a sequence on top.
    pub fn push(&mut self, sequence: S) {
        self.entries.push(sequence);
    }

    /// The active sequence.
    #[must_use]
    pub fn top(&self) -> Option<&S> {
        self.entries.last()
    }

    /// Entry at `index` (0 = bottom).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&S> {
        self.entries.get(index)
    }

    /// Number of pending sequences.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Check if no sequence is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.entries.iter()
    }

    pub(crate) fn pop(&mut self) -> Option<S> {
        self.entries.pop()
    }

    /// Drop every pending sequence, returning how many were abandoned.
    pub(crate) fn clear(&mut self) -> usize {
        let abandoned = self.entries.len();
        self.entries.clear();
        abandoned
    }

    /// Overwrite the entry at `index`. Out-of-range indices are ignored.
    pub(crate) fn replace(&mut self, index: usize, sequence: S) {
        if let Some(slot) = self.entries.get_mut(index) {
            *slot = sequence;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifo_order() {
        let mut stack = ResolutionStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.top(), Some(&2));
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_clear_reports_abandoned() {
        let mut stack = ResolutionStack::new();
        stack.push("campaign");
        stack.push("march");

        assert_eq!(stack.clear(), 2);
        assert!(stack.is_empty());
        assert_eq!(stack.clear(), 0);
    }

    #[test]
    fn test_replace_in_place() {
        let mut stack = ResolutionStack::new();
        stack.push("a");
        stack.push("b");

        stack.replace(0, "c");
        stack.replace(5, "ignored");

        assert_eq!(stack.get(0), Some(&"c"));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut stack = ResolutionStack::new();
        stack.push(vec![1]);
        let mut copy = stack.clone();

        copy.replace(0, vec![1, 2]);
        copy.push(vec![3]);

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), Some(&vec![1]));
    }

    #[test]
    fn test_empty() {
        let mut stack: ResolutionStack<u8> = ResolutionStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.top(), None);
        assert_eq!(stack.pop(), None);
    }
}
