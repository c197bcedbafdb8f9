//! Bounded LIFO of accepted outcomes, used to unwind recent updates.

use crate::{Belief, Outcome};

/// Stack of outcomes that have been applied to a [`Belief`], newest last.
///
/// A run holds at most one entry beyond its accepted updates. The estimator
/// preallocates from its acceptance target, capped, and lets the stack grow
/// past that.
#[derive(Debug, Clone, Default)]
pub struct History {
    buf: Vec<Outcome>,
}

impl History {
    /// Create an empty history with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether there is nothing left to unwind.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Record an outcome that was just applied.
    pub fn push(&mut self, o: Outcome) {
        self.buf.push(o);
    }

    /// Remove and return the most recent outcome.
    pub fn pop(&mut self) -> Option<Outcome> {
        self.buf.pop()
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> + '_ {
        self.buf.iter()
    }

    /// Undo up to `depth` of the most recent updates on `belief`.
    ///
    /// Stops early when the stack runs out. Returns the rolled-back belief and
    /// how many entries were actually undone.
    pub fn unwind(&mut self, mut belief: Belief, depth: usize) -> (Belief, usize) {
        let mut undone = 0usize;
        while undone < depth {
            let Some(o) = self.buf.pop() else {
                break;
            };
            belief = belief.reverted(o);
            undone += 1;
        }
        (belief, undone)
    }
}
