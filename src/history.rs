//! Snapshot-based undo history.
//!
//! Every mutating diagram operation captures the pre-mutation
//! `(elements, connections)` pair here. The stack is bounded; the oldest
//! snapshot is dropped when it overflows. There is no redo: undoing pops the
//! snapshot, so forward history never survives the next mutation.

use crate::constants::MAX_HISTORY_STATES;
use crate::types::{Connection, Element};
use std::collections::VecDeque;

/// Deep, independent copy of the model at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub elements: Vec<Element>,
    pub connections: Vec<Connection>,
}

#[derive(Debug)]
pub struct History {
    stack: VecDeque<Snapshot>,
    capacity: usize,
    /// Nesting depth of history-suppressed scopes.
    suppressed: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_STATES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: VecDeque::with_capacity(capacity.min(MAX_HISTORY_STATES)),
            capacity: capacity.max(1),
            suppressed: 0,
        }
    }

    /// Push a snapshot unless recording is suppressed.
    ///
    /// Returns false when the snapshot was discarded.
    pub fn record(&mut self, snapshot: Snapshot) -> bool {
        if self.is_suppressed() {
            return false;
        }
        self.stack.push_back(snapshot);
        if self.stack.len() > self.capacity {
            self.stack.pop_front();
        }
        true
    }

    /// Take the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.stack.pop_back()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed > 0
    }

    pub(crate) fn suppress(&mut self) {
        self.suppressed += 1;
    }

    pub(crate) fn resume(&mut self) {
        self.suppressed = self.suppressed.saturating_sub(1);
    }
}
