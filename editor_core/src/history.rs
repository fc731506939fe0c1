//! Undo/Redo history system.
//!
//! Every edit stores a full copy of the document lines taken just before
//! the edit is applied. Undo from the newest edit first records the live
//! lines so that redo can return to them.

use std::collections::VecDeque;

/// Default number of snapshots kept.
pub const DEFAULT_CAPACITY: usize = 100;

/// A full copy of the document lines. The cursor is not part of it.
pub type Snapshot = Vec<String>;

/// Manages undo/redo history as a bounded list of snapshots.
///
/// `snapshots[..index]` are undo targets, `snapshots[index + 1..]` are redo
/// targets. When `index == snapshots.len()` the live document is newer than
/// anything stored.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    index: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Creates a new history keeping at most `capacity` snapshots (minimum 2).
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            index: 0,
            capacity: capacity.max(2),
        }
    }

    /// Returns the maximum number of snapshots kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Records the state before an edit.
    ///
    /// Drops every redo snapshot, then evicts the oldest snapshots once the
    /// capacity is exceeded.
    pub fn save_state(&mut self, lines: &[String]) {
        self.snapshots.truncate(self.index);
        self.snapshots.push_back(lines.to_vec());
        self.index += 1;
        self.evict();
    }

    /// Returns true if undo is available.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Returns true if redo is available.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Steps back one snapshot. `current` is the live document, stored
    /// when undoing from the newest state.
    pub fn undo(&mut self, current: &[String]) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        if self.index == self.snapshots.len() {
            self.snapshots.push_back(current.to_vec());
            self.evict();
        }
        self.index -= 1;
        self.snapshots.get(self.index).cloned()
    }

    /// Steps forward one snapshot.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index).cloned()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = 0;
    }

    fn evict(&mut self) {
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            self.index = self.index.saturating_sub(1);
        }
    }
}
