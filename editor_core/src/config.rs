//! Editor configuration.

use crate::history::DEFAULT_CAPACITY;
use crate::search::SearchOptions;

/// Tunables for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Maximum number of undo snapshots. Values below 2 are raised to 2,
    /// the smallest history that can undo and redo one edit.
    pub history_capacity: usize,
    /// Spaces inserted by a tab.
    pub tab_width: usize,
    /// Rows moved by page up/down.
    pub page_size: usize,
    /// Search flags a new session starts with.
    pub search: SearchOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            tab_width: 4,
            page_size: 10,
            search: SearchOptions::default(),
        }
    }
}
