//! Cursor position handling.

/// Represents a position in the document as (line, column).
/// Both are 0-indexed; the column counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Applies a signed delta to both axes, saturating at zero.
    pub fn offset(self, d_col: isize, d_line: isize) -> Self {
        Self {
            line: apply_delta(self.line, d_line),
            col: apply_delta(self.col, d_col),
        }
    }

    /// Clamps the position into a document with `line_count` lines, where
    /// `line_len` reports the character length of a line.
    pub fn clamped(self, line_count: usize, line_len: impl Fn(usize) -> usize) -> Self {
        let line = self.line.min(line_count.saturating_sub(1));
        let col = self.col.min(line_len(line));
        Self { line, col }
    }
}

fn apply_delta(value: usize, delta: isize) -> usize {
    if delta < 0 {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta as usize)
    }
}
