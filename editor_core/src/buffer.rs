//! Line-oriented document model.

use crate::cursor::Position;
use ropey::Rope;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// The text being edited: an ordered list of lines plus a cursor.
///
/// There is always at least one line. Columns are character offsets
/// into a line, so multi-byte text is handled without splitting a char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    cursor: Position,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::default(),
        }
    }

    /// Creates a document from already split lines.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut doc = Self {
            lines,
            cursor: Position::default(),
        };
        doc.ensure_non_empty();
        doc
    }

    /// Creates a document from a string, splitting on newlines.
    pub fn from_text(text: &str) -> Self {
        Self::from_rope(&Rope::from_str(text))
    }

    /// Loads a document from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let rope = Rope::from_reader(reader)?;
        Ok(Self::from_rope(&rope))
    }

    /// Splits on `\n` only. Other Unicode line breaks stay inside the line
    /// so that a load followed by a save writes the same bytes back.
    fn from_rope(rope: &Rope) -> Self {
        let mut lines = Vec::new();
        let mut current = String::new();
        for chunk in rope.chunks() {
            let mut parts = chunk.split('\n');
            if let Some(first) = parts.next() {
                current.push_str(first);
            }
            for part in parts {
                let mut line = std::mem::take(&mut current);
                if line.ends_with('\r') {
                    line.pop();
                }
                lines.push(line);
                current.push_str(part);
            }
        }
        // A trailing newline does not start another line
        if !current.is_empty() {
            lines.push(current);
        }
        Self::from_lines(lines)
    }

    /// Saves the document, writing every line followed by `\n`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// Returns all lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the line at the given index, if it exists.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Returns the length of a line in characters, 0 for missing lines.
    pub fn line_len_chars(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Moves the cursor, clamping it into the document.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
        self.clamp_cursor();
    }

    /// Clamps the cursor back inside the document bounds.
    pub fn clamp_cursor(&mut self) {
        let lines = &self.lines;
        self.cursor = self
            .cursor
            .clamped(lines.len(), |l| lines[l].chars().count());
    }

    /// Replaces every line (used when restoring a snapshot).
    /// The cursor is re-clamped, not restored.
    pub fn replace_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.ensure_non_empty();
        self.clamp_cursor();
    }

    /// Grows the document with empty lines so that `line` exists.
    pub fn expand_to(&mut self, line: usize) {
        if line >= self.lines.len() {
            self.lines.resize(line + 1, String::new());
        }
    }

    /// Replaces the characters `start_col..end_col` of a line with `text`.
    ///
    /// Columns are clamped to the line; a missing line is ignored.
    /// Returns true if the line was touched.
    pub fn splice(&mut self, line: usize, start_col: usize, end_col: usize, text: &str) -> bool {
        let Some(content) = self.lines.get_mut(line) else {
            return false;
        };
        let start = char_to_byte(content, start_col);
        let end = char_to_byte(content, end_col.max(start_col));
        content.replace_range(start..end, text);
        true
    }

    /// Inserts a character at `pos`, growing the document with empty lines
    /// when `pos.line` is past the end. The cursor ends up after the char.
    pub fn insert_char_at(&mut self, pos: Position, ch: char) {
        self.cursor = pos;
        self.insert_char(ch);
    }

    /// Inserts a character at the cursor and advances the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let Position { line, col } = self.cursor;
        self.expand_to(line);
        let content = &mut self.lines[line];
        let idx = char_to_byte(content, col);
        content.insert(idx, ch);
        self.cursor = Position::new(line, col + 1);
        self.clamp_cursor();
    }

    /// Backspace: removes the character left of the cursor, or joins the
    /// current line onto the previous one when at column 0.
    /// Returns false at the very start of the document.
    pub fn delete_char_before(&mut self) -> bool {
        let Position { line, col } = self.cursor;
        if col > 0 {
            let content = &mut self.lines[line];
            let start = char_to_byte(content, col - 1);
            let end = char_to_byte(content, col);
            content.replace_range(start..end, "");
            self.cursor = Position::new(line, col - 1);
            true
        } else if line > 0 {
            let current = self.lines.remove(line);
            let prev = &mut self.lines[line - 1];
            let join_col = prev.chars().count();
            prev.push_str(&current);
            self.cursor = Position::new(line - 1, join_col);
            true
        } else {
            false
        }
    }

    /// Delete key: removes the character under the cursor, or joins the
    /// next line onto the current one at end of line.
    pub fn delete_char_at(&mut self) -> bool {
        let Position { line, col } = self.cursor;
        if col < self.line_len_chars(line) {
            let content = &mut self.lines[line];
            let start = char_to_byte(content, col);
            let end = char_to_byte(content, col + 1);
            content.replace_range(start..end, "");
            true
        } else if line + 1 < self.lines.len() {
            let next = self.lines.remove(line + 1);
            self.lines[line].push_str(&next);
            true
        } else {
            false
        }
    }

    /// Splits the current line at the cursor; the cursor moves to the
    /// start of the new line.
    pub fn split_line(&mut self) {
        let Position { line, col } = self.cursor;
        self.expand_to(line);
        let content = &mut self.lines[line];
        let idx = char_to_byte(content, col);
        let remainder = content.split_off(idx);
        self.lines.insert(line + 1, remainder);
        self.cursor = Position::new(line + 1, 0);
    }

    /// Removes the current line unless it is the only one.
    pub fn remove_line(&mut self) -> bool {
        if self.lines.len() <= 1 {
            return false;
        }
        self.lines.remove(self.cursor.line.min(self.lines.len() - 1));
        self.clamp_cursor();
        true
    }

    fn ensure_non_empty(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }
}

/// Converts a character column into a byte index, clamped to the string.
pub fn char_to_byte(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map_or(s.len(), |(idx, _)| idx)
}

/// Converts a byte index into a character column.
pub fn byte_to_char(s: &str, byte: usize) -> usize {
    s[..byte.min(s.len())].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_new_document() {
        let d = Document::new();
        assert_eq!(d.line_count(), 1);
        assert_eq!(d.line(0), Some(""));
        assert_eq!(d.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_from_lines_never_empty() {
        let d = Document::from_lines(Vec::new());
        assert_eq!(d.lines(), &[String::new()]);
    }

    #[test]
    fn test_from_text() {
        let d = Document::from_text("hello\nworld\n");
        assert_eq!(d.lines(), &["hello".to_string(), "world".to_string()]);

        let d = Document::from_text("a\r\nb");
        assert_eq!(d.lines(), &["a".to_string(), "b".to_string()]);

        let d = Document::from_text("");
        assert_eq!(d.lines(), &[String::new()]);

        let d = Document::from_text("x\n\n");
        assert_eq!(d.lines(), &["x".to_string(), String::new()]);
    }

    #[test]
    fn test_insert_char_multibyte() {
        let mut d = doc(&["héllo"]);
        d.set_cursor(Position::new(0, 2));
        d.insert_char('!');
        assert_eq!(d.line(0), Some("hé!llo"));
        assert_eq!(d.cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_insert_char_grows_document() {
        let mut d = Document::new();
        d.insert_char_at(Position::new(2, 5), 'x');
        assert_eq!(d.line_count(), 3);
        assert_eq!(d.line(2), Some("x"));
        assert_eq!(d.cursor(), Position::new(2, 1));
    }

    #[test]
    fn test_delete_char_before_joins_lines() {
        let mut d = doc(&["abc", "def"]);
        d.set_cursor(Position::new(1, 0));
        assert!(d.delete_char_before());
        assert_eq!(d.lines(), &["abcdef".to_string()]);
        assert_eq!(d.cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_delete_char_before_at_start() {
        let mut d = doc(&["abc"]);
        assert!(!d.delete_char_before());
        assert_eq!(d.line(0), Some("abc"));
    }

    #[test]
    fn test_delete_char_at() {
        let mut d = doc(&["ab", "cd"]);
        d.set_cursor(Position::new(0, 2));
        assert!(d.delete_char_at());
        assert_eq!(d.lines(), &["abcd".to_string()]);
        d.set_cursor(Position::new(0, 0));
        assert!(d.delete_char_at());
        assert_eq!(d.line(0), Some("bcd"));
    }

    #[test]
    fn test_split_line() {
        let mut d = doc(&["hello world"]);
        d.set_cursor(Position::new(0, 5));
        d.split_line();
        assert_eq!(d.lines(), &["hello".to_string(), " world".to_string()]);
        assert_eq!(d.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_remove_line() {
        let mut d = doc(&["one", "two"]);
        d.set_cursor(Position::new(1, 3));
        assert!(d.remove_line());
        assert_eq!(d.lines(), &["one".to_string()]);
        assert_eq!(d.cursor(), Position::new(0, 3));
        assert!(!d.remove_line());
        assert_eq!(d.line_count(), 1);
    }

    #[test]
    fn test_splice_clamps() {
        let mut d = doc(&["abc"]);
        assert!(d.splice(0, 1, 10, "Z"));
        assert_eq!(d.line(0), Some("aZ"));
        assert!(!d.splice(4, 0, 1, "Z"));
    }

    #[test]
    fn test_char_byte_conversion() {
        let s = "aé b";
        assert_eq!(char_to_byte(s, 2), 3);
        assert_eq!(char_to_byte(s, 99), s.len());
        assert_eq!(byte_to_char(s, 3), 2);
    }

    #[test]
    fn test_save_load_cycle() {
        use std::fs;
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();

        let d = doc(&["line 1", "", "line 3"]);
        d.save_to_file(temp_path).unwrap();
        assert_eq!(fs::read_to_string(temp_path).unwrap(), "line 1\n\nline 3\n");

        let loaded = Document::from_file(temp_path).unwrap();
        assert_eq!(loaded.lines(), d.lines());
    }

    #[test]
    fn test_load_crlf_and_empty_file() {
        use std::fs;
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "a\r\nb\r\n").unwrap();
        let loaded = Document::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.lines(), ["a", "b"]);

        fs::write(temp_file.path(), "").unwrap();
        let loaded = Document::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.lines(), [""]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Document::from_file(dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_only_newline_splits_lines() {
        let d = Document::from_text("int a;\x0Cint b;\nx\u{2028}y\u{0085}z\x0B\n");
        assert_eq!(d.lines(), ["int a;\x0Cint b;", "x\u{2028}y\u{0085}z\x0B"]);
    }

    #[test]
    fn test_load_save_keeps_unicode_breaks() {
        use std::fs;
        use tempfile::NamedTempFile;

        let original = "int a;\x0Cint b;\nx\u{2028}y\n";
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), original).unwrap();

        let loaded = Document::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.line_count(), 2);
        loaded.save_to_file(temp_file.path()).unwrap();
        assert_eq!(fs::read_to_string(temp_file.path()).unwrap(), original);
    }
}
