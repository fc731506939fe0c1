//! Main editor logic.

use crate::buffer::Document;
use crate::command::Command;
use crate::config::EditorConfig;
use crate::cursor::Position;
use crate::error::EditorError;
use crate::history::History;
use crate::search::{Search, SearchMatch};
use crate::syntax::{LineHighlights, SyntaxHighlighter};
use std::path::{Path, PathBuf};

/// The main editor state.
///
/// Owns the document and is the only thing that mutates it. Search
/// replacements go through the document's splice primitive but are
/// triggered from here so they are recorded in the history.
#[derive(Debug, Clone)]
pub struct Editor {
    /// The text being edited.
    document: Document,
    /// Undo/redo history.
    history: History,
    /// Search state.
    search: Search,
    /// Syntax highlighter.
    highlighter: SyntaxHighlighter,
    /// Current file path, if any.
    file_path: Option<PathBuf>,
    /// Whether the document has unsaved changes.
    modified: bool,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates a new empty editor.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Creates a new empty editor with the given configuration.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::new(),
            history: History::new(config.history_capacity),
            search: Search::with_options(config.search),
            highlighter: SyntaxHighlighter::new(),
            file_path: None,
            modified: false,
            config,
        }
    }

    /// Creates an editor over existing text, without a file.
    pub fn from_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.document = Document::from_text(text);
        editor
    }

    // ==================== Files ====================

    /// Opens a file in the editor.
    ///
    /// On failure the current session is left untouched.
    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), EditorError> {
        let path = path.as_ref();
        let document = Document::from_file(path).map_err(|e| EditorError::io(path, e))?;

        log::info!("Opened {} ({} lines)", path.display(), document.line_count());
        self.document = document;
        self.history.clear();
        self.search.clear_matches();
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        self.highlighter.detect_language(&path.to_string_lossy());
        Ok(())
    }

    /// Saves the document to the current file path.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let path = self.file_path.clone().ok_or(EditorError::NoFilePath)?;
        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    /// Saves the document to a new file path and makes it the current file.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<(), EditorError> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        self.highlighter.detect_language(&path.to_string_lossy());
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<(), EditorError> {
        self.document
            .save_to_file(path)
            .map_err(|e| EditorError::io(path, e))?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    /// Replaces the session with a single empty line and no file.
    pub fn new_document(&mut self) {
        self.document = Document::new();
        self.history.clear();
        self.search.clear_matches();
        self.file_path = None;
        self.modified = false;
        self.highlighter.clear_cache();
    }

    /// Returns the current file path.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns whether the document has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    // ==================== Accessors ====================

    /// Returns a reference to the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the document lines.
    pub fn lines(&self) -> &[String] {
        self.document.lines()
    }

    /// Returns the cursor position as (line, column).
    pub fn cursor_position(&self) -> Position {
        self.document.cursor()
    }

    /// Returns the search state.
    pub fn search(&self) -> &Search {
        &self.search
    }

    /// Returns the syntax highlighter.
    pub fn highlighter(&self) -> &SyntaxHighlighter {
        &self.highlighter
    }

    /// Returns the syntax highlighter for switching languages.
    pub fn highlighter_mut(&mut self) -> &mut SyntaxHighlighter {
        &mut self.highlighter
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Highlights one document line. Missing lines have no spans.
    pub fn highlight_line(&self, line: usize) -> LineHighlights {
        self.document
            .line(line)
            .map(|text| self.highlighter.highlight_line(text))
            .unwrap_or_default()
    }

    // ==================== Cursor Movement ====================

    /// Moves the cursor by a delta, clamping it into the document.
    pub fn move_cursor(&mut self, d_col: isize, d_row: isize) {
        let cursor = self.document.cursor();
        // Clamp the row before the column so the column is measured
        // against the destination line
        let row = cursor.offset(0, d_row).line;
        let target = Position::new(row, cursor.col).offset(d_col, 0);
        self.document.set_cursor(target);
    }

    /// Sets the cursor position by line and column.
    pub fn set_cursor_position(&mut self, line: usize, col: usize) {
        self.document.set_cursor(Position::new(line, col));
    }

    /// Moves the cursor to the start of the line.
    pub fn move_line_start(&mut self) {
        let line = self.document.cursor().line;
        self.document.set_cursor(Position::new(line, 0));
    }

    /// Moves the cursor to the end of the line.
    pub fn move_line_end(&mut self) {
        let line = self.document.cursor().line;
        self.document.set_cursor(Position::new(line, usize::MAX));
    }

    /// Moves up one page.
    pub fn page_up(&mut self) {
        self.move_cursor(0, -(self.config.page_size as isize));
    }

    /// Moves down one page.
    pub fn page_down(&mut self) {
        self.move_cursor(0, self.config.page_size as isize);
    }

    // ==================== Text Editing ====================

    /// Records the current lines as an undo step.
    pub fn save_state(&mut self) {
        self.history.save_state(self.document.lines());
    }

    /// Inserts a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.save_state();
        self.document.insert_char(ch);
        self.finish_edit();
    }

    /// Inserts a character at a position. A line past the end of the
    /// document is created, along with any empty lines before it.
    pub fn insert_char_at(&mut self, line: usize, col: usize, ch: char) {
        self.save_state();
        self.document.insert_char_at(Position::new(line, col), ch);
        self.finish_edit();
    }

    /// Inserts text at the cursor as a single undo step.
    /// Newlines split the line.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.save_state();
        for ch in text.chars() {
            if ch == '\n' {
                self.document.split_line();
            } else {
                self.document.insert_char(ch);
            }
        }
        self.finish_edit();
    }

    /// Inserts spaces for a tab.
    pub fn insert_tab(&mut self) {
        let spaces = " ".repeat(self.config.tab_width);
        self.insert_text(&spaces);
    }

    /// Deletes the character before the cursor (backspace).
    /// Joins with the previous line at column 0.
    pub fn delete_char(&mut self) -> bool {
        if self.document.cursor() == Position::default() {
            return false;
        }
        self.save_state();
        self.document.delete_char_before();
        self.finish_edit();
        true
    }

    /// Deletes the character after the cursor (delete key).
    pub fn delete_forward(&mut self) -> bool {
        let Position { line, col } = self.document.cursor();
        let at_end = line + 1 >= self.document.line_count()
            && col >= self.document.line_len_chars(line);
        if at_end {
            return false;
        }
        self.save_state();
        self.document.delete_char_at();
        self.finish_edit();
        true
    }

    /// Splits the current line at the cursor (enter).
    pub fn insert_line(&mut self) {
        self.save_state();
        self.document.split_line();
        self.finish_edit();
    }

    /// Deletes the current line unless it is the only one.
    pub fn delete_line(&mut self) -> bool {
        if self.document.line_count() <= 1 {
            return false;
        }
        self.save_state();
        self.document.remove_line();
        self.finish_edit();
        true
    }

    /// Undoes the last edit. The cursor is clamped, not restored.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.document.lines()) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Redoes the last undone edit.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Returns true if undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, lines: Vec<String>) {
        self.document.replace_lines(lines);
        self.search.clear_matches();
        self.modified = true;
    }

    fn finish_edit(&mut self) {
        // Match offsets are stale after an edit outside the replace API
        self.search.clear_matches();
        self.document.clamp_cursor();
        self.modified = true;
    }

    // ==================== Search ====================

    /// Searches the document and jumps to the first match.
    pub fn find(&mut self, pattern: &str) -> bool {
        let found = self.search.find(pattern, self.document.lines());
        self.jump_to_current_match();
        found
    }

    /// Jumps to the next match, wrapping around.
    pub fn find_next(&mut self) -> bool {
        let found = self.search.find_next(self.document.lines());
        self.jump_to_current_match();
        found
    }

    /// Jumps to the previous match, wrapping around.
    pub fn find_previous(&mut self) -> bool {
        let found = self.search.find_previous(self.document.lines());
        self.jump_to_current_match();
        found
    }

    /// Returns the current match, if any.
    pub fn current_match(&self) -> Option<SearchMatch> {
        self.search.current_match()
    }

    /// Replaces the current match.
    pub fn replace_current(&mut self, replacement: &str) -> bool {
        if self.search.current_match().is_none() {
            return false;
        }
        self.save_state();
        let replaced = self.search.replace_current(replacement, &mut self.document);
        self.document.clamp_cursor();
        self.modified |= replaced;
        replaced
    }

    /// Replaces every occurrence of a pattern. Returns the replacement count.
    pub fn replace_all(&mut self, pattern: &str, replacement: &str) -> usize {
        let before = self.document.lines().to_vec();
        let count = self.search.replace_all(pattern, replacement, &mut self.document);
        if count > 0 {
            self.history.save_state(&before);
            self.document.clamp_cursor();
            self.modified = true;
        }
        log::debug!("Replaced {} occurrence(s) of '{}'", count, pattern);
        count
    }

    /// Runs a substitution: replace every occurrence when `all` is set,
    /// otherwise replace the first match and move on to the next one.
    pub fn substitute(&mut self, pattern: &str, replacement: &str, all: bool) -> bool {
        if all {
            return self.replace_all(pattern, replacement) > 0;
        }
        if !self.find(pattern) {
            return false;
        }
        let replaced = self.replace_current(replacement);
        self.find_next();
        replaced
    }

    fn jump_to_current_match(&mut self) {
        if let Some(m) = self.search.current_match() {
            self.document.set_cursor(Position::new(m.line, m.start));
        }
    }

    // ==================== Commands ====================

    /// Executes a command.
    ///
    /// Returns whether the command changed anything (for searches,
    /// whether a match was found). Boundary cases are `Ok(false)`, never
    /// errors; only file operations fail.
    pub fn execute(&mut self, command: Command) -> Result<bool, EditorError> {
        let changed = match command {
            Command::MoveCursor { d_col, d_row } => {
                let before = self.cursor_position();
                self.move_cursor(d_col, d_row);
                self.cursor_position() != before
            }
            Command::MoveLineStart => {
                self.move_line_start();
                true
            }
            Command::MoveLineEnd => {
                self.move_line_end();
                true
            }
            Command::PageUp => {
                self.page_up();
                true
            }
            Command::PageDown => {
                self.page_down();
                true
            }
            Command::InsertChar(ch) => {
                self.insert_char(ch);
                true
            }
            Command::InsertCharAt { line, col, ch } => {
                self.insert_char_at(line, col, ch);
                true
            }
            Command::InsertText(text) => {
                self.insert_text(&text);
                !text.is_empty()
            }
            Command::InsertTab => {
                self.insert_tab();
                true
            }
            Command::DeleteChar => self.delete_char(),
            Command::DeleteForward => self.delete_forward(),
            Command::InsertLine => {
                self.insert_line();
                true
            }
            Command::DeleteLine => self.delete_line(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Find(pattern) => self.find(&pattern),
            Command::FindNext => self.find_next(),
            Command::FindPrevious => self.find_previous(),
            Command::ReplaceCurrent(replacement) => self.replace_current(&replacement),
            Command::ReplaceAll {
                pattern,
                replacement,
            } => self.replace_all(&pattern, &replacement) > 0,
            Command::Substitute {
                pattern,
                replacement,
                all,
            } => self.substitute(&pattern, &replacement, all),
            Command::SetCaseSensitive(on) => {
                self.search.set_case_sensitive(on);
                true
            }
            Command::SetWholeWord(on) => {
                self.search.set_whole_word(on);
                true
            }
            Command::SetRegex(on) => {
                self.search.set_regex(on);
                true
            }
            Command::Load(path) => {
                self.open_file(path)?;
                true
            }
            Command::Save(None) => {
                self.save()?;
                true
            }
            Command::Save(Some(path)) => {
                self.save_as(path)?;
                true
            }
            Command::New => {
                self.new_document();
                true
            }
        };
        Ok(changed)
    }
}
