//! Command parsing.
//!
//! Every user-facing action is a [`Command`] variant, dispatched through
//! `Editor::execute`. Commands can also be parsed from a short textual
//! syntax, including `s/pattern/replacement/flags`.

use crate::error::CommandError;
use std::path::PathBuf;
use std::str::FromStr;

/// Editor command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor by a column and row delta
    MoveCursor { d_col: isize, d_row: isize },
    /// Move to the start of the line
    MoveLineStart,
    /// Move to the end of the line
    MoveLineEnd,
    /// Move up one page
    PageUp,
    /// Move down one page
    PageDown,
    /// Insert a single character
    InsertChar(char),
    /// Insert a character at a position, growing the document if needed
    InsertCharAt { line: usize, col: usize, ch: char },
    /// Insert text as a single undo step
    InsertText(String),
    /// Insert spaces up to the tab width
    InsertTab,
    /// Backspace
    DeleteChar,
    /// Delete the character under the cursor
    DeleteForward,
    /// Split the line at the cursor
    InsertLine,
    /// Delete the current line
    DeleteLine,
    Undo,
    Redo,
    /// Search for a pattern
    Find(String),
    FindNext,
    FindPrevious,
    /// Replace the current match
    ReplaceCurrent(String),
    /// Replace every occurrence of a pattern
    ReplaceAll { pattern: String, replacement: String },
    /// Find followed by replace-current (or replace-all when `all` is set)
    Substitute {
        pattern: String,
        replacement: String,
        all: bool,
    },
    SetCaseSensitive(bool),
    SetWholeWord(bool),
    SetRegex(bool),
    /// Load a file
    Load(PathBuf),
    /// Save to the current file, or to a new path
    Save(Option<PathBuf>),
    /// Start an empty document
    New,
}

impl Command {
    /// Parse a command string
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let trimmed = input.trim();

        if let Some(body) = trimmed.strip_prefix("s/") {
            return parse_substitute(body);
        }
        if let Some(pattern) = trimmed.strip_prefix('/') {
            if pattern.is_empty() {
                return Err(CommandError::InvalidSyntax("Empty pattern".to_string()));
            }
            return Ok(Command::Find(pattern.to_string()));
        }

        let (verb, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim_start()),
            None => (trimmed, ""),
        };

        match (verb, arg) {
            ("", _) => Err(CommandError::InvalidSyntax("Empty command".to_string())),
            ("h", "") => Ok(Command::MoveCursor { d_col: -1, d_row: 0 }),
            ("l", "") => Ok(Command::MoveCursor { d_col: 1, d_row: 0 }),
            ("k", "") => Ok(Command::MoveCursor { d_col: 0, d_row: -1 }),
            ("j", "") => Ok(Command::MoveCursor { d_col: 0, d_row: 1 }),
            ("move", arg) => parse_move(arg),
            ("0", "") => Ok(Command::MoveLineStart),
            ("$", "") => Ok(Command::MoveLineEnd),
            ("pageup", "") => Ok(Command::PageUp),
            ("pagedown", "") => Ok(Command::PageDown),
            ("i", "") => Err(CommandError::InvalidSyntax("Missing text".to_string())),
            // Take the raw remainder so leading spaces in the text survive
            ("i", _) => Ok(Command::InsertText(raw_argument(input))),
            ("put", arg) => parse_put(arg),
            ("tab", "") => Ok(Command::InsertTab),
            ("X", "") => Ok(Command::DeleteChar),
            ("x", "") => Ok(Command::DeleteForward),
            ("o", "") => Ok(Command::InsertLine),
            ("dd", "") => Ok(Command::DeleteLine),
            ("u" | "undo", "") => Ok(Command::Undo),
            ("redo", "") => Ok(Command::Redo),
            ("n", "") => Ok(Command::FindNext),
            ("N", "") => Ok(Command::FindPrevious),
            ("r", _) => Ok(Command::ReplaceCurrent(raw_argument(input))),
            ("w" | "write", "") => Ok(Command::Save(None)),
            ("w" | "write", path) => Ok(Command::Save(Some(PathBuf::from(path)))),
            ("e" | "edit", "") => Err(CommandError::InvalidSyntax("Missing file name".to_string())),
            ("e" | "edit", path) => Ok(Command::Load(PathBuf::from(path))),
            ("new", "") => Ok(Command::New),
            ("set", option) => parse_set(option),
            _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

/// Everything after the verb and the single separating whitespace char.
fn raw_argument(input: &str) -> String {
    let input = input.trim_start().trim_end_matches(['\r', '\n']);
    input
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default()
}

fn parse_substitute(body: &str) -> Result<Command, CommandError> {
    let Some((pattern, rest)) = body.split_once('/') else {
        return Err(CommandError::InvalidSyntax(
            "Expected s/pattern/replacement/flags".to_string(),
        ));
    };
    if pattern.is_empty() {
        return Err(CommandError::InvalidSyntax("Empty pattern".to_string()));
    }
    let (replacement, flags) = rest.split_once('/').unwrap_or((rest, ""));

    Ok(Command::Substitute {
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
        all: flags.contains('g'),
    })
}

fn parse_move(arg: &str) -> Result<Command, CommandError> {
    let mut parts = arg.split_whitespace().map(str::parse::<isize>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(d_col)), Some(Ok(d_row)), None) => Ok(Command::MoveCursor { d_col, d_row }),
        _ => Err(CommandError::InvalidSyntax(format!("move {}", arg))),
    }
}

fn parse_put(arg: &str) -> Result<Command, CommandError> {
    let mut parts = arg.split_whitespace();
    let line = parts.next().and_then(|p| p.parse::<usize>().ok());
    let col = parts.next().and_then(|p| p.parse::<usize>().ok());
    let ch = parts.next().and_then(|p| {
        let mut chars = p.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    });
    match (line, col, ch, parts.next()) {
        (Some(line), Some(col), Some(ch), None) => Ok(Command::InsertCharAt { line, col, ch }),
        _ => Err(CommandError::InvalidSyntax(format!("put {}", arg))),
    }
}

fn parse_set(option: &str) -> Result<Command, CommandError> {
    match option {
        "case" => Ok(Command::SetCaseSensitive(true)),
        "nocase" => Ok(Command::SetCaseSensitive(false)),
        "word" => Ok(Command::SetWholeWord(true)),
        "noword" => Ok(Command::SetWholeWord(false)),
        "regex" => Ok(Command::SetRegex(true)),
        "noregex" => Ok(Command::SetRegex(false)),
        "" => Err(CommandError::InvalidSyntax("Missing option".to_string())),
        other => Err(CommandError::UnknownCommand(format!("set {}", other))),
    }
}
