//! Editor Core - Pure text editor logic.
//!
//! This crate contains the line-oriented document model, undo history,
//! search and replace, and rule-based syntax highlighting, without any
//! dependencies on terminal or rendering code.

pub mod buffer;
pub mod command;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod history;
pub mod search;
pub mod syntax;

pub use buffer::Document;
pub use command::Command;
pub use config::EditorConfig;
pub use cursor::Position;
pub use editor::Editor;
pub use error::{CommandError, EditorError};
pub use history::History;
pub use search::{Search, SearchMatch, SearchOptions};
pub use syntax::{
    Color, HighlightSpan, Language, LanguageRegistry, LineHighlights, SyntaxHighlighter, Theme,
    TokenStyle,
};
