//! Syntax highlighting module.
//!
//! Provides per-line highlighting from ordered regex rule tables.

mod highlighter;
mod language;
mod rules;
mod theme;

pub use highlighter::{HighlightSpan, LineHighlights, SyntaxHighlighter};
pub use language::Language;
pub use rules::{HighlightRule, LanguageRegistry};
pub use theme::{Color, Theme, TokenStyle};
