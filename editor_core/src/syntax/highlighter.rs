//! Rule-based syntax highlighter.
//!
//! Highlights one line at a time by running every rule of the active
//! language over it. There is no parse state carried between lines.

use super::language::Language;
use super::rules::{HighlightRule, LanguageRegistry};
use super::theme::TokenStyle;
use crate::buffer::byte_to_char;

/// A highlighted span of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Start column in characters.
    pub start_col: usize,
    /// Length in characters.
    pub len: usize,
    /// Token style for this span.
    pub style: TokenStyle,
}

impl HighlightSpan {
    /// Creates a new highlight span.
    pub fn new(start_col: usize, len: usize, style: TokenStyle) -> Self {
        Self {
            start_col,
            len,
            style,
        }
    }

    /// Returns the column just past the span.
    pub fn end_col(&self) -> usize {
        self.start_col + self.len
    }

    fn contains(&self, col: usize) -> bool {
        col >= self.start_col && col < self.end_col()
    }
}

/// The spans of one line in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineHighlights {
    spans: Vec<HighlightSpan>,
}

impl LineHighlights {
    /// Creates empty line highlights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a span to the line.
    pub fn add_span(&mut self, span: HighlightSpan) {
        self.spans.push(span);
    }

    /// Returns the style drawn at a column: the last span covering it wins.
    pub fn style_at(&self, col: usize) -> Option<TokenStyle> {
        self.spans
            .iter()
            .rev()
            .find(|span| span.contains(col))
            .map(|span| span.style)
    }

    /// Returns all spans for this line.
    pub fn spans(&self) -> &[HighlightSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Syntax highlighter driven by a [`LanguageRegistry`].
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    registry: LanguageRegistry,
    language: Option<Language>,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Creates a highlighter with the built-in languages.
    pub fn new() -> Self {
        Self::with_registry(LanguageRegistry::builtin())
    }

    /// Creates a highlighter over a custom registry.
    pub fn with_registry(registry: LanguageRegistry) -> Self {
        Self {
            registry,
            language: None,
        }
    }

    /// Returns the active language, if any.
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Sets the active language directly.
    pub fn set_language(&mut self, language: Option<Language>) {
        if self.language != language {
            log::debug!(
                "Highlighting language: {}",
                language.map_or("none", |l| l.name())
            );
        }
        self.language = language;
    }

    /// Picks the active language from a file name.
    /// Unknown or missing extensions switch highlighting off.
    pub fn detect_language(&mut self, filename: &str) -> Option<Language> {
        self.set_language(Language::from_filename(filename));
        self.language
    }

    /// Switches highlighting off.
    pub fn clear_cache(&mut self) {
        self.set_language(None);
    }

    /// Returns the rules of the active language.
    pub fn active_rules(&self) -> &[HighlightRule] {
        match self.language {
            Some(language) => self.registry.rules(language),
            None => &[],
        }
    }

    /// Highlights a single line.
    ///
    /// Spans are produced rule by rule in registration order, so when two
    /// spans overlap the later one is drawn on top.
    pub fn highlight_line(&self, line: &str) -> LineHighlights {
        let mut highlights = LineHighlights::new();

        for rule in self.active_rules() {
            for mat in rule.pattern().find_iter(line) {
                if rule.is_whole_word() && !is_whole_word(line, mat.start(), mat.end()) {
                    continue;
                }
                let start_col = byte_to_char(line, mat.start());
                let len = mat.as_str().chars().count();
                highlights.add_span(HighlightSpan::new(start_col, len, rule.style()));
            }
        }

        highlights
    }
}

/// True when the bytes `start..end` are not touching word characters.
/// Line edges count as boundaries.
fn is_whole_word(line: &str, start: usize, end: usize) -> bool {
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(highlights: &LineHighlights) -> Vec<(usize, usize, TokenStyle)> {
        highlights
            .spans()
            .iter()
            .map(|s| (s.start_col, s.len, s.style))
            .collect()
    }

    #[test]
    fn test_no_language_no_spans() {
        let highlighter = SyntaxHighlighter::new();
        assert!(highlighter.highlight_line("int x = 1;").is_empty());
    }

    #[test]
    fn test_detect_language() {
        let mut highlighter = SyntaxHighlighter::new();
        assert_eq!(highlighter.detect_language("foo.py"), Some(Language::Python));
        assert!(!highlighter.highlight_line("def f():").is_empty());

        assert_eq!(highlighter.detect_language("foo.unknown"), None);
        assert!(highlighter.highlight_line("def f():").is_empty());
    }

    #[test]
    fn test_clear_cache() {
        let mut highlighter = SyntaxHighlighter::new();
        highlighter.detect_language("main.c");
        highlighter.clear_cache();
        assert_eq!(highlighter.language(), None);
        assert!(highlighter.active_rules().is_empty());
    }

    #[test]
    fn test_cpp_line() {
        let mut highlighter = SyntaxHighlighter::new();
        highlighter.detect_language("main.cpp");

        let spans = styles(&highlighter.highlight_line("int x = 42; // done"));
        assert_eq!(
            spans,
            vec![
                (0, 3, TokenStyle::Type),
                (12, 7, TokenStyle::Comment),
                (8, 2, TokenStyle::Number),
            ]
        );
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        let mut highlighter = SyntaxHighlighter::new();
        highlighter.detect_language("script.py");

        let line = "format_if = inside";
        let highlights = highlighter.highlight_line(line);
        assert!(highlights
            .spans()
            .iter()
            .all(|s| s.style != TokenStyle::ControlFlow));
    }

    #[test]
    fn test_keyword_at_line_edges() {
        let mut highlighter = SyntaxHighlighter::new();
        highlighter.detect_language("a.sh");

        let highlights = highlighter.highlight_line("fi");
        assert_eq!(highlights.spans()[0], HighlightSpan::new(0, 2, TokenStyle::Conditional));
    }

    #[test]
    fn test_later_rule_wins() {
        let mut highlighter = SyntaxHighlighter::new();
        highlighter.detect_language("main.c");

        // The keyword span comes first, the comment span is drawn over it
        let highlights = highlighter.highlight_line("// return 0");
        assert_eq!(highlights.style_at(3), Some(TokenStyle::Comment));
        assert!(highlights
            .spans()
            .iter()
            .any(|s| s.style == TokenStyle::ControlFlow));
    }

    #[test]
    fn test_markdown_heading_and_code() {
        let mut highlighter = SyntaxHighlighter::new();
        highlighter.detect_language("README.md");

        let highlights = highlighter.highlight_line("# Title");
        assert_eq!(highlights.style_at(0), Some(TokenStyle::Heading));

        let highlights = highlighter.highlight_line("use `cargo`");
        assert_eq!(highlights.style_at(5), Some(TokenStyle::Code));
        assert_eq!(highlights.style_at(0), None);
    }

    #[test]
    fn test_python_decorator() {
        let mut highlighter = SyntaxHighlighter::new();
        highlighter.detect_language("app.py");
        let highlights = highlighter.highlight_line("@property");
        assert_eq!(highlights.style_at(1), Some(TokenStyle::Decorator));
    }

    #[test]
    fn test_unicode_columns() {
        let mut highlighter = SyntaxHighlighter::new();
        highlighter.detect_language("a.py");
        let highlights = highlighter.highlight_line("é = None");
        assert_eq!(highlights.spans()[0], HighlightSpan::new(4, 4, TokenStyle::Constant));
    }

    #[test]
    fn test_is_whole_word() {
        assert!(is_whole_word("cat", 0, 3));
        assert!(is_whole_word("(cat)", 1, 4));
        assert!(!is_whole_word("cats", 0, 3));
        assert!(!is_whole_word("_cat", 1, 4));
    }
}
