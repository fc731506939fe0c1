//! Search and replace functionality.

use crate::buffer::{byte_to_char, Document};
use regex::{Regex, RegexBuilder};

/// A search match in the document.
///
/// Offsets are character columns within `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Line index.
    pub line: usize,
    /// Start column (inclusive).
    pub start: usize,
    /// End column (exclusive).
    pub end: usize,
}

impl SearchMatch {
    /// Creates a new search match.
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    /// Returns the length of the match in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Case-sensitive search.
    pub case_sensitive: bool,
    /// Whole word only.
    pub whole_word: bool,
    /// Use the pattern as a regular expression.
    pub regex: bool,
}

/// Search state: the last pattern, its matches and the match cursor.
#[derive(Debug, Clone, Default)]
pub struct Search {
    last_pattern: String,
    matches: Vec<SearchMatch>,
    /// 1-based index of the current match, 0 when there is none.
    current: usize,
    options: SearchOptions,
}

impl Search {
    /// Creates a new empty search state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a search state with the given options.
    pub fn with_options(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns the last pattern passed to `find` or `replace_all`.
    pub fn last_pattern(&self) -> &str {
        &self.last_pattern
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn set_case_sensitive(&mut self, sensitive: bool) {
        self.options.case_sensitive = sensitive;
    }

    pub fn set_whole_word(&mut self, whole_word: bool) {
        self.options.whole_word = whole_word;
    }

    pub fn set_regex(&mut self, regex: bool) {
        self.options.regex = regex;
    }

    /// Returns all matches in line-major order.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Returns the number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if there are any matches.
    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Returns the 1-based index of the current match, 0 if none.
    pub fn current_match_index(&self) -> usize {
        self.current
    }

    /// Returns the current match, if any.
    pub fn current_match(&self) -> Option<SearchMatch> {
        self.current
            .checked_sub(1)
            .and_then(|i| self.matches.get(i))
            .copied()
    }

    /// Returns the matches on one line, for rendering.
    pub fn matches_on_line(&self, line: usize) -> impl Iterator<Item = &SearchMatch> + '_ {
        self.matches.iter().filter(move |m| m.line == line)
    }

    /// Drops the cached matches but keeps the last pattern.
    pub fn clear_matches(&mut self) {
        self.matches.clear();
        self.current = 0;
    }

    /// Finds every occurrence of `pattern`.
    /// Returns true if anything matched.
    pub fn find(&mut self, pattern: &str, lines: &[String]) -> bool {
        self.last_pattern = pattern.to_string();
        self.find_matches(pattern, lines);
        self.current = if self.matches.is_empty() { 0 } else { 1 };
        !self.matches.is_empty()
    }

    /// Moves to the next match, wrapping around.
    pub fn find_next(&mut self, lines: &[String]) -> bool {
        if !self.ensure_matches(lines) {
            return false;
        }
        self.current = if self.current >= self.matches.len() {
            1
        } else {
            self.current + 1
        };
        true
    }

    /// Moves to the previous match, wrapping around.
    pub fn find_previous(&mut self, lines: &[String]) -> bool {
        if !self.ensure_matches(lines) {
            return false;
        }
        self.current = if self.current <= 1 {
            self.matches.len()
        } else {
            self.current - 1
        };
        true
    }

    /// Replaces the current match. Later matches on the same line are
    /// shifted so they stay valid without a rescan.
    pub fn replace_current(&mut self, replacement: &str, document: &mut Document) -> bool {
        let Some(target) = self.current_match() else {
            return false;
        };
        if !document.splice(target.line, target.start, target.end, replacement) {
            return false;
        }

        let new_len = replacement.chars().count();
        let delta = new_len as isize - target.len() as isize;
        let current = self.current - 1;
        for (i, m) in self.matches.iter_mut().enumerate() {
            if i == current {
                // Keep the replaced span inside the line
                m.end = m.start + new_len;
            } else if m.line == target.line && m.start > target.start {
                m.start = m.start.saturating_add_signed(delta);
                m.end = m.end.saturating_add_signed(delta);
            }
        }
        true
    }

    /// Replaces every occurrence of `pattern`. Returns the replacement count.
    ///
    /// The match list is empty afterwards; search again to continue.
    pub fn replace_all(&mut self, pattern: &str, replacement: &str, document: &mut Document) -> usize {
        self.last_pattern = pattern.to_string();
        self.find_matches(pattern, document.lines());

        let mut replaced = 0;
        // Back to front so earlier offsets on a line stay valid
        for m in self.matches.iter().rev() {
            if document.splice(m.line, m.start, m.end, replacement) {
                replaced += 1;
            }
        }
        self.clear_matches();
        replaced
    }

    fn ensure_matches(&mut self, lines: &[String]) -> bool {
        if self.matches.is_empty() {
            if self.last_pattern.is_empty() {
                return false;
            }
            let pattern = self.last_pattern.clone();
            self.find_matches(&pattern, lines);
        }
        !self.matches.is_empty()
    }

    fn find_matches(&mut self, pattern: &str, lines: &[String]) {
        self.clear_matches();
        if pattern.is_empty() {
            return;
        }

        let regex = match compile_pattern(pattern, self.options) {
            Ok(r) => r,
            Err(e) => {
                log::debug!("Invalid search pattern '{}': {}", pattern, e);
                return;
            }
        };

        for (line_idx, line) in lines.iter().enumerate() {
            for mat in regex.find_iter(line) {
                let start = byte_to_char(line, mat.start());
                let end = start + mat.as_str().chars().count();
                self.matches.push(SearchMatch::new(line_idx, start, end));
            }
        }
    }
}

/// Builds the regex for a search pattern under the given options.
pub fn compile_pattern(pattern: &str, options: SearchOptions) -> Result<Regex, regex::Error> {
    // Regex patterns are used verbatim; whole-word only wraps literals
    let search_pattern = if options.regex {
        pattern.to_string()
    } else if options.whole_word {
        format!(r"\b{}\b", regex::escape(pattern))
    } else {
        regex::escape(pattern)
    };

    RegexBuilder::new(&search_pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_line_major_order() {
        let doc = lines(&["xabcx", "nomatch", "abc"]);
        let mut search = Search::new();

        assert!(search.find("abc", &doc));
        assert_eq!(
            search.matches(),
            &[SearchMatch::new(0, 1, 4), SearchMatch::new(2, 0, 3)]
        );
        assert_eq!(search.current_match_index(), 1);
    }

    #[test]
    fn test_find_no_matches() {
        let doc = lines(&["hello world"]);
        let mut search = Search::new();

        assert!(!search.find("xyz", &doc));
        assert_eq!(search.current_match_index(), 0);
        assert!(search.current_match().is_none());
        assert_eq!(search.last_pattern(), "xyz");
    }

    #[test]
    fn test_find_empty_pattern() {
        let doc = lines(&["hello"]);
        let mut search = Search::new();
        assert!(!search.find("", &doc));
        assert!(!search.find_next(&doc));
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let doc = lines(&["cats are cute"]);
        let mut search = Search::new();
        assert!(search.find("Cat", &doc));

        search.set_case_sensitive(true);
        assert!(!search.find("Cat", &doc));
    }

    #[test]
    fn test_whole_word() {
        let mut search = Search::new();
        search.set_whole_word(true);

        assert!(search.find("cat", &lines(&["cat!"])));
        assert!(!search.find("cat", &lines(&["concatenate"])));
    }

    #[test]
    fn test_literal_metacharacters_escaped() {
        let doc = lines(&["a.b axb (x) [y] a+b"]);
        let mut search = Search::new();

        search.find("a.b", &doc);
        assert_eq!(search.matches(), &[SearchMatch::new(0, 0, 3)]);

        search.find("(x)", &doc);
        assert_eq!(search.matches(), &[SearchMatch::new(0, 8, 11)]);

        search.find("a+b", &doc);
        assert_eq!(search.match_count(), 1);
    }

    #[test]
    fn test_regex_mode() {
        let doc = lines(&["foo1 bar22 baz"]);
        let mut search = Search::new();
        search.set_regex(true);

        assert!(search.find(r"[a-z]+\d+", &doc));
        assert_eq!(
            search.matches(),
            &[SearchMatch::new(0, 0, 4), SearchMatch::new(0, 5, 10)]
        );
    }

    #[test]
    fn test_regex_mode_ignores_whole_word() {
        let doc = lines(&["abc"]);
        let mut search = Search::new();
        search.set_regex(true);
        search.set_whole_word(true);

        assert!(search.find("a.", &doc));
        assert_eq!(search.matches(), &[SearchMatch::new(0, 0, 2)]);

        // The same flag still applies to literal patterns
        search.set_regex(false);
        assert!(!search.find("ab", &doc));
    }

    #[test]
    fn test_invalid_regex_clears_matches() {
        let doc = lines(&["abc abc"]);
        let mut search = Search::new();
        assert!(search.find("abc", &doc));

        search.set_regex(true);
        assert!(!search.find("(unclosed", &doc));
        assert!(search.matches().is_empty());
        assert_eq!(search.current_match_index(), 0);
    }

    #[test]
    fn test_find_next_wraps() {
        let doc = lines(&["a b", "a"]);
        let mut search = Search::new();
        search.find("a", &doc);
        assert_eq!(search.match_count(), 2);

        assert!(search.find_next(&doc));
        assert_eq!(search.current_match_index(), 2);
        assert!(search.find_next(&doc));
        assert_eq!(search.current_match_index(), 1);
    }

    #[test]
    fn test_find_previous_wraps() {
        let doc = lines(&["a b a c a"]);
        let mut search = Search::new();
        search.find("a", &doc);

        assert!(search.find_previous(&doc));
        assert_eq!(search.current_match_index(), 3);
        assert_eq!(search.current_match().unwrap().start, 8);

        assert!(search.find_previous(&doc));
        assert_eq!(search.current_match().unwrap().start, 4);
    }

    #[test]
    fn test_find_next_reruns_last_pattern() {
        let doc = lines(&["one two one"]);
        let mut search = Search::new();
        search.find("one", &doc);
        search.clear_matches();

        assert!(search.find_next(&doc));
        assert_eq!(search.match_count(), 2);
        assert_eq!(search.current_match_index(), 1);
    }

    #[test]
    fn test_find_next_without_pattern() {
        let mut search = Search::new();
        assert!(!search.find_next(&lines(&["abc"])));
        assert!(!search.find_previous(&lines(&["abc"])));
    }

    #[test]
    fn test_replace_current_shifts_same_line() {
        let mut doc = Document::from_text("ab ab ab\nab");
        let mut search = Search::new();
        search.find("ab", doc.lines());

        assert!(search.replace_current("xyz", &mut doc));
        assert_eq!(doc.line(0), Some("xyz ab ab"));
        assert_eq!(search.matches()[1], SearchMatch::new(0, 4, 6));
        assert_eq!(search.matches()[2], SearchMatch::new(0, 7, 9));
        // Other lines untouched
        assert_eq!(search.matches()[3], SearchMatch::new(1, 0, 2));

        search.find_next(doc.lines());
        assert!(search.replace_current("", &mut doc));
        assert_eq!(doc.line(0), Some("xyz  ab"));
        assert_eq!(search.matches()[2], SearchMatch::new(0, 5, 7));
    }

    #[test]
    fn test_replace_current_without_match() {
        let mut doc = Document::from_text("abc");
        let mut search = Search::new();
        assert!(!search.replace_current("z", &mut doc));
        assert_eq!(doc.line(0), Some("abc"));
    }

    #[test]
    fn test_replace_all() {
        let mut doc = Document::from_text("xabcx\nnomatch\nabc");
        let mut search = Search::new();

        let count = search.replace_all("abc", "Z", &mut doc);
        assert_eq!(count, 2);
        assert_eq!(
            doc.lines(),
            &["xZx".to_string(), "nomatch".to_string(), "Z".to_string()]
        );
        assert!(search.matches().is_empty());
        assert_eq!(search.last_pattern(), "abc");
    }

    #[test]
    fn test_replace_all_multiple_per_line() {
        let mut doc = Document::from_text("aXaXa");
        let mut search = Search::new();
        search.replace_all("a", "bb", &mut doc);
        assert_eq!(doc.line(0), Some("bbXbbXbb"));
    }

    #[test]
    fn test_unicode_columns() {
        let doc = lines(&["héllo wörld"]);
        let mut search = Search::new();
        search.find("wörld", &doc);
        assert_eq!(search.matches(), &[SearchMatch::new(0, 6, 11)]);
    }
}
