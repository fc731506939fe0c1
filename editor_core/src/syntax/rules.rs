//! Rule tables for the built-in languages.
//!
//! A language is an ordered list of rules. Keywords are registered first as
//! whole-word rules, followed by the structural rules (strings, comments,
//! numbers and language specific constructs). Order matters: spans from
//! later rules are drawn over earlier ones.

use super::language::Language;
use super::theme::TokenStyle;
use regex::Regex;
use std::collections::HashMap;

/// A single highlighting rule.
#[derive(Debug, Clone)]
pub struct HighlightRule {
    pattern: Regex,
    style: TokenStyle,
    whole_word: bool,
}

impl HighlightRule {
    /// Compiles a rule from a regular expression.
    pub fn new(pattern: &str, style: TokenStyle, whole_word: bool) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            style,
            whole_word,
        })
    }

    /// Builds a whole-word rule matching a literal keyword.
    pub fn keyword(keyword: &str, style: TokenStyle) -> Result<Self, regex::Error> {
        Self::new(&format!(r"\b{}\b", regex::escape(keyword)), style, true)
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn style(&self) -> TokenStyle {
        self.style
    }

    pub fn is_whole_word(&self) -> bool {
        self.whole_word
    }
}

/// Immutable set of rule lists, one per language.
///
/// Built once and handed to the highlighter; the highlighter only ever
/// looks rule lists up by language.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    rules: HashMap<Language, Vec<HighlightRule>>,
}

impl LanguageRegistry {
    /// Creates a registry without any rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the registry with every built-in language.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Language::Cpp, CPP_KEYWORDS, CPP_RULES);
        registry.register(Language::C, C_KEYWORDS, C_RULES);
        registry.register(Language::Python, PYTHON_KEYWORDS, PYTHON_RULES);
        registry.register(Language::Shell, SHELL_KEYWORDS, SHELL_RULES);
        registry.register(Language::Markdown, &[], MARKDOWN_RULES);
        registry
    }

    /// Appends a rule to a language.
    pub fn add_rule(&mut self, language: Language, rule: HighlightRule) {
        self.rules.entry(language).or_default().push(rule);
    }

    /// Returns the ordered rules of a language.
    pub fn rules(&self, language: Language) -> &[HighlightRule] {
        self.rules.get(&language).map(Vec::as_slice).unwrap_or(&[])
    }

    fn register(
        &mut self,
        language: Language,
        keywords: &[(&str, TokenStyle)],
        rules: &[(&str, TokenStyle)],
    ) {
        let keyword_rules = keywords
            .iter()
            .map(|&(word, style)| (word, HighlightRule::keyword(word, style)));
        let structural_rules = rules
            .iter()
            .map(|&(pattern, style)| (pattern, HighlightRule::new(pattern, style, false)));

        for (source, rule) in keyword_rules.chain(structural_rules) {
            match rule {
                Ok(rule) => self.add_rule(language, rule),
                Err(e) => log::warn!(
                    "Skipping {} rule '{}': {}",
                    language.name(),
                    source,
                    e
                ),
            }
        }
    }
}

use TokenStyle::*;

const CPP_KEYWORDS: &[(&str, TokenStyle)] = &[
    ("int", Type),
    ("float", Type),
    ("double", Type),
    ("char", Type),
    ("void", Type),
    ("bool", Type),
    ("auto", Type),
    ("const", Type),
    ("if", ControlFlow),
    ("else", ControlFlow),
    ("for", ControlFlow),
    ("while", ControlFlow),
    ("do", ControlFlow),
    ("switch", ControlFlow),
    ("case", ControlFlow),
    ("default", ControlFlow),
    ("break", ControlFlow),
    ("continue", ControlFlow),
    ("return", ControlFlow),
    ("goto", ControlFlow),
    ("class", Keyword),
    ("struct", Keyword),
    ("namespace", Keyword),
    ("template", Keyword),
    ("typename", Keyword),
    ("public", Modifier),
    ("private", Modifier),
    ("protected", Modifier),
    ("virtual", Modifier),
    ("override", Modifier),
    ("final", Modifier),
];

const CPP_RULES: &[(&str, TokenStyle)] = &[
    (r#""(\\.|[^"\\])*""#, String),
    (r"'(\\.|[^'\\])'", String),
    (r"//.*$", Comment),
    (r"/\*.*?\*/", Comment),
    (r"\b[0-9]+\b", Number),
    (r"\b0x[0-9a-fA-F]+\b", Number),
    (r"\b[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?\b", Number),
];

const C_KEYWORDS: &[(&str, TokenStyle)] = &[
    ("int", Type),
    ("float", Type),
    ("double", Type),
    ("char", Type),
    ("void", Type),
    ("short", Type),
    ("long", Type),
    ("signed", Type),
    ("unsigned", Type),
    ("const", Type),
    ("volatile", Type),
    ("if", ControlFlow),
    ("else", ControlFlow),
    ("for", ControlFlow),
    ("while", ControlFlow),
    ("do", ControlFlow),
    ("switch", ControlFlow),
    ("case", ControlFlow),
    ("default", ControlFlow),
    ("break", ControlFlow),
    ("continue", ControlFlow),
    ("return", ControlFlow),
    ("goto", ControlFlow),
    ("struct", Keyword),
    ("union", Keyword),
    ("enum", Keyword),
    ("typedef", Keyword),
];

const C_RULES: &[(&str, TokenStyle)] = &[
    (r"^#\s*[a-zA-Z]+\b", Preprocessor),
    (r#""(\\.|[^"\\])*""#, String),
    (r"'(\\.|[^'\\])'", String),
    (r"//.*$", Comment),
    (r"/\*.*?\*/", Comment),
    (r"\b[0-9]+\b", Number),
];

const PYTHON_KEYWORDS: &[(&str, TokenStyle)] = &[
    ("def", Keyword),
    ("class", Keyword),
    ("lambda", Keyword),
    ("if", ControlFlow),
    ("elif", ControlFlow),
    ("else", ControlFlow),
    ("for", ControlFlow),
    ("while", ControlFlow),
    ("try", ControlFlow),
    ("except", ControlFlow),
    ("finally", ControlFlow),
    ("with", ControlFlow),
    ("return", ControlFlow),
    ("yield", ControlFlow),
    ("import", ControlFlow),
    ("from", ControlFlow),
    ("as", ControlFlow),
    ("pass", ControlFlow),
    ("break", ControlFlow),
    ("continue", ControlFlow),
    ("raise", ControlFlow),
    ("and", ControlFlow),
    ("or", ControlFlow),
    ("not", ControlFlow),
    ("is", ControlFlow),
    ("in", ControlFlow),
    ("None", Constant),
    ("True", Constant),
    ("False", Constant),
];

const PYTHON_RULES: &[(&str, TokenStyle)] = &[
    (r#""(\\"|.)*?""#, String),
    (r"'(\\'|.)*?'", String),
    (r#"""".*?""""#, String),
    (r"'''.*?'''", String),
    (r"#.*$", Comment),
    (r"\b[0-9]+\b", Number),
    (r"\b0x[0-9a-fA-F]+\b", Number),
    (r"\b[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?\b", Number),
    (r"@[a-zA-Z_][a-zA-Z0-9_]*", Decorator),
];

const SHELL_KEYWORDS: &[(&str, TokenStyle)] = &[
    ("if", Conditional),
    ("then", Conditional),
    ("else", Conditional),
    ("elif", Conditional),
    ("fi", Conditional),
    ("for", ControlFlow),
    ("while", ControlFlow),
    ("do", ControlFlow),
    ("done", ControlFlow),
    ("case", ControlFlow),
    ("esac", ControlFlow),
    ("function", Keyword),
    ("return", Keyword),
];

const SHELL_RULES: &[(&str, TokenStyle)] = &[
    (r#""(\\"|.)*?""#, String),
    (r"'(\\'|.)*?'", String),
    (r"#.*$", Comment),
    (r"\$\w+", Variable),
    (r"\b[a-zA-Z_][a-zA-Z0-9_]*\b", Identifier),
];

const MARKDOWN_RULES: &[(&str, TokenStyle)] = &[
    (r"^#{1,6}\s.*$", Heading),
    (r"\*\*.*?\*\*", Bold),
    (r"\*.*?\*", Italic),
    (r"\[.*?\]\(.*?\)", Link),
    (r"```.*?```", Code),
    (r"`[^`]+`", Code),
    (r"^[-*+] .*$", ListItem),
    (r"^\d+\. .*$", ListItem),
    (r"^> .*$", Quote),
    (r"---|___|\*\*\*", HorizontalRule),
];
