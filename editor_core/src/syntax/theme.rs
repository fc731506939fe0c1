//! Theme system for syntax highlighting.
//!
//! Defines token styles and the terminal colour scheme they map to.

use std::collections::HashMap;

/// Terminal colour used for a token style.
pub use crossterm::style::Color;

/// Token style categories for syntax highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenStyle {
    /// Builtin type names (int, char, void)
    Type,
    /// Loops and jumps (for, while, return)
    ControlFlow,
    /// Conditionals in shell scripts (if, then, fi)
    Conditional,
    /// Declaration keywords (class, struct, def)
    Keyword,
    /// Access and inheritance modifiers (public, virtual, final)
    Modifier,
    /// Preprocessor directives (#include)
    Preprocessor,
    /// Decorators (@property)
    Decorator,
    /// Named constants (None, True, False)
    Constant,
    /// String and character literals
    String,
    /// Comments (line and block)
    Comment,
    /// Numeric literals
    Number,
    /// Shell variables ($HOME)
    Variable,
    /// Plain identifiers
    Identifier,
    /// Markdown headings
    Heading,
    /// Markdown bold text
    Bold,
    /// Markdown italic text
    Italic,
    /// Markdown links
    Link,
    /// Markdown inline code and fences
    Code,
    /// Markdown list items
    ListItem,
    /// Markdown block quotes
    Quote,
    /// Markdown horizontal rules
    HorizontalRule,
}

/// A syntax highlighting theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Background color.
    pub background: Color,
    /// Default text color.
    pub foreground: Color,
    /// Colors for each token style.
    colors: HashMap<TokenStyle, Color>,
}

impl Theme {
    /// Creates a new theme with the given name and no token colours.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            background: Color::Black,
            foreground: Color::Grey,
            colors: HashMap::new(),
        }
    }

    /// Sets the color for a token style.
    pub fn set_color(&mut self, style: TokenStyle, color: Color) {
        self.colors.insert(style, color);
    }

    /// Gets the color for a token style, falling back to foreground.
    pub fn color(&self, style: TokenStyle) -> Color {
        self.colors.get(&style).copied().unwrap_or(self.foreground)
    }

    /// Creates the default dark terminal theme.
    pub fn dark() -> Self {
        let mut theme = Self::new("Dark");

        theme.set_color(TokenStyle::Type, Color::DarkRed);
        theme.set_color(TokenStyle::Conditional, Color::DarkRed);
        theme.set_color(TokenStyle::ControlFlow, Color::DarkGreen);
        theme.set_color(TokenStyle::Keyword, Color::DarkYellow);
        theme.set_color(TokenStyle::Modifier, Color::DarkBlue);
        theme.set_color(TokenStyle::Preprocessor, Color::DarkBlue);
        theme.set_color(TokenStyle::Decorator, Color::DarkBlue);
        theme.set_color(TokenStyle::Constant, Color::DarkYellow);

        theme.set_color(TokenStyle::String, Color::DarkMagenta);
        theme.set_color(TokenStyle::Comment, Color::DarkCyan);
        theme.set_color(TokenStyle::Number, Color::Grey);
        theme.set_color(TokenStyle::Variable, Color::Grey);
        theme.set_color(TokenStyle::Identifier, Color::Grey);

        // Markdown
        theme.set_color(TokenStyle::Heading, Color::DarkRed);
        theme.set_color(TokenStyle::Bold, Color::DarkGreen);
        theme.set_color(TokenStyle::Italic, Color::DarkYellow);
        theme.set_color(TokenStyle::Link, Color::DarkBlue);
        theme.set_color(TokenStyle::Code, Color::DarkMagenta);
        theme.set_color(TokenStyle::ListItem, Color::DarkCyan);
        theme.set_color(TokenStyle::Quote, Color::Grey);
        theme.set_color(TokenStyle::HorizontalRule, Color::Grey);

        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme() {
        let theme = Theme::dark();
        assert_eq!(theme.name, "Dark");
        assert_ne!(theme.color(TokenStyle::Comment), theme.foreground);
    }

    #[test]
    fn test_fallback_color() {
        let theme = Theme::new("Test");
        assert_eq!(theme.color(TokenStyle::Keyword), theme.foreground);
    }

    #[test]
    fn test_dark_theme_uses_standard_palette() {
        let theme = Theme::dark();
        assert_eq!(theme.foreground, Color::Grey);
        assert_eq!(theme.color(TokenStyle::Comment), Color::DarkCyan);
        assert_eq!(theme.color(TokenStyle::String), Color::DarkMagenta);
    }
}
