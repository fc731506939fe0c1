//! Language detection.
//!
//! Maps file names to one of the built-in rule-table languages.

/// Languages with a built-in rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Cpp,
    C,
    Python,
    Shell,
    Markdown,
}

impl Language {
    /// Returns all available languages.
    pub fn all() -> &'static [Language] {
        &[
            Language::Cpp,
            Language::C,
            Language::Python,
            Language::Shell,
            Language::Markdown,
        ]
    }

    /// Detects the language of a file name from the text after its last `.`.
    /// Names without a dot have no language.
    pub fn from_filename(filename: &str) -> Option<Self> {
        filename
            .rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
    }

    /// Detects language from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            // `.h` is treated as C++
            "cpp" | "hpp" | "h" | "cxx" | "cc" => Some(Self::Cpp),
            "c" => Some(Self::C),
            "py" => Some(Self::Python),
            "sh" | "bash" => Some(Self::Shell),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Returns the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpp => "C++",
            Self::C => "C",
            Self::Python => "Python",
            Self::Shell => "Shell",
            Self::Markdown => "Markdown",
        }
    }
}
