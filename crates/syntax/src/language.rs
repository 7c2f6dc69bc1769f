// Chunk: docs/chunks/syntax_highlighting - Language registry keyed by file extension

//! Language registry mapping file extensions to scanners.
//!
//! The set of languages is closed: [`Language`] is an enum and
//! [`crate::scan_line`] dispatches on it with a single `match`.

use std::path::Path;

/// A language with its own token scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// No highlighting; the whole line is one Text span.
    #[default]
    Plain,
    /// C and C++ share one scanner and keyword set.
    C,
    Python,
    /// JavaScript and TypeScript.
    JavaScript,
    Html,
    Css,
    Json,
    Markdown,
    Go,
    Rust,
    Shell,
    Lua,
    Assembly,
    Csv,
}

/// Extension (lowercase, without the dot) to language.
const EXTENSIONS: &[(&str, Language)] = &[
    ("c", Language::C),
    ("h", Language::C),
    ("cpp", Language::C),
    ("hpp", Language::C),
    ("cc", Language::C),
    ("cxx", Language::C),
    ("py", Language::Python),
    ("pyw", Language::Python),
    ("js", Language::JavaScript),
    ("ts", Language::JavaScript),
    ("jsx", Language::JavaScript),
    ("tsx", Language::JavaScript),
    ("html", Language::Html),
    ("htm", Language::Html),
    ("css", Language::Css),
    ("json", Language::Json),
    ("md", Language::Markdown),
    ("go", Language::Go),
    ("rs", Language::Rust),
    ("sh", Language::Shell),
    ("bash", Language::Shell),
    ("lua", Language::Lua),
    ("asm", Language::Assembly),
    ("s", Language::Assembly),
    ("csv", Language::Csv),
];

const ALL: &[Language] = &[
    Language::Plain,
    Language::C,
    Language::Python,
    Language::JavaScript,
    Language::Html,
    Language::Css,
    Language::Json,
    Language::Markdown,
    Language::Go,
    Language::Rust,
    Language::Shell,
    Language::Lua,
    Language::Assembly,
    Language::Csv,
];

impl Language {
    /// Every supported language, `Plain` first.
    pub fn all() -> &'static [Language] {
        ALL
    }

    /// Display name for status bars and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Language::Plain => "Plain Text",
            Language::C => "C/C++",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Json => "JSON",
            Language::Markdown => "Markdown",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Shell => "Shell",
            Language::Lua => "Lua",
            Language::Assembly => "Assembly",
            Language::Csv => "CSV",
        }
    }

    /// File extensions (without the dot) mapped to this language.
    pub fn extensions(self) -> impl Iterator<Item = &'static str> {
        EXTENSIONS
            .iter()
            .filter(move |(_, lang)| *lang == self)
            .map(|(ext, _)| *ext)
    }

    /// Looks a language up by extension, ignoring case and a leading dot.
    pub fn from_extension(ext: &str) -> Option<Language> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        EXTENSIONS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, lang)| *lang)
    }

    /// Looks a language up by display name or any of its extensions,
    /// ignoring case.
    pub fn from_name(name: &str) -> Option<Language> {
        ALL.iter()
            .copied()
            .find(|lang| lang.name().eq_ignore_ascii_case(name))
            .or_else(|| Self::from_extension(name))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks a language from a file name by its extension, case-insensitively.
/// Unknown or missing extensions give [`Language::Plain`].
pub fn detect_language(path: impl AsRef<Path>) -> Language {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
        .unwrap_or(Language::Plain)
}
