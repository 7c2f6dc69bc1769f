// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

//! gapline-syntax: language detection and per-line token scanning.
//!
//! Highlighting is line-local. Each call classifies one line with no state
//! carried from previous lines, so a caller can rescan exactly the lines an
//! edit reports as dirty.
//!
//! # Overview
//!
//! - [`Language`] is a closed set of supported languages, detected from a
//!   file extension with [`detect_language`].
//! - [`scan_line`] splits a line into [`TokenSpan`]s. The spans are ordered,
//!   non-overlapping and cover the line exactly; at most [`MAX_SPANS`] are
//!   produced and anything past the cap is one trailing Text span.
//!
//! # Example
//!
//! ```
//! use gapline_syntax::{detect_language, scan_line, Language, TokenClass};
//!
//! let lang = detect_language("main.c");
//! assert_eq!(lang, Language::C);
//!
//! let spans = scan_line(lang, "int x; // c");
//! assert_eq!(spans[0].class, TokenClass::Keyword);
//! assert_eq!(spans.last().map(|s| s.class), Some(TokenClass::Comment));
//! ```

mod asm;
mod c_family;
mod data;
mod language;
mod markup;
mod python;
mod scanner;
mod shell;
mod token;

pub use language::{detect_language, Language};
pub use token::{TokenClass, TokenSpan, MAX_SPANS};

/// Classifies one line of `lang` source.
///
/// `line` should not contain its line terminator. Offsets in the returned
/// spans are char indices into `line`.
pub fn scan_line(lang: Language, line: &str) -> Vec<TokenSpan> {
    let chars: Vec<char> = line.chars().collect();
    scan_chars(lang, &chars)
}

/// Same as [`scan_line`] for a line already split into chars, which is what
/// the buffer hands out.
pub fn scan_chars(lang: Language, line: &[char]) -> Vec<TokenSpan> {
    match lang {
        Language::Plain => plain(line),
        Language::C => c_family::scan(&c_family::C, line),
        Language::JavaScript => c_family::scan(&c_family::JAVASCRIPT, line),
        Language::Go => c_family::scan(&c_family::GO, line),
        Language::Rust => c_family::scan(&c_family::RUST, line),
        Language::Lua => c_family::scan(&c_family::LUA, line),
        Language::Python => python::scan(line),
        Language::Shell => shell::scan(line),
        Language::Assembly => asm::scan(line),
        Language::Html => markup::scan_html(line),
        Language::Markdown => markup::scan_markdown(line),
        Language::Css => data::scan_css(line),
        Language::Json => data::scan_json(line),
        Language::Csv => data::scan_csv(line),
    }
}

fn plain(line: &[char]) -> Vec<TokenSpan> {
    if line.is_empty() {
        Vec::new()
    } else {
        vec![TokenSpan::new(0, line.len(), TokenClass::Text)]
    }
}
