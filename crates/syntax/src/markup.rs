// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

//! HTML and Markdown: document formats where most of the line is Text.

use crate::scanner::LineScanner;
use crate::token::{TokenClass, TokenSpan};

/// Tags (`<...>`) are Punctuation, `<!-- -->` is Comment, everything else
/// is Text.
pub(crate) fn scan_html(line: &[char]) -> Vec<TokenSpan> {
    let mut sc = LineScanner::new(line);

    while sc.more() {
        let start = sc.pos();
        if sc.starts_with("<!--") {
            sc.bump_n(4);
            sc.eat_through("-->");
            sc.emit(start, TokenClass::Comment);
        } else if sc.peek() == Some('<') {
            sc.eat_through(">");
            sc.emit(start, TokenClass::Punctuation);
        } else {
            sc.bump();
            sc.eat_while(|c| c != '<');
            sc.emit(start, TokenClass::Text);
        }
    }

    sc.finish()
}

/// Headers, quotes and list items are Keyword for the whole line; a code
/// fence marker is Comment; anything else is one Text span.
pub(crate) fn scan_markdown(line: &[char]) -> Vec<TokenSpan> {
    if line.is_empty() {
        return Vec::new();
    }
    let trimmed: Vec<char> = line.iter().copied().skip_while(|c| *c == ' ').collect();
    let class = match trimmed.as_slice() {
        ['`', '`', '`', ..] | ['~', '~', '~', ..] => TokenClass::Comment,
        ['#', ..] | ['>', ..] => TokenClass::Keyword,
        ['-' | '*' | '+', ' ', ..] => TokenClass::Keyword,
        ['-' | '*' | '+'] => TokenClass::Keyword,
        _ => TokenClass::Text,
    };
    vec![TokenSpan::new(0, line.len(), class)]
}
