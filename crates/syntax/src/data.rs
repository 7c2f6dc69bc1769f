// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

//! CSS, JSON and CSV: formats with few token kinds.

use crate::scanner::{is_ident_char, LineScanner};
use crate::token::{TokenClass, TokenSpan};

/// Comments, strings and numbers (with units or `%`); everything else is
/// Text.
pub(crate) fn scan_css(line: &[char]) -> Vec<TokenSpan> {
    let mut sc = LineScanner::new(line);

    while sc.more() {
        let start = sc.pos();
        let Some(ch) = sc.peek() else { break };

        if sc.starts_with("/*") {
            sc.bump_n(2);
            sc.eat_through("*/");
            sc.emit(start, TokenClass::Comment);
        } else if ch == '"' || ch == '\'' {
            sc.eat_quoted(ch);
            sc.emit(start, TokenClass::String);
        } else if ch.is_ascii_digit() || (ch == '.' && sc.peek_at(1).is_some_and(|c| c.is_ascii_digit())) {
            sc.eat_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '%');
            sc.emit(start, TokenClass::Number);
        } else if is_ident_char(ch) || ch == '-' {
            // Words such as `h1` or `margin-top` stay whole.
            sc.eat_while(|c| is_ident_char(c) || c == '-');
            sc.emit(start, TokenClass::Text);
        } else {
            sc.single(TokenClass::Text);
        }
    }

    sc.finish()
}

/// Strings (keys included), numbers with an optional leading `-`, and the
/// literals `true`, `false`, `null` as Keyword. Structure is Punctuation.
pub(crate) fn scan_json(line: &[char]) -> Vec<TokenSpan> {
    let mut sc = LineScanner::new(line);

    while sc.more() {
        let start = sc.pos();
        let Some(ch) = sc.peek() else { break };

        if ch.is_whitespace() {
            sc.whitespace();
        } else if ch == '"' {
            sc.eat_quoted('"');
            sc.emit(start, TokenClass::String);
        } else if ch.is_ascii_digit() || (ch == '-' && sc.peek_at(1).is_some_and(|c| c.is_ascii_digit())) {
            sc.bump();
            sc.eat_while(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
            sc.emit(start, TokenClass::Number);
        } else if ch.is_ascii_alphabetic() {
            sc.eat_while(|c| c.is_ascii_alphanumeric());
            let word: String = sc.line()[start..sc.pos()].iter().collect();
            let class = if matches!(word.as_str(), "true" | "false" | "null") {
                TokenClass::Keyword
            } else {
                TokenClass::Text
            };
            sc.emit(start, class);
        } else {
            sc.single(TokenClass::Punctuation);
        }
    }

    sc.finish()
}

const CSV_SEPARATORS: &[char] = &[',', ';', '\t', '|'];

/// Quoted fields are String, separators Punctuation, numeric fields Number.
/// Other fields alternate between Text and Identifier so adjacent columns
/// are distinguishable.
pub(crate) fn scan_csv(line: &[char]) -> Vec<TokenSpan> {
    let mut sc = LineScanner::new(line);
    let mut field = 0usize;

    while sc.more() {
        let start = sc.pos();
        let Some(ch) = sc.peek() else { break };

        if CSV_SEPARATORS.contains(&ch) {
            sc.single(TokenClass::Punctuation);
            field += 1;
        } else if ch == '"' {
            // `""` inside a quoted field is an escaped quote.
            sc.bump();
            while let Some(c) = sc.peek() {
                sc.bump();
                if c == '"' {
                    if sc.peek() == Some('"') {
                        sc.bump();
                    } else {
                        break;
                    }
                }
            }
            sc.emit(start, TokenClass::String);
        } else {
            sc.eat_while(|c| !CSV_SEPARATORS.contains(&c) && c != '"');
            let text: String = sc.line()[start..sc.pos()].iter().collect();
            let class = if text.trim().parse::<f64>().is_ok() {
                TokenClass::Number
            } else if field % 2 == 0 {
                TokenClass::Text
            } else {
                TokenClass::Identifier
            };
            sc.emit(start, class);
        }
    }

    sc.finish()
}
