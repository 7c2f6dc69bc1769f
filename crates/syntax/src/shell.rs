// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

use crate::scanner::{is_ident_char, is_ident_start, is_keyword, LineScanner};
use crate::token::{TokenClass, TokenSpan};

const KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "case", "esac", "for", "while", "until", "do", "done",
    "in", "function", "select", "time", "return", "exit", "export", "local", "readonly",
    "declare", "unset", "echo", "printf", "cd", "source", "set", "shift", "break", "continue",
    "read", "test", "eval", "exec", "trap",
];

pub(crate) fn scan(line: &[char]) -> Vec<TokenSpan> {
    let mut sc = LineScanner::new(line);

    while sc.more() {
        let start = sc.pos();
        let Some(ch) = sc.peek() else { break };

        if ch.is_whitespace() {
            sc.whitespace();
        } else if ch == '#' && sc.prev().map_or(true, char::is_whitespace) {
            // A comment only starts a word; `a#b` and `$#` are not comments.
            sc.eat_to_end();
            sc.emit(start, TokenClass::Comment);
        } else if ch == '$' {
            variable(&mut sc);
            sc.emit(start, TokenClass::Identifier);
        } else if ch == '"' {
            sc.eat_quoted('"');
            sc.emit(start, TokenClass::String);
        } else if ch == '\'' {
            // No escapes inside single quotes.
            sc.bump();
            sc.eat_while(|c| c != '\'');
            sc.bump();
            sc.emit(start, TokenClass::String);
        } else if ch.is_ascii_digit() {
            sc.eat_while(|c| c.is_ascii_alphanumeric() || c == '.');
            sc.emit(start, TokenClass::Number);
        } else if is_ident_start(ch) {
            sc.eat_while(|c| is_ident_char(c) || c == '-');
            let word = &sc.line()[start..sc.pos()];
            let class = if is_keyword(KEYWORDS, word) {
                TokenClass::Keyword
            } else {
                TokenClass::Identifier
            };
            sc.emit(start, class);
        } else {
            sc.single(TokenClass::Punctuation);
        }
    }

    sc.finish()
}

/// `$NAME`, `${...}`, `$1`, or a special parameter such as `$?`.
fn variable(sc: &mut LineScanner<'_>) {
    sc.bump();
    match sc.peek() {
        Some('{') => sc.eat_through("}"),
        Some(c) if is_ident_start(c) => sc.eat_while(is_ident_char),
        Some(c) if c.is_ascii_digit() || "?#@*!$-".contains(c) => sc.bump(),
        _ => {}
    }
}
