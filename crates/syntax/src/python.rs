// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

use crate::scanner::{is_ident_char, is_ident_start, is_keyword, LineScanner};
use crate::token::{TokenClass, TokenSpan};

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "match", "case", "self", "print", "len", "range",
];

pub(crate) fn scan(line: &[char]) -> Vec<TokenSpan> {
    let mut sc = LineScanner::new(line);

    while sc.more() {
        let start = sc.pos();
        let Some(ch) = sc.peek() else { break };

        if ch.is_whitespace() {
            sc.whitespace();
        } else if ch == '#' {
            sc.eat_to_end();
            sc.emit(start, TokenClass::Comment);
        } else if sc.starts_with("\"\"\"") || sc.starts_with("'''") {
            // Triple-quoted strings only close on the same line; there is no
            // cross-line state.
            let quote: String = std::iter::repeat(ch).take(3).collect();
            sc.bump_n(3);
            sc.eat_through(&quote);
            sc.emit(start, TokenClass::String);
        } else if ch == '"' || ch == '\'' {
            sc.eat_quoted(ch);
            sc.emit(start, TokenClass::String);
        } else if ch.is_ascii_digit() || (ch == '.' && sc.peek_at(1).is_some_and(|c| c.is_ascii_digit())) {
            sc.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
            sc.emit(start, TokenClass::Number);
        } else if is_ident_start(ch) {
            sc.eat_while(is_ident_char);
            let ident = &sc.line()[start..sc.pos()];
            let class = if is_keyword(KEYWORDS, ident) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenClass::{Comment, Identifier, Keyword, Number, Punctuation, Text};
    use pretty_assertions::assert_eq;

    fn classes(line: &str) -> Vec<(String, TokenClass)> {
        let chars: Vec<char> = line.chars().collect();
        scan(&chars)
            .into_iter()
            .map(|s| (chars[s.start..s.end()].iter().collect(), s.class))
            .collect()
    }

    #[test]
    fn test_def_line() {
        assert_eq!(
            classes("def f(x=1.5):  # doc"),
            vec![
                ("def".to_string(), Keyword),
                (" ".to_string(), Text),
                ("f".to_string(), Identifier),
                ("(".to_string(), Punctuation),
                ("x".to_string(), Identifier),
                ("=".to_string(), Punctuation),
                ("1.5".to_string(), Number),
                (")".to_string(), Punctuation),
                (":".to_string(), Punctuation),
                ("  ".to_string(), Text),
                ("# doc".to_string(), Comment),
            ]
        );
    }

    #[test]
    fn test_triple_quotes_on_one_line() {
        assert_eq!(
            classes(r#"s = """a "b" c""" + 'd'"#),
            vec![
                ("s".to_string(), Identifier),
                (" ".to_string(), Text),
                ("=".to_string(), Punctuation),
                (" ".to_string(), Text),
                (r#""""a "b" c""""#.to_string(), TokenClass::String),
                (" ".to_string(), Text),
                ("+".to_string(), Punctuation),
                (" ".to_string(), Text),
                ("'d'".to_string(), TokenClass::String),
            ]
        );
    }

    #[test]
    fn test_unclosed_docstring_runs_to_end() {
        assert_eq!(
            classes("'''start of docs"),
            vec![("'''start of docs".to_string(), TokenClass::String)]
        );
    }

    #[test]
    fn test_hash_inside_string_is_not_comment() {
        let spans = classes("x = '#not'");
        assert_eq!(spans.last().unwrap(), &("'#not'".to_string(), TokenClass::String));
    }
}
