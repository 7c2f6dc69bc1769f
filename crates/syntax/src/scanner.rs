// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

//! Shared cursor used by every language scanner.
//!
//! A scanner walks one line left to right, consuming at least one character
//! per step and emitting a span for what it consumed. [`LineScanner::finish`]
//! guarantees coverage: whatever was not consumed (because the span cap was
//! reached) becomes one trailing Text span.

use crate::token::{TokenClass, TokenSpan, MAX_SPANS};

pub(crate) struct LineScanner<'a> {
    chars: &'a [char],
    pos: usize,
    spans: Vec<TokenSpan>,
}

impl<'a> LineScanner<'a> {
    pub(crate) fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            pos: 0,
            spans: Vec::new(),
        }
    }

    /// True while there is input left and room for more than the final span.
    pub(crate) fn more(&self) -> bool {
        self.pos < self.chars.len() && self.spans.len() < MAX_SPANS - 1
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn line(&self) -> &'a [char] {
        self.chars
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Character just before the cursor.
    pub(crate) fn prev(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    pub(crate) fn starts_with(&self, pat: &str) -> bool {
        let mut i = self.pos;
        for ch in pat.chars() {
            if self.chars.get(i) != Some(&ch) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// True if only whitespace precedes the cursor on this line.
    pub(crate) fn at_line_start(&self) -> bool {
        self.chars[..self.pos].iter().all(|c| c.is_whitespace())
    }

    pub(crate) fn bump(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn bump_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += 1;
        }
    }

    pub(crate) fn eat_to_end(&mut self) {
        self.pos = self.chars.len();
    }

    /// Consumes through the closing `quote`, honoring backslash escapes.
    ///
    /// The cursor must be on the opening quote. An escape at the end of the
    /// line consumes only the backslash. An unclosed literal runs to the end
    /// of the line.
    pub(crate) fn eat_quoted(&mut self, quote: char) {
        self.bump();
        while let Some(ch) = self.peek() {
            self.pos += 1;
            if ch == '\\' {
                self.bump();
            } else if ch == quote {
                return;
            }
        }
    }

    /// Consumes through the next occurrence of `close`, or to the end of the
    /// line if it does not occur.
    pub(crate) fn eat_through(&mut self, close: &str) {
        while self.pos < self.chars.len() {
            if self.starts_with(close) {
                self.bump_n(close.chars().count());
                return;
            }
            self.pos += 1;
        }
    }

    /// Emits `[start, pos)` with `class`. Empty ranges are dropped and a
    /// Text span touching a previous Text span is merged into it.
    pub(crate) fn emit(&mut self, start: usize, class: TokenClass) {
        if start >= self.pos {
            return;
        }
        if class == TokenClass::Text {
            if let Some(last) = self.spans.last_mut() {
                if last.class == TokenClass::Text && last.end() == start {
                    last.len = self.pos - last.start;
                    return;
                }
            }
        }
        self.spans.push(TokenSpan::new(start, self.pos - start, class));
    }

    /// Consumes a whitespace run as Text. Returns false if not on whitespace.
    pub(crate) fn whitespace(&mut self) -> bool {
        let start = self.pos;
        self.eat_while(char::is_whitespace);
        self.emit(start, TokenClass::Text);
        self.pos > start
    }

    /// Consumes one character as a single span of `class`.
    pub(crate) fn single(&mut self, class: TokenClass) {
        let start = self.pos;
        self.bump();
        self.emit(start, class);
    }

    /// Closes the scan, covering any unconsumed remainder with Text.
    pub(crate) fn finish(mut self) -> Vec<TokenSpan> {
        let start = self.pos;
        self.pos = self.chars.len();
        self.emit(start, TokenClass::Text);
        self.spans
    }
}

pub(crate) fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

pub(crate) fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Exact keyword membership for an identifier slice.
pub(crate) fn is_keyword(words: &[&str], ident: &[char]) -> bool {
    words
        .iter()
        .any(|w| w.len() >= ident.len() && w.chars().eq(ident.iter().copied()))
}

/// ASCII case-insensitive keyword membership.
pub(crate) fn is_keyword_ignore_case(words: &[&str], ident: &[char]) -> bool {
    words.iter().any(|w| {
        w.len() >= ident.len()
            && w.chars()
                .map(|c| c.to_ascii_lowercase())
                .eq(ident.iter().map(|c| c.to_ascii_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_eat_quoted_with_escape() {
        let line = chars(r#""a\"b" rest"#);
        let mut sc = LineScanner::new(&line);
        sc.eat_quoted('"');
        assert_eq!(sc.pos(), 6);
    }

    #[test]
    fn test_eat_quoted_escape_at_end_is_clamped() {
        let line = chars(r#""abc\"#);
        let mut sc = LineScanner::new(&line);
        sc.eat_quoted('"');
        assert_eq!(sc.pos(), line.len());
    }

    #[test]
    fn test_eat_through_unclosed() {
        let line = chars("/* open");
        let mut sc = LineScanner::new(&line);
        sc.bump_n(2);
        sc.eat_through("*/");
        assert_eq!(sc.pos(), line.len());
    }

    #[test]
    fn test_adjacent_text_spans_merge() {
        let line = chars("ab");
        let mut sc = LineScanner::new(&line);
        sc.single(TokenClass::Text);
        sc.single(TokenClass::Text);
        assert_eq!(sc.finish(), vec![TokenSpan::new(0, 2, TokenClass::Text)]);
    }

    #[test]
    fn test_finish_covers_remainder() {
        let line = chars("a rest");
        let mut sc = LineScanner::new(&line);
        sc.single(TokenClass::Identifier);
        assert_eq!(
            sc.finish(),
            vec![
                TokenSpan::new(0, 1, TokenClass::Identifier),
                TokenSpan::new(1, 5, TokenClass::Text),
            ]
        );
    }

    #[test]
    fn test_keyword_matching() {
        let words = ["int", "if"];
        assert!(is_keyword(&words, &chars("int")));
        assert!(!is_keyword(&words, &chars("in")));
        assert!(!is_keyword(&words, &chars("integer")));
        assert!(is_keyword_ignore_case(&["mov"], &chars("MOV")));
    }
}
