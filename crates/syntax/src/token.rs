// Chunk: docs/chunks/syntax_highlighting - Per-line token scanning for highlighting

/// Maximum spans produced for one line. A longer line ends with a single
/// Text span covering the rest.
pub const MAX_SPANS: usize = 256;

/// Highlight class of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Text,
    Keyword,
    Identifier,
    Number,
    String,
    Char,
    Comment,
    Punctuation,
}

impl TokenClass {
    /// Short lowercase label, used by the CLI's token dump.
    pub fn label(self) -> &'static str {
        match self {
            TokenClass::Text => "text",
            TokenClass::Keyword => "keyword",
            TokenClass::Identifier => "ident",
            TokenClass::Number => "number",
            TokenClass::String => "string",
            TokenClass::Char => "char",
            TokenClass::Comment => "comment",
            TokenClass::Punctuation => "punct",
        }
    }
}

/// A classified run of characters within one line.
///
/// `start` and `len` count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub len: usize,
    pub class: TokenClass,
}

impl TokenSpan {
    pub fn new(start: usize, len: usize, class: TokenClass) -> Self {
        Self { start, len, class }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}
