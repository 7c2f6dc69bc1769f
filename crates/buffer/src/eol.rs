// Chunk: docs/chunks/eol_normalization - CRLF detection and LF normalization

//! Line-ending detection and normalization.
//!
//! Text inside the editor is always LF-only. Files are normalized once on the
//! way in and re-expanded on the way out according to [`EolMode`].

/// The on-disk line-ending convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EolMode {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl EolMode {
    /// The byte sequence written for each logical newline.
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            EolMode::Lf => b"\n",
            EolMode::CrLf => b"\r\n",
        }
    }

    /// Short label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            EolMode::Lf => "LF",
            EolMode::CrLf => "CRLF",
        }
    }
}

/// Normalizes CRLF and lone CR to LF in a single forward pass.
///
/// Returns the normalized characters and whether at least one CRLF pair was
/// seen. A lone CR becomes LF but does not count as CRLF.
pub fn normalize_chars<I>(input: I) -> (Vec<char>, bool)
where
    I: IntoIterator<Item = char>,
{
    let mut chars = input.into_iter().peekable();
    let (lower, _) = chars.size_hint();
    let mut out = Vec::with_capacity(lower);
    let mut saw_crlf = false;

    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
                saw_crlf = true;
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }

    (out, saw_crlf)
}

/// Normalizes line endings in a string (clipboard text, captured output).
pub fn normalize_str(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    let (chars, _) = normalize_chars(text.chars());
    chars.into_iter().collect()
}
