// Chunk: docs/chunks/edit_session - Caret model and dirty line reporting

use std::cmp::Ordering;

/// A caret location as (line, column), both 0-based, counted in characters.
///
/// Carets order by line first, then column, which is what selection
/// normalization relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Caret {
    pub line: usize,
    pub col: usize,
}

impl Caret {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl PartialOrd for Caret {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Caret {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line.cmp(&other.line).then(self.col.cmp(&other.col))
    }
}

/// Which lines a mutation touched.
///
/// Edits either stay on one line or change the line count, so a caller
/// caching per-line state (highlighting, layout) either refreshes one line
/// or everything from the first affected line down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyLines {
    /// No lines changed (caret-only movement or a no-op deletion).
    None,
    /// A single line changed.
    Single(usize),
    /// Everything from this line to the end changed, because lines were
    /// split or joined.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// Widens `self` to also cover `other`.
    ///
    /// Two different single lines widen to everything from the upper one,
    /// which keeps the result in one of the three shapes edits produce.
    pub fn merge(&mut self, other: DirtyLines) {
        *self = match (*self, other) {
            (Self::None, other) => other,
            (this, Self::None) => this,
            (Self::Single(a), Self::Single(b)) if a == b => Self::Single(a),
            (
                Self::Single(a) | Self::FromLineToEnd(a),
                Self::Single(b) | Self::FromLineToEnd(b),
            ) => Self::FromLineToEnd(a.min(b)),
        };
    }
}
