// Chunk: docs/chunks/edit_session - Caret, selection and editing over a gap buffer
// Chunk: docs/chunks/text_selection_model - Selection anchor and range API

//! TextEditSession is the editing API on top of a [`GapBuffer`].
//!
//! It tracks the caret as (line, column) and an optional selection anchor.
//! The absolute offset is always derived on demand, never stored. Every edit
//! marks the line-count cache stale.
//!
//! Mutations that may allocate return `Result<DirtyLines, BufferError>`;
//! deletions cannot fail and return [`DirtyLines`] directly. Out-of-range
//! carets are clamped and impossible edits are no-ops.

use crate::coords;
use crate::eol::normalize_str;
use crate::error::BufferError;
use crate::gap_buffer::{GapBuffer, DEFAULT_CAPACITY};
use crate::line_index::LineCountCache;
use crate::types::{Caret, DirtyLines};

/// Spaces inserted by [`TextEditSession::insert_tab`] unless configured.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Construction-time knobs for a session, fed from user settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub tab_width: usize,
    pub initial_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// A gap buffer plus caret, selection and line-count cache.
#[derive(Debug, Clone)]
pub struct TextEditSession {
    buffer: GapBuffer,
    lines: LineCountCache,
    caret: Caret,
    /// Selection anchor. When `Some` and different from the caret, the
    /// selection spans between the two in either direction.
    anchor: Option<Caret>,
    tab_width: usize,
}

impl TextEditSession {
    /// Creates an empty session with default options.
    pub fn new() -> Self {
        Self::from_buffer(GapBuffer::new())
    }

    /// Creates an empty session with the given options.
    pub fn with_options(options: SessionOptions) -> Result<Self, BufferError> {
        let mut session = Self::from_buffer(GapBuffer::with_capacity(options.initial_capacity)?);
        session.tab_width = options.tab_width;
        Ok(session)
    }

    /// Creates a session over `text` with the caret at (0, 0).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::from_buffer(GapBuffer::from_str(text))
    }

    /// Wraps an existing buffer, for example one produced by [`GapBuffer::load`].
    pub fn from_buffer(buffer: GapBuffer) -> Self {
        Self {
            buffer,
            lines: LineCountCache::new(),
            caret: Caret::default(),
            anchor: None,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Swaps in new content, resetting caret and selection. Used on reload.
    pub fn replace_buffer(&mut self, buffer: GapBuffer) {
        self.buffer = buffer;
        self.lines.invalidate();
        self.caret = Caret::default();
        self.anchor = None;
    }

    // ==================== Accessors ====================

    pub fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    /// Mutable access for changes that bypass the caret, such as EOL mode or
    /// the dirty flag. The line cache is invalidated.
    pub(crate) fn buffer_mut(&mut self) -> &mut GapBuffer {
        self.lines.invalidate();
        &mut self.buffer
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn anchor(&self) -> Option<Caret> {
        self.anchor
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub fn set_tab_width(&mut self, width: usize) {
        self.tab_width = width;
    }

    /// Absolute offset of the caret.
    pub fn caret_index(&self) -> usize {
        self.index_of(self.caret)
    }

    /// Full buffer content.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Total line count, recounting if an edit made the cache stale.
    pub fn total_lines(&mut self) -> usize {
        match self.lines.total() {
            Some(total) => total,
            None => self.lines.recount(&self.buffer),
        }
    }

    /// Length of `line` in characters. Zero past the last line.
    pub fn line_length(&mut self, line: usize) -> usize {
        self.fresh_lines();
        self.lines.line_len(line, self.buffer.len()).unwrap_or(0)
    }

    /// Text of `line` without its newline. Empty past the last line.
    pub fn line_text(&self, line: usize) -> String {
        match (self.lines.line_start(line), self.lines.line_len(line, self.buffer.len())) {
            (Some(start), Some(len)) => self.buffer.slice(start, start + len),
            _ => coords::line_text(&self.buffer, line),
        }
    }

    pub fn line_cache(&self) -> &LineCountCache {
        &self.lines
    }

    fn fresh_lines(&mut self) {
        if self.lines.is_stale() {
            self.lines.recount(&self.buffer);
        }
    }

    /// Resolves a caret to an offset, using cached line starts when fresh.
    fn index_of(&self, caret: Caret) -> usize {
        match (
            self.lines.line_start(caret.line),
            self.lines.line_len(caret.line, self.buffer.len()),
        ) {
            (Some(start), Some(len)) => start + caret.col.min(len),
            _ => coords::linecol_to_index(&self.buffer, caret.line, caret.col),
        }
    }

    fn clamp(&mut self, caret: Caret) -> Caret {
        let last = self.total_lines() - 1;
        let line = caret.line.min(last);
        let col = caret.col.min(self.line_length(line));
        Caret::new(line, col)
    }

    fn end_caret(&mut self) -> Caret {
        let last = self.total_lines() - 1;
        Caret::new(last, self.line_length(last))
    }

    // ==================== Selection ====================

    /// Sets the selection anchor, clamped to valid bounds.
    pub fn set_anchor(&mut self, caret: Caret) {
        self.anchor = Some(self.clamp(caret));
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// True if an anchor is set and differs from the caret.
    pub fn has_selection(&self) -> bool {
        self.anchor.is_some_and(|anchor| anchor != self.caret)
    }

    /// Selection endpoints in document order.
    fn selection_carets(&self) -> Option<(Caret, Caret)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    /// Selection as an absolute `[start, end)` interval, `None` when empty.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let (start, end) = self.selection_carets()?;
        Some((self.index_of(start), self.index_of(end)))
    }

    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        Some(self.buffer.slice(start, end))
    }

    /// Anchors at the buffer start and moves the caret to the end.
    pub fn select_all(&mut self) {
        self.anchor = Some(Caret::default());
        self.caret = self.end_caret();
    }

    /// Deletes the selected text and leaves the caret at its start.
    ///
    /// Clears the anchor either way. Returns `DirtyLines::None` if there was
    /// nothing selected.
    pub fn delete_selection(&mut self) -> DirtyLines {
        let Some((start, end)) = self.selection_carets() else {
            self.anchor = None;
            return DirtyLines::None;
        };

        let from = self.index_of(start);
        let to = self.index_of(end);
        self.buffer.delete_range(from, to - from);
        self.lines.invalidate();
        self.caret = start;
        self.anchor = None;

        if start.line == end.line {
            DirtyLines::Single(start.line)
        } else {
            DirtyLines::FromLineToEnd(start.line)
        }
    }

    // ==================== Caret Movement ====================
    // Each movement takes a `select` flag: when set, the anchor is dropped at
    // the old caret (if not already set); otherwise the selection is cleared.

    fn begin_move(&mut self, select: bool) {
        if select {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else {
            self.anchor = None;
        }
    }

    /// One character left, wrapping to the end of the previous line.
    pub fn move_left(&mut self, select: bool) {
        self.begin_move(select);
        if self.caret.col > 0 {
            self.caret.col -= 1;
        } else if self.caret.line > 0 {
            self.caret.line -= 1;
            self.caret.col = self.line_length(self.caret.line);
        }
    }

    /// One character right, wrapping to the start of the next line.
    pub fn move_right(&mut self, select: bool) {
        self.begin_move(select);
        let len = self.line_length(self.caret.line);
        if self.caret.col < len {
            self.caret.col += 1;
        } else if self.caret.line + 1 < self.total_lines() {
            self.caret.line += 1;
            self.caret.col = 0;
        }
    }

    /// One line up; the column is clamped to the target line.
    pub fn move_up(&mut self, select: bool) {
        self.begin_move(select);
        if self.caret.line > 0 {
            self.caret.line -= 1;
            let len = self.line_length(self.caret.line);
            self.caret.col = self.caret.col.min(len);
        }
    }

    /// One line down; the column is clamped to the target line.
    pub fn move_down(&mut self, select: bool) {
        self.begin_move(select);
        if self.caret.line + 1 < self.total_lines() {
            self.caret.line += 1;
            let len = self.line_length(self.caret.line);
            self.caret.col = self.caret.col.min(len);
        }
    }

    pub fn move_to_line_start(&mut self, select: bool) {
        self.begin_move(select);
        self.caret.col = 0;
    }

    pub fn move_to_line_end(&mut self, select: bool) {
        self.begin_move(select);
        self.caret.col = self.line_length(self.caret.line);
    }

    pub fn move_to_buffer_start(&mut self, select: bool) {
        self.begin_move(select);
        self.caret = Caret::default();
    }

    pub fn move_to_buffer_end(&mut self, select: bool) {
        self.begin_move(select);
        self.caret = self.end_caret();
    }

    /// Places the caret, clamped to valid bounds, and clears the selection.
    pub fn set_caret(&mut self, caret: Caret) {
        self.anchor = None;
        self.caret = self.clamp(caret);
    }

    /// Moves the caret to the caret position closest to `idx`.
    ///
    /// Resolved by binary search over the cached line starts, recounting
    /// first if an edit made them stale.
    pub fn set_caret_index(&mut self, idx: usize) {
        self.anchor = None;
        self.fresh_lines();
        let idx = idx.min(self.buffer.len());
        self.caret = match self.lines.line_at_offset(idx) {
            Some(line) => Caret::new(line, idx - self.lines.line_start(line).unwrap_or(0)),
            None => coords::index_to_linecol(&self.buffer, idx),
        };
    }

    /// Jumps to the start of a 1-based line number, clamped to the buffer.
    pub fn goto_line(&mut self, line_number: usize) {
        self.set_caret(Caret::new(line_number.saturating_sub(1), 0));
    }

    // ==================== Mutations ====================

    /// Inserts `text` at the caret, replacing any active selection.
    ///
    /// The caret ends up after the inserted text: a newline resets the
    /// column, so it lands on the last inserted line at the length of the
    /// trailing segment. Capacity is reserved before the selection is
    /// removed, so an allocation failure leaves the session untouched.
    pub fn insert_at_caret(&mut self, text: &str) -> Result<DirtyLines, BufferError> {
        if text.is_empty() {
            return Ok(self.delete_selection());
        }

        let count = text.chars().count();
        self.buffer.ensure_capacity(count)?;

        let mut dirty = self.delete_selection();
        let start = self.caret;
        let idx = self.index_of(start);
        self.buffer.move_gap(idx);
        self.buffer.insert(text)?;
        self.lines.invalidate();

        let newlines = text.chars().filter(|&ch| ch == '\n').count();
        if newlines == 0 {
            self.caret.col += count;
            dirty.merge(DirtyLines::Single(start.line));
        } else {
            let tail = text.chars().rev().take_while(|&ch| ch != '\n').count();
            self.caret = Caret::new(start.line + newlines, tail);
            dirty.merge(DirtyLines::FromLineToEnd(start.line));
        }
        Ok(dirty)
    }

    /// Inserts a newline followed by the current line's leading indentation.
    ///
    /// The indentation is the run of spaces and tabs at the start of the
    /// line, cut off at the caret column.
    pub fn insert_newline_with_indent(&mut self) -> Result<DirtyLines, BufferError> {
        let at = self.selection_carets().map_or(self.caret, |(start, _)| start);
        let indent: String = self
            .line_text(at.line)
            .chars()
            .take(at.col)
            .take_while(|&ch| ch == ' ' || ch == '\t')
            .collect();

        let mut text = String::with_capacity(indent.len() + 1);
        text.push('\n');
        text.push_str(&indent);
        self.insert_at_caret(&text)
    }

    /// Inserts `tab_width` spaces.
    pub fn insert_tab(&mut self) -> Result<DirtyLines, BufferError> {
        let spaces = " ".repeat(self.tab_width);
        self.insert_at_caret(&spaces)
    }

    /// Inserts clipboard text, normalizing CRLF and lone CR to LF first.
    pub fn paste(&mut self, text: &str) -> Result<DirtyLines, BufferError> {
        let normalized = normalize_str(text);
        self.insert_at_caret(&normalized)
    }

    /// Deletes the selection, or the character before the caret.
    ///
    /// At (0, 0) with no selection this is a no-op. At the start of a line
    /// it joins with the previous line.
    pub fn backspace(&mut self) -> DirtyLines {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;

        let idx = self.caret_index();
        if idx == 0 {
            return DirtyLines::None;
        }

        if self.caret.col > 0 {
            self.buffer.delete_range(idx - 1, 1);
            self.lines.invalidate();
            self.caret.col -= 1;
            DirtyLines::Single(self.caret.line)
        } else {
            let prev_line = self.caret.line - 1;
            let prev_len = self.line_length(prev_line);
            self.buffer.delete_range(idx - 1, 1);
            self.lines.invalidate();
            self.caret = Caret::new(prev_line, prev_len);
            DirtyLines::FromLineToEnd(prev_line)
        }
    }

    /// Deletes the selection, or the character after the caret.
    ///
    /// At the end of the buffer with no selection this is a no-op. The caret
    /// does not move.
    pub fn delete_forward(&mut self) -> DirtyLines {
        if self.has_selection() {
            return self.delete_selection();
        }
        self.anchor = None;

        let idx = self.caret_index();
        let Some(ch) = self.buffer.char_at(idx) else {
            return DirtyLines::None;
        };

        self.buffer.delete_range(idx, 1);
        self.lines.invalidate();
        if ch == '\n' {
            DirtyLines::FromLineToEnd(self.caret.line)
        } else {
            DirtyLines::Single(self.caret.line)
        }
    }
}

impl Default for TextEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_at(text: &str, line: usize, col: usize) -> TextEditSession {
        let mut s = TextEditSession::from_str(text);
        s.set_caret(Caret::new(line, col));
        s
    }

    // ==================== Insert Tests ====================

    #[test]
    fn test_insert_into_empty() {
        let mut s = TextEditSession::new();
        let dirty = s.insert_at_caret("hello").unwrap();
        assert_eq!(dirty, DirtyLines::Single(0));
        assert_eq!(s.text(), "hello");
        assert_eq!(s.caret(), Caret::new(0, 5));
        assert!(s.is_dirty());
    }

    #[test]
    fn test_insert_multiline_rederives_caret() {
        let mut s = session_at("ab", 0, 1);
        let dirty = s.insert_at_caret("X\nYZ\nW").unwrap();
        assert_eq!(dirty, DirtyLines::FromLineToEnd(0));
        assert_eq!(s.text(), "aX\nYZ\nWb");
        assert_eq!(s.caret(), Caret::new(2, 1));
        assert_eq!(s.total_lines(), 3);
    }

    #[test]
    fn test_insert_ending_in_newline() {
        let mut s = session_at("ab", 0, 2);
        s.insert_at_caret("\n").unwrap();
        assert_eq!(s.caret(), Caret::new(1, 0));
    }

    #[test]
    fn test_insert_invalidates_line_cache() {
        let mut s = TextEditSession::from_str("a");
        assert_eq!(s.total_lines(), 1);
        assert!(!s.line_cache().is_stale());
        s.insert_at_caret("\n").unwrap();
        assert!(s.line_cache().is_stale());
        assert_eq!(s.total_lines(), 2);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut s = session_at("hello world", 0, 6);
        s.move_to_line_end(true);
        assert_eq!(s.selected_text().as_deref(), Some("world"));
        s.insert_at_caret("rust").unwrap();
        assert_eq!(s.text(), "hello rust");
        assert!(!s.has_selection());
        assert_eq!(s.caret(), Caret::new(0, 10));
    }

    // ==================== Newline / Tab / Paste Tests ====================

    #[test]
    fn test_newline_copies_indent() {
        let mut s = session_at("    let x = 1;", 0, 14);
        s.insert_newline_with_indent().unwrap();
        assert_eq!(s.text(), "    let x = 1;\n    ");
        assert_eq!(s.caret(), Caret::new(1, 4));
    }

    #[test]
    fn test_newline_copies_mixed_tabs_and_spaces() {
        let mut s = session_at("\t  x", 0, 4);
        s.insert_newline_with_indent().unwrap();
        assert_eq!(s.text(), "\t  x\n\t  ");
    }

    #[test]
    fn test_newline_indent_cut_at_caret() {
        let mut s = session_at("    x", 0, 2);
        s.insert_newline_with_indent().unwrap();
        assert_eq!(s.text(), "  \n    x");
        assert_eq!(s.caret(), Caret::new(1, 2));
    }

    #[test]
    fn test_insert_tab_uses_tab_width() {
        let mut s = TextEditSession::new();
        s.insert_tab().unwrap();
        assert_eq!(s.text(), "    ");
        s.set_tab_width(2);
        s.insert_tab().unwrap();
        assert_eq!(s.text(), "      ");
        assert_eq!(s.caret(), Caret::new(0, 6));
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut s = TextEditSession::new();
        s.paste("a\r\nb\rc").unwrap();
        assert_eq!(s.text(), "a\nb\nc");
        assert_eq!(s.caret(), Caret::new(2, 1));
    }

    #[test]
    fn test_with_options() {
        let s = TextEditSession::with_options(SessionOptions {
            tab_width: 8,
            initial_capacity: 16,
        })
        .unwrap();
        assert_eq!(s.tab_width(), 8);
        assert_eq!(s.buffer().capacity(), 16);
    }

    // ==================== Backspace Tests ====================

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut s = TextEditSession::from_str("abc");
        assert_eq!(s.backspace(), DirtyLines::None);
        assert_eq!(s.text(), "abc");
        assert_eq!(s.caret(), Caret::new(0, 0));
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_backspace_within_line() {
        let mut s = session_at("abc", 0, 2);
        assert_eq!(s.backspace(), DirtyLines::Single(0));
        assert_eq!(s.text(), "ac");
        assert_eq!(s.caret(), Caret::new(0, 1));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut s = session_at("ab\ncd", 1, 0);
        assert_eq!(s.backspace(), DirtyLines::FromLineToEnd(0));
        assert_eq!(s.text(), "abcd");
        assert_eq!(s.caret(), Caret::new(0, 2));
    }

    #[test]
    fn test_backspace_deletes_selection() {
        let mut s = session_at("ab\ncd\nef", 0, 1);
        s.set_anchor(Caret::new(2, 1));
        assert_eq!(s.backspace(), DirtyLines::FromLineToEnd(0));
        assert_eq!(s.text(), "af");
        assert_eq!(s.caret(), Caret::new(0, 1));
    }

    // ==================== Delete Forward Tests ====================

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut s = session_at("abc", 0, 3);
        assert_eq!(s.delete_forward(), DirtyLines::None);
        assert_eq!(s.text(), "abc");
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut s = session_at("ab\ncd", 0, 2);
        assert_eq!(s.delete_forward(), DirtyLines::FromLineToEnd(0));
        assert_eq!(s.text(), "abcd");
        assert_eq!(s.caret(), Caret::new(0, 2));
    }

    #[test]
    fn test_delete_forward_within_line() {
        let mut s = session_at("abc", 0, 0);
        assert_eq!(s.delete_forward(), DirtyLines::Single(0));
        assert_eq!(s.text(), "bc");
    }

    // ==================== Selection Tests ====================

    #[test]
    fn test_selection_range_either_direction() {
        let mut s = session_at("hello\nworld", 1, 2);
        s.set_anchor(Caret::new(0, 3));
        assert_eq!(s.selection_range(), Some((3, 8)));
        assert_eq!(s.selected_text().as_deref(), Some("lo\nwo"));

        s.set_caret(Caret::new(0, 1));
        s.set_anchor(Caret::new(1, 2));
        assert_eq!(s.selection_range(), Some((1, 8)));
    }

    #[test]
    fn test_anchor_equal_to_caret_is_empty() {
        let mut s = session_at("abc", 0, 1);
        s.set_anchor(Caret::new(0, 1));
        assert!(!s.has_selection());
        assert_eq!(s.selection_range(), None);
        assert_eq!(s.delete_selection(), DirtyLines::None);
        assert_eq!(s.anchor(), None);
    }

    #[test]
    fn test_set_anchor_clamps() {
        let mut s = TextEditSession::from_str("ab\nc");
        s.set_anchor(Caret::new(9, 9));
        assert_eq!(s.anchor(), Some(Caret::new(1, 1)));
    }

    #[test]
    fn test_select_all() {
        let mut s = TextEditSession::from_str("ab\ncd");
        s.select_all();
        assert_eq!(s.selection_range(), Some((0, 5)));
        assert_eq!(s.caret(), Caret::new(1, 2));
    }

    #[test]
    fn test_delete_single_line_selection() {
        let mut s = session_at("hello world", 0, 0);
        s.set_anchor(Caret::new(0, 6));
        assert_eq!(s.delete_selection(), DirtyLines::Single(0));
        assert_eq!(s.text(), "world");
        assert_eq!(s.caret(), Caret::new(0, 0));
    }

    // ==================== Movement Tests ====================

    #[test]
    fn test_move_left_wraps_to_previous_line() {
        let mut s = session_at("ab\ncd", 1, 0);
        s.move_left(false);
        assert_eq!(s.caret(), Caret::new(0, 2));
        s.move_to_buffer_start(false);
        s.move_left(false);
        assert_eq!(s.caret(), Caret::new(0, 0));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let mut s = session_at("ab\ncd", 0, 2);
        s.move_right(false);
        assert_eq!(s.caret(), Caret::new(1, 0));
        s.move_to_buffer_end(false);
        s.move_right(false);
        assert_eq!(s.caret(), Caret::new(1, 2));
    }

    #[test]
    fn test_move_up_down_clamp_column() {
        let mut s = session_at("long line\nab\nlonger line", 0, 8);
        s.move_down(false);
        assert_eq!(s.caret(), Caret::new(1, 2));
        s.move_down(false);
        assert_eq!(s.caret(), Caret::new(2, 2));
        s.move_down(false);
        assert_eq!(s.caret(), Caret::new(2, 2));
        s.move_up(false);
        s.move_up(false);
        s.move_up(false);
        assert_eq!(s.caret(), Caret::new(0, 2));
    }

    #[test]
    fn test_move_with_select_extends_from_fixed_anchor() {
        let mut s = session_at("abcdef", 0, 1);
        s.move_right(true);
        s.move_right(true);
        assert_eq!(s.anchor(), Some(Caret::new(0, 1)));
        assert_eq!(s.selected_text().as_deref(), Some("bc"));
        s.move_right(false);
        assert!(!s.has_selection());
    }

    #[test]
    fn test_line_start_end() {
        let mut s = session_at("ab\ncdef", 1, 2);
        s.move_to_line_end(false);
        assert_eq!(s.caret(), Caret::new(1, 4));
        s.move_to_line_start(false);
        assert_eq!(s.caret(), Caret::new(1, 0));
    }

    #[test]
    fn test_set_caret_clamps() {
        let mut s = TextEditSession::from_str("ab\ncd");
        s.set_caret(Caret::new(5, 9));
        assert_eq!(s.caret(), Caret::new(1, 2));
        s.set_caret(Caret::new(0, 9));
        assert_eq!(s.caret(), Caret::new(0, 2));
    }

    #[test]
    fn test_set_caret_index() {
        let mut s = TextEditSession::from_str("ab\ncd");
        s.set_caret_index(4);
        assert_eq!(s.caret(), Caret::new(1, 1));
        assert_eq!(s.caret_index(), 4);
        s.set_caret_index(99);
        assert_eq!(s.caret(), Caret::new(1, 2));
    }

    #[test]
    fn test_set_caret_index_agrees_with_coords_after_edits() {
        let mut s = TextEditSession::from_str("one\n\ntwo");
        s.set_caret(Caret::new(1, 0));
        s.insert_at_caret("x\ny\n").unwrap();
        assert!(s.line_cache().is_stale());

        let text_len = s.buffer().len();
        for idx in 0..=text_len {
            s.set_caret_index(idx);
            assert_eq!(s.caret(), coords::index_to_linecol(s.buffer(), idx), "idx {idx}");
            assert_eq!(s.caret_index(), idx);
        }
        assert!(!s.line_cache().is_stale());
    }

    #[test]
    fn test_goto_line_is_one_based() {
        let mut s = TextEditSession::from_str("a\nb\nc");
        s.goto_line(2);
        assert_eq!(s.caret(), Caret::new(1, 0));
        s.goto_line(0);
        assert_eq!(s.caret(), Caret::new(0, 0));
        s.goto_line(99);
        assert_eq!(s.caret(), Caret::new(2, 0));
    }

    #[test]
    fn test_line_text_with_fresh_and_stale_cache() {
        let mut s = TextEditSession::from_str("one\ntwo");
        assert_eq!(s.line_text(1), "two");
        s.total_lines();
        assert_eq!(s.line_text(1), "two");
        assert_eq!(s.line_text(2), "");
    }

    #[test]
    fn test_replace_buffer_resets_caret() {
        let mut s = session_at("abc", 0, 2);
        s.set_anchor(Caret::new(0, 0));
        s.replace_buffer(GapBuffer::from_str("x\ny"));
        assert_eq!(s.caret(), Caret::new(0, 0));
        assert_eq!(s.anchor(), None);
        assert_eq!(s.total_lines(), 2);
    }
}
