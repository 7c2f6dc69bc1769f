// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/buffer_errors - Explicit allocation and I/O failures

//! Gap buffer implementation for efficient text editing.
//!
//! A gap buffer is a character array with a movable gap at the edit position.
//! Insertions and deletions at the gap are O(1); moving the gap is O(distance)
//! but amortizes well for typical editing patterns (locality of edits).
//!
//! The buffer also carries the document-level `dirty` flag and the
//! [`EolMode`] detected on load, since both live and die with the content.

use std::iter::{Chain, Copied};
use std::slice::Iter;

use crate::eol::{normalize_chars, EolMode};
use crate::error::BufferError;

/// Starting capacity of an empty buffer, in characters.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Extra slack added on top of the requested size when growing.
const GROWTH_SLACK: usize = 64;
const GAP_GROWTH_FACTOR: usize = 2;

/// Iterator over the logical characters of a [`GapBuffer`].
pub type Chars<'a> = Copied<Chain<Iter<'a, char>, Iter<'a, char>>>;

/// A gap buffer for efficient text storage and manipulation.
///
/// Layout: `[pre-gap content | gap | post-gap content]`. The invariant
/// `gap_start <= gap_end <= capacity` holds after every operation,
/// including failed ones.
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// The underlying storage. Its length is the buffer capacity.
    data: Vec<char>,
    /// Index where the gap starts (first unused position).
    gap_start: usize,
    /// Index where the gap ends (first used position after gap).
    gap_end: usize,
    /// Line-ending convention to restore on save.
    eol_mode: EolMode,
    /// Set by every mutation, cleared by [`GapBuffer::mark_clean`].
    dirty: bool,
}

impl GapBuffer {
    /// Creates a new empty gap buffer with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self {
            data: vec!['\0'; DEFAULT_CAPACITY],
            gap_start: 0,
            gap_end: DEFAULT_CAPACITY,
            eol_mode: EolMode::Lf,
            dirty: false,
        }
    }

    /// Creates an empty gap buffer with room for `capacity` characters.
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| BufferError::OutOfMemory { requested: capacity })?;
        data.resize(capacity, '\0');
        Ok(Self {
            data,
            gap_start: 0,
            gap_end: capacity,
            eol_mode: EolMode::Lf,
            dirty: false,
        })
    }

    /// Creates a gap buffer initialized with the given text.
    ///
    /// The text is taken verbatim; use [`GapBuffer::load`] for file bytes
    /// that may contain CRLF.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::from_chars(text.chars().collect(), EolMode::Lf, DEFAULT_CAPACITY)
    }

    fn from_chars(mut chars: Vec<char>, eol_mode: EolMode, slack: usize) -> Self {
        let len = chars.len();
        let capacity = len + slack;
        chars.resize(capacity, '\0');

        Self {
            data: chars,
            gap_start: len,
            gap_end: capacity,
            eol_mode,
            dirty: false,
        }
    }

    /// Decodes file bytes into a buffer, normalizing line endings to LF.
    ///
    /// Returns the buffer and the detected line-ending mode: CRLF if at
    /// least one CRLF pair was seen, LF otherwise. Invalid UTF-8 is replaced
    /// with U+FFFD. The whole text becomes pre-gap content and the buffer
    /// starts clean, with a gap of [`DEFAULT_CAPACITY`] after it.
    pub fn load(bytes: &[u8]) -> Result<(Self, EolMode), BufferError> {
        Self::load_with_slack(bytes, DEFAULT_CAPACITY)
    }

    /// Like [`GapBuffer::load`], leaving a gap of `slack` characters after
    /// the loaded text.
    pub fn load_with_slack(bytes: &[u8], slack: usize) -> Result<(Self, EolMode), BufferError> {
        let text = String::from_utf8_lossy(bytes);
        if let std::borrow::Cow::Owned(_) = text {
            tracing::warn!(bytes = bytes.len(), "input is not valid UTF-8; decoded lossily");
        }

        let (mut chars, saw_crlf) = normalize_chars(text.chars());
        let mode = if saw_crlf { EolMode::CrLf } else { EolMode::Lf };

        let len = chars.len();
        chars
            .try_reserve_exact(slack)
            .map_err(|_| BufferError::OutOfMemory {
                requested: len.saturating_add(slack),
            })?;

        tracing::debug!(chars = len, slack, eol = mode.label(), "loaded buffer");
        Ok((Self::from_chars(chars, mode, slack), mode))
    }

    /// Flattens the buffer to UTF-8 bytes, expanding LF to CRLF when asked.
    ///
    /// Content that was loaded and never edited round-trips byte-for-byte
    /// when saved with the detected mode.
    pub fn save(&self, eol_mode: EolMode) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        let mut utf8 = [0u8; 4];
        for ch in self.chars() {
            if ch == '\n' {
                out.extend_from_slice(eol_mode.as_bytes());
            } else {
                out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
            }
        }
        out
    }

    // ==================== Accessors ====================

    /// Returns the logical length of the buffer (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total allocated slots, content plus gap.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Physical index of the first gap slot.
    pub fn gap_start(&self) -> usize {
        self.gap_start
    }

    /// Physical index of the first post-gap slot.
    pub fn gap_end(&self) -> usize {
        self.gap_end
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn eol_mode(&self) -> EolMode {
        self.eol_mode
    }

    pub fn set_eol_mode(&mut self, mode: EolMode) {
        if self.eol_mode != mode {
            self.eol_mode = mode;
            self.dirty = true;
        }
    }

    /// Returns the character at the given logical position, or `None` past
    /// the end.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start {
            pos
        } else {
            pos + self.gap_len()
        };
        Some(self.data[physical])
    }

    /// Returns an iterator over all characters in the buffer.
    pub fn chars(&self) -> Chars<'_> {
        self.data[..self.gap_start]
            .iter()
            .chain(self.data[self.gap_end..].iter())
            .copied()
    }

    /// Returns an iterator over the logical range `[start, end)`, clamped.
    pub fn chars_in(&self, start: usize, end: usize) -> Chars<'_> {
        let len = self.len();
        let end = end.min(len);
        let start = start.min(end);
        let gap = self.gap_len();

        let pre = &self.data[start.min(self.gap_start)..end.min(self.gap_start)];
        let post = &self.data[start.max(self.gap_start) + gap..end.max(self.gap_start) + gap];
        pre.iter().chain(post.iter()).copied()
    }

    /// Returns the content of a range as a String.
    ///
    /// The range is in logical coordinates and is clamped to the buffer.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars_in(start, end).collect()
    }

    // ==================== Mutations ====================

    /// Ensures the gap can hold at least `need` characters.
    ///
    /// Grows to the larger of double the capacity or `capacity + need +
    /// slack`. The pre-gap content and `gap_start` stay put; the post-gap
    /// content moves to the end of the new storage. On allocation failure
    /// the buffer is left exactly as it was.
    pub fn ensure_capacity(&mut self, need: usize) -> Result<(), BufferError> {
        if self.gap_len() >= need {
            return Ok(());
        }

        let old_len = self.data.len();
        let doubled = old_len.saturating_mul(GAP_GROWTH_FACTOR);
        let new_size = old_len
            .checked_add(need)
            .and_then(|n| n.checked_add(GROWTH_SLACK))
            .map(|n| n.max(doubled))
            .ok_or(BufferError::OutOfMemory { requested: usize::MAX })?;

        let growth = new_size - old_len;
        self.data
            .try_reserve_exact(growth)
            .map_err(|_| BufferError::OutOfMemory { requested: new_size })?;

        tracing::debug!(from = old_len, to = new_size, "growing gap buffer");

        // Grow in place: shift the post-gap content right.
        let old_gap_end = self.gap_end;
        let post_gap_len = old_len - old_gap_end;
        self.data.resize(new_size, '\0');

        if post_gap_len > 0 {
            let new_post_gap_start = new_size - post_gap_len;
            self.data.copy_within(old_gap_end..old_len, new_post_gap_start);
        }

        self.gap_end = new_size - post_gap_len;
        self.debug_check_invariants();
        Ok(())
    }

    /// Moves the gap to the specified logical position (clamped to length).
    ///
    /// Only the region between the old and new gap position is copied, so
    /// the cost is proportional to the distance moved.
    pub fn move_gap(&mut self, pos: usize) {
        let pos = pos.min(self.len());

        if pos < self.gap_start {
            // Move gap left: shift content from [pos..gap_start] to just before gap_end
            let shift = self.gap_start - pos;
            self.data.copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            // Move gap right: shift content from [gap_end..gap_end + shift] to gap_start
            let shift = pos - self.gap_start;
            self.data.copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Inserts text at the current gap position.
    pub fn insert(&mut self, text: &str) -> Result<(), BufferError> {
        let count = text.chars().count();
        if count == 0 {
            return Ok(());
        }
        self.ensure_capacity(count)?;
        for ch in text.chars() {
            self.data[self.gap_start] = ch;
            self.gap_start += 1;
        }
        self.dirty = true;
        Ok(())
    }

    /// Inserts a single character at the current gap position.
    pub fn insert_char(&mut self, ch: char) -> Result<(), BufferError> {
        self.ensure_capacity(1)?;
        self.data[self.gap_start] = ch;
        self.gap_start += 1;
        self.dirty = true;
        Ok(())
    }

    /// Deletes `n` characters starting at logical position `pos`.
    ///
    /// The count is clamped to the end of the buffer. A `pos` past the end
    /// or `n == 0` is a no-op. Returns the number of characters removed.
    pub fn delete_range(&mut self, pos: usize, n: usize) -> usize {
        let len = self.len();
        if pos > len || n == 0 {
            return 0;
        }
        let n = n.min(len - pos);
        if n == 0 {
            return 0;
        }

        self.move_gap(pos);
        self.gap_end = (self.gap_end + n).min(self.data.len());
        self.dirty = true;
        self.debug_check_invariants();
        n
    }

    /// Removes all content, keeping the allocation.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.dirty = true;
        }
        self.gap_start = 0;
        self.gap_end = self.data.len();
    }

    #[inline]
    fn debug_check_invariants(&self) {
        debug_assert!(
            self.gap_start <= self.gap_end && self.gap_end <= self.data.len(),
            "gap invariant violated: start={} end={} cap={}",
            self.gap_start,
            self.gap_end,
            self.data.len()
        );
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
