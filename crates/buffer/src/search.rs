// Chunk: docs/chunks/find_replace - Incremental find and replace-at-caret

//! Plain-text search over a gap buffer.
//!
//! Forward search starts one past the origin so repeated "find next" calls
//! step through successive matches; backward search starts one before it.
//! With wrapping enabled the search continues from the other end of the
//! buffer back to the origin.

use crate::coords::index_to_linecol;
use crate::error::BufferError;
use crate::gap_buffer::GapBuffer;
use crate::session::TextEditSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    pub case_insensitive: bool,
    pub wrap: bool,
    pub forward: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            wrap: true,
            forward: true,
        }
    }
}

fn chars_eq(a: char, b: char, case_insensitive: bool) -> bool {
    a == b || (case_insensitive && a.to_uppercase().eq(b.to_uppercase()))
}

/// True if `needle` occurs at `pos`.
pub fn matches_at(buffer: &GapBuffer, pos: usize, needle: &[char], case_insensitive: bool) -> bool {
    if needle.is_empty() || pos + needle.len() > buffer.len() {
        return false;
    }
    buffer
        .chars_in(pos, pos + needle.len())
        .zip(needle)
        .all(|(have, &want)| chars_eq(have, want, case_insensitive))
}

/// Finds `needle` relative to `origin`, returning the match start.
///
/// An empty needle, or one longer than the buffer, never matches.
pub fn find(buffer: &GapBuffer, needle: &str, origin: usize, options: FindOptions) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    let len = buffer.len();
    if needle.is_empty() || needle.len() > len {
        return None;
    }
    let last = len - needle.len();
    let origin = origin.min(len);
    let hit = |pos: &usize| matches_at(buffer, *pos, &needle, options.case_insensitive);

    if options.forward {
        let found = (origin + 1..=last).find(hit);
        if found.is_some() || !options.wrap {
            return found;
        }
        (0..=origin.min(last)).find(hit)
    } else {
        let found = (0..origin.min(last + 1)).rev().find(hit);
        if found.is_some() || !options.wrap {
            return found;
        }
        (origin..=last).rev().find(hit)
    }
}

impl TextEditSession {
    /// Moves the caret to the next match and returns its offset.
    ///
    /// The caret and selection are untouched when nothing matches.
    pub fn find_next(&mut self, needle: &str, options: FindOptions) -> Option<usize> {
        let found = find(self.buffer(), needle, self.caret_index(), options)?;
        tracing::trace!(needle, found, "find");
        self.set_caret_index(found);
        Some(found)
    }

    /// Replaces `needle` with `replacement` if a match starts exactly at the
    /// caret, leaving the caret after the replacement.
    ///
    /// Returns `Ok(false)` when there is no match at the caret.
    pub fn replace_at_caret(
        &mut self,
        needle: &str,
        replacement: &str,
        case_insensitive: bool,
    ) -> Result<bool, BufferError> {
        let pattern: Vec<char> = needle.chars().collect();
        let start = self.caret_index();
        if !matches_at(self.buffer(), start, &pattern, case_insensitive) {
            return Ok(false);
        }

        let end = index_to_linecol(self.buffer(), start + pattern.len());
        self.set_caret_index(start);
        self.set_anchor(end);
        self.insert_at_caret(replacement)?;
        Ok(true)
    }
}
