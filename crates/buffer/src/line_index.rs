// Chunk: docs/chunks/coordinate_index - Offset to line/column translation

//! Line-count cache for an edit session.
//!
//! Holds the line-start offsets from the last recount plus a stale flag. Any
//! edit marks it stale; the next query that needs it recounts with one
//! forward scan. Between edits, line lookups are O(1) and offset-to-line
//! lookups are O(log n).

use crate::gap_buffer::GapBuffer;

#[derive(Debug, Clone)]
pub struct LineCountCache {
    /// Character offsets where each line starts. line_starts[0] = 0 always.
    line_starts: Vec<usize>,
    stale: bool,
}

impl LineCountCache {
    /// Creates a stale cache. The first query triggers a recount.
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
            stale: true,
        }
    }

    /// Recounts from the buffer and returns the total line count.
    pub fn recount(&mut self, buffer: &GapBuffer) -> usize {
        self.line_starts.clear();
        self.line_starts.push(0);

        let mut offset = 0;
        for ch in buffer.chars() {
            offset += 1;
            if ch == '\n' {
                self.line_starts.push(offset);
            }
        }

        self.stale = false;
        self.line_starts.len()
    }

    /// Marks the cache stale. Called after every edit.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Total line count, or `None` while stale.
    pub fn total(&self) -> Option<usize> {
        (!self.stale).then_some(self.line_starts.len())
    }

    /// Offset where `line` starts, or `None` while stale or out of range.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if self.stale {
            return None;
        }
        self.line_starts.get(line).copied()
    }

    /// Length of `line` excluding its newline, or `None` while stale or out
    /// of range. `total_len` is the buffer length.
    pub fn line_len(&self, line: usize, total_len: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => total_len,
        };
        Some(end - start)
    }

    /// Line containing `offset`, or `None` while stale.
    ///
    /// Uses binary search for O(log n) lookup.
    pub fn line_at_offset(&self, offset: usize) -> Option<usize> {
        if self.stale {
            return None;
        }
        Some(match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        })
    }
}

impl Default for LineCountCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counted(text: &str) -> LineCountCache {
        let mut cache = LineCountCache::new();
        cache.recount(&GapBuffer::from_str(text));
        cache
    }

    #[test]
    fn test_new_is_stale() {
        let cache = LineCountCache::new();
        assert!(cache.is_stale());
        assert_eq!(cache.total(), None);
        assert_eq!(cache.line_start(0), None);
    }

    #[test]
    fn test_recount_empty() {
        let cache = counted("");
        assert!(!cache.is_stale());
        assert_eq!(cache.total(), Some(1));
        assert_eq!(cache.line_start(0), Some(0));
    }

    #[test]
    fn test_recount_multiple_lines() {
        let cache = counted("hello\nworld\n");
        assert_eq!(cache.total(), Some(3));
        assert_eq!(cache.line_start(1), Some(6));
        assert_eq!(cache.line_start(2), Some(12));
        assert_eq!(cache.line_start(3), None);
    }

    #[test]
    fn test_line_len() {
        let cache = counted("hello\nworld");
        assert_eq!(cache.line_len(0, 11), Some(5));
        assert_eq!(cache.line_len(1, 11), Some(5));
        assert_eq!(cache.line_len(2, 11), None);
    }

    #[test]
    fn test_line_at_offset() {
        let cache = counted("hello\nworld\nfoo");
        assert_eq!(cache.line_at_offset(0), Some(0));
        assert_eq!(cache.line_at_offset(5), Some(0)); // '\n'
        assert_eq!(cache.line_at_offset(6), Some(1));
        assert_eq!(cache.line_at_offset(12), Some(2));
    }

    #[test]
    fn test_invalidate_hides_old_answers() {
        let mut cache = counted("a\nb");
        cache.invalidate();
        assert!(cache.is_stale());
        assert_eq!(cache.total(), None);
        assert_eq!(cache.line_at_offset(2), None);
    }
}
