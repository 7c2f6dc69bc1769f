// Chunk: docs/chunks/coordinate_index - Offset to line/column translation

//! Translation between absolute character offsets and (line, column).
//!
//! Every function here is a pure forward scan over a [`GapBuffer`]. They are
//! the reference behavior; [`crate::LineCountCache`] memoizes line starts
//! between edits for callers that query repeatedly.
//!
//! Out-of-range inputs are clamped, never errors.

use std::ops::Range;

use crate::gap_buffer::{Chars, GapBuffer};
use crate::types::Caret;

/// Returns the offset of the first character of `line`.
///
/// Line 0 starts at 0. A line past the last one maps to the buffer length.
pub fn line_start_index(buffer: &GapBuffer, line: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut seen = 0;
    for (i, ch) in buffer.chars().enumerate() {
        if ch == '\n' {
            seen += 1;
            if seen == line {
                return i + 1;
            }
        }
    }
    buffer.len()
}

/// Converts an offset to (line, column) by counting newlines before it.
///
/// `idx` is clamped to the buffer length.
pub fn index_to_linecol(buffer: &GapBuffer, idx: usize) -> Caret {
    let mut caret = Caret::default();
    for ch in buffer.chars_in(0, idx) {
        if ch == '\n' {
            caret.line += 1;
            caret.col = 0;
        } else {
            caret.col += 1;
        }
    }
    caret
}

/// Converts (line, column) to an offset.
///
/// Starts at the line's first character and advances up to `col` characters,
/// stopping early at a newline or the end of the buffer.
pub fn linecol_to_index(buffer: &GapBuffer, line: usize, col: usize) -> usize {
    let start = line_start_index(buffer, line);
    let advance = buffer
        .chars_in(start, buffer.len())
        .take(col)
        .take_while(|&ch| ch != '\n')
        .count();
    start + advance
}

/// Number of lines: newline count plus one. An empty buffer has one line.
pub fn total_lines(buffer: &GapBuffer) -> usize {
    buffer.chars().filter(|&ch| ch == '\n').count() + 1
}

/// Length of `line` in characters, excluding its newline. Zero past the end.
pub fn line_length(buffer: &GapBuffer, line: usize) -> usize {
    let start = line_start_index(buffer, line);
    buffer
        .chars_in(start, buffer.len())
        .take_while(|&ch| ch != '\n')
        .count()
}

/// Text of `line` without its newline. Empty past the end.
pub fn line_text(buffer: &GapBuffer, line: usize) -> String {
    let start = line_start_index(buffer, line);
    buffer
        .chars_in(start, buffer.len())
        .take_while(|&ch| ch != '\n')
        .collect()
}

/// One line located by a [`LineScan`]: `[start, end)` excludes the newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Yields the spans of a range of lines in a single forward pass.
///
/// Rendering N visible lines with repeated [`line_start_index`] calls costs
/// O(N * offset); walking them with `LineScan` costs one scan up to the
/// last requested line.
pub struct LineScan<'a> {
    chars: Chars<'a>,
    offset: usize,
    line: usize,
    lines: Range<usize>,
    done: bool,
}

impl<'a> LineScan<'a> {
    pub fn new(buffer: &'a GapBuffer, lines: Range<usize>) -> Self {
        Self {
            chars: buffer.chars(),
            offset: 0,
            line: 0,
            lines,
            done: false,
        }
    }
}

impl Iterator for LineScan<'_> {
    type Item = LineSpan;

    fn next(&mut self) -> Option<LineSpan> {
        while !self.done {
            if self.line >= self.lines.end {
                self.done = true;
                break;
            }

            let start = self.offset;
            let mut end = start;
            let mut hit_newline = false;
            for ch in self.chars.by_ref() {
                if ch == '\n' {
                    hit_newline = true;
                    break;
                }
                end += 1;
            }

            let line = self.line;
            self.line += 1;
            self.offset = if hit_newline { end + 1 } else { end };
            if !hit_newline {
                self.done = true;
            }

            if line >= self.lines.start {
                return Some(LineSpan { line, start, end });
            }
        }
        None
    }
}
