// Chunk: docs/chunks/run_output - Running the open file and capturing its output

//! Shared output buffer for a running command.
//!
//! The reader thread appends raw bytes; the render path takes snapshots.
//! Both sides go through one mutex, so a snapshot never observes a
//! half-applied chunk.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gapline_buffer::{BufferError, GapBuffer};

use crate::RunError;

/// Output of a run, held in a second [`GapBuffer`].
///
/// Cloning is cheap and every clone refers to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct OutputCapture {
    inner: Arc<Mutex<CaptureState>>,
}

#[derive(Debug, Default)]
struct CaptureState {
    buffer: GapBuffer,
    /// Trailing bytes of an incomplete UTF-8 sequence from the last chunk.
    pending: Vec<u8>,
    /// The last decoded char was `\r`; a leading `\n` in the next chunk
    /// belongs to the same line break.
    after_cr: bool,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a capture whose buffer starts with room for `chars`.
    pub fn with_capacity(chars: usize) -> Result<Self, RunError> {
        let state = CaptureState {
            buffer: GapBuffer::with_capacity(chars)?,
            ..CaptureState::default()
        };
        Ok(Self {
            inner: Arc::new(Mutex::new(state)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, CaptureState> {
        // A panicking reader leaves the buffer valid; keep using it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Empties the buffer and forgets any partial input.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.buffer.clear();
        state.pending.clear();
        state.after_cr = false;
    }

    /// Decodes `bytes` and appends them.
    ///
    /// An incomplete UTF-8 sequence at the end of the chunk is held back
    /// until the next call. Invalid sequences become U+FFFD. `\r\n` and lone
    /// `\r` are stored as `\n`, including when the pair straddles two chunks.
    pub fn append_bytes(&self, bytes: &[u8]) -> Result<(), BufferError> {
        let mut state = self.lock();
        let decoded = decode_with_carry(&mut state.pending, bytes);
        let text = normalize_line_breaks(&decoded, &mut state.after_cr);
        append(&mut state.buffer, &text)
    }

    /// Flushes a held-back partial sequence as U+FFFD. Called at EOF.
    pub fn finish(&self) -> Result<(), BufferError> {
        let mut state = self.lock();
        if state.pending.is_empty() {
            return Ok(());
        }
        state.pending.clear();
        state.after_cr = false;
        append(&mut state.buffer, "\u{FFFD}")
    }

    /// Copy of the captured text.
    pub fn snapshot(&self) -> String {
        self.lock().buffer.to_string()
    }

    /// Captured length in chars.
    pub fn len(&self) -> usize {
        self.lock().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().buffer.is_empty()
    }

    /// Number of lines, counting a trailing partial line.
    pub fn line_count(&self) -> usize {
        gapline_buffer::coords::total_lines(&self.lock().buffer)
    }

    /// Runs `f` against the buffer while holding the lock.
    pub fn with_buffer<R>(&self, f: impl FnOnce(&GapBuffer) -> R) -> R {
        f(&self.lock().buffer)
    }
}

fn append(buffer: &mut GapBuffer, text: &str) -> Result<(), BufferError> {
    if text.is_empty() {
        return Ok(());
    }
    let end = buffer.len();
    buffer.move_gap(end);
    buffer.insert(text)
}

fn decode_with_carry(pending: &mut Vec<u8>, bytes: &[u8]) -> String {
    pending.extend_from_slice(bytes);
    let mut out = String::with_capacity(pending.len());
    let mut rest: &[u8] = pending;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                rest = &[];
                break;
            }
            Err(err) => {
                let (valid, tail) = rest.split_at(err.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    out.push_str(valid);
                }
                match err.error_len() {
                    Some(bad) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        rest = &tail[bad..];
                    }
                    None => {
                        // Incomplete sequence at the end; wait for more bytes.
                        rest = tail;
                        break;
                    }
                }
            }
        }
    }

    let carry = rest.to_vec();
    *pending = carry;
    out
}

fn normalize_line_breaks(text: &str, after_cr: &mut bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\r' => {
                out.push('\n');
                *after_cr = true;
            }
            '\n' if *after_cr => *after_cr = false,
            _ => {
                out.push(ch);
                *after_cr = false;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_snapshot() {
        let capture = OutputCapture::new();
        capture.append_bytes(b"hello\n").unwrap();
        capture.append_bytes(b"world").unwrap();
        assert_eq!(capture.snapshot(), "hello\nworld");
        assert_eq!(capture.len(), 11);
        assert_eq!(capture.line_count(), 2);
    }

    #[test]
    fn test_split_utf8_sequence_is_carried() {
        let capture = OutputCapture::new();
        let bytes = "é!".as_bytes();
        capture.append_bytes(&bytes[..1]).unwrap();
        assert_eq!(capture.snapshot(), "");
        capture.append_bytes(&bytes[1..]).unwrap();
        assert_eq!(capture.snapshot(), "é!");
    }

    #[test]
    fn test_invalid_bytes_become_replacement() {
        let capture = OutputCapture::new();
        capture.append_bytes(b"a\xffb").unwrap();
        assert_eq!(capture.snapshot(), "a\u{FFFD}b");
    }

    #[test]
    fn test_finish_flushes_partial_sequence() {
        let capture = OutputCapture::new();
        capture.append_bytes(&[b'x', 0xe2, 0x82]).unwrap();
        capture.finish().unwrap();
        assert_eq!(capture.snapshot(), "x\u{FFFD}");
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let capture = OutputCapture::new();
        capture.append_bytes(b"a\r").unwrap();
        capture.append_bytes(b"\nb\rc\r\n").unwrap();
        assert_eq!(capture.snapshot(), "a\nb\nc\n");
    }

    #[test]
    fn test_clear_resets_state() {
        let capture = OutputCapture::new();
        capture.append_bytes(b"old\r").unwrap();
        capture.clear();
        capture.append_bytes(b"\nnew").unwrap();
        assert_eq!(capture.snapshot(), "\nnew");
        assert!(!capture.is_empty());
    }

    #[test]
    fn test_clones_share_buffer() {
        let capture = OutputCapture::new();
        let writer = capture.clone();
        writer.append_bytes(b"shared").unwrap();
        assert_eq!(capture.with_buffer(|b| b.len()), 6);
    }

    #[test]
    fn test_with_capacity_reports_oom() {
        let err = OutputCapture::with_capacity(usize::MAX).unwrap_err();
        assert!(matches!(err, RunError::Buffer(ref e) if e.is_out_of_memory()));
    }
}
