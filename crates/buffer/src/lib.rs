// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/edit_session - Caret, selection and editing over a gap buffer

//! gapline-buffer: gap buffer text storage and editing for gapline.
//!
//! # Overview
//!
//! - [`GapBuffer`] stores characters with a movable gap, decodes file bytes
//!   with [`GapBuffer::load`] (normalizing line endings to LF) and encodes
//!   them back with [`GapBuffer::save`].
//! - [`coords`] translates between absolute offsets and (line, column).
//! - [`TextEditSession`] adds a caret, a selection anchor and editing
//!   operations, and keeps a [`LineCountCache`] that every edit marks stale.
//! - [`Document`] binds a session to a file path and a detected [`Language`].
//!
//! # Example
//!
//! ```
//! use gapline_buffer::{Caret, DirtyLines, TextEditSession};
//!
//! let mut session = TextEditSession::from_str("    let x = 1;");
//! session.set_caret(Caret::new(0, 14));
//! let dirty = session.insert_newline_with_indent().unwrap();
//! assert_eq!(dirty, DirtyLines::FromLineToEnd(0));
//! assert_eq!(session.text(), "    let x = 1;\n    ");
//! assert_eq!(session.caret(), Caret::new(1, 4));
//! ```
//!
//! # Dirty Line Tracking
//!
//! Each mutation returns a [`DirtyLines`] value:
//!
//! - `DirtyLines::None` - no visual change (e.g. backspace at the origin)
//! - `DirtyLines::Single(line)` - only one line changed
//! - `DirtyLines::FromLineToEnd(line)` - lines were split or joined

pub mod coords;
mod document;
mod eol;
mod error;
mod gap_buffer;
mod line_index;
mod search;
mod session;
mod types;

pub use coords::{LineScan, LineSpan};
pub use document::Document;
pub use eol::{normalize_chars, normalize_str, EolMode};
pub use error::BufferError;
pub use gap_buffer::{Chars, GapBuffer, DEFAULT_CAPACITY};
pub use line_index::LineCountCache;
pub use search::{find, matches_at, FindOptions};
pub use session::{SessionOptions, TextEditSession, DEFAULT_TAB_WIDTH};
pub use types::{Caret, DirtyLines};

pub use gapline_syntax::Language;
