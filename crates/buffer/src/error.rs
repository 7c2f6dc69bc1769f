// Chunk: docs/chunks/buffer_errors - Explicit allocation and I/O failures

//! Error type for buffer growth and document file I/O.
//!
//! Out-of-range positional queries are not errors: they return `None`, an
//! empty string, or a clamped index. Only the failures below propagate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the gap buffer and the document layer.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Growing the backing store failed. The buffer is left unchanged.
    #[error("out of memory growing gap buffer to {requested} characters")]
    OutOfMemory { requested: usize },

    /// Reading a document from disk failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a document to disk failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `save()` was called on a document that was never given a path.
    #[error("document has no file path; use save_as")]
    NoPath,
}

impl BufferError {
    /// Returns true for the allocation failure variant.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, BufferError::OutOfMemory { .. })
    }
}
