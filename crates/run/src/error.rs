// Chunk: docs/chunks/run_output - Running the open file and capturing its output

use std::io;
use std::path::PathBuf;

use gapline_buffer::BufferError;
use thiserror::Error;

/// Failures starting a run or reading its configuration.
#[derive(Debug, Error)]
pub enum RunError {
    /// The platform shell could not be started.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The background output reader could not be started.
    #[error("failed to start output reader: {0}")]
    Reader(#[source] io::Error),

    /// A `build.<ext>` file exists but could not be read.
    #[error("failed to read run config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output buffer could not grow.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
