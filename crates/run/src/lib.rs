// Chunk: docs/chunks/run_output - Running the open file and capturing its output

//! gapline-run: run the open file and capture what it prints.
//!
//! - [`RunConfig::resolve`] picks the command: a `build.<ext>` file beside
//!   the source, or a per-language default.
//! - [`RunProcess::spawn`] starts it through the platform shell with stderr
//!   merged into stdout.
//! - A background reader streams the output into an [`OutputCapture`],
//!   a gap buffer shared with the render path.
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use gapline_run::{OutputCapture, RunConfig, RunProcess};
//! use gapline_syntax::detect_language;
//!
//! let file = Path::new("hello.py");
//! let config = RunConfig::resolve(file, detect_language(file))?;
//! let capture = OutputCapture::new();
//! let mut run = RunProcess::spawn(&config.command, config.working_dir.as_deref(), capture.clone())?;
//! run.wait_timeout(Duration::from_secs(5));
//! println!("{}", capture.snapshot());
//! # Ok::<(), gapline_run::RunError>(())
//! ```

mod capture;
mod config;
mod error;
mod process;
mod reader;

pub use capture::OutputCapture;
pub use config::{config_path, default_command, parse_run_command, RunConfig, RunSource, MAX_CONFIG_BYTES};
pub use error::RunError;
pub use process::{RunProcess, DEFAULT_KILL_TIMEOUT};
pub use reader::{spawn_reader, ReaderHandle};
