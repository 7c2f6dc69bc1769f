// Chunk: docs/chunks/cli - Line-oriented command-line front end

//! Library side of the `gapline` binary: argument parsing, settings,
//! logging setup and the subcommands themselves.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
