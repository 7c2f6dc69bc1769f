// Chunk: docs/chunks/cli - Line-oriented command-line front end

//! Command-line argument parsing.

use std::ops::Range;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect, tokenize and run files with the gapline text engine
#[derive(Parser, Debug)]
#[command(name = "gapline", version, about)]
pub struct CliArgs {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show language, line endings and size of a file
    Info {
        file: PathBuf,
    },

    /// Print the token spans of each line
    Tokens {
        file: PathBuf,

        /// Lines to print, 1-based and inclusive: `N`, `A..B`, `A..` or `..B`
        #[arg(long, value_name = "RANGE", value_parser = parse_line_range)]
        lines: Option<Range<usize>>,

        /// Override the detected language (e.g. "rust", "json")
        #[arg(long, value_name = "NAME")]
        language: Option<String>,
    },

    /// Load a file and save it to memory, reporting whether the bytes match
    Roundtrip {
        file: PathBuf,

        /// Line ending to save with instead of the detected one
        #[arg(long, value_enum)]
        eol: Option<EolArg>,

        /// Also write the saved bytes to this file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Search a file, printing the position of every match
    Find {
        file: PathBuf,

        needle: String,

        #[arg(short, long)]
        ignore_case: bool,
    },

    /// Replace every occurrence of a string and save the file
    Replace {
        file: PathBuf,

        needle: String,

        replacement: String,

        #[arg(short, long)]
        ignore_case: bool,

        /// Report the number of replacements without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a file with its configured or default command
    Run {
        file: PathBuf,

        /// Kill the command if it runs longer than this
        #[arg(long, value_name = "N")]
        timeout_ms: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EolArg {
    Lf,
    Crlf,
}

/// Parses a 1-based inclusive line range into a 0-based half-open one.
pub fn parse_line_range(text: &str) -> Result<Range<usize>, String> {
    let number = |s: &str| -> Result<usize, String> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid line number `{s}`"))?;
        if n == 0 {
            return Err("line numbers start at 1".to_string());
        }
        Ok(n)
    };

    let range = match text.split_once("..") {
        None => {
            let n = number(text)?;
            n - 1..n
        }
        Some((from, to)) => {
            let start = if from.trim().is_empty() { 0 } else { number(from)? - 1 };
            let end = if to.trim().is_empty() { usize::MAX } else { number(to)? };
            if end <= start {
                return Err(format!("empty line range `{text}`"));
            }
            start..end
        }
    };
    Ok(range)
}
