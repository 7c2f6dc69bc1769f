// Chunk: docs/chunks/cli - Line-oriented command-line front end

//! Subcommand implementations.
//!
//! Each command writes to the given writer rather than stdout so tests can
//! capture its output.

use std::fs;
use std::io::{self, Write};
use std::ops::Range;
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use gapline_buffer::{coords, Document, EolMode, FindOptions, GapBuffer, LineScan};
use gapline_run::{OutputCapture, RunConfig, RunProcess, RunSource};
use gapline_syntax::{scan_chars, Language};

use crate::cli::{Command, EolArg};
use crate::settings::Settings;

/// How often `run` copies new output to the writer.
const STREAM_INTERVAL: Duration = Duration::from_millis(50);

/// Exit code reported when `run` kills a command at its timeout.
pub const TIMEOUT_EXIT: u8 = 124;

/// Runs a parsed subcommand and maps its outcome to a process exit code.
pub fn execute(command: Command, settings: &Settings, out: &mut impl Write) -> Result<ExitCode> {
    let code = match command {
        Command::Info { file } => {
            info(&file, settings, out)?;
            ExitCode::SUCCESS
        }
        Command::Tokens { file, lines, language } => {
            tokens(&file, lines, language.as_deref(), settings, out)?;
            ExitCode::SUCCESS
        }
        Command::Roundtrip { file, eol, output } => {
            let identical = roundtrip(&file, eol, output.as_deref(), settings, out)?;
            if identical {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Command::Find { file, needle, ignore_case } => {
            if find(&file, &needle, ignore_case, settings, out)? > 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Command::Replace {
            file,
            needle,
            replacement,
            ignore_case,
            dry_run,
        } => {
            replace(&file, &needle, &replacement, ignore_case, dry_run, settings, out)?;
            ExitCode::SUCCESS
        }
        Command::Run { file, timeout_ms } => match run(&file, timeout_ms, settings, out)? {
            Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
            None => ExitCode::from(TIMEOUT_EXIT),
        },
    };
    Ok(code)
}

fn open(path: &Path, settings: &Settings) -> Result<Document> {
    Document::open_with(path, settings.session_options())
        .with_context(|| format!("Failed to open {}", path.display()))
}

pub fn info(path: &Path, settings: &Settings, out: &mut impl Write) -> Result<()> {
    let mut doc = open(path, settings)?;
    let language = doc.language();
    let eol = doc.eol_mode();
    let session = doc.session_mut();
    let lines = session.total_lines();
    let chars = session.buffer().len();

    let run = RunConfig::resolve(path, language)?;
    let run_source = match &run.source {
        RunSource::ConfigFile(config) => config.display().to_string(),
        RunSource::LanguageDefault => "default".to_string(),
    };

    writeln!(out, "path:     {}", path.display())?;
    writeln!(out, "language: {}", language.name())?;
    writeln!(out, "eol:      {}", eol.label())?;
    writeln!(out, "chars:    {chars}")?;
    writeln!(out, "lines:    {lines}")?;
    writeln!(out, "run:      {} ({run_source})", run.command)?;
    Ok(())
}

/// Prints one span per output line as `line:start-end class "text"`, with
/// 1-based line numbers and 0-based char columns.
pub fn tokens(
    path: &Path,
    lines: Option<Range<usize>>,
    language: Option<&str>,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<()> {
    let doc = open(path, settings)?;
    let language = match language {
        Some(name) => Language::from_name(name).with_context(|| format!("Unknown language `{name}`"))?,
        None => doc.language(),
    };
    tracing::debug!(language = language.name(), "tokenizing");

    let buffer = doc.session().buffer();
    for line in LineScan::new(buffer, lines.unwrap_or(0..usize::MAX)) {
        let chars: Vec<char> = buffer.chars_in(line.start, line.end).collect();
        for span in scan_chars(language, &chars) {
            let text: String = chars[span.start..span.end()].iter().collect();
            writeln!(
                out,
                "{}:{}-{} {} {:?}",
                line.line + 1,
                span.start,
                span.end(),
                span.class.label(),
                text
            )?;
        }
    }
    Ok(())
}

/// Loads `path` and saves it back to memory. Returns true if the saved bytes
/// equal the file.
pub fn roundtrip(
    path: &Path,
    eol: Option<EolArg>,
    output: Option<&Path>,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<bool> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let (buffer, detected) = GapBuffer::load(&bytes)?;

    let has_line_break = bytes.iter().any(|&b| b == b'\n' || b == b'\r');
    let mode = match eol {
        Some(EolArg::Lf) => EolMode::Lf,
        Some(EolArg::Crlf) => EolMode::CrLf,
        None if has_line_break => detected,
        None => settings.default_eol.into(),
    };

    let saved = buffer.save(mode);
    let identical = saved == bytes;

    writeln!(
        out,
        "{}: {} chars, {} lines, eol {} -> {}",
        path.display(),
        buffer.len(),
        coords::total_lines(&buffer),
        detected.label(),
        mode.label()
    )?;
    if identical {
        writeln!(out, "identical ({} bytes)", saved.len())?;
    } else {
        let offset = saved
            .iter()
            .zip(&bytes)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| saved.len().min(bytes.len()));
        writeln!(
            out,
            "differs: {} bytes in, {} bytes out, first difference at byte {offset}",
            bytes.len(),
            saved.len()
        )?;
    }

    if let Some(output) = output {
        fs::write(output, &saved).with_context(|| format!("Failed to write {}", output.display()))?;
    }
    Ok(identical)
}

/// Prints `line:col: text` for every non-overlapping match. Returns the
/// match count.
pub fn find(
    path: &Path,
    needle: &str,
    ignore_case: bool,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<usize> {
    if needle.is_empty() {
        bail!("Search text must not be empty");
    }
    let mut doc = open(path, settings)?;
    let session = doc.session_mut();
    let options = FindOptions {
        case_insensitive: ignore_case,
        wrap: false,
        forward: true,
    };
    let needle_len = needle.chars().count();
    let pattern: Vec<char> = needle.chars().collect();

    // find_next starts after the caret, so a match at offset 0 is checked here.
    let mut next = if gapline_buffer::matches_at(session.buffer(), 0, &pattern, ignore_case) {
        Some(0)
    } else {
        session.find_next(needle, options)
    };

    let mut count = 0;
    while let Some(found) = next {
        count += 1;
        let at = coords::index_to_linecol(session.buffer(), found);
        writeln!(out, "{}:{}: {}", at.line + 1, at.col + 1, session.line_text(at.line))?;

        session.set_caret_index(found + needle_len - 1);
        next = session.find_next(needle, options);
    }
    Ok(count)
}

/// Replaces every non-overlapping match and saves the file unless
/// `dry_run`. Returns the number of replacements.
pub fn replace(
    path: &Path,
    needle: &str,
    replacement: &str,
    ignore_case: bool,
    dry_run: bool,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<usize> {
    if needle.is_empty() {
        bail!("Search text must not be empty");
    }
    let mut doc = open(path, settings)?;
    let options = FindOptions {
        case_insensitive: ignore_case,
        wrap: false,
        forward: true,
    };

    let mut count = 0;
    {
        let session = doc.session_mut();
        loop {
            if session.replace_at_caret(needle, replacement, ignore_case)? {
                count += 1;
                // The caret now sits after the replacement; step back one so
                // find_next can see a match starting right there.
                if session.caret_index() == 0 {
                    continue;
                }
                let after = session.caret_index() - 1;
                session.set_caret_index(after);
            }
            if session.find_next(needle, options).is_none() {
                break;
            }
        }
    }

    if count > 0 && !dry_run {
        doc.save()?;
    }
    let verb = if dry_run { "would replace" } else { "replaced" };
    writeln!(out, "{verb} {count} occurrence(s) in {}", path.display())?;
    Ok(count)
}

/// Runs the file, streaming its output. Returns its exit code, or `None`
/// if it was killed at `timeout_ms`.
pub fn run(
    path: &Path,
    timeout_ms: Option<u64>,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<Option<i32>> {
    let doc = open(path, settings)?;
    let config = RunConfig::resolve(path, doc.language())?;
    tracing::info!(command = %config.command, "running {}", path.display());

    let capture = OutputCapture::new();
    let mut process =
        RunProcess::spawn(&config.command, config.working_dir.as_deref(), capture.clone())?
            .with_kill_timeout(settings.kill_timeout());
    let deadline = timeout_ms.map(|ms| Instant::now() + Duration::from_millis(ms));

    let mut printed = 0;
    loop {
        let exit = process.wait_timeout(STREAM_INTERVAL);
        printed = copy_new_output(&capture, printed, out)?;
        if let Some(code) = exit {
            return Ok(Some(code));
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            if !process.kill() {
                tracing::warn!("output may be incomplete");
            }
            copy_new_output(&capture, printed, out)?;
            writeln!(out, "[killed after {} ms]", timeout_ms.unwrap_or_default())?;
            return Ok(None);
        }
    }
}

/// Writes capture contents past `from` and returns the new length.
fn copy_new_output(capture: &OutputCapture, from: usize, out: &mut impl Write) -> io::Result<usize> {
    let (text, len) = capture.with_buffer(|buffer| (buffer.slice(from, buffer.len()), buffer.len()));
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(len)
}
