// Chunk: docs/chunks/cli - Line-oriented command-line front end

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use gapline::cli::CliArgs;
use gapline::commands;
use gapline::logging;
use gapline::settings::Settings;

fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();
    logging::init(args.verbose);

    let settings = Settings::load(args.config.as_deref())?;
    tracing::debug!(?settings, "settings");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(args.command, &settings, &mut out)
}
