//! Command-line entry point.
//!
//! Parses the arguments, initializes logging and runs the selected action.
//! Failures of a recognized action are reported on stderr and still exit with
//! status 0; only argument and configuration problems exit non-zero.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

pub use commands::{Action, Cli};

use crate::core::Error;
use crate::logging;

/// Runs the CLI and returns the process exit code.
#[must_use]
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbosity());

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(?err, "command failed");
            eprintln!("{} {err}", "ERROR:".red().bold());
            if is_usage_error(&err) { ExitCode::FAILURE } else { ExitCode::SUCCESS }
        }
    }
}

/// Returns `true` for failures that must exit non-zero.
#[must_use]
pub const fn is_usage_error(err: &Error) -> bool {
    matches!(err, Error::InvalidArguments(_) | Error::Config(_))
}
