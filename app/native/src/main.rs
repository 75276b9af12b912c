//! IconStash command-line binary.

use std::process::ExitCode;

fn main() -> ExitCode { iconstash_lib::cli::run() }
