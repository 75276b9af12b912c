//! Logging initialization using the `tracing` crate.
//!
//! This module configures the tracing subscriber with sensible defaults:
//! - Uses `RUST_LOG` environment variable for filtering when set
//! - Otherwise derives the level from the number of `-v` flags
//! - Outputs to stderr so stdout stays clean for `-r` and `--schema`

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Returns the default filter directive for a verbosity level.
///
/// `0` shows info and above for iconstash, `1` adds debug, `2+` adds trace.
/// Other crates stay at `warn`.
#[must_use]
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("warn,iconstash={level},iconstash_lib={level}")
}

/// Initializes the global tracing subscriber.
///
/// This should be called once at startup, before any logging occurs. Calling
/// it again is a no-op.
///
/// The log level can be controlled via the `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Show debug and above
/// - `RUST_LOG=iconstash_lib=trace` - Trace every poll of the desktop
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 0)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(true)
        .compact();

    if tracing_subscriber::registry().with(filter).with(subscriber).try_init().is_err() {
        return;
    }

    tracing::debug!(verbosity, "logging initialized");
}
