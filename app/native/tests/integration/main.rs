//! Integration tests for IconStash.
//!
//! These tests drive the save registry and snapshot engine end to end against
//! a simulated desktop shell backed by a temporary folder. They never touch the
//! real desktop, so they run on every platform.
//!
//! ## Running Integration Tests
//!
//! ```bash
//! cargo nextest run -p iconstash --features testing --test integration
//!
//! # Run a single module
//! cargo nextest run -p iconstash --features testing --test integration \
//!     -E 'test(/registry__scenarios/)'
//! ```
//!
//! ## Test Organization
//!
//! Tests follow the naming convention `<module>__<test_name>` to allow filtering by module:
//! - `registry__*` - Slot list, pointer and switching behavior
//! - `snapshot__*` - Capture and restore of icon layouts

#![cfg(feature = "testing")]
// Allow double-underscore naming for test modules (e.g., registry__scenarios)
#![allow(non_snake_case)]
// Relax clippy lints for integration tests - these are test utilities, not production code
#![allow(
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::redundant_clone,
    clippy::unwrap_used
)]

mod common;

mod registry__scenarios;
mod snapshot__round_trip;
