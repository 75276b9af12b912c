//! Core infrastructure for IconStash.
//!
//! - [`error`] - Unified error types
//! - [`constants`] - Application constants and the saved-data layout
//! - [`prelude`] - Common re-exports for convenience

pub mod constants;
pub mod error;
pub mod prelude;

pub use error::{Error, Result};
