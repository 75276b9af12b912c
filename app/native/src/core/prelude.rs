//! Common re-exports for convenience.
//!
//! # Usage
//!
//! ```ignore
//! use crate::core::prelude::*;
//! ```

pub use super::constants::{APP_NAME, APP_VERSION, DEFAULT_SLOT};
pub use super::error::{Error, Result};
