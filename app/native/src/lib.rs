//! IconStash - keep several desktop icon layouts and switch between them.
//!
//! The crate is layered leaves-first:
//!
//! - [`desktop`] - Desktop Shell Bridge: the live icon view and its backing folder
//! - [`snapshot`] - Snapshot Engine: capture a desktop into a slot, restore it back
//! - [`registry`] - Save Registry: named slots and the active-slot pointer
//!
//! [`cli`] wires them to the command line, [`config`] and [`logging`] provide
//! the ambient setup.

pub mod cli;
pub mod config;
pub mod core;
pub mod desktop;
pub mod logging;
pub mod persist;
pub mod registry;
pub mod schema;
pub mod snapshot;

pub use crate::core::{Error, Result};
