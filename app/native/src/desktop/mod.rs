//! Desktop Shell Bridge.
//!
//! The desktop surface is not a passive folder: the shell keeps its own item
//! list, fills it asynchronously from the backing folder, and owns the icon
//! coordinates. This module abstracts that surface behind two traits:
//!
//! - [`DesktopShell`] - locates the live desktop view and its backing folder
//! - [`DesktopView`] - queries and mutates the icons of one acquired view
//!
//! Only [`ffi`] talks to the real operating shell. The `testing` module, built
//! for unit tests and with the `testing` feature, provides an in-memory surface
//! with configurable enumeration lag.
//!
//! # Eventual consistency
//!
//! [`DesktopView::item_count`] is a polling oracle, not an instantaneous truth.
//! After files are moved in or out of the backing folder the count catches up
//! some time later, so callers must poll it (see [`crate::snapshot::wait`]).

pub mod ffi;
pub mod folder;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use ffi::native_shell;
pub use folder::{MoveFailure, MoveReport};

use crate::core::Result;

// ============================================================================
// Value types
// ============================================================================

/// Pixel coordinates of an icon on the desktop surface.
///
/// Serialized as a two-element `[x, y]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self { Self { x, y } }
}

impl From<Point> for (i32, i32) {
    fn from(point: Point) -> Self { (point.x, point.y) }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single icon as reported by the shell: its display name and position.
///
/// The display name is the only identity the shell offers across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    /// Display name of the icon.
    pub name: String,

    /// Position of the icon on the desktop surface.
    #[serde(rename = "location")]
    pub position: Point,
}

impl IconRecord {
    /// Creates a new icon record.
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self { name: name.into(), position }
    }
}

/// Arrangement flags of the desktop folder view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderFlags {
    /// Icons are automatically arranged by the shell.
    pub auto_arrange: bool,
    /// Icons snap to the shell's grid when positioned.
    pub snap_to_grid: bool,
}

impl FolderFlags {
    /// Flags required while replaying exact coordinates.
    pub const FREE_PLACEMENT: Self = Self {
        auto_arrange: false,
        snap_to_grid: false,
    };
}

impl Default for FolderFlags {
    fn default() -> Self {
        Self {
            auto_arrange: false,
            snap_to_grid: true,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Access point to the operating shell's desktop surface.
pub trait DesktopShell {
    /// Obtains a handle to the desktop's current folder view.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::Error::ShellUnavailable`] if the desktop window or
    /// its folder view cannot be located.
    fn acquire_view(&self) -> Result<Box<dyn DesktopView + '_>>;

    /// Returns the filesystem folder backing the desktop surface.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::Error::ShellUnavailable`] if the folder is unknown.
    fn desktop_folder(&self) -> Result<PathBuf>;
}

impl<T: DesktopShell + ?Sized> DesktopShell for Box<T> {
    fn acquire_view(&self) -> Result<Box<dyn DesktopView + '_>> { (**self).acquire_view() }

    fn desktop_folder(&self) -> Result<PathBuf> { (**self).desktop_folder() }
}

/// A live, queryable view of the desktop icons.
pub trait DesktopView {
    /// Returns every currently visible icon in shell-reported order.
    ///
    /// The order carries no meaning and must not be relied upon.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::Error::EnumerationFailed`] if the shell reports an
    /// invalid count or refuses to enumerate.
    fn enumerate_icons(&self) -> Result<Vec<IconRecord>>;

    /// Returns the number of icons the surface currently reports.
    ///
    /// This may lag behind recent filesystem changes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::Error::EnumerationFailed`] if the count is invalid.
    fn item_count(&self) -> Result<usize>;

    /// Moves the currently enumerated icon named `name` to `position`.
    ///
    /// Returns `false` without failing when no such icon is enumerated.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell rejects the placement.
    fn position_icon(&mut self, name: &str, position: Point) -> Result<bool>;

    /// Toggles automatic arrangement of the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell rejects the flag change.
    fn set_auto_arrange(&mut self, enabled: bool) -> Result<()>;

    /// Toggles grid snapping of the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell rejects the flag change.
    fn set_snap_to_grid(&mut self, enabled: bool) -> Result<()>;

    /// Asks the surface to re-scan its backing folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh cannot be delivered.
    fn request_refresh(&mut self) -> Result<()>;

    /// Applies both arrangement flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell rejects either flag change.
    fn apply_flags(&mut self, flags: FolderFlags) -> Result<()> {
        self.set_auto_arrange(flags.auto_arrange)?;
        self.set_snap_to_grid(flags.snap_to_grid)
    }
}
