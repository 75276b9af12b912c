//! In-memory desktop surface for tests.
//!
//! Compiled for unit tests and, through the `testing` feature, for the
//! integration suite. It is not part of release builds.
//!
//! [`MemoryShell`] is backed by a real folder on disk but keeps the "shell"
//! side (visible items, coordinates, arrangement flags) in memory. Like the
//! real desktop, its item list only catches up with the folder after a number
//! of `item_count` polls, which makes the engine's wait loops observable.
//!
//! # Usage
//!
//! ```rust,ignore
//! use iconstash_lib::desktop::testing::MemoryShell;
//!
//! let shell = MemoryShell::new(desktop_dir).with_lag(3);
//! shell.place_icon("Notes.txt", Point::new(10, 20));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::folder::list_entries;
use super::{DesktopShell, DesktopView, FolderFlags, IconRecord, Point};
use crate::core::{Error, Result};
use crate::snapshot::wait::Clock;

/// Vertical spacing of the default grid new icons are dropped on.
const GRID_STEP: i32 = 75;

// ============================================================================
// Surface state
// ============================================================================

#[derive(Debug)]
struct Surface {
    /// Items the shell currently shows that have a backing file.
    visible: Vec<String>,
    /// Items that never live in the backing folder (e.g. the Recycle Bin).
    virtual_items: Vec<String>,
    /// Files in the backing folder that the shell never lists (e.g. `desktop.ini`).
    hidden: Vec<String>,
    positions: HashMap<String, Point>,
    flags: FolderFlags,
    /// Polls that return a stale count after the folder changed.
    lag: u32,
    stale_polls_left: u32,
    refresh_requests: u32,
    placements: u32,
    available: bool,
}

impl Surface {
    fn total(&self) -> usize { self.virtual_items.len() + self.visible.len() }

    fn next_free_slot(&self) -> Point {
        let taken = i32::try_from(self.positions.len()).unwrap_or(i32::MAX);
        Point::new(0, taken.saturating_mul(GRID_STEP))
    }

    fn listed_entries(&self, folder: &Path) -> Result<Vec<String>> {
        let mut names = list_entries(folder)?;
        names.retain(|name| !self.hidden.contains(name));
        Ok(names)
    }

    /// Re-reads the folder, dropping vanished items and gridding new ones.
    fn resync(&mut self, folder: &Path) -> Result<()> {
        let current = self.listed_entries(folder)?;

        self.visible.retain(|name| current.contains(name));
        self.positions
            .retain(|name, _| current.contains(name) || self.virtual_items.contains(name));

        for name in current {
            if !self.visible.contains(&name) {
                let slot = self.next_free_slot();
                self.positions.insert(name.clone(), slot);
                self.visible.push(name);
            }
        }

        Ok(())
    }
}

// ============================================================================
// Shell
// ============================================================================

/// A desktop shell simulated over a plain folder.
#[derive(Debug, Clone)]
pub struct MemoryShell {
    folder: PathBuf,
    surface: Rc<RefCell<Surface>>,
}

impl MemoryShell {
    /// Creates a shell over `folder`, showing whatever it currently contains.
    ///
    /// # Panics
    ///
    /// Panics if `folder` cannot be read.
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        let folder = folder.into();
        let mut surface = Surface {
            visible: Vec::new(),
            virtual_items: Vec::new(),
            hidden: Vec::new(),
            positions: HashMap::new(),
            flags: FolderFlags {
                auto_arrange: true,
                snap_to_grid: true,
            },
            lag: 0,
            stale_polls_left: 0,
            refresh_requests: 0,
            placements: 0,
            available: true,
        };
        surface.resync(&folder).expect("memory shell folder must be readable");

        Self {
            folder,
            surface: Rc::new(RefCell::new(surface)),
        }
    }

    /// Makes `item_count` report a stale value for `polls` polls after each change.
    #[must_use]
    pub fn with_lag(self, polls: u32) -> Self {
        self.surface.borrow_mut().lag = polls;
        self
    }

    /// Adds an item that is shown on the surface but has no backing file.
    #[must_use]
    pub fn with_virtual_item(self, name: &str, position: Point) -> Self {
        {
            let mut surface = self.surface.borrow_mut();
            surface.virtual_items.push(name.to_string());
            surface.positions.insert(name.to_string(), position);
        }
        self
    }

    /// Simulates a shell whose desktop window cannot be located.
    #[must_use]
    pub fn unavailable(self) -> Self {
        self.surface.borrow_mut().available = false;
        self
    }

    /// Creates a file on the desktop and shows it at `position` immediately.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn place_icon(&self, name: &str, position: Point) {
        std::fs::write(self.folder.join(name), name.as_bytes())
            .expect("failed to create icon file");
        let mut surface = self.surface.borrow_mut();
        if !surface.visible.iter().any(|visible| visible == name) {
            surface.visible.push(name.to_string());
        }
        surface.positions.insert(name.to_string(), position);
    }

    /// Creates a file on the desktop that the shell never lists as an icon.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn place_hidden_file(&self, name: &str) {
        std::fs::write(self.folder.join(name), b"[.ShellClassInfo]")
            .expect("failed to create hidden file");
        let mut surface = self.surface.borrow_mut();
        if !surface.hidden.iter().any(|hidden| hidden == name) {
            surface.hidden.push(name.to_string());
        }
    }

    /// Returns the backing folder.
    #[must_use]
    pub fn folder(&self) -> &Path { &self.folder }

    /// Returns the position currently shown for `name`.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<Point> {
        self.surface.borrow().positions.get(name).copied()
    }

    /// Returns every visible item with its position, sorted by name.
    #[must_use]
    pub fn layout(&self) -> Vec<IconRecord> {
        let surface = self.surface.borrow();
        let mut icons: Vec<IconRecord> = surface
            .virtual_items
            .iter()
            .chain(surface.visible.iter())
            .filter_map(|name| {
                surface.positions.get(name).map(|point| IconRecord::new(name.clone(), *point))
            })
            .collect();
        icons.sort_by(|a, b| a.name.cmp(&b.name));
        icons
    }

    /// Current arrangement flags.
    #[must_use]
    pub fn flags(&self) -> FolderFlags { self.surface.borrow().flags }

    /// Number of refresh stimuli received.
    #[must_use]
    pub fn refresh_requests(&self) -> u32 { self.surface.borrow().refresh_requests }

    /// Number of successful `position_icon` calls.
    #[must_use]
    pub fn placements(&self) -> u32 { self.surface.borrow().placements }
}

impl DesktopShell for MemoryShell {
    fn acquire_view(&self) -> Result<Box<dyn DesktopView + '_>> {
        if !self.surface.borrow().available {
            return Err(Error::shell_unavailable("memory shell is offline"));
        }

        Ok(Box::new(MemoryView {
            folder: &self.folder,
            surface: Rc::clone(&self.surface),
        }))
    }

    fn desktop_folder(&self) -> Result<PathBuf> { Ok(self.folder.clone()) }
}

// ============================================================================
// View
// ============================================================================

struct MemoryView<'a> {
    folder: &'a Path,
    surface: Rc<RefCell<Surface>>,
}

impl DesktopView for MemoryView<'_> {
    fn enumerate_icons(&self) -> Result<Vec<IconRecord>> {
        let surface = self.surface.borrow();
        let icons = surface
            .virtual_items
            .iter()
            .chain(surface.visible.iter())
            .map(|name| {
                let position = surface.positions.get(name).copied().unwrap_or_default();
                IconRecord::new(name.clone(), position)
            })
            .collect();
        Ok(icons)
    }

    fn item_count(&self) -> Result<usize> {
        let mut surface = self.surface.borrow_mut();
        let on_disk = surface.listed_entries(self.folder)?;

        let in_sync = on_disk.len() == surface.visible.len()
            && on_disk.iter().all(|name| surface.visible.contains(name));
        if in_sync {
            surface.stale_polls_left = surface.lag;
            return Ok(surface.total());
        }

        if surface.stale_polls_left > 0 {
            surface.stale_polls_left -= 1;
            return Ok(surface.total());
        }

        surface.resync(self.folder)?;
        surface.stale_polls_left = surface.lag;
        Ok(surface.total())
    }

    fn position_icon(&mut self, name: &str, position: Point) -> Result<bool> {
        let mut surface = self.surface.borrow_mut();
        let shown = surface.visible.iter().chain(surface.virtual_items.iter()).any(|n| n == name);
        if !shown {
            return Ok(false);
        }

        let position = if surface.flags.auto_arrange { surface.next_free_slot() } else { position };
        surface.positions.insert(name.to_string(), position);
        surface.placements += 1;
        Ok(true)
    }

    fn set_auto_arrange(&mut self, enabled: bool) -> Result<()> {
        self.surface.borrow_mut().flags.auto_arrange = enabled;
        Ok(())
    }

    fn set_snap_to_grid(&mut self, enabled: bool) -> Result<()> {
        self.surface.borrow_mut().flags.snap_to_grid = enabled;
        Ok(())
    }

    fn request_refresh(&mut self) -> Result<()> {
        self.surface.borrow_mut().refresh_requests += 1;
        Ok(())
    }
}

// ============================================================================
// Clock
// ============================================================================

/// A clock that only advances when something sleeps on it.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Total time slept on this clock.
    #[must_use]
    pub fn elapsed(&self) -> Duration { self.elapsed.get() }
}

impl Default for ManualClock {
    fn default() -> Self { Self::new() }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant { self.start + self.elapsed.get() }

    fn sleep(&self, duration: Duration) { self.elapsed.set(self.elapsed.get() + duration); }
}
