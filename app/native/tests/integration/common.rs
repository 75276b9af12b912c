//! Common test utilities.
//!
//! [`Desk`] bundles a temporary data root, a simulated desktop folder and a
//! manual clock, so a test never sleeps on the wall clock.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use iconstash_lib::desktop::testing::{ManualClock, MemoryShell};
use iconstash_lib::desktop::{IconRecord, Point};
use iconstash_lib::registry::SaveRegistry;
use iconstash_lib::snapshot::{SnapshotEngine, WaitPolicy, Waiter};
use serde_json::Value;
use tempfile::TempDir;

/// Engine type used throughout the suite.
pub type TestEngine = SnapshotEngine<MemoryShell, ManualClock>;

/// A scratch desktop plus data root.
pub struct Desk {
    temp: TempDir,
    pub shell: MemoryShell,
    pub clock: ManualClock,
}

impl Desk {
    /// Creates an empty desktop whose item count lags `lag` polls behind.
    pub fn new(lag: u32) -> Self {
        let temp = TempDir::new().unwrap();
        let desktop = temp.path().join("Desktop");
        fs::create_dir(&desktop).unwrap();

        Self {
            shell: MemoryShell::new(&desktop).with_lag(lag),
            clock: ManualClock::new(),
            temp,
        }
    }

    /// Folder holding `saves.json` and `saves/`.
    pub fn data_root(&self) -> PathBuf { self.temp.path().join("data") }

    /// Backing folder of the simulated desktop.
    pub fn desktop(&self) -> &Path { self.shell.folder() }

    /// Builds an engine sharing this desk's shell and clock.
    pub fn engine(&self) -> TestEngine {
        let policy = WaitPolicy::bounded(Duration::from_secs(5), Duration::from_millis(10));
        let waiter = Waiter::with_clock(policy, self.clock.clone());
        SnapshotEngine::with_waiter(self.shell.clone(), waiter)
    }

    /// Opens the registry over this desk's data root.
    pub fn registry(&self) -> SaveRegistry<TestEngine> {
        SaveRegistry::open(self.data_root(), self.engine()).unwrap()
    }

    /// Places a file icon on the desktop.
    pub fn place(&self, name: &str, x: i32, y: i32) {
        self.shell.place_icon(name, Point::new(x, y));
    }

    /// Names of the files in the desktop folder, sorted.
    pub fn desktop_files(&self) -> Vec<String> { sorted_names(self.desktop()) }

    /// Names of the files stored for `slot`, sorted.
    pub fn stored_files(&self, slot: &str) -> Vec<String> {
        sorted_names(&self.data_root().join("saves").join(slot).join("icons"))
    }

    /// Parses a JSON file under the data root.
    pub fn read_json(&self, relative: &str) -> Value {
        let text = fs::read_to_string(self.data_root().join(relative)).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

/// Shorthand for an expected icon record.
pub fn icon(name: &str, x: i32, y: i32) -> IconRecord { IconRecord::new(name, Point::new(x, y)) }

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
