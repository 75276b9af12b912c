//! Save Registry.
//!
//! Owns the ordered list of slots and the pointer to the slot whose icons are
//! currently on the desktop. Every mutation is persisted to the slot list file
//! before the call returns.
//!
//! # Switching
//!
//! Creating or activating a slot first captures the active slot, then (for
//! activation) restores the target. The two halves run strictly one after the
//! other. The slot list is only rewritten once both halves succeeded, so a
//! failure always leaves the previous active pointer on disk.

mod file;


use std::fs;
use std::path::PathBuf;

pub use file::SlotListFile;

use crate::core::constants::layout::{SAVES_DIR, SAVES_FILE};
use crate::core::{Error, Result};
use crate::snapshot::{CaptureReport, RestoreReport, Slot, Snapshotter, validate_name};

/// Phase of the registry's two-step switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwitchState {
    /// No capture or restore is running.
    #[default]
    Idle,
    /// A capture or restore is moving files.
    Switching,
}

/// Outcome of a successful [`SaveRegistry::activate`].
#[derive(Debug)]
pub struct SwitchReport {
    /// Capture of the slot that was active before the call.
    pub captured: CaptureReport,
    /// Restore of the newly active slot.
    pub restored: RestoreReport,
}

/// Named save slots plus the active-slot pointer.
#[derive(Debug)]
pub struct SaveRegistry<E> {
    root: PathBuf,
    slots: Vec<Slot>,
    active: String,
    state: SwitchState,
    engine: E,
}

impl<E: Snapshotter> SaveRegistry<E> {
    /// Opens the registry stored under `root`, bootstrapping a fresh layout.
    ///
    /// Creates the root, its `saves/` folder and a slot list holding only
    /// `Default` when they are missing, and materializes the storage of every
    /// listed slot. Duplicate and unusable names in the slot list are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout cannot be created or the slot list file
    /// is corrupt.
    pub fn open(root: impl Into<PathBuf>, engine: E) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(SAVES_DIR))?;

        let list = SlotListFile::load_or_init(&root.join(SAVES_FILE))?;
        let mut slots: Vec<Slot> = Vec::with_capacity(list.saves.len());
        for name in &list.saves {
            if slots.iter().any(|slot| slot.name() == name) {
                tracing::warn!(%name, "skipping duplicate slot name");
                continue;
            }
            match Slot::open(&root, name) {
                Ok(slot) => slots.push(slot),
                Err(err @ Error::InvalidSlotName { .. }) => tracing::warn!(%err, "skipping slot"),
                Err(err) => return Err(err),
            }
        }

        tracing::debug!(
            root = %root.display(),
            slots = slots.len(),
            active = %list.active_desktop,
            "opened save registry"
        );

        Ok(Self {
            root,
            slots,
            active: list.active_desktop,
            state: SwitchState::Idle,
            engine,
        })
    }

    /// Slot names in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<&str> { self.slots.iter().map(Slot::name).collect() }

    /// Looks up a slot by name.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.name() == name)
    }

    /// The slot whose icons are currently on the desktop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ActiveSlotInvalid`] if the persisted pointer names a
    /// slot that does not exist.
    pub fn active(&self) -> Result<&Slot> {
        self.slot(&self.active).ok_or_else(|| Error::active_invalid(&self.active, None))
    }

    /// The persisted active pointer, whether or not it resolves.
    #[must_use]
    pub fn active_name(&self) -> &str { &self.active }

    /// Current switch phase.
    #[must_use]
    pub const fn state(&self) -> SwitchState { self.state }

    /// The snapshot engine driving captures and restores.
    #[must_use]
    pub const fn engine(&self) -> &E { &self.engine }

    /// Saves the current desktop into the active slot and starts a new, empty
    /// slot called `name`, which becomes active.
    ///
    /// # Errors
    ///
    /// - [`Error::NameTaken`] if `name` exists, with nothing changed
    /// - [`Error::InvalidSlotName`] if `name` cannot be a folder name
    /// - [`Error::ActiveSlotInvalid`] if the active slot cannot be captured
    pub fn create(&mut self, name: &str) -> Result<CaptureReport> {
        if self.slot(name).is_some() {
            return Err(Error::NameTaken(name.to_string()));
        }
        validate_name(name)?;

        let captured = self.capture_active()?;

        self.slots.push(Slot::open(&self.root, name)?);
        self.active = name.to_string();
        self.persist()?;

        tracing::info!(slot = name, "created desktop");
        Ok(captured)
    }

    /// Saves the current desktop into the active slot and puts slot `name`
    /// onto the desktop.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSlot`] if `name` does not exist
    /// - [`Error::AlreadyActive`] if `name` is already active
    /// - [`Error::ActiveSlotInvalid`] if the active slot cannot be captured
    /// - any restore error of the target slot; the active pointer is then left
    ///   unchanged
    pub fn activate(&mut self, name: &str) -> Result<SwitchReport> {
        let target = self.slot(name).cloned().ok_or_else(|| Error::UnknownSlot(name.to_string()))?;
        if self.active == name {
            return Err(Error::AlreadyActive(name.to_string()));
        }

        let captured = self.capture_active()?;
        let restored = self.switching(|engine| engine.restore(&target)).inspect_err(|err| {
            tracing::error!(slot = name, %err, "restore failed after the desktop was cleared");
        })?;

        self.active = name.to_string();
        self.persist()?;

        tracing::info!(slot = name, "activated desktop");
        Ok(SwitchReport { captured, restored })
    }

    fn capture_active(&mut self) -> Result<CaptureReport> {
        let active = self.active()?.clone();
        self.switching(|engine| engine.capture(&active))
            .map_err(|err| Error::active_invalid(active.name(), Some(err)))
    }

    fn switching<T>(&mut self, operation: impl FnOnce(&E) -> Result<T>) -> Result<T> {
        self.state = SwitchState::Switching;
        let result = operation(&self.engine);
        self.state = SwitchState::Idle;
        result
    }

    fn persist(&self) -> Result<()> {
        SlotListFile {
            active_desktop: self.active.clone(),
            saves: self.list().into_iter().map(str::to_string).collect(),
        }
        .store(&self.root.join(SAVES_FILE))
    }
}
