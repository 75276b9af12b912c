//! Snapshot Engine.
//!
//! Captures the live desktop into a [`Slot`] and restores a slot back onto the
//! desktop.
//!
//! # Capture
//!
//! 1. Acquire the desktop view (fails fast with `ShellUnavailable`)
//! 2. Enumerate every icon with its position
//! 3. Overwrite the slot's `locations.json`
//! 4. Move every file of the desktop folder into the slot's `icons/` folder
//! 5. Refresh the desktop and wait until its item count drops by the number of
//!    moved files it listed as icons
//!
//! # Restore
//!
//! 1. Acquire the desktop view
//! 2. Read the slot's `locations.json` (fails with `MalformedLocations`)
//! 3. Move every file of the slot's `icons/` folder back onto the desktop
//! 4. Wait until the desktop shows at least as many items as were recorded
//! 5. Turn off auto-arrange and grid snapping
//! 6. Replay each stored position at most once
//! 7. Apply the configured final arrangement flags
//!
//! Failures before any file is moved abort the operation. Individual move
//! failures are reported, never fatal. There is no rollback.

pub mod locations;
pub mod placement;
pub mod slot;
pub mod wait;

pub use locations::SlotLocations;
pub use slot::{Slot, validate_name};
pub use wait::{Clock, SystemClock, WaitPolicy, Waiter};

use crate::core::Result;
use crate::desktop::{DesktopShell, FolderFlags, IconRecord, MoveReport, folder};

/// Result of a successful capture.
#[derive(Debug)]
pub struct CaptureReport {
    /// Icons written to the slot's locations file.
    pub locations: SlotLocations,
    /// Files moved from the desktop into the slot.
    pub moves: MoveReport,
}

/// Result of a successful restore.
#[derive(Debug)]
pub struct RestoreReport {
    /// Number of icons moved to their stored position.
    pub positioned: usize,
    /// Stored records that matched no desktop item.
    pub unmatched: Vec<IconRecord>,
    /// Files moved from the slot back onto the desktop.
    pub moves: MoveReport,
}

/// Captures and restores slots.
///
/// This is the seam the registry drives; tests can substitute a recorder.
pub trait Snapshotter {
    /// Saves the live desktop into `slot` and clears the desktop.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell or the slot storage is unusable.
    fn capture(&self, slot: &Slot) -> Result<CaptureReport>;

    /// Puts `slot`'s icons back onto the desktop at their stored positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell is unusable or the slot's locations file
    /// is malformed.
    fn restore(&self, slot: &Slot) -> Result<RestoreReport>;
}

/// The snapshot engine over a concrete desktop shell.
#[derive(Debug)]
pub struct SnapshotEngine<S, C = SystemClock> {
    shell: S,
    waiter: Waiter<C>,
    final_flags: FolderFlags,
}

impl<S: DesktopShell> SnapshotEngine<S> {
    /// Creates an engine polling on the wall clock.
    pub const fn new(shell: S, policy: WaitPolicy) -> Self {
        Self::with_waiter(shell, Waiter::new(policy))
    }
}

impl<S: DesktopShell, C: Clock> SnapshotEngine<S, C> {
    /// Creates an engine with a custom waiter.
    pub const fn with_waiter(shell: S, waiter: Waiter<C>) -> Self {
        Self {
            shell,
            waiter,
            final_flags: FolderFlags {
                auto_arrange: false,
                snap_to_grid: true,
            },
        }
    }

    /// Sets the arrangement flags left on the desktop after a restore.
    #[must_use]
    pub fn with_final_flags(mut self, flags: FolderFlags) -> Self {
        self.final_flags = flags;
        self
    }

    fn capture_slot(&self, slot: &Slot) -> Result<CaptureReport> {
        let mut view = self.shell.acquire_view()?;
        let desktop = self.shell.desktop_folder()?;

        let icons = view.enumerate_icons()?;
        let before = view.item_count()?;
        let locations = SlotLocations::from(icons);
        locations.write(&slot.locations_path())?;
        tracing::debug!(slot = slot.name(), icons = locations.len(), "recorded icon positions");

        let moves = folder::move_all(&desktop, &slot.icons_dir())?;
        let shown = placement::count_shown(&moves.moved, &locations.icons);

        if moves.moved_count() > 0 {
            view.request_refresh()?;
        }
        if shown > 0 {
            let target = before.saturating_sub(shown);
            self.waiter.until("the desktop to drop the stored icons", || {
                Ok(view.item_count()? <= target)
            })?;
        } else if moves.moved_count() > 0 {
            tracing::debug!(moved = moves.moved_count(), "no moved file was listed as an icon");
        }

        tracing::info!(
            slot = slot.name(),
            icons = locations.len(),
            moved = moves.moved_count(),
            failed = moves.failed.len(),
            "captured desktop"
        );
        Ok(CaptureReport { locations, moves })
    }

    fn restore_slot(&self, slot: &Slot) -> Result<RestoreReport> {
        let mut view = self.shell.acquire_view()?;
        let desktop = self.shell.desktop_folder()?;
        let locations = SlotLocations::read(&slot.locations_path())?;

        let moves = folder::move_all(&slot.icons_dir(), &desktop)?;

        let expected = locations.len();
        if moves.moved_count() > 0 {
            view.request_refresh()?;
        }
        if expected > 0 {
            self.waiter.until("the desktop to show the restored icons", || {
                Ok(view.item_count()? >= expected)
            })?;
        }

        view.apply_flags(FolderFlags::FREE_PLACEMENT)?;

        let live = view.enumerate_icons()?;
        let plan = placement::plan(&live, locations.icons);
        let mut positioned = 0;
        for (name, position) in &plan.moves {
            if view.position_icon(name, *position)? {
                positioned += 1;
            } else {
                tracing::debug!(%name, "icon vanished before it could be positioned");
            }
        }
        for record in &plan.unmatched {
            tracing::warn!(name = %record.name, "no desktop icon matches stored record");
        }

        view.apply_flags(self.final_flags)?;

        tracing::info!(
            slot = slot.name(),
            positioned,
            unmatched = plan.unmatched.len(),
            moved = moves.moved_count(),
            failed = moves.failed.len(),
            "restored desktop"
        );
        Ok(RestoreReport {
            positioned,
            unmatched: plan.unmatched,
            moves,
        })
    }
}

impl<S: DesktopShell, C: Clock> Snapshotter for SnapshotEngine<S, C> {
    fn capture(&self, slot: &Slot) -> Result<CaptureReport> { self.capture_slot(slot) }

    fn restore(&self, slot: &Slot) -> Result<RestoreReport> { self.restore_slot(slot) }
}
