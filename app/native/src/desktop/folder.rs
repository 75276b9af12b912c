//! Backing-folder file operations.
//!
//! Moving icons between the desktop folder and a slot's storage is done one
//! entry at a time. A failed move never stops the remaining ones; failures are
//! collected into the [`MoveReport`] so callers can surface them.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::Result;

/// A single entry that could not be moved.
#[derive(Debug)]
pub struct MoveFailure {
    /// File name of the entry.
    pub name: String,
    /// Underlying filesystem error.
    pub error: io::Error,
}

/// Outcome of moving every entry of one folder into another.
#[derive(Debug, Default)]
pub struct MoveReport {
    /// Names of the entries that were moved.
    pub moved: Vec<String>,
    /// Entries that stayed behind.
    pub failed: Vec<MoveFailure>,
}

impl MoveReport {
    /// Returns `true` if every entry was moved.
    #[must_use]
    pub fn is_complete(&self) -> bool { self.failed.is_empty() }

    /// Number of entries that were moved.
    #[must_use]
    pub fn moved_count(&self) -> usize { self.moved.len() }
}

/// Lists the names of every entry directly inside `dir`.
///
/// A missing folder lists as empty. Names that are not valid Unicode are
/// skipped, since they can never be matched against shell display names.
///
/// # Errors
///
/// Returns an error if the folder exists but cannot be read.
pub fn list_entries(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::warn!(name = ?raw, "skipping entry with non-Unicode name"),
        }
    }

    names.sort();
    Ok(names)
}

/// Moves every entry of `from` into `to`, preserving file names.
///
/// `to` is created if missing. Each move is independent.
///
/// # Errors
///
/// Returns an error only if `from` cannot be listed or `to` cannot be created.
pub fn move_all(from: &Path, to: &Path) -> Result<MoveReport> {
    let names = list_entries(from)?;
    fs::create_dir_all(to)?;

    let mut report = MoveReport::default();
    for name in names {
        let source = from.join(&name);
        let target = to.join(&name);

        match move_entry(&source, &target) {
            Ok(()) => {
                tracing::debug!(%name, to = %to.display(), "moved entry");
                report.moved.push(name);
            }
            Err(error) => {
                tracing::warn!(%name, to = %to.display(), %error, "failed to move entry");
                report.failed.push(MoveFailure { name, error });
            }
        }
    }

    Ok(report)
}

/// Moves a single file or folder, refusing to overwrite an existing entry.
fn move_entry(source: &Path, target: &Path) -> io::Result<()> {
    if target.symlink_metadata().is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", target.display()),
        ));
    }

    fs::rename(source, target)
}
