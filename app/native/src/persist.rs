//! JSON file helpers shared by the registry and the snapshot engine.
//!
//! Files are written to a temporary sibling and renamed into place, so a crash
//! mid-write leaves either the old or the new content, never a torn file.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use crate::core::{Error, Result};

/// Serializes `value` as 4-space indented JSON and atomically replaces `path`.
///
/// # Errors
///
/// Returns an error if the parent folder is missing or the file cannot be written.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::other(format!("{} has no parent folder", path.display())))?;

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');

    let mut file = tempfile::NamedTempFile::new_in(parent)?;
    file.write_all(&buffer)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| Error::Io(err.error))?;

    tracing::trace!(path = %path.display(), bytes = buffer.len(), "wrote json file");
    Ok(())
}

/// Reads and deserializes a JSON file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Json`] if it
/// does not match `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
