//! Per-slot icon positions file.
//!
//! ```json
//! { "icons": [ { "name": "Notes.txt", "location": [10, 20] } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::desktop::IconRecord;
use crate::persist::{read_json, write_json_atomic};

/// Icons recorded for one slot, in the order the shell reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLocations {
    pub icons: Vec<IconRecord>,
}

impl SlotLocations {
    /// Reads a locations file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLocations`] if the file is missing, unreadable
    /// or not a valid locations document.
    pub fn read(path: &Path) -> Result<Self> {
        read_json(path).map_err(|err| match err {
            Error::Io(io) => Error::malformed_locations(path, io),
            Error::Json(json) => Error::malformed_locations(path, json),
            other => other,
        })
    }

    /// Overwrites the locations file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> { write_json_atomic(path, self) }

    /// Number of recorded icons.
    #[must_use]
    pub fn len(&self) -> usize { self.icons.len() }

    /// Returns `true` if no icon is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.icons.is_empty() }
}

impl From<Vec<IconRecord>> for SlotLocations {
    fn from(icons: Vec<IconRecord>) -> Self { Self { icons } }
}
