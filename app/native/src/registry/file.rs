//! Slot list file.
//!
//! ```json
//! { "active_desktop": "Work", "saves": ["Default", "Work"] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::core::constants::DEFAULT_SLOT;
use crate::persist::{read_json, write_json_atomic};

/// Persisted registry state: every slot name and the active pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotListFile {
    /// Name of the slot whose icons are currently on the desktop.
    pub active_desktop: String,
    /// Slot names in creation order.
    #[serde(default)]
    pub saves: Vec<String>,
}

impl Default for SlotListFile {
    fn default() -> Self {
        Self {
            active_desktop: DEFAULT_SLOT.to_string(),
            saves: vec![DEFAULT_SLOT.to_string()],
        }
    }
}

impl SlotListFile {
    /// Reads the slot list, writing the default one first if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or created.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return read_json(path);
        }

        tracing::info!(path = %path.display(), "creating slot list");
        let file = Self::default();
        file.store(path)?;
        Ok(file)
    }

    /// Overwrites the slot list file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn store(&self, path: &Path) -> Result<()> { write_json_atomic(path, self) }
}
