//! A named save slot and its on-disk storage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::locations::SlotLocations;
use crate::core::constants::layout::{ICONS_DIR, LOCATIONS_FILE, SAVES_DIR};
use crate::core::{Error, Result};

/// Longest accepted slot name.
const MAX_NAME_LEN: usize = 64;

/// Characters that cannot appear in a folder name on the desktop's filesystem.
static FORBIDDEN_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("forbidden character pattern is valid")
});

/// A saved desktop.
///
/// While the slot is inactive its icon files live in [`Slot::icons_dir`] and
/// their positions in [`Slot::locations_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    name: String,
    storage_path: PathBuf,
}

impl Slot {
    /// Opens the slot `name` under the data root, creating its storage if needed.
    ///
    /// Ensures `saves/<name>/`, its `icons/` folder and an empty
    /// `locations.json` exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSlotName`] for names that cannot be folder names,
    /// or an IO error if the storage cannot be created.
    pub fn open(root: &Path, name: &str) -> Result<Self> {
        validate_name(name)?;

        let slot = Self {
            name: name.to_string(),
            storage_path: root.join(SAVES_DIR).join(name),
        };
        slot.ensure_storage()?;
        Ok(slot)
    }

    /// The slot's unique name.
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Folder holding everything that belongs to this slot.
    #[must_use]
    pub fn storage_path(&self) -> &Path { &self.storage_path }

    /// Folder holding the slot's icon files while it is inactive.
    #[must_use]
    pub fn icons_dir(&self) -> PathBuf { self.storage_path.join(ICONS_DIR) }

    /// Path of the slot's icon positions file.
    #[must_use]
    pub fn locations_path(&self) -> PathBuf { self.storage_path.join(LOCATIONS_FILE) }

    fn ensure_storage(&self) -> Result<()> {
        fs::create_dir_all(self.icons_dir())?;

        let locations = self.locations_path();
        if !locations.exists() {
            tracing::debug!(slot = %self.name, "creating empty locations file");
            SlotLocations::default().write(&locations)?;
        }

        Ok(())
    }
}

/// Checks that `name` can be used as a save folder name.
///
/// # Errors
///
/// Returns [`Error::InvalidSlotName`] describing the first violated rule.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty".to_string())
    } else if name.chars().count() > MAX_NAME_LEN {
        Some(format!("name is longer than {MAX_NAME_LEN} characters"))
    } else if name == "." || name == ".." {
        Some("name is reserved".to_string())
    } else if name.ends_with('.') || name.ends_with(' ') {
        Some("name cannot end with a dot or a space".to_string())
    } else if let Some(found) = FORBIDDEN_CHARS.find(name) {
        Some(format!("name contains the forbidden character {:?}", found.as_str()))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::invalid_slot_name(name, reason)),
        None => Ok(()),
    }
}
