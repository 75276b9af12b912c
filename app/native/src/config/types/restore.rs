//! Restore configuration types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::desktop::FolderFlags;

/// Arrangement left on the desktop once a restore has placed every icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RestoreConfig {
    /// Let the shell auto-arrange icons after the restore.
    /// Turning this on discards the restored positions.
    /// Default: false
    pub auto_arrange: bool,

    /// Snap icons to the shell's grid after the restore.
    /// Default: true
    pub snap_to_grid: bool,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            auto_arrange: false,
            snap_to_grid: true,
        }
    }
}

impl From<&RestoreConfig> for FolderFlags {
    fn from(config: &RestoreConfig) -> Self {
        Self {
            auto_arrange: config.auto_arrange,
            snap_to_grid: config.snap_to_grid,
        }
    }
}
