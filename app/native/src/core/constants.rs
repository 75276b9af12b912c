//! Application constants for IconStash.
//!
//! Names of the files and folders that make up the saved-data layout.

/// The application name.
pub const APP_NAME: &str = "IconStash";

/// Application version from Cargo.toml.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the slot every fresh data root starts with.
pub const DEFAULT_SLOT: &str = "Default";

/// Saved-data layout under the data root.
pub mod layout {
    /// Slot list file at the data root.
    pub const SAVES_FILE: &str = "saves.json";

    /// Folder holding one subfolder per slot.
    pub const SAVES_DIR: &str = "saves";

    /// Per-slot folder holding the slot's icon files while it is inactive.
    pub const ICONS_DIR: &str = "icons";

    /// Per-slot icon positions file.
    pub const LOCATIONS_FILE: &str = "locations.json";
}

/// Default configuration file names.
pub mod config {
    /// Directory name under the platform config directory.
    pub const CONFIG_DIR: &str = "iconstash";

    /// Primary config file name.
    pub const CONFIG_FILE: &str = "config.jsonc";

    /// Alternative config file name (JSON without comments).
    pub const CONFIG_FILE_ALT: &str = "config.json";

    /// Environment variable overriding the data root.
    pub const DATA_DIR_ENV: &str = "ICONSTASH_DATA_DIR";
}

/// Polling defaults for waiting on the shell.
pub mod wait {
    /// Give up waiting for the shell after this long.
    pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

    /// Delay between two item-count polls.
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;
}
