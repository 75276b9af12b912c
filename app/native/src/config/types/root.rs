//! Root configuration types and loading functions.
//!
//! Contains the main `IconStashConfig` struct and configuration file loading utilities.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::restore::RestoreConfig;
use super::wait::WaitConfig;
use crate::core::Error;
use crate::core::constants::APP_NAME;
use crate::core::constants::config::{CONFIG_DIR, CONFIG_FILE, CONFIG_FILE_ALT};

/// Root configuration structure for IconStash.
///
/// Every section is optional; an absent file behaves like `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct IconStashConfig {
    /// Folder holding the slot list and every saved desktop.
    /// Supports `~` expansion.
    /// Default: the platform data directory followed by `IconStash`.
    pub data_dir: Option<String>,

    /// Folder backing the desktop surface.
    /// Supports `~` expansion.
    /// Default: the folder reported by the operating system.
    pub desktop_dir: Option<String>,

    /// Polling limits used after files are moved.
    pub wait: WaitConfig,

    /// Arrangement left on the desktop after a restore.
    pub restore: RestoreConfig,
}

impl IconStashConfig {
    /// Returns the data root, expanding `~`.
    ///
    /// Falls back to the platform data directory when `dataDir` is unset.
    #[must_use]
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .as_deref()
            .map(expand_path)
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_NAME)))
    }

    /// Returns the configured desktop folder override, expanding `~`.
    #[must_use]
    pub fn resolve_desktop_dir(&self) -> Option<PathBuf> {
        self.desktop_dir.as_deref().map(expand_path)
    }
}

fn expand_path(raw: &str) -> PathBuf { PathBuf::from(shellexpand::tilde(raw).as_ref()) }

/// Errors that can occur when loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    NotFound(PathBuf),
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "No configuration file found at {}", path.display())
            }
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self { Self::config(err.to_string()) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &[CONFIG_FILE, CONFIG_FILE_ALT];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/iconstash/` when the variable is set
/// 2. `~/.config/iconstash/`
/// 3. the platform config directory (`%APPDATA%\iconstash\` on Windows)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_search = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        dirs_to_search.push(PathBuf::from(xdg_config).join(CONFIG_DIR));
    }
    if let Some(home) = dirs::home_dir() {
        dirs_to_search.push(home.join(".config").join(CONFIG_DIR));
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_search.push(config_dir.join(CONFIG_DIR));
    }

    let mut paths = Vec::new();
    for dir in dirs_to_search {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME is often ~/.config itself
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Loads the configuration from a specific file path.
///
/// The configuration file supports JSONC format (JSON with comments).
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::IoError` if it could not be read and
/// `ConfigError::ParseError` if it is not a valid configuration.
pub fn load_config_from_path(path: &Path) -> Result<IconStashConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config = serde_json::from_reader(reader)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Loads the configuration from the first available config file.
///
/// Returns the defaults together with `None` when no file exists, otherwise
/// the parsed configuration and the path it came from.
///
/// # Errors
///
/// Returns `ConfigError::IoError` or `ConfigError::ParseError` if the first
/// existing file cannot be read or parsed.
pub fn load_config() -> Result<(IconStashConfig, Option<PathBuf>), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            let config = load_config_from_path(&path)?;
            return Ok((config, Some(path)));
        }
    }

    tracing::debug!("no configuration file found, using defaults");
    Ok((IconStashConfig::default(), None))
}
