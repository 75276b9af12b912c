//! Unified error types for IconStash.
//!
//! Every layer (shell bridge, snapshot engine, save registry) reports failures
//! through the single [`Error`] enum so the CLI can render them uniformly.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Base error type for all IconStash errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The desktop window or its folder view could not be located.
    #[error("Desktop shell unavailable: {0}")]
    ShellUnavailable(String),

    /// The shell reported an invalid icon count or refused to enumerate items.
    #[error("Unable to enumerate desktop icons: {0}")]
    EnumerationFailed(String),

    /// A slot's locations file is missing or cannot be parsed.
    #[error("Malformed locations file {}: {reason}", .path.display())]
    MalformedLocations { path: PathBuf, reason: String },

    /// A slot with the requested name already exists.
    #[error("A desktop named \"{0}\" already exists")]
    NameTaken(String),

    /// No slot with the requested name exists.
    #[error("A save named \"{0}\" does not exist")]
    UnknownSlot(String),

    /// The requested slot is already the one on the desktop.
    #[error("\"{0}\" is already the active desktop")]
    AlreadyActive(String),

    /// The active slot pointer does not resolve, or its capture failed.
    #[error("The active desktop \"{name}\" is invalid")]
    ActiveSlotInvalid {
        name: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// The shell did not reflect a file change within the configured timeout.
    #[error("Timed out after {waited:?} waiting for {what}")]
    WaitTimeout { what: String, waited: Duration },

    /// The slot name cannot be used as a save folder name.
    #[error("Invalid save name \"{name}\": {reason}")]
    InvalidSlotName { name: String, reason: String },

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid arguments provided.
    #[error("{0}")]
    InvalidArguments(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a shell unavailable error.
    pub fn shell_unavailable(msg: impl Into<String>) -> Self { Self::ShellUnavailable(msg.into()) }

    /// Creates an enumeration failure.
    pub fn enumeration(msg: impl Into<String>) -> Self { Self::EnumerationFailed(msg.into()) }

    /// Creates a malformed locations error for the given file.
    pub fn malformed_locations(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MalformedLocations {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Wraps a failure that made the active slot unusable.
    pub fn active_invalid(name: impl Into<String>, source: Option<Self>) -> Self {
        Self::ActiveSlotInvalid {
            name: name.into(),
            source: source.map(Box::new),
        }
    }

    /// Creates a wait timeout error.
    pub fn wait_timeout(what: impl Into<String>, waited: Duration) -> Self {
        Self::WaitTimeout { what: what.into(), waited }
    }

    /// Creates an invalid slot name error.
    pub fn invalid_slot_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSlotName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }

    /// Creates an invalid arguments error.
    pub fn invalid_args(msg: impl Into<String>) -> Self { Self::InvalidArguments(msg.into()) }

    /// Creates a generic error.
    pub fn other(msg: impl Into<String>) -> Self { Self::Other(msg.into()) }
}

impl From<String> for Error {
    fn from(msg: String) -> Self { Self::Other(msg) }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self { Self::Other(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("Invalid JSON");
        assert_eq!(err.to_string(), "Configuration error: Invalid JSON");
    }

    #[test]
    fn test_error_from_string() {
        let err: Error = "test error".into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn test_active_invalid_keeps_source() {
        let err = Error::active_invalid("Default", Some(Error::shell_unavailable("no desktop")));
        assert!(err.to_string().contains("Default"));

        let source = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(source.contains("no desktop"));
    }

    #[test]
    fn test_active_invalid_without_source() {
        let err = Error::active_invalid("Ghost", None);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_malformed_locations_mentions_path() {
        let err = Error::malformed_locations("/tmp/Work/locations.json", "missing field `icons`");
        let msg = err.to_string();
        assert!(msg.contains("locations.json"));
        assert!(msg.contains("missing field"));
    }

    #[test]
    fn test_wait_timeout_display() {
        let err = Error::wait_timeout("desktop to refresh", Duration::from_millis(1500));
        assert!(err.to_string().contains("desktop to refresh"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
