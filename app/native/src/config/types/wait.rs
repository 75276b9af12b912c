//! Wait configuration types.
//!
//! Controls how long the engine polls the desktop after moving files.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::constants::wait::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};

/// Polling limits used while the desktop catches up with its folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WaitConfig {
    /// Milliseconds to wait before giving up with a timeout error.
    /// Set to 0 to wait forever.
    /// Default: 30000
    pub timeout_ms: u64,

    /// Milliseconds between two polls of the desktop item count.
    /// Default: 50
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_config_defaults() {
        let config = WaitConfig::default();
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.poll_interval_ms, 50);
    }

    #[test]
    fn test_wait_config_zero_timeout_is_unbounded() {
        let config: WaitConfig = serde_json::from_str(r#"{ "timeoutMs": 0 }"#).unwrap();
        assert_eq!(config.timeout_ms, 0);
        assert_eq!(config.poll_interval_ms, 50);
    }
}
