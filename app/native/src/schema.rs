//! JSON Schema for the configuration file.
//!
//! Editors that understand JSON Schema can validate `config.jsonc` against the
//! output of `iconstash --schema`.

use schemars::schema_for;

use crate::config::IconStashConfig;
use crate::core::Result;

/// Renders the configuration schema as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn print_schema() -> Result<String> {
    let schema = schema_for!(IconStashConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_config_keys() {
        let schema: serde_json::Value = serde_json::from_str(&print_schema().unwrap()).unwrap();
        let properties = schema["properties"].as_object().unwrap();

        for key in ["dataDir", "desktopDir", "wait", "restore"] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }
}
