//! Registry configuration.
//!
//! Configuration only names the collection and toggles the event journal.
//! It never alters how promises are created, signed, or burned.

use crate::{PopError, PopResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_NAME: &str = "Proof of Promise";
pub const DEFAULT_SYMBOL: &str = "POP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopConfig {
    /// Collection name reported by `Pop::name`.
    pub name: String,
    /// Collection symbol reported by `Pop::symbol`.
    pub symbol: String,
    /// Keep a journal of successful operations.
    #[serde(rename = "recordEvents")]
    pub record_events: bool,
}

impl Default for PopConfig {
    fn default() -> Self {
        PopConfig {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            record_events: true,
        }
    }
}

impl PopConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `PopError::ConfigError` for malformed JSON or an empty name/symbol.
    pub fn from_json(json: &str) -> PopResult<Self> {
        let config: PopConfig = serde_json::from_str(json)
            .map_err(|e| PopError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> PopResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PopError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> PopResult<()> {
        if self.name.trim().is_empty() {
            return Err(PopError::ConfigError("name must not be empty".to_string()));
        }
        if self.symbol.trim().is_empty() {
            return Err(PopError::ConfigError("symbol must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = PopConfig::from_json(r#"{"symbol":"VOW"}"#).unwrap();
        assert_eq!(config.symbol, "VOW");
        assert_eq!(config.name, DEFAULT_NAME);
        assert!(config.record_events);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(PopConfig::from_json("{}").unwrap(), PopConfig::default());
    }

    #[test]
    fn test_rejects_empty_symbol() {
        assert!(matches!(
            PopConfig::from_json(r#"{"symbol":"  "}"#),
            Err(PopError::ConfigError(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            PopConfig::from_json("{not json"),
            Err(PopError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("pop-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"name":"Vows","recordEvents":false}"#).unwrap();
        let config = PopConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.name, "Vows");
        assert!(!config.record_events);
    }

    #[test]
    fn test_missing_file() {
        assert!(PopConfig::from_file("/nonexistent/pop.json").is_err());
    }
}
