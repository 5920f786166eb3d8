//! Builder configuration
//!
//! Handed to `mountBuilder` as an optional JSON string. Every field has a
//! default, so `None`, `""` and `"{}"` all produce the default config.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{BuilderError, Result};
use crate::undo::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_UNSAVED_CHANGES_MESSAGE: &str =
    "You have unsaved changes. Are you sure you want to leave?";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderConfig {
    /// Maximum number of undo snapshots
    pub history_limit: usize,

    /// One of off/error/warn/info/debug/trace
    pub log_level: String,

    /// Text shown by the browser's leave-page prompt while dirty
    pub unsaved_changes_message: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_level: "info".to_string(),
            unsaved_changes_message: DEFAULT_UNSAVED_CHANGES_MESSAGE.to_string(),
        }
    }
}

impl BuilderConfig {
    pub fn from_json(json: Option<&str>) -> Result<Self> {
        let Some(json) = json.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let mut config: Self = serde_json::from_str(json).map_err(|e| BuilderError::Config(e.to_string()))?;
        config.history_limit = config.history_limit.max(1);
        Ok(config)
    }

    /// Parsed log level; unknown names fall back to `Info`
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.log_level.to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            other => {
                log::warn!("Unknown log level '{}', using info", other);
                LevelFilter::Info
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_config_is_default() {
        assert_eq!(BuilderConfig::from_json(None).unwrap(), BuilderConfig::default());
        assert_eq!(BuilderConfig::from_json(Some("  ")).unwrap(), BuilderConfig::default());
        assert_eq!(BuilderConfig::from_json(Some("{}")).unwrap().history_limit, 50);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = BuilderConfig::from_json(Some(r#"{"historyLimit": 5}"#)).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.unsaved_changes_message, DEFAULT_UNSAVED_CHANGES_MESSAGE);
    }

    #[test]
    fn test_history_limit_floor() {
        let config = BuilderConfig::from_json(Some(r#"{"historyLimit": 0}"#)).unwrap();
        assert_eq!(config.history_limit, 1);
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(
            BuilderConfig::from_json(Some("{historyLimit")),
            Err(BuilderError::Config(_))
        ));
    }

    #[test]
    fn test_log_level() {
        let mut config = BuilderConfig::default();
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
        config.log_level = "DEBUG".into();
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
        config.log_level = "loud".into();
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
    }
}
