//! Application configuration.
//!
//! Every field has a default, so an empty document (or no document at all)
//! yields a working configuration against the public OMDb endpoint.
//!
//! ```
//! use reelmatch::ReelmatchConfig;
//!
//! let config = ReelmatchConfig::from_yaml("debounce_ms: 300").unwrap();
//! assert_eq!(config.debounce_ms, 300);
//! assert_eq!(config.api_base, "https://www.omdbapi.com/");
//! ```

use crate::error::ConfigError;
use reelmatch_widgets::AutocompleteConfig;
use serde::{Deserialize, Serialize};

/// Public OMDb endpoint.
pub const DEFAULT_API_BASE: &str = "https://www.omdbapi.com/";
/// Key embedded in the widget.
pub const DEFAULT_API_KEY: &str = "d9835cc5";

/// Configuration for the comparison widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelmatchConfig {
    /// OMDb endpoint URL
    pub api_base: String,
    /// OMDb API key
    pub api_key: String,
    /// Quiet period before a search is issued
    pub debounce_ms: u64,
    /// Label above each search box
    pub search_label: String,
}

impl Default for ReelmatchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            debounce_ms: 500,
            search_label: "Search for a movie".to_string(),
        }
    }
}

impl ReelmatchConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base",
                message: "must not be empty".to_string(),
            });
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_key",
                message: "must not be empty".to_string(),
            });
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "debounce_ms",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Settings shared by both search boxes.
    #[must_use]
    pub fn autocomplete(&self) -> AutocompleteConfig {
        AutocompleteConfig::default()
            .label(self.search_label.clone())
            .debounce_ms(self.debounce_ms)
    }
}
