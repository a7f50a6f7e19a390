//! Slicer configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```json
//! {
//!     "alignment": "bottom_center",
//!     "custom_offset": [0.5, 0.0],
//!     "strict_attributes": false,
//!     "duplicate_names": "warn"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alignment::{Alignment, DEFAULT_CUSTOM_OFFSET};
use crate::parse::ParseOptions;

/// What to do when a descriptor contains duplicate region names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Log a diagnostic and slice anyway.
    #[default]
    Warn,
    /// Refuse to slice.
    Reject,
}

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The custom offset has a NaN or infinite component.
    #[error("custom_offset must be finite, got [{}, {}]", .0[0], .0[1])]
    NonFiniteOffset([f32; 2]),
}

/// Settings for a slicing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlicerConfig {
    /// Alignment used to derive every slice's pivot.
    pub alignment: Alignment,
    /// Pivot used when `alignment` is `custom`.
    pub custom_offset: [f32; 2],
    /// Fail on missing `SubTexture` attributes instead of defaulting them.
    pub strict_attributes: bool,
    /// Handling of duplicate region names.
    pub duplicate_names: DuplicatePolicy,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            alignment: Alignment::Center,
            custom_offset: DEFAULT_CUSTOM_OFFSET,
            strict_attributes: false,
            duplicate_names: DuplicatePolicy::Warn,
        }
    }
}

impl SlicerConfig {
    /// Parses a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks values that serde alone cannot reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.custom_offset.iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(ConfigError::NonFiniteOffset(self.custom_offset))
        }
    }

    /// Parse options derived from this config.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict_attributes,
        }
    }
}
