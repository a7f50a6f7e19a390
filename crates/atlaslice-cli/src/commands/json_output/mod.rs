//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; the structured output is printed to stdout
//! and logs go to stderr, so the output can be piped straight into other tools.

mod convert;
mod records;

pub use convert::{
    load_failures_to_json, parse_error_to_json, parse_warning_to_json, slice_error_to_json,
};
pub use records::{
    CheckOutput, CheckResult, InspectOutput, InspectResult, SliceOutput, SliceResult,
};

use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// No usable sibling descriptor was found
    pub const NO_DESCRIPTOR: &str = "CLI_002";
    /// Descriptor could not be parsed
    pub const DESCRIPTOR_PARSE: &str = "CLI_003";
    /// Config file could not be loaded
    pub const CONFIG: &str = "CLI_004";
    /// Descriptor has no regions
    pub const NO_REGIONS: &str = "CLI_005";
    /// Image is smaller than the descriptor needs
    pub const TEXTURE_TOO_SMALL: &str = "CLI_006";
    /// Texture kind does not allow multiple sprites
    pub const UNSUPPORTED_TEXTURE_KIND: &str = "CLI_007";
    /// Duplicate region names with duplicates rejected
    pub const DUPLICATE_NAMES: &str = "CLI_008";
    /// The importer failed to record slices
    pub const IMPORT_FAILED: &str = "CLI_009";
    /// No image selected
    pub const NO_IMAGE: &str = "CLI_010";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Suggestion for fixing the error (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
            suggestion: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Index of the region the warning refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<usize>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
            region: None,
        }
    }

    /// Sets the file path for this warning.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the region index for this warning.
    pub fn with_region(mut self, region: usize) -> Self {
        self.region = Some(region);
        self
    }
}
