//! Error and diagnostic types for descriptor parsing and slicing.

use thiserror::Error;

use crate::importer::TextureKind;

/// Warning codes for non-fatal descriptor diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: A `SubTexture` attribute was missing and a default was used
    MissingAttribute,
    /// W002: Two or more regions share the same name
    DuplicateName,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingAttribute => "W001",
            WarningCode::DuplicateName => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A non-fatal diagnostic produced while parsing a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Index of the region the warning refers to, if any.
    pub index: Option<usize>,
}

impl ParseWarning {
    /// Creates a new parse warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            index: None,
        }
    }

    /// Creates a new parse warning attached to a region index.
    pub fn at_index(code: WarningCode, message: impl Into<String>, index: usize) -> Self {
        Self {
            code,
            message: message.into(),
            index: Some(index),
        }
    }

    /// Creates the diagnostic for a missing `SubTexture` attribute.
    pub fn missing_attribute(index: usize, attribute: &str, default: &str) -> Self {
        Self::at_index(
            WarningCode::MissingAttribute,
            format!(
                "SubTexture #{} has no '{}' attribute, using '{}'",
                index, attribute, default
            ),
            index,
        )
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}: {} (at region {})", self.code, self.message, index),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

/// Errors that abort a descriptor parse. Partial results are never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is not a well-formed descriptor of the expected format.
    #[error("malformed descriptor: {message}")]
    Malformed { message: String },

    /// The XML root element is not `TextureAtlas`.
    #[error("unexpected root element '{found}', expected 'TextureAtlas'")]
    UnexpectedRoot { found: String },

    /// A `SubTexture` attribute was missing while parsing in strict mode.
    #[error("SubTexture #{index} is missing required attribute '{attribute}'")]
    MissingAttribute { index: usize, attribute: String },
}

impl ParseError {
    /// Creates a malformed-input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        ParseError::Malformed {
            message: message.into(),
        }
    }
}

/// Opaque failure reported by the image importer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ImportError {
    /// Human-readable description supplied by the importer.
    pub message: String,
}

impl ImportError {
    /// Creates a new import error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// Conditions that prevent slicing from proceeding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceBlocker {
    /// The descriptor holds no regions.
    #[error("could not find any SubTextures in the descriptor")]
    NoRegions,

    /// The image is smaller than the area covered by the regions.
    #[error(
        "texture size too small ({actual_width}x{actual_height}), it needs to be at least \
         {wanted_width} by {wanted_height} pixels"
    )]
    TextureTooSmall {
        wanted_width: i32,
        wanted_height: i32,
        actual_width: u32,
        actual_height: u32,
    },

    /// The importer's texture kind does not support multiple sprites.
    #[error("texture kind '{0}' cannot be sliced, it needs to be sprite or advanced")]
    UnsupportedTextureKind(TextureKind),

    /// Region names are not unique and duplicates were configured as fatal.
    #[error("duplicate region names: {}", .0.join(", "))]
    DuplicateNames(Vec<String>),
}

/// Top-level error type for a slicing request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceError {
    /// No asset is selected.
    #[error("no image selected")]
    NoAsset,

    /// The selected asset has no usable sibling descriptor.
    #[error("no descriptor found for '{0}'")]
    NoDescriptor(String),

    /// Slicing was blocked by a validation gate.
    #[error("{0}")]
    Blocked(#[from] SliceBlocker),

    /// The importer failed. Nothing is retried.
    #[error("importer failed: {0}")]
    Import(#[from] ImportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::MissingAttribute.code(), "W001");
        assert_eq!(WarningCode::DuplicateName.to_string(), "W002");
    }

    #[test]
    fn test_missing_attribute_warning_display() {
        let warning = ParseWarning::missing_attribute(3, "width", "0");
        assert_eq!(warning.index, Some(3));
        assert_eq!(
            warning.to_string(),
            "W001: SubTexture #3 has no 'width' attribute, using '0' (at region 3)"
        );
    }

    #[test]
    fn test_too_small_message_names_minimum_size() {
        let blocker = SliceBlocker::TextureTooSmall {
            wanted_width: 300,
            wanted_height: 200,
            actual_width: 256,
            actual_height: 256,
        };
        let message = blocker.to_string();
        assert!(message.contains("at least 300 by 200 pixels"), "{}", message);
    }

    #[test]
    fn test_duplicate_names_message() {
        let blocker = SliceBlocker::DuplicateNames(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(blocker.to_string(), "duplicate region names: a, b");
    }

    #[test]
    fn test_slice_error_wraps_import_error_verbatim() {
        let err: SliceError = ImportError::new("disk full").into();
        assert_eq!(err.to_string(), "importer failed: disk full");
    }
}
