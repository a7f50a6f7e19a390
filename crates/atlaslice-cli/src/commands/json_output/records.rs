//! Output record types for the inspect, check, and slice commands.

use super::{JsonError, JsonWarning};
use atlaslice_core::{DescriptorFormat, Region, SliceMetadata, SpriteMode, TextureKind};
use serde::{Deserialize, Serialize};

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Whether the descriptor parsed
    pub success: bool,
    /// Errors encountered while reading or parsing
    pub errors: Vec<JsonError>,
    /// Parse diagnostics
    pub warnings: Vec<JsonWarning>,
    /// Parsed descriptor (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
    /// BLAKE3 hash of the descriptor file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// Parsed descriptor details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResult {
    /// Descriptor path
    pub descriptor: String,
    /// Format the descriptor was parsed as
    pub format: DescriptorFormat,
    /// Smallest image width that holds every region
    pub wanted_width: i32,
    /// Smallest image height that holds every region
    pub wanted_height: i32,
    /// Regions in document order
    pub regions: Vec<Region>,
}

impl InspectOutput {
    /// Creates a successful inspect output.
    pub fn success(
        result: InspectResult,
        source_hash: String,
        warnings: Vec<JsonWarning>,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
            source_hash: Some(source_hash),
        }
    }

    /// Creates a failed inspect output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            result: None,
            source_hash: None,
        }
    }
}

/// JSON output for the `check` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutput {
    /// Whether the image can be sliced as-is
    pub success: bool,
    /// Blockers and load errors
    pub errors: Vec<JsonError>,
    /// Parse diagnostics
    pub warnings: Vec<JsonWarning>,
    /// Image and descriptor details (when a descriptor was found)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CheckResult>,
}

/// Image and descriptor details reported by `check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Image path
    pub image: String,
    /// Descriptor path
    pub descriptor: String,
    /// Descriptor format
    pub format: DescriptorFormat,
    /// Actual image width
    pub image_width: u32,
    /// Actual image height
    pub image_height: u32,
    /// Width the regions need
    pub wanted_width: i32,
    /// Height the regions need
    pub wanted_height: i32,
    /// Number of regions
    pub region_count: usize,
    /// Whether the image is too small for the regions
    pub needs_resize: bool,
    /// Importer texture kind
    pub texture_kind: TextureKind,
    /// Importer sprite mode
    pub sprite_mode: SpriteMode,
}

impl CheckOutput {
    /// Creates a check output. It is successful when there are no errors.
    pub fn new(
        result: Option<CheckResult>,
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
    ) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
            warnings,
            result,
        }
    }
}

/// JSON output for the `slice` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceOutput {
    /// Whether the image ended up sliced
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Parse diagnostics
    pub warnings: Vec<JsonWarning>,
    /// Slicing details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SliceResult>,
}

/// Slicing details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceResult {
    /// Image path
    pub image: String,
    /// Descriptor path
    pub descriptor: String,
    /// Descriptor format
    pub format: DescriptorFormat,
    /// "updated" or "already_sliced"
    pub status: String,
    /// Whether the sprite mode was switched to multiple
    pub mode_changed: bool,
    /// Slice metadata now recorded by the importer
    pub slices: Vec<SliceMetadata>,
}

impl SliceOutput {
    /// Creates a successful slice output.
    pub fn success(result: SliceResult, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed slice output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}
