//! Descriptor discovery and loading.
//!
//! For a target image the loader looks for a sibling `.xml` descriptor first
//! and falls back to a sibling `.txt` descriptor when the XML one is absent
//! or fails to parse.

use std::path::{Path, PathBuf};

use crate::descriptor::{Descriptor, DescriptorFormat};
use crate::error::ParseError;
use crate::importer::{sibling_path, ImageImporter};
use crate::parse::{parse_as, ParseOptions};

/// Formats in discovery order.
pub const DISCOVERY_ORDER: [DescriptorFormat; 2] = [DescriptorFormat::Xml, DescriptorFormat::Text];

/// A successfully loaded descriptor with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDescriptor {
    /// The parsed descriptor.
    pub descriptor: Descriptor,
    /// Path of the sibling resource it was parsed from.
    pub source_path: PathBuf,
    /// BLAKE3 hash of the source bytes (hex string).
    pub source_hash: String,
}

/// Outcome of one discovery attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// No sibling resource with this extension.
    NotFound,
    /// The resource exists but could not be parsed.
    Failed(ParseError),
    /// The resource was parsed.
    Loaded,
}

/// One discovery attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadAttempt {
    pub format: DescriptorFormat,
    pub path: PathBuf,
    pub outcome: AttemptOutcome,
}

/// Result of descriptor discovery, including every attempt made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// The loaded descriptor, if any attempt succeeded.
    pub loaded: Option<LoadedDescriptor>,
    /// Attempts in the order they were made.
    pub attempts: Vec<LoadAttempt>,
}

impl LoadReport {
    /// Parse errors from failed attempts.
    pub fn failures(&self) -> impl Iterator<Item = (&LoadAttempt, &ParseError)> {
        self.attempts.iter().filter_map(|attempt| match attempt.outcome {
            AttemptOutcome::Failed(ref err) => Some((attempt, err)),
            _ => None,
        })
    }
}

/// Loads the descriptor for `asset`, trying `.xml` then `.txt`.
///
/// Returns `None` when neither sibling exists or neither parses.
pub fn load_descriptor<I: ImageImporter + ?Sized>(
    importer: &I,
    asset: &Path,
    options: &ParseOptions,
) -> Option<LoadedDescriptor> {
    load_descriptor_with(importer, asset, options).loaded
}

/// Loads the descriptor for `asset` and reports every attempt.
pub fn load_descriptor_with<I: ImageImporter + ?Sized>(
    importer: &I,
    asset: &Path,
    options: &ParseOptions,
) -> LoadReport {
    let mut report = LoadReport::default();

    for format in DISCOVERY_ORDER {
        let path = sibling_path(asset, format.extension());

        let Some(bytes) = importer.locate_sibling_descriptor(asset, format.extension()) else {
            tracing::debug!(path = %path.display(), "no {} descriptor", format);
            report.attempts.push(LoadAttempt {
                format,
                path,
                outcome: AttemptOutcome::NotFound,
            });
            continue;
        };

        match parse_bytes(format, &bytes, options) {
            Ok(descriptor) => {
                tracing::debug!(
                    path = %path.display(),
                    regions = descriptor.len(),
                    "loaded {} descriptor",
                    format
                );
                report.attempts.push(LoadAttempt {
                    format,
                    path: path.clone(),
                    outcome: AttemptOutcome::Loaded,
                });
                report.loaded = Some(LoadedDescriptor {
                    descriptor,
                    source_path: path,
                    source_hash: blake3::hash(&bytes).to_hex().to_string(),
                });
                break;
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "descriptor rejected");
                report.attempts.push(LoadAttempt {
                    format,
                    path,
                    outcome: AttemptOutcome::Failed(err),
                });
            }
        }
    }

    report
}

/// Parses raw descriptor bytes. Non-UTF-8 input is malformed.
pub fn parse_bytes(
    format: DescriptorFormat,
    bytes: &[u8],
    options: &ParseOptions,
) -> Result<Descriptor, ParseError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::malformed(format!("descriptor is not valid UTF-8: {}", e)))?;
    // A leading byte-order mark is not part of either format.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    parse_as(format, text, options)
}
