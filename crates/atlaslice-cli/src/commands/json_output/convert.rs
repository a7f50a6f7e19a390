//! Conversions from library errors and diagnostics into JSON records.

use std::path::Path;

use super::{error_codes, JsonError, JsonWarning};
use atlaslice_core::{LoadReport, ParseError, ParseWarning, SliceBlocker, SliceError};

/// Converts a parse diagnostic into a JSON warning.
pub fn parse_warning_to_json(warning: &ParseWarning, file: &str) -> JsonWarning {
    let json = JsonWarning::new(warning.code.code(), &warning.message).with_file(file);
    match warning.index {
        Some(index) => json.with_region(index),
        None => json,
    }
}

/// Converts a parse error into a JSON error.
pub fn parse_error_to_json(error: &ParseError, file: &str) -> JsonError {
    JsonError::new(error_codes::DESCRIPTOR_PARSE, error.to_string()).with_file(file)
}

/// Explains why no descriptor was loaded for `image`: one error per
/// descriptor that failed to parse, then a final "no descriptor" error.
pub fn load_failures_to_json(report: &LoadReport, image: &Path) -> Vec<JsonError> {
    let mut errors: Vec<JsonError> = report
        .failures()
        .map(|(attempt, err)| parse_error_to_json(err, &attempt.path.display().to_string()))
        .collect();

    errors.push(
        JsonError::new(
            error_codes::NO_DESCRIPTOR,
            format!("no usable descriptor for '{}'", image.display()),
        )
        .with_file(image.display().to_string())
        .with_suggestion("add a .xml or .txt descriptor with the same base name as the image"),
    );
    errors
}

/// Converts a slicing error into a JSON error.
pub fn slice_error_to_json(error: &SliceError, image: &Path) -> JsonError {
    let file = image.display().to_string();
    let message = error.to_string();
    let json = match error {
        SliceError::NoAsset => JsonError::new(error_codes::NO_IMAGE, message),
        SliceError::NoDescriptor(_) => JsonError::new(error_codes::NO_DESCRIPTOR, message),
        SliceError::Import(_) => JsonError::new(error_codes::IMPORT_FAILED, message),
        SliceError::Blocked(blocker) => {
            let json = JsonError::new(blocker_code(blocker), message);
            match blocker {
                SliceBlocker::TextureTooSmall {
                    wanted_width,
                    wanted_height,
                    ..
                } => json.with_suggestion(format!(
                    "resize the image to at least {}x{}",
                    wanted_width, wanted_height
                )),
                SliceBlocker::UnsupportedTextureKind(_) => {
                    json.with_suggestion("set texture_kind to \"sprite\" or \"advanced\"")
                }
                _ => json,
            }
        }
    };
    json.with_file(file)
}

fn blocker_code(blocker: &SliceBlocker) -> &'static str {
    match blocker {
        SliceBlocker::NoRegions => error_codes::NO_REGIONS,
        SliceBlocker::TextureTooSmall { .. } => error_codes::TEXTURE_TOO_SMALL,
        SliceBlocker::UnsupportedTextureKind(_) => error_codes::UNSUPPORTED_TEXTURE_KIND,
        SliceBlocker::DuplicateNames(_) => error_codes::DUPLICATE_NAMES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlaslice_core::{ImportError, TextureKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_warning_keeps_code_and_region() {
        let warning = ParseWarning::missing_attribute(1, "x", "0");
        let json = parse_warning_to_json(&warning, "hero.xml");
        assert_eq!(json.code, "W001");
        assert_eq!(json.region, Some(1));
        assert_eq!(json.file.as_deref(), Some("hero.xml"));
    }

    #[test]
    fn test_blocker_codes() {
        let image = Path::new("hero.png");
        let cases = [
            (SliceBlocker::NoRegions, error_codes::NO_REGIONS),
            (
                SliceBlocker::TextureTooSmall {
                    wanted_width: 10,
                    wanted_height: 10,
                    actual_width: 5,
                    actual_height: 5,
                },
                error_codes::TEXTURE_TOO_SMALL,
            ),
            (
                SliceBlocker::UnsupportedTextureKind(TextureKind::Default),
                error_codes::UNSUPPORTED_TEXTURE_KIND,
            ),
            (
                SliceBlocker::DuplicateNames(vec!["a".to_string()]),
                error_codes::DUPLICATE_NAMES,
            ),
        ];
        for (blocker, code) in cases {
            let json = slice_error_to_json(&SliceError::Blocked(blocker), image);
            assert_eq!(json.code, code);
        }
    }

    #[test]
    fn test_too_small_suggests_size() {
        let err = SliceError::Blocked(SliceBlocker::TextureTooSmall {
            wanted_width: 300,
            wanted_height: 200,
            actual_width: 256,
            actual_height: 256,
        });
        let json = slice_error_to_json(&err, Path::new("hero.png"));
        assert_eq!(
            json.suggestion.as_deref(),
            Some("resize the image to at least 300x200")
        );
    }

    #[test]
    fn test_import_error_message_is_verbatim() {
        let err = SliceError::Import(ImportError::new("disk full"));
        let json = slice_error_to_json(&err, Path::new("hero.png"));
        assert_eq!(json.code, error_codes::IMPORT_FAILED);
        assert_eq!(json.message, "importer failed: disk full");
    }

    #[test]
    fn test_load_failures_end_with_no_descriptor() {
        let errors = load_failures_to_json(&LoadReport::default(), Path::new("hero.png"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, error_codes::NO_DESCRIPTOR);
    }
}
