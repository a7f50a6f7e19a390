//! Descriptor parsers.
//!
//! Both parsers are pure: they return a fresh [`Descriptor`] or a
//! [`ParseError`], never a partially-filled result.
//!
//! - [`xml`]: `TextureAtlas` / `SubTexture` markup
//! - [`text`]: one `name _ x y width height` record per line

pub mod text;
pub mod xml;

pub use text::parse_text;
pub use xml::{parse_xml, parse_xml_with};

use crate::descriptor::{Descriptor, DescriptorFormat, Region};
use crate::error::{ParseError, ParseWarning, WarningCode};

/// Options controlling how tolerant a parse is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat a missing `SubTexture` attribute as fatal instead of defaulting it.
    pub strict: bool,
}

impl ParseOptions {
    /// Lenient parsing: missing attributes default and produce a diagnostic.
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Strict parsing: missing attributes abort the parse.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Parses `text` in the given format.
pub fn parse_as(
    format: DescriptorFormat,
    text: &str,
    options: &ParseOptions,
) -> Result<Descriptor, ParseError> {
    match format {
        DescriptorFormat::Xml => parse_xml_with(text, options),
        DescriptorFormat::Text => parse_text(text),
    }
}

/// Builds the descriptor for a finished parse and appends a diagnostic for
/// every region name that is used more than once.
pub(crate) fn finish(
    regions: Vec<Region>,
    format: DescriptorFormat,
    mut diagnostics: Vec<ParseWarning>,
) -> Descriptor {
    let descriptor = Descriptor::new(regions, format);
    for name in descriptor.duplicate_names() {
        let warning = ParseWarning::new(
            WarningCode::DuplicateName,
            format!("region name '{}' is used more than once", name),
        );
        tracing::warn!("{}", warning);
        diagnostics.push(warning);
    }
    descriptor.with_diagnostics(diagnostics)
}

/// Parses a base-10 integer with an optional leading sign.
pub(crate) fn parse_int(value: &str, field: &str) -> Result<i32, ParseError> {
    value.trim().parse::<i32>().map_err(|e| {
        ParseError::malformed(format!("invalid integer '{}' for '{}': {}", value, field, e))
    })
}
