//! Canonical in-memory representation of a parsed texture atlas.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ParseWarning;

/// One named rectangular area of the atlas.
///
/// Coordinates are in descriptor space: origin at the top-left, y increasing
/// downward. Values are taken as-is from the descriptor, including zero or
/// negative extents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Region name.
    pub name: String,
    /// Horizontal offset from the left edge.
    pub x: i32,
    /// Vertical offset from the top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Region {
    /// Creates a new region.
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge in descriptor space (`y + height`).
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

/// The source format a descriptor was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorFormat {
    /// `TextureAtlas` XML markup.
    Xml,
    /// Line-oriented `name _ x y width height` records.
    Text,
}

impl DescriptorFormat {
    /// Returns the sibling file extension for this format (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            DescriptorFormat::Xml => "xml",
            DescriptorFormat::Text => "txt",
        }
    }

    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptorFormat::Xml => "xml",
            DescriptorFormat::Text => "text",
        }
    }
}

impl std::fmt::Display for DescriptorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed atlas: ordered regions plus the canvas size they require.
///
/// `wanted_width` and `wanted_height` are derived in [`Descriptor::new`] and
/// cannot be set independently, so they always match the region set.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    regions: Vec<Region>,
    wanted_width: i32,
    wanted_height: i32,
    format: DescriptorFormat,
    diagnostics: Vec<ParseWarning>,
}

impl Descriptor {
    /// Creates a descriptor, computing the wanted canvas size from `regions`.
    pub fn new(regions: Vec<Region>, format: DescriptorFormat) -> Self {
        let (wanted_width, wanted_height) = wanted_size(&regions);
        Self {
            regions,
            wanted_width,
            wanted_height,
            format,
            diagnostics: Vec::new(),
        }
    }

    /// Attaches parse diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: Vec<ParseWarning>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Regions in descriptor order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the descriptor holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Maximum `x + width` over all regions, 0 when empty.
    pub fn wanted_width(&self) -> i32 {
        self.wanted_width
    }

    /// Maximum `y + height` over all regions, 0 when empty.
    pub fn wanted_height(&self) -> i32 {
        self.wanted_height
    }

    /// `(wanted_width, wanted_height)`.
    pub fn wanted_size(&self) -> (i32, i32) {
        (self.wanted_width, self.wanted_height)
    }

    /// Format the descriptor was parsed from.
    pub fn format(&self) -> DescriptorFormat {
        self.format
    }

    /// Non-fatal diagnostics collected while parsing.
    pub fn diagnostics(&self) -> &[ParseWarning] {
        &self.diagnostics
    }

    /// Names that occur more than once, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for region in &self.regions {
            *counts.entry(region.name.as_str()).or_default() += 1;
        }

        let mut duplicates = Vec::new();
        for region in &self.regions {
            if counts.get(region.name.as_str()).copied().unwrap_or(0) > 1
                && !duplicates.contains(&region.name)
            {
                duplicates.push(region.name.clone());
            }
        }
        duplicates
    }
}

fn wanted_size(regions: &[Region]) -> (i32, i32) {
    regions.iter().fold((0, 0), |(width, height), region| {
        (width.max(region.right()), height.max(region.bottom()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_descriptor_wants_nothing() {
        let descriptor = Descriptor::new(Vec::new(), DescriptorFormat::Xml);
        assert!(descriptor.is_empty());
        assert_eq!(descriptor.wanted_size(), (0, 0));
    }

    #[test]
    fn test_wanted_size_is_max_extent() {
        let descriptor = Descriptor::new(
            vec![
                Region::new("a", 0, 0, 10, 10),
                Region::new("b", 10, 0, 5, 5),
                Region::new("c", 2, 30, 4, 4),
            ],
            DescriptorFormat::Text,
        );
        assert_eq!(descriptor.wanted_width(), 15);
        assert_eq!(descriptor.wanted_height(), 34);
        assert_eq!(descriptor.len(), 3);
    }

    #[test]
    fn test_negative_extents_do_not_lower_below_zero() {
        let descriptor = Descriptor::new(
            vec![Region::new("neg", 0, 0, -5, -5)],
            DescriptorFormat::Text,
        );
        assert_eq!(descriptor.wanted_size(), (0, 0));
    }

    #[test]
    fn test_duplicate_names_first_seen_order() {
        let descriptor = Descriptor::new(
            vec![
                Region::new("b", 0, 0, 1, 1),
                Region::new("a", 0, 0, 1, 1),
                Region::new("b", 0, 0, 1, 1),
                Region::new("a", 0, 0, 1, 1),
                Region::new("c", 0, 0, 1, 1),
            ],
            DescriptorFormat::Xml,
        );
        assert_eq!(descriptor.duplicate_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(DescriptorFormat::Xml.extension(), "xml");
        assert_eq!(DescriptorFormat::Text.extension(), "txt");
        assert_eq!(DescriptorFormat::Text.to_string(), "text");
    }
}
