//! Property-based descriptor tests for Atlaslice using proptest.
//!
//! These tests verify that parsing never panics on arbitrary input and that
//! wanted size, resize checks, and slice geometry hold for arbitrary regions.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p atlaslice-tests --test proptest_descriptor
//! ```

use proptest::prelude::*;

use atlaslice_core::slice::flip_y;
use atlaslice_core::{
    build_slice_metadata, needs_resize, parse_text, parse_xml, pivot_for, Alignment, Descriptor,
    DescriptorFormat, Region,
};
use atlaslice_tests::{text_descriptor, xml_descriptor};

// ============================================================================
// Strategies
// ============================================================================

/// A region with non-negative geometry small enough to never overflow.
fn region() -> impl Strategy<Value = (String, i32, i32, i32, i32)> {
    (
        "[a-z][a-z0-9_]{0,11}",
        0i32..2048,
        0i32..2048,
        0i32..512,
        0i32..512,
    )
}

fn regions() -> impl Strategy<Value = Vec<(String, i32, i32, i32, i32)>> {
    prop::collection::vec(region(), 0..24)
}

fn as_specs(regions: &[(String, i32, i32, i32, i32)]) -> Vec<(&str, i32, i32, i32, i32)> {
    regions
        .iter()
        .map(|(name, x, y, w, h)| (name.as_str(), *x, *y, *w, *h))
        .collect()
}

// ============================================================================
// Parsing
// ============================================================================

proptest! {
    /// Arbitrary text never panics the text parser.
    #[test]
    fn text_parser_never_panics(s in "\\PC{0,200}") {
        let _ = parse_text(&s);
    }

    /// Arbitrary text never panics the XML parser.
    #[test]
    fn xml_parser_never_panics(s in "\\PC{0,200}") {
        let _ = parse_xml(&s);
    }

    /// Lines without exactly six tokens never produce a region.
    #[test]
    fn non_record_lines_are_skipped(
        tokens in prop::collection::vec("[a-z0-9]{1,4}", 0..12)
            .prop_filter("not six tokens", |t| t.len() != 6)
    ) {
        let line = tokens.join(" ");
        let descriptor = parse_text(&line).unwrap();
        prop_assert!(descriptor.is_empty());
    }

    /// The same regions give the same model in both formats.
    #[test]
    fn formats_agree(regions in regions()) {
        let specs = as_specs(&regions);
        let from_xml = parse_xml(&xml_descriptor(&specs)).unwrap();
        let from_text = parse_text(&text_descriptor(&specs)).unwrap();

        prop_assert_eq!(from_xml.regions(), from_text.regions());
        prop_assert_eq!(from_xml.len(), regions.len());
    }
}

// ============================================================================
// Wanted size and resize checks
// ============================================================================

proptest! {
    /// Wanted size is the maximum right and bottom edge.
    #[test]
    fn wanted_size_is_max_extent(regions in regions()) {
        let descriptor = Descriptor::new(
            regions
                .iter()
                .map(|(n, x, y, w, h)| Region::new(n.clone(), *x, *y, *w, *h))
                .collect(),
            DescriptorFormat::Text,
        );

        let max_right = regions.iter().map(|(_, x, _, w, _)| x + w).max().unwrap_or(0);
        let max_bottom = regions.iter().map(|(_, _, y, _, h)| y + h).max().unwrap_or(0);
        prop_assert_eq!(descriptor.wanted_size(), (max_right, max_bottom));
    }

    /// An image needs a resize exactly when it is smaller than the wanted size.
    #[test]
    fn needs_resize_matches_wanted_size(
        regions in regions(),
        width in 0u32..3000,
        height in 0u32..3000,
    ) {
        let specs = as_specs(&regions);
        let descriptor = parse_text(&text_descriptor(&specs)).unwrap();
        let (wanted_width, wanted_height) = descriptor.wanted_size();

        let expected = i64::from(wanted_width) > i64::from(width)
            || i64::from(wanted_height) > i64::from(height);
        prop_assert_eq!(needs_resize(&descriptor, width, height), expected);
        prop_assert!(!needs_resize(
            &descriptor,
            wanted_width.max(0) as u32,
            wanted_height.max(0) as u32
        ));
    }
}

// ============================================================================
// Slice geometry
// ============================================================================

proptest! {
    /// Flipping twice against the same height gives back the original edge.
    #[test]
    fn flip_y_is_an_involution(y in -4096i32..4096, h in 0i32..4096, image_height in 0i32..8192) {
        prop_assert_eq!(flip_y(flip_y(y, h, image_height), h, image_height), y);
    }

    /// Metadata keeps order, names, x, and size; only y is flipped.
    #[test]
    fn metadata_preserves_regions(regions in regions(), image_height in 0u32..4096) {
        let specs = as_specs(&regions);
        let descriptor = parse_text(&text_descriptor(&specs)).unwrap();
        let slices = build_slice_metadata(&descriptor, Alignment::Center, [0.5, 0.5], image_height);

        prop_assert_eq!(slices.len(), descriptor.len());
        for (slice, region) in slices.iter().zip(descriptor.regions()) {
            prop_assert_eq!(&slice.name, &region.name);
            prop_assert_eq!(slice.rect.x, region.x);
            prop_assert_eq!(slice.rect.width, region.width);
            prop_assert_eq!(slice.rect.height, region.height);
            prop_assert_eq!(
                slice.rect.y,
                image_height as i32 - (region.y + region.height)
            );
        }
    }

    /// Named alignments always give a pivot inside the unit square.
    #[test]
    fn named_pivots_are_unit_interval(code in 0u8..9, offset in prop::array::uniform2(-10.0f32..10.0)) {
        let alignment = Alignment::from_code(code).unwrap();
        let pivot = pivot_for(alignment, offset);
        prop_assert!((0.0..=1.0).contains(&pivot[0]));
        prop_assert!((0.0..=1.0).contains(&pivot[1]));
    }
}
