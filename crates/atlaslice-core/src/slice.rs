//! Slice metadata builder.
//!
//! Converts descriptor regions into importer slice metadata. Descriptor space
//! has its origin at the top-left with y pointing down; importer space has its
//! origin at the bottom-left with y pointing up, so every rectangle is flipped
//! against the actual image height.

use serde::{Deserialize, Serialize};

use crate::alignment::{pivot_for, Alignment};
use crate::descriptor::{Descriptor, Region};
use crate::error::SliceBlocker;
use crate::validation::check_sliceable;

/// Rectangle in importer space (bottom-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SliceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Slice metadata for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceMetadata {
    /// Region name.
    pub name: String,
    /// Rectangle in importer space.
    pub rect: SliceRect,
    /// Fractional pivot within `rect`.
    pub pivot: [f32; 2],
    /// Alignment the pivot was derived from.
    pub alignment: Alignment,
    /// Nine-slice border (left, bottom, right, top).
    #[serde(default)]
    pub border: [f32; 4],
}

/// Flips a descriptor-space top edge into importer space.
pub fn flip_y(y: i32, height: i32, image_height: i32) -> i32 {
    image_height.saturating_sub(y.saturating_add(height))
}

/// Builds the metadata for a single region.
pub fn slice_for_region(
    region: &Region,
    alignment: Alignment,
    custom_offset: [f32; 2],
    image_height: u32,
) -> SliceMetadata {
    let image_height = i32::try_from(image_height).unwrap_or(i32::MAX);
    SliceMetadata {
        name: region.name.clone(),
        rect: SliceRect {
            x: region.x,
            y: flip_y(region.y, region.height, image_height),
            width: region.width,
            height: region.height,
        },
        pivot: pivot_for(alignment, custom_offset),
        alignment,
        border: [0.0; 4],
    }
}

/// Builds slice metadata for every region, in descriptor order.
///
/// `image_height` must be the actual height of the target image, not the
/// descriptor's wanted height. Identical inputs always produce identical
/// output.
///
/// No dimension checks are made here; [`build_checked`] is the gated entry
/// point used by [`SliceSession`](crate::SliceSession).
pub fn build_slice_metadata(
    descriptor: &Descriptor,
    alignment: Alignment,
    custom_offset: [f32; 2],
    image_height: u32,
) -> Vec<SliceMetadata> {
    descriptor
        .regions()
        .iter()
        .map(|region| slice_for_region(region, alignment, custom_offset, image_height))
        .collect()
}

/// Builds slice metadata, refusing when the descriptor is empty or does not
/// fit in the image.
pub fn build_checked(
    descriptor: &Descriptor,
    alignment: Alignment,
    custom_offset: [f32; 2],
    image_width: u32,
    image_height: u32,
) -> Result<Vec<SliceMetadata>, SliceBlocker> {
    check_sliceable(descriptor, image_width, image_height)?;
    Ok(build_slice_metadata(
        descriptor,
        alignment,
        custom_offset,
        image_height,
    ))
}
