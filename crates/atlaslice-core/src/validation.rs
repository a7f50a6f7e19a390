//! Dimension validation.
//!
//! Compares the canvas a descriptor needs against the actual image size.

use crate::descriptor::Descriptor;
use crate::error::SliceBlocker;

/// Returns true if the image is too small to hold every region.
///
/// Exact fits do not need a resize.
pub fn needs_resize(descriptor: &Descriptor, actual_width: u32, actual_height: u32) -> bool {
    i64::from(descriptor.wanted_width()) > i64::from(actual_width)
        || i64::from(descriptor.wanted_height()) > i64::from(actual_height)
}

/// Checks the gates that must pass before slicing.
pub fn check_sliceable(
    descriptor: &Descriptor,
    actual_width: u32,
    actual_height: u32,
) -> Result<(), SliceBlocker> {
    if descriptor.is_empty() {
        return Err(SliceBlocker::NoRegions);
    }

    if needs_resize(descriptor, actual_width, actual_height) {
        let (wanted_width, wanted_height) = descriptor.wanted_size();
        return Err(SliceBlocker::TextureTooSmall {
            wanted_width,
            wanted_height,
            actual_width,
            actual_height,
        });
    }

    Ok(())
}
