//! The image importer seam.
//!
//! The importer owns the target image and whatever slice metadata has been
//! applied to it. This crate only reads from it and hands it finished
//! metadata; how the importer stores that metadata is its own business.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::slice::SliceMetadata;

/// The importer's texture type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    /// Plain texture.
    Default,
    /// Normal map.
    NormalMap,
    /// Sprite texture.
    #[default]
    Sprite,
    /// Advanced texture with all import settings exposed.
    Advanced,
}

impl TextureKind {
    /// Returns true if textures of this kind may hold multiple sprites.
    pub fn supports_slicing(&self) -> bool {
        matches!(self, TextureKind::Sprite | TextureKind::Advanced)
    }

    /// Returns the kind as a string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureKind::Default => "default",
            TextureKind::NormalMap => "normal_map",
            TextureKind::Sprite => "sprite",
            TextureKind::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for TextureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the importer treats the image as one sprite or a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteMode {
    /// The whole image is a single sprite.
    #[default]
    Single,
    /// The image is split into the applied slices.
    Multiple,
}

/// Host image-import pipeline.
///
/// `asset` identifies the target image by its path.
pub trait ImageImporter {
    /// Pixel dimensions `(width, height)` of the image.
    fn image_dimensions(&self, asset: &Path) -> Result<(u32, u32), ImportError>;

    /// Texture type configured for the image.
    fn texture_kind(&self, asset: &Path) -> Result<TextureKind, ImportError>;

    /// Sprite mode configured for the image.
    fn sprite_mode(&self, asset: &Path) -> Result<SpriteMode, ImportError>;

    /// Slice metadata currently recorded for the image.
    fn current_slices(&self, asset: &Path) -> Result<Vec<SliceMetadata>, ImportError>;

    /// Records `slices` and `mode` for the image and reimports it.
    ///
    /// On failure the previously recorded metadata must be left untouched.
    fn apply_slices(
        &self,
        asset: &Path,
        mode: SpriteMode,
        slices: &[SliceMetadata],
    ) -> Result<(), ImportError>;

    /// Raw bytes of the resource next to `asset` with the given extension
    /// (without the dot), if one exists.
    fn locate_sibling_descriptor(&self, asset: &Path, extension: &str) -> Option<Vec<u8>>;

    /// Enters batch editing mode.
    fn begin_batch_edit(&self) {}

    /// Leaves batch editing mode.
    fn end_batch_edit(&self) {}
}

/// Holds the importer in batch editing mode for the guard's lifetime.
///
/// `end_batch_edit` runs when the guard drops, so it runs on every exit path.
pub struct BatchEditGuard<'a, I: ImageImporter + ?Sized> {
    importer: &'a I,
}

impl<'a, I: ImageImporter + ?Sized> BatchEditGuard<'a, I> {
    /// Calls `begin_batch_edit` and returns the guard.
    pub fn begin(importer: &'a I) -> Self {
        importer.begin_batch_edit();
        Self { importer }
    }
}

impl<I: ImageImporter + ?Sized> Drop for BatchEditGuard<'_, I> {
    fn drop(&mut self) {
        self.importer.end_batch_edit();
    }
}

/// Returns the path of the resource next to `asset` with `extension`.
///
/// The asset's own extension is replaced; an asset without one gets the
/// extension appended.
pub fn sibling_path(asset: &Path, extension: &str) -> PathBuf {
    asset.with_extension(extension)
}

/// State of one image held by [`MemoryImporter`].
#[derive(Debug, Clone, Default)]
pub struct MemoryImage {
    pub width: u32,
    pub height: u32,
    pub kind: TextureKind,
    pub mode: SpriteMode,
    pub slices: Vec<SliceMetadata>,
}

/// Call counters recorded by [`MemoryImporter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImporterCalls {
    pub apply: usize,
    pub begin_batch_edit: usize,
    pub end_batch_edit: usize,
}

/// In-memory importer for tests and dry runs.
///
/// Images and sibling resources are keyed by path. Applying can be made to
/// fail with [`MemoryImporter::fail_apply_with`].
#[derive(Debug, Default)]
pub struct MemoryImporter {
    images: RefCell<HashMap<PathBuf, MemoryImage>>,
    files: HashMap<PathBuf, Vec<u8>>,
    apply_failure: Option<ImportError>,
    calls: RefCell<ImporterCalls>,
}

impl MemoryImporter {
    /// Creates an empty importer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an image with default sprite settings.
    pub fn with_image(self, asset: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.with_image_state(
            asset,
            MemoryImage {
                width,
                height,
                ..MemoryImage::default()
            },
        )
    }

    /// Adds an image with explicit state.
    pub fn with_image_state(self, asset: impl Into<PathBuf>, image: MemoryImage) -> Self {
        self.images.borrow_mut().insert(asset.into(), image);
        self
    }

    /// Adds a file that sibling lookups can find.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Makes every subsequent apply fail with `message`.
    pub fn fail_apply_with(mut self, message: impl Into<String>) -> Self {
        self.apply_failure = Some(ImportError::new(message));
        self
    }

    /// Removes a sibling file.
    pub fn remove_file(&mut self, path: &Path) {
        self.files.remove(path);
    }

    /// Snapshot of an image's state.
    pub fn image(&self, asset: &Path) -> Option<MemoryImage> {
        self.images.borrow().get(asset).cloned()
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> ImporterCalls {
        *self.calls.borrow()
    }

    fn with_state<T>(
        &self,
        asset: &Path,
        f: impl FnOnce(&mut MemoryImage) -> T,
    ) -> Result<T, ImportError> {
        let mut images = self.images.borrow_mut();
        let image = images
            .get_mut(asset)
            .ok_or_else(|| ImportError::new(format!("unknown asset '{}'", asset.display())))?;
        Ok(f(image))
    }
}

impl ImageImporter for MemoryImporter {
    fn image_dimensions(&self, asset: &Path) -> Result<(u32, u32), ImportError> {
        self.with_state(asset, |image| (image.width, image.height))
    }

    fn texture_kind(&self, asset: &Path) -> Result<TextureKind, ImportError> {
        self.with_state(asset, |image| image.kind)
    }

    fn sprite_mode(&self, asset: &Path) -> Result<SpriteMode, ImportError> {
        self.with_state(asset, |image| image.mode)
    }

    fn current_slices(&self, asset: &Path) -> Result<Vec<SliceMetadata>, ImportError> {
        self.with_state(asset, |image| image.slices.clone())
    }

    fn apply_slices(
        &self,
        asset: &Path,
        mode: SpriteMode,
        slices: &[SliceMetadata],
    ) -> Result<(), ImportError> {
        self.calls.borrow_mut().apply += 1;
        if let Some(ref failure) = self.apply_failure {
            return Err(failure.clone());
        }
        self.with_state(asset, |image| {
            image.mode = mode;
            image.slices = slices.to_vec();
        })
    }

    fn locate_sibling_descriptor(&self, asset: &Path, extension: &str) -> Option<Vec<u8>> {
        self.files.get(&sibling_path(asset, extension)).cloned()
    }

    fn begin_batch_edit(&self) {
        self.calls.borrow_mut().begin_batch_edit += 1;
    }

    fn end_batch_edit(&self) {
        self.calls.borrow_mut().end_batch_edit += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_path_replaces_extension() {
        assert_eq!(
            sibling_path(Path::new("art/hero.png"), "xml"),
            PathBuf::from("art/hero.xml")
        );
        assert_eq!(
            sibling_path(Path::new("art/hero.sheet.png"), "txt"),
            PathBuf::from("art/hero.sheet.txt")
        );
        assert_eq!(
            sibling_path(Path::new("art/hero"), "xml"),
            PathBuf::from("art/hero.xml")
        );
    }

    #[test]
    fn test_supports_slicing() {
        assert!(TextureKind::Sprite.supports_slicing());
        assert!(TextureKind::Advanced.supports_slicing());
        assert!(!TextureKind::Default.supports_slicing());
        assert!(!TextureKind::NormalMap.supports_slicing());
    }

    #[test]
    fn test_batch_edit_guard_releases_on_drop() {
        let importer = MemoryImporter::new();
        {
            let _guard = BatchEditGuard::begin(&importer);
            assert_eq!(importer.calls().begin_batch_edit, 1);
            assert_eq!(importer.calls().end_batch_edit, 0);
        }
        assert_eq!(importer.calls().end_batch_edit, 1);
    }

    #[test]
    fn test_batch_edit_guard_releases_on_early_error() {
        fn apply(importer: &MemoryImporter) -> Result<(), ImportError> {
            let _guard = BatchEditGuard::begin(importer);
            importer.apply_slices(Path::new("a.png"), SpriteMode::Multiple, &[])?;
            Ok(())
        }

        let importer = MemoryImporter::new()
            .with_image("a.png", 4, 4)
            .fail_apply_with("locked");
        assert_eq!(apply(&importer), Err(ImportError::new("locked")));
        assert_eq!(
            importer.calls(),
            ImporterCalls {
                apply: 1,
                begin_batch_edit: 1,
                end_batch_edit: 1,
            }
        );
    }

    #[test]
    fn test_memory_importer_sibling_lookup() {
        let importer = MemoryImporter::new().with_file("art/hero.txt", "a 0 0 0 1 1");
        assert!(importer
            .locate_sibling_descriptor(Path::new("art/hero.png"), "xml")
            .is_none());
        assert_eq!(
            importer.locate_sibling_descriptor(Path::new("art/hero.png"), "txt"),
            Some(b"a 0 0 0 1 1".to_vec())
        );
    }
}
