//! File-system image importer.
//!
//! Images are read from disk with the `image` crate. Importer state for an
//! image (texture kind, sprite mode, applied slices) is kept in a JSON
//! sidecar next to it:
//!
//! ```text
//! art/hero.png
//! art/hero.png.slices.json
//! ```
//!
//! A missing sidecar is the default state: a sprite texture in single mode
//! with no slices.

use std::cell::Cell;
use std::io::Write;
use std::path::{Path, PathBuf};

use atlaslice_core::{
    sibling_path, ImageImporter, ImportError, SliceMetadata, SpriteMode, TextureKind,
};
use serde::{Deserialize, Serialize};

/// Suffix appended to the image file name to form the sidecar path.
pub const SIDECAR_SUFFIX: &str = ".slices.json";

/// Importer state persisted in the sidecar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportState {
    pub texture_kind: TextureKind,
    pub sprite_mode: SpriteMode,
    pub slices: Vec<SliceMetadata>,
}

/// Returns the sidecar path for `asset`.
pub fn sidecar_path(asset: &Path) -> PathBuf {
    let mut name = asset
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(SIDECAR_SUFFIX);
    asset.with_file_name(name)
}

/// [`ImageImporter`] over images on disk.
#[derive(Debug, Default)]
pub struct FsImporter {
    batch_depth: Cell<usize>,
}

impl FsImporter {
    /// Creates a new importer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the importer state for `asset`.
    pub fn read_state(&self, asset: &Path) -> Result<ImportState, ImportError> {
        let path = sidecar_path(asset);
        if !path.exists() {
            return Ok(ImportState::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| {
            ImportError::new(format!("invalid sidecar '{}': {}", path.display(), e))
        })
    }

    /// Replaces the importer state for `asset`.
    ///
    /// The sidecar is written to a temporary file in the same directory and
    /// renamed over the old one, so a failed write leaves the old state.
    pub fn write_state(&self, asset: &Path, state: &ImportState) -> Result<(), ImportError> {
        let path = sidecar_path(asset);
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let json = serde_json::to_string_pretty(state)?;
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.persist(&path).map_err(|e| ImportError::from(e.error))?;
        Ok(())
    }

    /// Returns true while a batch edit is open.
    pub fn in_batch_edit(&self) -> bool {
        self.batch_depth.get() > 0
    }
}

impl ImageImporter for FsImporter {
    fn image_dimensions(&self, asset: &Path) -> Result<(u32, u32), ImportError> {
        image::image_dimensions(asset).map_err(|e| {
            ImportError::new(format!("cannot read image '{}': {}", asset.display(), e))
        })
    }

    fn texture_kind(&self, asset: &Path) -> Result<TextureKind, ImportError> {
        Ok(self.read_state(asset)?.texture_kind)
    }

    fn sprite_mode(&self, asset: &Path) -> Result<SpriteMode, ImportError> {
        Ok(self.read_state(asset)?.sprite_mode)
    }

    fn current_slices(&self, asset: &Path) -> Result<Vec<SliceMetadata>, ImportError> {
        Ok(self.read_state(asset)?.slices)
    }

    fn apply_slices(
        &self,
        asset: &Path,
        mode: SpriteMode,
        slices: &[SliceMetadata],
    ) -> Result<(), ImportError> {
        // Confirms the image is still readable before recording anything.
        self.image_dimensions(asset)?;

        let state = ImportState {
            texture_kind: self.texture_kind(asset)?,
            sprite_mode: mode,
            slices: slices.to_vec(),
        };
        self.write_state(asset, &state)
    }

    fn locate_sibling_descriptor(&self, asset: &Path, extension: &str) -> Option<Vec<u8>> {
        let path = sibling_path(asset, extension);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable descriptor");
                None
            }
        }
    }

    fn begin_batch_edit(&self) {
        self.batch_depth.set(self.batch_depth.get() + 1);
        tracing::debug!(depth = self.batch_depth.get(), "begin batch edit");
    }

    fn end_batch_edit(&self) {
        self.batch_depth.set(self.batch_depth.get().saturating_sub(1));
        tracing::debug!(depth = self.batch_depth.get(), "end batch edit");
    }
}
