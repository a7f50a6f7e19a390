//! Slicing session: the load → validate → build → apply cycle for one image.
//!
//! A session holds at most one descriptor, always the one belonging to the
//! currently selected image. Selecting a new image drops the old descriptor
//! before discovery starts, and a failed load leaves the session without one.

use std::path::{Path, PathBuf};

use crate::config::{DuplicatePolicy, SlicerConfig};
use crate::descriptor::Descriptor;
use crate::error::{ImportError, SliceBlocker, SliceError};
use crate::importer::{BatchEditGuard, ImageImporter, SpriteMode, TextureKind};
use crate::loader::{load_descriptor_with, LoadReport, LoadedDescriptor};
use crate::slice::{build_checked, SliceMetadata};
use crate::validation::needs_resize;

/// Result of a successful slicing request.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceOutcome {
    /// New metadata was applied to the importer.
    Updated {
        slices: Vec<SliceMetadata>,
        /// The sprite mode had to be switched to multiple.
        mode_changed: bool,
    },
    /// The importer already holds exactly this metadata; nothing was applied.
    AlreadySliced { slices: Vec<SliceMetadata> },
}

impl SliceOutcome {
    /// The metadata now recorded by the importer.
    pub fn slices(&self) -> &[SliceMetadata] {
        match self {
            SliceOutcome::Updated { slices, .. } | SliceOutcome::AlreadySliced { slices } => slices,
        }
    }

    /// Returns true if the importer was written to.
    pub fn is_update(&self) -> bool {
        matches!(self, SliceOutcome::Updated { .. })
    }
}

/// Side-effect free snapshot of the selected image and its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub asset: PathBuf,
    pub source_path: PathBuf,
    pub image_width: u32,
    pub image_height: u32,
    pub texture_kind: TextureKind,
    pub sprite_mode: SpriteMode,
    pub region_count: usize,
    pub wanted_width: i32,
    pub wanted_height: i32,
    pub needs_resize: bool,
    /// First gate that would block slicing, if any.
    pub blocker: Option<SliceBlocker>,
}

/// Orchestrates slicing against an [`ImageImporter`].
pub struct SliceSession<I: ImageImporter> {
    importer: I,
    asset: Option<PathBuf>,
    loaded: Option<LoadedDescriptor>,
    last_load: LoadReport,
}

impl<I: ImageImporter> SliceSession<I> {
    /// Creates a session with nothing selected.
    pub fn new(importer: I) -> Self {
        Self {
            importer,
            asset: None,
            loaded: None,
            last_load: LoadReport::default(),
        }
    }

    /// The importer this session drives.
    pub fn importer(&self) -> &I {
        &self.importer
    }

    /// Mutable access to the importer. Call [`SliceSession::reload`] after
    /// changing descriptor files through it.
    pub fn importer_mut(&mut self) -> &mut I {
        &mut self.importer
    }

    /// Consumes the session and returns the importer.
    pub fn into_importer(self) -> I {
        self.importer
    }

    /// The selected image, if any.
    pub fn asset(&self) -> Option<&Path> {
        self.asset.as_deref()
    }

    /// The descriptor for the selected image, if one was loaded.
    pub fn descriptor(&self) -> Option<&Descriptor> {
        self.loaded.as_ref().map(|loaded| &loaded.descriptor)
    }

    /// The loaded descriptor with provenance.
    pub fn loaded(&self) -> Option<&LoadedDescriptor> {
        self.loaded.as_ref()
    }

    /// Attempts made by the most recent load.
    pub fn load_report(&self) -> &LoadReport {
        &self.last_load
    }

    /// Drops the selection and any descriptor state.
    pub fn clear(&mut self) {
        self.asset = None;
        self.loaded = None;
        self.last_load = LoadReport::default();
    }

    /// Selects `asset` and loads its sibling descriptor.
    ///
    /// Returns true if a descriptor was loaded.
    pub fn select_asset(&mut self, asset: impl Into<PathBuf>, config: &SlicerConfig) -> bool {
        self.clear();
        self.asset = Some(asset.into());
        self.reload(config)
    }

    /// Re-reads the descriptor for the selected image.
    ///
    /// On failure the previous descriptor is discarded, never kept stale.
    pub fn reload(&mut self, config: &SlicerConfig) -> bool {
        self.loaded = None;
        let Some(asset) = self.asset.as_deref() else {
            return false;
        };

        let report = load_descriptor_with(&self.importer, asset, &config.parse_options());
        let found = report.loaded.is_some();
        if !found {
            tracing::debug!(asset = %asset.display(), "no usable descriptor");
        }
        self.loaded = report.loaded.clone();
        self.last_load = report;
        found
    }

    /// Reports the selected image's state without changing anything.
    pub fn status(&self, config: &SlicerConfig) -> Result<SessionStatus, SliceError> {
        let (asset, loaded) = self.selection()?;
        let descriptor = &loaded.descriptor;

        let (image_width, image_height) = self.importer.image_dimensions(asset)?;
        let texture_kind = self.importer.texture_kind(asset)?;
        let sprite_mode = self.importer.sprite_mode(asset)?;

        let blocker =
            plan_slices(descriptor, texture_kind, image_width, image_height, config).err();

        Ok(SessionStatus {
            asset: asset.to_path_buf(),
            source_path: loaded.source_path.clone(),
            image_width,
            image_height,
            texture_kind,
            sprite_mode,
            region_count: descriptor.len(),
            wanted_width: descriptor.wanted_width(),
            wanted_height: descriptor.wanted_height(),
            needs_resize: needs_resize(descriptor, image_width, image_height),
            blocker,
        })
    }

    /// Builds slice metadata for the selected image and applies it if it
    /// differs from what the importer already holds.
    ///
    /// A failed apply is reported once and not retried.
    pub fn slice(&self, config: &SlicerConfig) -> Result<SliceOutcome, SliceError> {
        let (asset, loaded) = self.selection()?;
        let descriptor = &loaded.descriptor;

        let (image_width, image_height) = self.importer.image_dimensions(asset)?;
        let texture_kind = self.importer.texture_kind(asset)?;
        let wanted = plan_slices(descriptor, texture_kind, image_width, image_height, config)?;

        let mode_changed = self.importer.sprite_mode(asset)? != SpriteMode::Multiple;
        if !mode_changed && self.importer.current_slices(asset)? == wanted {
            tracing::debug!(asset = %asset.display(), "already sliced");
            return Ok(SliceOutcome::AlreadySliced { slices: wanted });
        }

        self.apply(asset, &wanted)?;
        tracing::info!(
            asset = %asset.display(),
            slices = wanted.len(),
            mode_changed,
            "applied slice metadata"
        );

        Ok(SliceOutcome::Updated {
            slices: wanted,
            mode_changed,
        })
    }

    fn apply(&self, asset: &Path, slices: &[SliceMetadata]) -> Result<(), ImportError> {
        let _batch = BatchEditGuard::begin(&self.importer);
        self.importer
            .apply_slices(asset, SpriteMode::Multiple, slices)
            .map_err(|err| {
                tracing::error!(asset = %asset.display(), error = %err, "reimport failed");
                err
            })
    }

    fn selection(&self) -> Result<(&Path, &LoadedDescriptor), SliceError> {
        let asset = self.asset.as_deref().ok_or(SliceError::NoAsset)?;
        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| SliceError::NoDescriptor(asset.display().to_string()))?;
        Ok((asset, loaded))
    }
}

/// Builds the wanted slices, or names the first reason slicing is blocked.
/// Checked in order: texture kind, regions and size, duplicate names.
fn plan_slices(
    descriptor: &Descriptor,
    texture_kind: TextureKind,
    image_width: u32,
    image_height: u32,
    config: &SlicerConfig,
) -> Result<Vec<SliceMetadata>, SliceBlocker> {
    if !texture_kind.supports_slicing() {
        return Err(SliceBlocker::UnsupportedTextureKind(texture_kind));
    }

    let slices = build_checked(
        descriptor,
        config.alignment,
        config.custom_offset,
        image_width,
        image_height,
    )?;

    let duplicates = descriptor.duplicate_names();
    if !duplicates.is_empty() {
        match config.duplicate_names {
            DuplicatePolicy::Warn => {
                tracing::warn!(names = ?duplicates, "slicing with duplicate region names");
            }
            DuplicatePolicy::Reject => return Err(SliceBlocker::DuplicateNames(duplicates)),
        }
    }

    Ok(slices)
}
