//! Test harness utilities for writing images and descriptors to disk and
//! driving the file-system importer.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use atlaslice_cli::{sidecar_path, FsImporter, ImportState};
use atlaslice_core::{SliceSession, SlicerConfig};

/// A region as `(name, x, y, width, height)`.
pub type RegionSpec<'a> = (&'a str, i32, i32, i32, i32);

/// Renders regions as a `TextureAtlas` XML descriptor.
pub fn xml_descriptor(regions: &[RegionSpec<'_>]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<TextureAtlas imagePath=\"sheet.png\">\n");
    for (name, x, y, width, height) in regions {
        xml.push_str(&format!(
            "    <SubTexture name=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
            name, x, y, width, height
        ));
    }
    xml.push_str("</TextureAtlas>\n");
    xml
}

/// Renders regions as a text descriptor.
pub fn text_descriptor(regions: &[RegionSpec<'_>]) -> String {
    regions
        .iter()
        .map(|(name, x, y, width, height)| {
            format!("{} 0 {} {} {} {}\n", name, x, y, width, height)
        })
        .collect()
}

/// A test harness backed by a temporary directory.
pub struct TestHarness {
    /// Working directory for test files.
    pub work_dir: TempDir,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Writes a blank PNG of the given size and returns its path.
    pub fn write_png(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create image dir");
        }
        image::RgbaImage::new(width, height)
            .save(&path)
            .expect("Failed to write PNG");
        path
    }

    /// Writes a file relative to the work dir and returns its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Writes an image together with an XML descriptor next to it.
    pub fn write_sheet(
        &self,
        name: &str,
        width: u32,
        height: u32,
        regions: &[RegionSpec<'_>],
    ) -> PathBuf {
        let image = self.write_png(name, width, height);
        fs::write(image.with_extension("xml"), xml_descriptor(regions))
            .expect("Failed to write descriptor");
        image
    }

    /// Replaces the importer state of an image.
    pub fn write_state(&self, image: &Path, state: &ImportState) {
        FsImporter::new()
            .write_state(image, state)
            .expect("Failed to write sidecar");
    }

    /// Reads the importer state of an image.
    pub fn read_state(&self, image: &Path) -> ImportState {
        FsImporter::new()
            .read_state(image)
            .expect("Failed to read sidecar")
    }

    /// Raw sidecar bytes, if the sidecar exists.
    pub fn sidecar_bytes(&self, image: &Path) -> Option<Vec<u8>> {
        fs::read(sidecar_path(image)).ok()
    }

    /// Creates a session with `image` selected.
    pub fn session(&self, image: &Path, config: &SlicerConfig) -> SliceSession<FsImporter> {
        let mut session = SliceSession::new(FsImporter::new());
        session.select_asset(image, config);
        session
    }
}
