//! Atlaslice CLI library.
//!
//! This crate provides the command implementations behind the `atlaslice`
//! binary and the file-system importer they drive.

pub mod commands;
pub mod importer;

pub use importer::{sidecar_path, FsImporter, ImportState};
