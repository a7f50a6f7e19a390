//! Atlaslice Descriptor Library
//!
//! This crate parses texture atlas descriptors, checks them against the target
//! image, and derives the per-sprite slice metadata an image importer records.
//!
//! # Overview
//!
//! A descriptor lists named rectangular regions of a sprite sheet. It sits next
//! to the image it describes and comes in two formats:
//!
//! - **XML**: a `TextureAtlas` root with one `SubTexture` element per region
//! - **Text**: one `name _ x y width height` record per line
//!
//! Descriptor coordinates have a top-left origin. Slice metadata uses the
//! importer's bottom-left origin, so every rectangle is flipped against the
//! actual image height.
//!
//! # Example
//!
//! ```
//! use atlaslice_core::{MemoryImporter, SliceSession, SlicerConfig, SpriteMode};
//! use std::path::Path;
//!
//! let importer = MemoryImporter::new()
//!     .with_image("sheet.png", 64, 64)
//!     .with_file("sheet.txt", "idle 0 0 0 32 32\nrun 0 32 0 32 32\n");
//!
//! let config = SlicerConfig::default();
//! let mut session = SliceSession::new(importer);
//! assert!(session.select_asset("sheet.png", &config));
//!
//! let outcome = session.slice(&config).unwrap();
//! assert_eq!(outcome.slices().len(), 2);
//! assert_eq!(outcome.slices()[0].rect.y, 32);
//!
//! let image = session.importer().image(Path::new("sheet.png")).unwrap();
//! assert_eq!(image.mode, SpriteMode::Multiple);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Parse errors, warnings, and slicing blockers
//! - [`descriptor`]: Region and descriptor model
//! - [`parse`]: XML and text descriptor parsers
//! - [`loader`]: Sibling descriptor discovery
//! - [`validation`]: Dimension checks
//! - [`alignment`]: Alignment codes and pivot table
//! - [`slice`]: Slice metadata builder
//! - [`importer`]: Image importer seam and an in-memory implementation
//! - [`config`]: Slicer configuration
//! - [`session`]: Load, validate, build, and apply orchestration

pub mod alignment;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod importer;
pub mod loader;
pub mod parse;
pub mod session;
pub mod slice;
pub mod validation;

// Re-export commonly used types at the crate root
pub use alignment::{pivot_for, Alignment, DEFAULT_CUSTOM_OFFSET};
pub use config::{ConfigError, DuplicatePolicy, SlicerConfig};
pub use descriptor::{Descriptor, DescriptorFormat, Region};
pub use error::{
    ImportError, ParseError, ParseWarning, SliceBlocker, SliceError, WarningCode,
};
pub use importer::{
    sibling_path, BatchEditGuard, ImageImporter, MemoryImage, MemoryImporter, SpriteMode,
    TextureKind,
};
pub use loader::{load_descriptor, load_descriptor_with, LoadReport, LoadedDescriptor};
pub use parse::{parse_text, parse_xml, parse_xml_with, ParseOptions};
pub use session::{SessionStatus, SliceOutcome, SliceSession};
pub use slice::{build_checked, build_slice_metadata, SliceMetadata, SliceRect};
pub use validation::{check_sliceable, needs_resize};
