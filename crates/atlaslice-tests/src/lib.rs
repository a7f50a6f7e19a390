//! Atlaslice End-to-End Test Infrastructure
//!
//! This crate provides integration tests that run against real files:
//!
//! - Slicing: PNG + descriptor -> sidecar slice metadata
//! - CLI: command functions with human and JSON output
//! - Properties: descriptor parsing and validation invariants
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p atlaslice-tests
//! ```

pub mod harness;

pub use harness::{text_descriptor, xml_descriptor, TestHarness};
