//! End-to-End CLI Command Tests for Atlaslice
//!
//! Runs the command functions as library calls against files in a temp dir
//! and checks exit codes, sidecars, and batch reports.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p atlaslice-tests --test e2e_cli
//! ```

use std::fs;
use std::process::ExitCode;

use atlaslice_cli::commands::batch::{self, BatchReport, REPORT_FILE};
use atlaslice_cli::commands::slice::SliceOptions;
use atlaslice_cli::commands::{check, inspect, slice};
use atlaslice_core::{Alignment, SpriteMode};
use atlaslice_tests::{xml_descriptor, TestHarness};
use pretty_assertions::assert_eq;

fn path_str(path: &std::path::Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

// ============================================================================
// slice
// ============================================================================

#[test]
fn test_slice_command_updates_sidecar() {
    let harness = TestHarness::new();
    let image = harness.write_sheet("sheet.png", 64, 64, &[("a", 0, 0, 16, 16)]);

    for json in [true, false] {
        let code = slice::run(path_str(&image), &SliceOptions::default(), json).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    let state = harness.read_state(&image);
    assert_eq!(state.sprite_mode, SpriteMode::Multiple);
    assert_eq!(state.slices.len(), 1);
}

#[test]
fn test_slice_command_blocked_exit_code() {
    let harness = TestHarness::new();
    let image = harness.write_sheet("sheet.png", 8, 8, &[("a", 0, 0, 16, 16)]);

    let code = slice::run(path_str(&image), &SliceOptions::default(), true).unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(harness.sidecar_bytes(&image).is_none());
}

#[test]
fn test_slice_command_uses_config_file() {
    let harness = TestHarness::new();
    let image = harness.write_sheet("sheet.png", 64, 64, &[("a", 0, 0, 16, 16)]);
    let config = harness.write_file("atlaslice.json", r#"{ "alignment": "top_left" }"#);

    let options = SliceOptions {
        config: Some(path_str(&config).to_string()),
        ..SliceOptions::default()
    };
    let code = slice::run(path_str(&image), &options, false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let state = harness.read_state(&image);
    assert_eq!(state.slices[0].alignment, Alignment::TopLeft);
    assert_eq!(state.slices[0].pivot, [0.0, 1.0]);
}

#[test]
fn test_slice_command_bad_config_is_error() {
    let harness = TestHarness::new();
    let image = harness.write_sheet("sheet.png", 64, 64, &[("a", 0, 0, 16, 16)]);
    let config = harness.write_file("atlaslice.json", r#"{ "pivot": 1 }"#);
    let options = SliceOptions {
        config: Some(path_str(&config).to_string()),
        ..SliceOptions::default()
    };

    assert!(slice::run(path_str(&image), &options, false).is_err());
    assert_eq!(
        slice::run(path_str(&image), &options, true).unwrap(),
        ExitCode::from(1)
    );
}

#[test]
fn test_non_finite_offset_leaves_sidecar_usable() {
    let harness = TestHarness::new();
    let image = harness.write_sheet("sheet.png", 64, 64, &[("a", 0, 0, 16, 16)]);
    let options = SliceOptions {
        offset: Some([f32::NAN, 0.0]),
        ..SliceOptions::default()
    };

    assert!(slice::run(path_str(&image), &options, false).is_err());
    assert_eq!(
        slice::run(path_str(&image), &options, true).unwrap(),
        ExitCode::from(1)
    );
    assert!(harness.sidecar_bytes(&image).is_none());

    for _ in 0..2 {
        assert_eq!(
            slice::run(path_str(&image), &SliceOptions::default(), true).unwrap(),
            ExitCode::SUCCESS
        );
    }
    assert_eq!(harness.read_state(&image).slices[0].pivot, [0.5, 0.5]);
}

#[test]
fn test_strict_flag_rejects_missing_attributes() {
    let harness = TestHarness::new();
    let image = harness.write_png("sheet.png", 64, 64);
    harness.write_file(
        "sheet.xml",
        r#"<TextureAtlas><SubTexture x="0" y="0" width="8" height="8"/></TextureAtlas>"#,
    );

    let strict = SliceOptions {
        strict: true,
        ..SliceOptions::default()
    };
    assert_eq!(
        slice::run(path_str(&image), &strict, true).unwrap(),
        ExitCode::from(1)
    );

    assert_eq!(
        slice::run(path_str(&image), &SliceOptions::default(), true).unwrap(),
        ExitCode::SUCCESS
    );
    assert_eq!(harness.read_state(&image).slices[0].name, "ERROR");
}

// ============================================================================
// check and inspect
// ============================================================================

#[test]
fn test_check_command_does_not_write() {
    let harness = TestHarness::new();
    let image = harness.write_sheet("sheet.png", 64, 64, &[("a", 0, 0, 16, 16)]);

    let code = check::run(path_str(&image), &SliceOptions::default(), false).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(harness.sidecar_bytes(&image).is_none());
}

#[test]
fn test_check_command_reports_blockers() {
    let harness = TestHarness::new();
    let small = harness.write_sheet("small.png", 4, 4, &[("a", 0, 0, 16, 16)]);
    let lonely = harness.write_png("lonely.png", 4, 4);

    for json in [true, false] {
        assert_eq!(
            check::run(path_str(&small), &SliceOptions::default(), json).unwrap(),
            ExitCode::from(1)
        );
        assert_eq!(
            check::run(path_str(&lonely), &SliceOptions::default(), json).unwrap(),
            ExitCode::from(1)
        );
    }
}

#[test]
fn test_inspect_command() {
    let harness = TestHarness::new();
    let good = harness.write_file("good.xml", &xml_descriptor(&[("a", 0, 0, 4, 4)]));
    let bad = harness.write_file("bad.xml", "<Atlas/>");

    for json in [true, false] {
        assert_eq!(
            inspect::run(path_str(&good), false, json).unwrap(),
            ExitCode::SUCCESS
        );
        assert_eq!(
            inspect::run(path_str(&bad), false, json).unwrap(),
            ExitCode::from(1)
        );
    }

    let missing = harness.path().join("missing.xml");
    assert!(inspect::run(path_str(&missing), false, false).is_err());
    assert_eq!(
        inspect::run(path_str(&missing), false, true).unwrap(),
        ExitCode::from(1)
    );
}

// ============================================================================
// batch
// ============================================================================

#[test]
fn test_batch_command_report() {
    let harness = TestHarness::new();
    harness.write_sheet("a.png", 64, 64, &[("a", 0, 0, 16, 16)]);
    harness.write_sheet("nested/b.png", 64, 64, &[("b", 0, 0, 16, 16)]);
    harness.write_sheet("small.png", 8, 8, &[("s", 0, 0, 16, 16)]);
    harness.write_png("no_descriptor.png", 8, 8);

    let dir = path_str(harness.path());
    let code = batch::run(dir, &SliceOptions::default(), false).unwrap();
    assert_eq!(code, ExitCode::from(1));

    let report: BatchReport =
        serde_json::from_str(&fs::read_to_string(harness.path().join(REPORT_FILE)).unwrap())
            .unwrap();
    assert_eq!(report.total, 3);
    assert_eq!(report.updated, 2);
    assert_eq!(report.already_sliced, 0);
    assert_eq!(report.failed, 1);

    let blocked: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.status == "blocked")
        .collect();
    assert_eq!(blocked.len(), 1);
    assert!(blocked[0].image.ends_with("small.png"));
}

#[test]
fn test_batch_command_second_run_is_already_sliced() {
    let harness = TestHarness::new();
    harness.write_sheet("a.png", 64, 64, &[("a", 0, 0, 16, 16)]);
    harness.write_sheet("b.png", 64, 64, &[("b", 0, 0, 16, 16)]);
    let dir = path_str(harness.path());

    assert_eq!(
        batch::run(dir, &SliceOptions::default(), true).unwrap(),
        ExitCode::SUCCESS
    );
    assert_eq!(
        batch::run(dir, &SliceOptions::default(), true).unwrap(),
        ExitCode::SUCCESS
    );

    let report: BatchReport =
        serde_json::from_str(&fs::read_to_string(harness.path().join(REPORT_FILE)).unwrap())
            .unwrap();
    assert_eq!(report.updated, 0);
    assert_eq!(report.already_sliced, 2);
}

#[test]
fn test_batch_command_rejects_missing_dir() {
    let harness = TestHarness::new();
    let missing = harness.path().join("nope");
    assert!(batch::run(path_str(&missing), &SliceOptions::default(), false).is_err());
}
