//! Batch slice command
//!
//! Slices every image under a directory that has a sibling descriptor.

use anyhow::{Context, Result};
use atlaslice_core::loader::DISCOVERY_ORDER;
use atlaslice_core::{sibling_path, SliceError, SliceOutcome};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use walkdir::WalkDir;

use super::slice::{slice_image, SliceOptions};

/// File name of the report written into the scanned directory.
pub const REPORT_FILE: &str = "batch-report.json";

/// Image extensions picked up by the scan.
const IMAGE_EXTENSIONS: &[&str] = &["png"];

/// Summary of a batch run, written as `batch-report.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub updated: usize,
    pub already_sliced: usize,
    pub failed: usize,
    pub results: Vec<BatchResult>,
}

/// Outcome for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub image: String,
    /// "updated", "already_sliced", "blocked", or "failed"
    pub status: String,
    pub slices: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Finds images under `dir` that have a sibling `.xml` or `.txt`
/// descriptor, in file name order.
pub fn discover_images(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .filter(|p| {
            DISCOVERY_ORDER
                .iter()
                .any(|format| sibling_path(p, format.extension()).is_file())
        })
        .collect()
}

/// Run batch slicing
///
/// # Returns
/// Exit code: 0 if every image was sliced, 1 if any was blocked or failed
pub fn run(dir: &str, options: &SliceOptions, json_output: bool) -> Result<ExitCode> {
    let config = options.resolve().context("Failed to load slicer config")?;
    let dir_path = Path::new(dir);
    if !dir_path.is_dir() {
        anyhow::bail!("not a directory: {}", dir);
    }

    let images = discover_images(dir_path);
    if images.is_empty() && !json_output {
        println!("No images with descriptors found in: {}", dir);
    } else if !json_output {
        println!("Batch slicing {} images...", images.len());
    }

    let batch_start = Instant::now();
    let mut results = Vec::with_capacity(images.len());

    for (i, image) in images.iter().enumerate() {
        let run = slice_image(image, &config);

        let result = match run.result {
            Ok(SliceOutcome::Updated { ref slices, .. }) => BatchResult {
                image: image.display().to_string(),
                status: "updated".to_string(),
                slices: slices.len(),
                error: None,
            },
            Ok(SliceOutcome::AlreadySliced { ref slices }) => BatchResult {
                image: image.display().to_string(),
                status: "already_sliced".to_string(),
                slices: slices.len(),
                error: None,
            },
            Err(ref err) => BatchResult {
                image: image.display().to_string(),
                status: match err {
                    SliceError::Blocked(_) => "blocked",
                    _ => "failed",
                }
                .to_string(),
                slices: 0,
                error: Some(err.to_string()),
            },
        };

        if !json_output {
            print_item(i, images.len(), &result);
        }
        results.push(result);
    }

    let count = |status: &str| results.iter().filter(|r| r.status == status).count();
    let report = BatchReport {
        total: results.len(),
        updated: count("updated"),
        already_sliced: count("already_sliced"),
        failed: count("blocked") + count("failed"),
        results,
    };

    let report_path = dir_path.join(REPORT_FILE);
    let report_json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&report_path, &report_json)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;

    if json_output {
        println!("{}", report_json);
    } else {
        print_summary(&report, batch_start.elapsed().as_secs_f64(), &report_path);
    }

    if report.failed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_item(index: usize, total: usize, result: &BatchResult) {
    let progress = format!("[{}/{}]", index + 1, total).cyan().bold();
    println!("{} {}", progress, result.image);
    match result.status.as_str() {
        "updated" => println!("  {} {} slice(s)", "✓ UPDATED".green().bold(), result.slices),
        "already_sliced" => println!("  {}", "✓ UP TO DATE".green()),
        "blocked" => println!(
            "  {} {}",
            "✗ BLOCKED".red().bold(),
            result.error.as_deref().unwrap_or_default()
        ),
        _ => println!(
            "  {} {}",
            "✗ FAILED".red().bold(),
            result.error.as_deref().unwrap_or_default()
        ),
    }
}

fn print_summary(report: &BatchReport, elapsed_secs: f64, report_path: &Path) {
    println!("\n{}", "=".repeat(60));
    println!(
        "{} {} {}",
        "Batch Slice Summary".bold(),
        "•".dimmed(),
        format!("{:.1}s total", elapsed_secs).dimmed()
    );
    println!("  Total:          {}", report.total);
    println!("  Updated:        {}", report.updated);
    println!("  Already sliced: {}", report.already_sliced);
    println!(
        "  Failed:         {}",
        if report.failed > 0 {
            report.failed.to_string().red()
        } else {
            report.failed.to_string().normal()
        }
    );
    println!("Report: {}", report_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_discover_images_requires_descriptor() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir(root.join("nested")).unwrap();

        for name in ["b.png", "a.png", "lonely.png", "nested/c.PNG", "notes.txt"] {
            std::fs::write(root.join(name), b"").unwrap();
        }
        std::fs::write(root.join("a.xml"), b"").unwrap();
        std::fs::write(root.join("b.txt"), b"").unwrap();
        std::fs::write(root.join("nested/c.xml"), b"").unwrap();

        let images = discover_images(root);
        assert_eq!(
            images,
            vec![
                root.join("a.png"),
                root.join("b.png"),
                root.join("nested/c.PNG"),
            ]
        );
    }
}
