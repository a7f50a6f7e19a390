//! Check command implementation
//!
//! Reports whether an image can be sliced from its sibling descriptor,
//! without touching the importer state.

use anyhow::{Context, Result};
use atlaslice_core::{SessionStatus, SliceError, SliceSession, SlicerConfig};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, load_failures_to_json, parse_warning_to_json, slice_error_to_json, CheckOutput,
    CheckResult, JsonError, JsonWarning,
};
use super::reporting;
use super::slice::SliceOptions;
use crate::importer::FsImporter;

/// Run the check command
///
/// # Returns
/// Exit code: 0 if the image can be sliced, 1 otherwise
pub fn run(image: &str, options: &SliceOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(image, options)
    } else {
        run_human(image, options)
    }
}

fn session_for(image: &Path, config: &SlicerConfig) -> SliceSession<FsImporter> {
    let mut session = SliceSession::new(FsImporter::new());
    session.select_asset(image, config);
    session
}

fn run_human(image: &str, options: &SliceOptions) -> Result<ExitCode> {
    let config = options.resolve().context("Failed to load slicer config")?;

    println!("{} {}", "Checking:".cyan().bold(), image);

    let session = session_for(Path::new(image), &config);
    let Some(loaded) = session.loaded() else {
        reporting::print_load_failures(session.load_report());
        println!(
            "\n{} no usable .xml or .txt descriptor next to {}",
            "FAILED".red().bold(),
            image
        );
        return Ok(ExitCode::from(1));
    };
    reporting::print_descriptor_source(loaded);

    let status = session
        .status(&config)
        .with_context(|| format!("Failed to read image state: {}", image))?;
    print_status(&status);

    match status.blocker {
        None => {
            println!("\n{} Ready to slice", "OK".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Some(ref blocker) => {
            println!("\n{} {}", "BLOCKED".red().bold(), blocker);
            Ok(ExitCode::from(1))
        }
    }
}

fn print_status(status: &SessionStatus) {
    let fit = if status.needs_resize {
        "too small".red()
    } else {
        "fits".green()
    };
    println!(
        "{} {}x{}",
        "Image:".dimmed(),
        status.image_width,
        status.image_height
    );
    println!(
        "{} {}x{} ({})",
        "Wanted:".dimmed(),
        status.wanted_width,
        status.wanted_height,
        fit
    );
    println!("{} {}", "Regions:".dimmed(), status.region_count);
    println!(
        "{} {} ({:?})",
        "Texture:".dimmed(),
        status.texture_kind,
        status.sprite_mode
    );
}

fn run_json(image: &str, options: &SliceOptions) -> Result<ExitCode> {
    let config = match options.resolve() {
        Ok(config) => config,
        Err(e) => {
            let error = JsonError::new(error_codes::CONFIG, e.to_string());
            return print_output(CheckOutput::new(None, vec![error], Vec::new()));
        }
    };

    let image_path = Path::new(image);
    let session = session_for(image_path, &config);
    let Some(loaded) = session.loaded() else {
        let errors = load_failures_to_json(session.load_report(), image_path);
        return print_output(CheckOutput::new(None, errors, Vec::new()));
    };

    let file = loaded.source_path.display().to_string();
    let warnings: Vec<JsonWarning> = loaded
        .descriptor
        .diagnostics()
        .iter()
        .map(|w| parse_warning_to_json(w, &file))
        .collect();

    let status = match session.status(&config) {
        Ok(status) => status,
        Err(e) => {
            let error = slice_error_to_json(&e, image_path);
            return print_output(CheckOutput::new(None, vec![error], warnings));
        }
    };

    let errors = status
        .blocker
        .clone()
        .map(|blocker| vec![slice_error_to_json(&SliceError::Blocked(blocker), image_path)])
        .unwrap_or_default();

    let result = CheckResult {
        image: image.to_string(),
        descriptor: file,
        format: loaded.descriptor.format(),
        image_width: status.image_width,
        image_height: status.image_height,
        wanted_width: status.wanted_width,
        wanted_height: status.wanted_height,
        region_count: status.region_count,
        needs_resize: status.needs_resize,
        texture_kind: status.texture_kind,
        sprite_mode: status.sprite_mode,
    };

    print_output(CheckOutput::new(Some(result), errors, warnings))
}

fn print_output(output: CheckOutput) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(&output)?);
    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
