//! Slice command implementation
//!
//! Loads the descriptor next to an image and records its regions as slice
//! metadata in the image's sidecar.

use anyhow::{Context, Result};
use atlaslice_core::{
    Alignment, ConfigError, DuplicatePolicy, LoadReport, LoadedDescriptor, SliceError,
    SliceOutcome, SliceSession, SlicerConfig,
};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::json_output::{
    error_codes, load_failures_to_json, parse_warning_to_json, slice_error_to_json, JsonError,
    JsonWarning, SliceOutput, SliceResult,
};
use super::reporting;
use crate::importer::FsImporter;

/// Slicing options shared by the `slice`, `check`, and `batch` commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceOptions {
    /// Alignment override.
    pub alignment: Option<Alignment>,
    /// Custom pivot override. Selects `custom` alignment unless an
    /// alignment is given as well.
    pub offset: Option<[f32; 2]>,
    /// Fail on missing descriptor attributes.
    pub strict: bool,
    /// Refuse to slice descriptors with duplicate region names.
    pub reject_duplicates: bool,
    /// Path to a JSON config file. Flags override its values.
    pub config: Option<String>,
}

impl SliceOptions {
    /// Builds the effective config: file values first, then flag overrides.
    pub fn resolve(&self) -> Result<SlicerConfig, ConfigError> {
        let mut config = match self.config {
            Some(ref path) => SlicerConfig::from_json_file(Path::new(path))?,
            None => SlicerConfig::default(),
        };

        if let Some(offset) = self.offset {
            config.custom_offset = offset;
            config.alignment = Alignment::Custom;
        }
        if let Some(alignment) = self.alignment {
            config.alignment = alignment;
        }
        if self.strict {
            config.strict_attributes = true;
        }
        if self.reject_duplicates {
            config.duplicate_names = DuplicatePolicy::Reject;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parses a `x,y` pivot offset.
pub fn parse_offset(value: &str) -> Result<[f32; 2], String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{}'", value))?;
    let parse = |part: &str| {
        let part = part.trim();
        match part.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(format!("offset component '{}' must be finite", part)),
            Err(e) => Err(format!("invalid offset component '{}': {}", part, e)),
        }
    };
    Ok([parse(x)?, parse(y)?])
}

/// Everything one slicing attempt produced.
#[derive(Debug)]
pub struct SliceRun {
    /// The image that was sliced.
    pub image: PathBuf,
    /// The descriptor that was used, if one loaded.
    pub loaded: Option<LoadedDescriptor>,
    /// Every discovery attempt.
    pub load_report: LoadReport,
    /// Slicing result.
    pub result: Result<SliceOutcome, SliceError>,
}

impl SliceRun {
    /// Parse diagnostics of the loaded descriptor as JSON warnings.
    pub fn json_warnings(&self) -> Vec<JsonWarning> {
        match self.loaded {
            Some(ref loaded) => {
                let file = loaded.source_path.display().to_string();
                loaded
                    .descriptor
                    .diagnostics()
                    .iter()
                    .map(|w| parse_warning_to_json(w, &file))
                    .collect()
            }
            None => Vec::new(),
        }
    }

    /// JSON errors explaining a failed run.
    pub fn json_errors(&self) -> Vec<JsonError> {
        match self.result {
            Ok(_) => Vec::new(),
            Err(SliceError::NoDescriptor(_)) => {
                load_failures_to_json(&self.load_report, &self.image)
            }
            Err(ref err) => vec![slice_error_to_json(err, &self.image)],
        }
    }
}

/// Slices a single image on disk.
pub fn slice_image(image: &Path, config: &SlicerConfig) -> SliceRun {
    let mut session = SliceSession::new(FsImporter::new());
    session.select_asset(image, config);
    let result = session.slice(config);

    SliceRun {
        image: image.to_path_buf(),
        loaded: session.loaded().cloned(),
        load_report: session.load_report().clone(),
        result,
    }
}

/// Run the slice command
///
/// # Arguments
/// * `image` - Path to the image to slice
/// * `options` - Slicing options
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the image is sliced (updated or already up to date), 1 otherwise
pub fn run(image: &str, options: &SliceOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(image, options)
    } else {
        run_human(image, options)
    }
}

fn run_human(image: &str, options: &SliceOptions) -> Result<ExitCode> {
    let config = options.resolve().context("Failed to load slicer config")?;

    println!("{} {}", "Slicing:".cyan().bold(), image);
    println!("{} {}", "Alignment:".dimmed(), config.alignment);

    let run = slice_image(Path::new(image), &config);
    if let Some(ref loaded) = run.loaded {
        reporting::print_descriptor_source(loaded);
    } else {
        reporting::print_load_failures(&run.load_report);
    }

    match run.result {
        Ok(SliceOutcome::Updated {
            ref slices,
            mode_changed,
        }) => {
            let mode_note = if mode_changed {
                ", sprite mode set to multiple"
            } else {
                ""
            };
            println!(
                "\n{} Applied {} slice(s){}",
                "SUCCESS".green().bold(),
                slices.len(),
                mode_note
            );
            Ok(ExitCode::SUCCESS)
        }
        Ok(SliceOutcome::AlreadySliced { ref slices }) => {
            println!(
                "\n{} {} slice(s) already applied, nothing to do",
                "UP TO DATE".green().bold(),
                slices.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(SliceError::Blocked(ref blocker)) => {
            println!("\n{} {}", "BLOCKED".red().bold(), blocker);
            Ok(ExitCode::from(1))
        }
        Err(ref err) => {
            println!("\n{} {}", "FAILED".red().bold(), err);
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(image: &str, options: &SliceOptions) -> Result<ExitCode> {
    let config = match options.resolve() {
        Ok(config) => config,
        Err(e) => {
            let error = JsonError::new(error_codes::CONFIG, e.to_string());
            let output = SliceOutput::failure(vec![error], Vec::new());
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
    };

    let run = slice_image(Path::new(image), &config);
    let warnings = run.json_warnings();

    let (output, code) = match (&run.result, &run.loaded) {
        (Ok(outcome), Some(loaded)) => {
            let (status, mode_changed) = match outcome {
                SliceOutcome::Updated { mode_changed, .. } => ("updated", *mode_changed),
                SliceOutcome::AlreadySliced { .. } => ("already_sliced", false),
            };
            let result = SliceResult {
                image: image.to_string(),
                descriptor: loaded.source_path.display().to_string(),
                format: loaded.descriptor.format(),
                status: status.to_string(),
                mode_changed,
                slices: outcome.slices().to_vec(),
            };
            (SliceOutput::success(result, warnings), ExitCode::SUCCESS)
        }
        _ => (
            SliceOutput::failure(run.json_errors(), warnings),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
