//! Inspect command implementation
//!
//! Parses a descriptor file on its own and prints its regions.

use anyhow::{Context, Result};
use atlaslice_core::loader::{parse_bytes, DISCOVERY_ORDER};
use atlaslice_core::{Descriptor, DescriptorFormat, ParseError, ParseOptions};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, parse_error_to_json, parse_warning_to_json, InspectOutput, InspectResult,
    JsonError,
};
use super::reporting;

/// Formats to try for a descriptor path. `.xml` and `.txt` files are parsed
/// as that format only; anything else tries XML, then text.
pub fn formats_for(path: &Path) -> Vec<DescriptorFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("xml") => vec![DescriptorFormat::Xml],
        Some("txt") => vec![DescriptorFormat::Text],
        _ => DISCOVERY_ORDER.to_vec(),
    }
}

/// Parses descriptor bytes using the formats for `path`, in order.
///
/// Returns the first successful parse, or every error if none succeeds.
pub fn parse_descriptor(
    path: &Path,
    bytes: &[u8],
    options: &ParseOptions,
) -> Result<Descriptor, Vec<ParseError>> {
    let mut errors = Vec::new();
    for format in formats_for(path) {
        match parse_bytes(format, bytes, options) {
            Ok(descriptor) => return Ok(descriptor),
            Err(e) => errors.push(e),
        }
    }
    Err(errors)
}

/// Run the inspect command
///
/// # Arguments
/// * `descriptor_path` - Path to the descriptor file
/// * `strict` - Fail on missing XML attributes
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the descriptor parsed, 1 otherwise
pub fn run(descriptor_path: &str, strict: bool, json_output: bool) -> Result<ExitCode> {
    let options = ParseOptions { strict };
    if json_output {
        run_json(descriptor_path, &options)
    } else {
        run_human(descriptor_path, &options)
    }
}

fn run_human(descriptor_path: &str, options: &ParseOptions) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), descriptor_path);

    let path = Path::new(descriptor_path);
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read descriptor: {}", descriptor_path))?;
    let source_hash = blake3::hash(&bytes).to_hex().to_string();

    let descriptor = match parse_descriptor(path, &bytes, options) {
        Ok(descriptor) => descriptor,
        Err(errors) => {
            for err in &errors {
                println!("  {} {}", "x".red(), err);
            }
            println!("\n{} Descriptor could not be parsed", "FAILED".red().bold());
            return Ok(ExitCode::from(1));
        }
    };

    println!(
        "{} {} ({})",
        "Format:".dimmed(),
        descriptor.format(),
        &source_hash[..16]
    );
    reporting::print_warnings(descriptor.diagnostics());

    if !descriptor.is_empty() {
        let name_width = descriptor
            .regions()
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0);
        println!();
        for region in descriptor.regions() {
            println!(
                "  {:<width$}  x={:<5} y={:<5} {}x{}",
                region.name,
                region.x,
                region.y,
                region.width,
                region.height,
                width = name_width
            );
        }
    }

    println!(
        "\n{} {} region(s), needs at least {}x{} pixels",
        "SUCCESS".green().bold(),
        descriptor.len(),
        descriptor.wanted_width(),
        descriptor.wanted_height()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(descriptor_path: &str, options: &ParseOptions) -> Result<ExitCode> {
    let path = Path::new(descriptor_path);

    let output = match std::fs::read(path) {
        Err(e) => InspectOutput::failure(vec![JsonError::new(
            error_codes::FILE_READ,
            format!("Failed to read descriptor: {}", e),
        )
        .with_file(descriptor_path)]),
        Ok(bytes) => match parse_descriptor(path, &bytes, options) {
            Err(errors) => InspectOutput::failure(
                errors
                    .iter()
                    .map(|e| parse_error_to_json(e, descriptor_path))
                    .collect(),
            ),
            Ok(descriptor) => {
                let warnings = descriptor
                    .diagnostics()
                    .iter()
                    .map(|w| parse_warning_to_json(w, descriptor_path))
                    .collect();
                let result = InspectResult {
                    descriptor: descriptor_path.to_string(),
                    format: descriptor.format(),
                    wanted_width: descriptor.wanted_width(),
                    wanted_height: descriptor.wanted_height(),
                    regions: descriptor.regions().to_vec(),
                };
                InspectOutput::success(
                    result,
                    blake3::hash(&bytes).to_hex().to_string(),
                    warnings,
                )
            }
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
