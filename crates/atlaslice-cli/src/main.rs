//! Atlaslice CLI - Command-line interface for slicing sprite sheets
//!
//! This binary reads texture atlas descriptors that sit next to images and
//! records their regions as slice metadata.

use atlaslice_cli::commands;
use atlaslice_cli::commands::slice::{parse_offset, SliceOptions};
use atlaslice_core::Alignment;
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Atlaslice - Sprite sheet slicing from texture atlas descriptors
#[derive(Parser)]
#[command(name = "atlaslice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a descriptor file and print its regions
    Inspect {
        /// Path to the descriptor (.xml or .txt)
        #[arg(short, long)]
        descriptor: String,

        /// Fail on missing SubTexture attributes instead of defaulting them
        #[arg(long)]
        strict: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check whether an image can be sliced from its sibling descriptor
    Check {
        /// Path to the image
        #[arg(short, long)]
        image: String,

        #[command(flatten)]
        slice: SliceFlags,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Slice an image using its sibling descriptor
    Slice {
        /// Path to the image
        #[arg(short, long)]
        image: String,

        #[command(flatten)]
        slice: SliceFlags,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Slice every image under a directory that has a sibling descriptor
    Batch {
        /// Directory to scan recursively
        #[arg(short, long)]
        dir: String,

        #[command(flatten)]
        slice: SliceFlags,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by commands that slice.
#[derive(Args, Debug, Clone, Default)]
struct SliceFlags {
    /// Pivot alignment (center, top_left, ..., bottom_right, custom)
    #[arg(short, long)]
    alignment: Option<Alignment>,

    /// Custom pivot as x,y (selects custom alignment unless --alignment is set)
    #[arg(long, value_parser = parse_offset, allow_hyphen_values = true)]
    offset: Option<[f32; 2]>,

    /// Fail on missing SubTexture attributes instead of defaulting them
    #[arg(long)]
    strict: bool,

    /// Refuse to slice descriptors with duplicate region names
    #[arg(long)]
    reject_duplicates: bool,

    /// Path to a JSON slicer config (flags override its values)
    #[arg(short, long)]
    config: Option<String>,
}

impl From<SliceFlags> for SliceOptions {
    fn from(flags: SliceFlags) -> Self {
        SliceOptions {
            alignment: flags.alignment,
            offset: flags.offset,
            strict: flags.strict,
            reject_duplicates: flags.reject_duplicates,
            config: flags.config,
        }
    }
}

/// Installs the stderr log subscriber. stdout stays free for `--json` output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("atlaslice=debug,atlaslice_cli=debug,atlaslice_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("atlaslice=info,atlaslice_cli=info,atlaslice_core=info")
        })
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Inspect {
            descriptor,
            strict,
            json,
        } => commands::inspect::run(&descriptor, strict, json),
        Commands::Check { image, slice, json } => {
            commands::check::run(&image, &slice.into(), json)
        }
        Commands::Slice { image, slice, json } => {
            commands::slice::run(&image, &slice.into(), json)
        }
        Commands::Batch { dir, slice, json } => commands::batch::run(&dir, &slice.into(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
