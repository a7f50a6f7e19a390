use atlaslice_core::{LoadReport, LoadedDescriptor, ParseWarning};
use colored::Colorize;

/// Prints where a descriptor came from and any parse diagnostics.
pub(crate) fn print_descriptor_source(loaded: &LoadedDescriptor) {
    println!(
        "{} {} ({}, {})",
        "Descriptor:".dimmed(),
        loaded.source_path.display(),
        loaded.descriptor.format(),
        &loaded.source_hash[..16]
    );
    print_warnings(loaded.descriptor.diagnostics());
}

/// Prints parse diagnostics.
pub(crate) fn print_warnings(warnings: &[ParseWarning]) {
    for warning in warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}

/// Prints the descriptors that were found but rejected.
pub(crate) fn print_load_failures(report: &LoadReport) {
    for (attempt, err) in report.failures() {
        println!("  {} {}: {}", "x".red(), attempt.path.display(), err);
    }
}
