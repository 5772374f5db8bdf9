//! Output formatting utilities

use colored::*;
use perm_reconcile::MergeSummary;

use crate::error::CliResult;

/// Output format for command summaries
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text lines
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Print the outcome of a merge in the specified format
pub fn print_merge_summary(summary: &MergeSummary, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Text => {
            println!("Number of accessible fields: {}", summary.accessible_fields());
            println!("Number of accessible objects: {}", summary.accessible_objects());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}
