//! Profile merge command

use std::path::PathBuf;

use clap::Args;
use perm_metadata::{list_documents, read_document, write_document_file, MetadataDocument};
use perm_reconcile::{MergeSummary, MinimalPermissions};
use perm_types::{DocumentKind, PermissionCategory};
use tracing::{debug, info, warn};

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{print_merge_summary, print_success, OutputFormat};

/// Arguments of `permctl merge`
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Folder of profiles to merge (default: profilesToMerge)
    pub folder: Option<PathBuf>,

    /// Permission set to write (default: PermissionSet.xml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Merge every profile of a folder into the permission set they all share
pub fn execute(args: MergeArgs, config: &CliConfig) -> CliResult<()> {
    let folder = args.folder.unwrap_or_else(|| config.profile_folder());
    let output = args.output.unwrap_or_else(|| config.merge_output());

    let files = list_documents(&folder, &config.profile_extensions())?;
    if files.is_empty() {
        warn!(folder = %folder.display(), "no profiles found");
    }

    // Everything is read before anything is merged or written.
    let mut profiles = Vec::with_capacity(files.len());
    for file in &files {
        profiles.push(read_document(file, DocumentKind::Profile)?);
    }

    let mut floor = MinimalPermissions::new();
    for (file, profile) in files.iter().zip(&profiles) {
        debug!(file = %file.display(), "absorbing profile");
        floor.absorb(&profile.permissions)?;
    }
    let profile_count = floor.profiles();
    let merged = floor.finish();
    let summary = MergeSummary::of(profile_count, &merged);
    info!(profiles = profile_count, items = merged.total_items(), "merged profiles");

    let document = MetadataDocument::permission_set(merged, &PermissionCategory::ALL);
    write_document_file(&output, &document)?;

    print_success(&format!("PermissionSet generated at {}", output.display()));
    print_merge_summary(&summary, args.format)
}
