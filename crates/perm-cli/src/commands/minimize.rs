//! Profile minimization command

use std::path::PathBuf;

use clap::Args;
use perm_metadata::{read_document, write_document_file};
use perm_reconcile::retain_granted;
use perm_types::DocumentKind;
use tracing::info;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::print_success;

/// Arguments of `permctl minimize`
#[derive(Debug, Args)]
pub struct MinimizeArgs {
    /// Profile to rewrite in place (default: profileToMerge.profile)
    pub profile: Option<PathBuf>,
}

/// Strip every ungranted permission from a profile, in place
pub fn execute(args: MinimizeArgs, config: &CliConfig) -> CliResult<()> {
    let path = args.profile.unwrap_or_else(|| config.profile_file());

    let mut document = read_document(&path, DocumentKind::Profile)?;
    let before = document.permissions.total_items();
    let minimized = retain_granted(&document.permissions)?;
    info!(
        removed = before - minimized.total_items(),
        retained = minimized.total_items(),
        "minimized profile"
    );

    document.replace_permissions(minimized);
    write_document_file(&path, &document)?;

    print_success(&format!("Profile updated at {}", path.display()));
    Ok(())
}
