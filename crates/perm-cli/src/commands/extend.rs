//! Permission-set extension command

use std::path::PathBuf;

use clap::Args;
use perm_metadata::{read_document, write_document_file, MetadataDocument};
use perm_reconcile::extended_permissions;
use perm_types::{DocumentKind, PermissionCategory};
use tracing::info;

use crate::error::CliResult;
use crate::output::print_success;

/// Arguments of `permctl extend`
#[derive(Debug, Args)]
pub struct ExtendArgs {
    /// Permission set to compare against
    pub source: PathBuf,

    /// Permission set whose extra grants are kept
    pub target: PathBuf,

    /// Where to write the extended permission set
    pub output: PathBuf,
}

/// Write the target grants that exceed the source
pub fn execute(args: ExtendArgs) -> CliResult<()> {
    let source = read_document(&args.source, DocumentKind::PermissionSet)?;
    let target = read_document(&args.target, DocumentKind::PermissionSet)?;

    let extended = extended_permissions(
        &source.permissions,
        &target.permissions,
        &PermissionCategory::ALL,
    );
    info!(
        kept = extended.total_items(),
        of = target.permissions.total_items(),
        "computed extended permissions"
    );

    let document = MetadataDocument::permission_set(extended, &PermissionCategory::ALL);
    write_document_file(&args.output, &document)?;

    print_success(&format!(
        "Extended permissions written to {}",
        args.output.display()
    ));
    Ok(())
}
