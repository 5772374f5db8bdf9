//! CLI error types

use perm_metadata::MetadataError;
use perm_reconcile::ReconcileError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing a metadata document failed
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A profile could not be minimized or merged
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
