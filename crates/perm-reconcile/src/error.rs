use perm_types::PermissionCategory;
use thiserror::Error;

/// Errors from the reconciliation algorithms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("profile has no {category} entries")]
    MissingCategory { category: PermissionCategory },

    #[error("{category} '{identity}' has no boolean '{attribute}'")]
    MissingAttribute {
        category: PermissionCategory,
        identity: String,
        attribute: &'static str,
    },
}

/// Result type for reconciliation
pub type ReconcileResult<T> = Result<T, ReconcileError>;
