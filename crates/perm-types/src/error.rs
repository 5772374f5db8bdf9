use thiserror::Error;

use crate::category::PermissionCategory;

/// Errors raised while building permission values from document text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("{category} entry has no '{key}' element")]
    MissingIdentity {
        category: PermissionCategory,
        key: &'static str,
    },
}
