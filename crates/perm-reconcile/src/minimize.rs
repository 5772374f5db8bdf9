//! Profile minimization: keep only currently-granted items.

use perm_types::{PermissionCategory, PermissionCollection, PermissionItem, VISIBILITY_ATTRIBUTE};
use tracing::debug;

use crate::error::{ReconcileError, ReconcileResult};

/// Whether an item grants anything, judged by its category's positive flag.
///
/// Tabs are granted unless their visibility is exactly `Hidden`; licenses
/// are always granted.
pub fn is_granted(category: PermissionCategory, item: &PermissionItem) -> ReconcileResult<bool> {
    if category.has_visibility() {
        let visibility = item
            .visibility()
            .ok_or_else(|| ReconcileError::MissingAttribute {
                category,
                identity: item.identity.clone(),
                attribute: VISIBILITY_ATTRIBUTE,
            })?;
        return Ok(!visibility.is_hidden());
    }

    match category.positive_attribute() {
        Some(attribute) => item
            .flag(attribute)
            .ok_or_else(|| ReconcileError::MissingAttribute {
                category,
                identity: item.identity.clone(),
                attribute,
            }),
        None => Ok(true),
    }
}

/// Filter every profile category down to granted items.
///
/// Each profile category must be present; anything else in the collection is
/// passed through untouched.
pub fn retain_granted(profile: &PermissionCollection) -> ReconcileResult<PermissionCollection> {
    let mut minimized = profile.clone();

    for category in PermissionCategory::PROFILE {
        let items = profile
            .items(category)
            .ok_or(ReconcileError::MissingCategory { category })?;

        let mut retained = Vec::with_capacity(items.len());
        for item in items {
            if is_granted(category, item)? {
                retained.push(item.clone());
            }
        }
        debug!(%category, removed = items.len() - retained.len(), "minimized");
        minimized.insert(category, retained);
    }

    Ok(minimized)
}
