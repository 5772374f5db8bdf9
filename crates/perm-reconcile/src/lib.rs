//! # perm-reconcile
//!
//! Comparison and aggregation rules over permission collections.
//!
//! - [`extend`] keeps the target items that grant more than the source
//! - [`minimize`] drops every item of a profile that grants nothing
//! - [`merge`] computes the common floor of many profiles: every boolean grant
//!   is AND-ed across profiles and tab visibility only ever moves toward
//!   `Hidden`
//!
//! All three work on [`perm_types::PermissionCollection`] and never touch
//! document text.

#![deny(unsafe_code)]

pub mod error;
pub mod extend;
pub mod merge;
pub mod minimize;

pub use error::{ReconcileError, ReconcileResult};
pub use extend::{classify, extended_permissions, find_match, Extension};
pub use merge::{minimal_permissions, AggregatedPermission, MergeSummary, MinimalPermissions};
pub use minimize::{is_granted, retain_granted};
