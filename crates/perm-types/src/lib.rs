//! # perm-types
//!
//! Data model shared by the permission-set extender, the profile minimizer and
//! the profile merger.
//!
//! ## Key Concepts
//!
//! - **PermissionCategory**: one fixed kind of access grant (field, object,
//!   application, class, flow, page, record type, license, tab, user)
//! - **Identity key**: the attribute that names an item within its category
//! - **Grant attribute**: a boolean flag, or the tri-state tab visibility
//! - **PermissionItem**: one entry of a category, identity plus attributes
//! - **PermissionCollection**: category -> ordered items, the permission slice of
//!   a permission set or profile document
//!
//! Values are plain scalars here. Wrapping and unwrapping of document text
//! happens in `perm-metadata`, never in the algorithms.

#![deny(unsafe_code)]

pub mod category;
pub mod collection;
pub mod error;
pub mod item;
pub mod visibility;

pub use category::{
    DocumentKind, GrantAttribute, PermissionCategory, DEFAULT_IDENTITY_KEY, VISIBILITY_ATTRIBUTE,
};
pub use collection::PermissionCollection;
pub use error::TypesError;
pub use item::{AttributeValue, PermissionItem};
pub use visibility::{TabVisibility, VisibilityLevel};
