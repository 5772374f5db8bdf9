//! # perm-metadata
//!
//! Reading and writing of permission set and profile documents.
//!
//! Documents are element trees where every permission entry is a child of the
//! root and every attribute is a leaf element holding text. This crate turns
//! that shape into [`perm_types::PermissionCollection`] and back, keeping the
//! rest of a profile intact so it can be rewritten in place.

#![deny(unsafe_code)]

pub mod document;
pub mod element;
pub mod error;
pub mod files;
pub mod xml;

pub use document::{MetadataDocument, Section, METADATA_NAMESPACE};
pub use element::Element;
pub use error::{MetadataError, MetadataResult};
pub use files::{list_documents, read_document, write_document_file};
pub use xml::{parse_xml, render_xml};
