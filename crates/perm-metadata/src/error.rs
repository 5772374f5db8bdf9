use std::path::PathBuf;

use perm_types::{DocumentKind, TypesError};
use thiserror::Error;

/// Errors from reading, parsing or writing metadata documents.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("expected a {expected} document, found root element <{found}>")]
    UnexpectedRoot { expected: DocumentKind, found: String },

    #[error(transparent)]
    Types(#[from] TypesError),
}

impl MetadataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MetadataError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;
