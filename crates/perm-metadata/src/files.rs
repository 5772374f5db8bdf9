//! File-system access for metadata documents.

use std::fs;
use std::path::{Path, PathBuf};

use perm_types::DocumentKind;
use tracing::debug;

use crate::document::MetadataDocument;
use crate::error::{MetadataError, MetadataResult};

/// Read and parse a document of the given kind.
pub fn read_document(path: &Path, kind: DocumentKind) -> MetadataResult<MetadataDocument> {
    let contents = fs::read_to_string(path).map_err(|e| MetadataError::io(path, e))?;
    let document = MetadataDocument::parse(kind, &contents)?;
    debug!(
        path = %path.display(),
        kind = %kind,
        items = document.permissions.total_items(),
        "read document"
    );
    Ok(document)
}

/// Render a document fully in memory, then write it to `path`.
pub fn write_document_file(path: &Path, document: &MetadataDocument) -> MetadataResult<()> {
    let mut rendered = document.render()?;
    rendered.push('\n');
    fs::write(path, rendered).map_err(|e| MetadataError::io(path, e))?;
    debug!(path = %path.display(), "wrote document");
    Ok(())
}

/// Files in `dir` whose name ends with one of `extensions`, sorted by file name.
pub fn list_documents(dir: &Path, extensions: &[String]) -> MetadataResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| MetadataError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MetadataError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| MetadataError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
