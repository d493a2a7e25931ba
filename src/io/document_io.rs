use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::document::{Document, TodoKeywordSet};
use crate::model::heading::IdAllocator;
use crate::parse::{parse_document_with_keyword_sets, serialize_document};

/// Error type for reading and writing org files
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read the raw text of an org file
pub fn read_source(path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(path).map_err(|e| DocumentError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and parse an org file. `fallback_sets` apply when the file declares
/// no keyword set.
pub fn read_document(
    path: &Path,
    fallback_sets: &[TodoKeywordSet],
    ids: &mut IdAllocator,
) -> Result<(String, Document), DocumentError> {
    let source = read_source(path)?;
    let doc = parse_document_with_keyword_sets(&source, fallback_sets, ids);
    Ok((source, doc))
}

/// Serialize a document and replace the file at `path` in one step
pub fn write_document(path: &Path, doc: &Document) -> Result<(), DocumentError> {
    atomic_write(path, serialize_document(doc).as_bytes()).map_err(|e| DocumentError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write to a temp file in the same directory, then rename over `path`
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
