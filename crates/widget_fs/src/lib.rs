//! File handle layer for the upload widget
//!
//! Provides:
//! - FileSource: a selected file whose full contents can be read asynchronously
//! - LocalFile / MemoryFile: on-disk and in-memory handles
//! - Mime type lookup by file extension

mod mime;
mod source;

pub use mime::{extension_of, mime_for_name, OCTET_STREAM};
pub use source::{FileSource, LocalFile, MemoryFile};

use std::path::Path;
use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl FsError {
    /// Classify an I/O failure on `path`
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                FsError::AccessDenied(path.display().to_string())
            }
            _ => FsError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
