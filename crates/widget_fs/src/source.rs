//! Selected-file handles

use crate::{mime_for_name, FsError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file chosen by the user, not yet read
///
/// `name` and `mime_type` are known up front (as the picker reports them);
/// the contents are only read when the encoder asks for them.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Original file name, without any directory part
    fn name(&self) -> &str;

    /// Declared mime type
    fn mime_type(&self) -> &str;

    /// Read the full binary contents
    async fn read_all(&self) -> Result<Vec<u8>>;
}

/// File on the local disk
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    mime_type: &'static str,
}

impl LocalFile {
    /// Create a handle for `path`
    ///
    /// The file is not opened here, so a file removed before the read
    /// surfaces as an error from `read_all`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| FsError::InvalidPath(path.display().to_string()))?;
        let mime_type = mime_for_name(&name);

        Ok(Self {
            path,
            name,
            mime_type,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        self.mime_type
    }

    async fn read_all(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading {:?}", self.path);
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| FsError::from_io(e, &self.path))
    }
}

/// File whose contents are already in memory (drag-and-drop payloads, tests)
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Build a handle whose mime type is guessed from the name
    pub fn from_name(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let mime_type = mime_for_name(&name).to_string();
        Self::new(name, mime_type, bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[async_trait]
impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn read_all(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.to_vec())
    }
}
