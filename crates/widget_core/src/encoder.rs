//! Reading selected files into encoded blobs

use crate::data_url::{self, EncodedFile};
use crate::ReadError;
use futures::future::try_join_all;
use std::sync::Arc;
use widget_fs::FileSource;

/// Read one file and encode it
pub async fn encode(file: &dyn FileSource) -> Result<EncodedFile, ReadError> {
    let bytes = file.read_all().await.map_err(|source| ReadError {
        name: file.name().to_string(),
        source,
    })?;

    let encoded = data_url::encode_bytes(file.name(), file.mime_type(), &bytes);
    tracing::debug!(name = file.name(), size = bytes.len(), "File encoded");
    Ok(encoded)
}

/// Encode every file concurrently
///
/// All reads are started at once. The output follows input order regardless
/// of completion order. The first failure is returned and the outstanding
/// reads are dropped, so no partial result ever reaches the caller.
pub async fn encode_all(files: &[Arc<dyn FileSource>]) -> Result<Vec<EncodedFile>, ReadError> {
    try_join_all(files.iter().map(|file| encode(file.as_ref()))).await
}
