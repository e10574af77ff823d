//! File Loader
//!
//! Reads whole documents from disk.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ServerError};

/// Bytes of a file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    /// Full file content
    pub content: Vec<u8>,
    /// Byte length of `content`
    pub size: usize,
}

/// Loads the full content of `path`.
///
/// A missing file, or a path naming a directory, is `FileNotFound`; other
/// read failures surface as `Io`.
pub async fn load_file(path: impl AsRef<Path>) -> Result<FileData> {
    let path = path.as_ref();

    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ServerError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_file() {
        return Err(ServerError::FileNotFound(path.to_path_buf()));
    }

    let content = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ServerError::FileNotFound(path.to_path_buf()),
        _ => ServerError::Io(e),
    })?;

    debug!(path = %path.display(), size = content.len(), "Loaded file from disk");

    Ok(FileData {
        size: content.len(),
        content,
    })
}
