//! Error types for the static content server
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

// == Server Error Enum ==
/// Unified error type for the static content server.
///
/// Cache lookups never produce one of these: a miss is `None`.
#[derive(Error, Debug)]
pub enum ServerError {
    /// File absent from its document root
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Request line could not be split into method and path
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// Read or write failure on a file or socket
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Returns true for failures that map to a 404 response.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServerError::FileNotFound(_) | ServerError::MalformedRequest(_)
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for the static content server.
pub type Result<T> = std::result::Result<T, ServerError>;
