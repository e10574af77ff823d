//! Cache Entry Module
//!
//! Defines the structure for individual cached documents.

use std::sync::Arc;

// == Cache Entry ==
/// A cached document: its bytes and the content type served with them.
///
/// The content buffer is shared, so cloning an entry never copies the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Request path this entry was stored under
    pub key: String,
    /// Raw document bytes (binary-safe)
    pub content: Arc<[u8]>,
    /// MIME type served with the content
    pub content_type: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, taking ownership of the content bytes.
    pub fn new(key: impl Into<String>, content: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content: Arc::from(content),
            content_type: content_type.into(),
        }
    }

    // == Size ==
    /// Byte length of the content.
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
