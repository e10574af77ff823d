//! Content Module
//!
//! Filesystem access for the server: raw file loading and content-type
//! resolution. Neither piece knows about the cache.

mod loader;
mod mime;

pub use loader::{load_file, FileData};
pub use mime::{resolve_mime, DEFAULT_MIME_TYPE};
