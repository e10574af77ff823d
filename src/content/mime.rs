//! Content-type lookup by file extension.

use std::path::Path;

/// Content type for files whose extension is unknown or missing.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Returns the MIME type for `path` based on its extension.
///
/// Never fails; unknown extensions get [`DEFAULT_MIME_TYPE`].
pub fn resolve_mime(path: impl AsRef<Path>) -> String {
    mime_guess::from_path(path.as_ref())
        .first_raw()
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}
