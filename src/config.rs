//! Configuration Module
//!
//! Holds the fixed server settings. The process takes no flags and reads no
//! environment variables; tests build their own `Config` values.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Port the server listens on by default.
pub const DEFAULT_PORT: u16 = 3490;

/// Directory holding system pages such as `404.html`.
pub const SERVER_FILES: &str = "./serverfiles";

/// Directory holding application content.
pub const SERVER_ROOT: &str = "./serverroot";

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on (0 picks an ephemeral port)
    pub server_port: u16,
    /// Document root for system/error pages
    pub server_files: PathBuf,
    /// Document root for application content
    pub server_root: PathBuf,
    /// Maximum number of entries the content cache can hold
    pub cache_capacity: usize,
    /// Pre-sizing hint for the cache index, 0 = size from capacity
    pub cache_index_hint: usize,
    /// Upper bound on bytes read for one request
    pub max_request_size: usize,
}

impl Config {
    /// Address the listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.server_port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            server_files: PathBuf::from(SERVER_FILES),
            server_root: PathBuf::from(SERVER_ROOT),
            cache_capacity: 10,
            cache_index_hint: 0,
            max_request_size: 64 * 1024,
        }
    }
}
