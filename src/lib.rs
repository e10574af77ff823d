//! Static Cache Server - A minimal sequential static-content server
//!
//! Serves documents from disk through a bounded in-memory LRU content cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod server;

pub use api::ServerContext;
pub use config::Config;
pub use server::serve;
