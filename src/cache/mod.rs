//! Cache Module
//!
//! Bounded in-memory content cache with LRU eviction, keyed by request path.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{LruTracker, NodeId};
pub use stats::CacheStats;
pub use store::CacheStore;
