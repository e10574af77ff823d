//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cache::lru::NodeId;
use crate::cache::{CacheEntry, CacheStats, LruTracker};

/// Index value: the entry plus the handle of its recency node.
#[derive(Debug)]
struct Slot {
    entry: CacheEntry,
    node: NodeId,
}

// == Cache Store ==
/// Bounded content cache with least-recently-used eviction.
///
/// Every key in `entries` owns exactly one node in `lru` and vice versa.
#[derive(Debug)]
pub struct CacheStore {
    /// Key to entry index
    entries: HashMap<String, Slot>,
    /// Recency order, head = most recently used
    lru: LruTracker,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// A zero capacity disables caching: every lookup misses.
    pub fn new(capacity: usize) -> Self {
        Self::with_index_hint(capacity, 0)
    }

    /// Creates an empty store, pre-sizing the index for `hint` keys.
    ///
    /// The hint only affects allocation; `0` sizes the index from `capacity`.
    pub fn with_index_hint(capacity: usize, hint: usize) -> Self {
        if capacity == 0 {
            warn!("Content cache created with zero capacity, caching disabled");
        }
        let reserve = if hint == 0 { capacity } else { hint };

        Self {
            entries: HashMap::with_capacity(reserve),
            lru: LruTracker::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Get ==
    /// Looks up `key`, promoting it to most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        match self.entries.get(key) {
            Some(slot) => {
                self.lru.touch(slot.node);
                self.stats.record_hit();
                Some(&slot.entry)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Looks up `key` without touching recency or counters.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key).map(|slot| &slot.entry)
    }

    // == Put ==
    /// Inserts or replaces the entry for `key` and marks it most recently used.
    ///
    /// Adding a new key to a full store first evicts the least recently used
    /// entry, which is returned. Replacing an existing key never evicts.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Option<CacheEntry> {
        self.insert(CacheEntry::new(key, content, content_type))
    }

    /// Same as [`put`](Self::put) for an already built entry, keyed by
    /// `entry.key`.
    pub fn insert(&mut self, entry: CacheEntry) -> Option<CacheEntry> {
        if self.capacity == 0 {
            return None;
        }

        let key = entry.key.clone();

        if let Some(slot) = self.entries.get_mut(&key) {
            slot.entry = entry;
            self.lru.touch(slot.node);
            self.stats.record_put(true);
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        let node = self.lru.push_front(key.clone());
        self.entries.insert(key, Slot { entry, node });

        self.stats.record_put(false);
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    // == Remove ==
    /// Drops `key` from both the index and the recency order.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let slot = self.entries.remove(key)?;
        self.lru.remove(slot.node);
        self.stats.set_total_entries(self.entries.len());
        Some(slot.entry)
    }

    fn evict_oldest(&mut self) -> Option<CacheEntry> {
        let key = self.lru.evict_oldest()?;
        let slot = self.entries.remove(&key)?;

        self.stats.record_eviction();
        debug!(key = %key, size = slot.entry.size(), "Evicted least recently used entry");

        Some(slot.entry)
    }

    // == Introspection ==
    /// Returns true if `key` is cached. Does not affect recency.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Cached keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> + '_ {
        self.lru.iter()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
