//! LRU Tracker Module
//!
//! Recency order for cache eviction, kept as a doubly-linked list whose nodes
//! live in a slot vector and link to each other by index.
//!
//! ```text
//!   head (MRU) ─► [3] ◄──► [0] ◄──► [2] ◄── tail (LRU)
//! ```
//!
//! The store keeps each key's `NodeId`, so touching or removing a key never
//! scans the list.

// == Node Id ==
/// Stable handle to a node in the tracker.
///
/// Valid until the node is removed or evicted; the slot is then recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug, Default)]
pub struct LruTracker {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tracker with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Adds a new key as most recently used and returns its handle.
    ///
    /// The caller guarantees the key is not already tracked.
    pub fn push_front(&mut self, key: String) -> NodeId {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.attach_front(idx);
        self.len += 1;
        NodeId(idx)
    }

    // == Touch ==
    /// Marks a node as recently used (moves it to the head).
    pub fn touch(&mut self, id: NodeId) {
        if self.head == Some(id.0) || !self.is_live(id.0) {
            return;
        }
        self.detach(id.0);
        self.attach_front(id.0);
    }

    // == Remove ==
    /// Unlinks a node and returns its key.
    pub fn remove(&mut self, id: NodeId) -> Option<String> {
        if !self.is_live(id.0) {
            return None;
        }
        self.detach(id.0);
        self.release(id.0)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let tail = self.tail?;
        self.detach(tail);
        self.release(tail)
    }

    // == Iteration ==
    /// Keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.slots.get(cursor?)?.as_ref()?;
            cursor = node.next;
            Some(node.key.as_str())
        })
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Internal Linking ==
    fn is_live(&self, idx: usize) -> bool {
        matches!(self.slots.get(idx), Some(Some(_)))
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        match self.slots.get_mut(idx) {
            Some(Some(node)) => node,
            _ => unreachable!("linked slot {idx} is vacant"),
        }
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            let links = (node.prev, node.next);
            node.prev = None;
            node.next = None;
            links
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn release(&mut self, idx: usize) -> Option<String> {
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(node.key)
    }
}
