//! LRU (Least Recently Used) cache implementation
//!
//! A key index (hash map from key to arena handle) paired with a
//! [`RecencyList`]. Every lookup, insert, promotion and eviction is O(1).

use std::collections::HashMap;
use ahash::RandomState;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::list::{Handle, Iter, RecencyList};

/// Fixed-capacity LRU cache keyed by strings
///
/// Not synchronized. Wrap it in [`SharedLru`](crate::SharedLru) or confine it
/// to one owner when several threads need it.
pub struct LruCache<V> {
    index: HashMap<String, Handle, RandomState>,
    list: RecencyList<V>,
    capacity: usize,
}

impl<V> LruCache<V> {
    /// Create a cache holding at most `capacity` entries
    ///
    /// The capacity is clamped into
    /// [`MIN_CAPACITY`](crate::MIN_CAPACITY)..=[`MAX_CAPACITY`](crate::MAX_CAPACITY);
    /// `0` selects [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY).
    pub fn new(capacity: usize) -> Self {
        Self::from_config(&CacheConfig::new(capacity))
    }

    /// Create a cache from a prepared config
    pub fn from_config(config: &CacheConfig) -> Self {
        let capacity = config.capacity();

        Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    /// Look up a value and mark it most recently used
    ///
    /// # Errors
    /// * [`Error::EmptyCache`] - the cache holds no entries
    /// * [`Error::KeyNotFound`] - the key is not cached
    pub fn get(&mut self, key: &str) -> Result<&V> {
        if self.list.is_empty() {
            return Err(Error::EmptyCache);
        }

        let handle = *self.index.get(key).ok_or(Error::KeyNotFound)?;
        self.list.move_to_front(handle);
        trace!(key, "promoted on get");
        self.debug_check_invariants();

        self.list.get(handle).ok_or(Error::KeyNotFound)
    }

    /// Look up a value without touching recency order
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.index
            .get(key)
            .and_then(|&handle| self.list.get(handle))
    }

    /// Check for a key without touching recency order
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let handle = self.index.remove(key)?;
        let removed = self.list.remove(handle).map(|(_, value)| value);
        self.debug_check_invariants();
        removed
    }

    /// Drop every entry. Capacity is kept.
    pub fn clear(&mut self) {
        debug!(entries = self.list.len(), "clearing cache");
        self.index.clear();
        self.list.clear();
        self.debug_check_invariants();
    }

    /// Iterate over `(key, value)` pairs, most recently used first
    pub fn iter(&self) -> Iter<'_, V> {
        self.list.iter()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict(&mut self) -> Option<(String, V)> {
        debug_assert!(!self.list.is_empty(), "eviction from an empty cache");

        let (key, value) = self.list.pop_back()?;
        self.index.remove(&key);
        debug!(key = %key, "evicted least recently used entry");

        Some((key, value))
    }

    /// Walk the whole recency list and key index, checking they agree
    ///
    /// O(n). Every link must be mirrored by its back link, every indexed key
    /// must name a live entry holding that key, and the entry count must
    /// match the index and stay within capacity.
    pub fn is_consistent(&self) -> bool {
        self.list.is_consistent()
            && self.index.len() == self.list.len()
            && self.list.len() <= self.capacity
            && self
                .index
                .iter()
                .all(|(key, &handle)| self.list.key(handle) == Some(key.as_str()))
    }

    fn debug_check_invariants(&self) {
        debug_assert_eq!(self.index.len(), self.list.len());
        debug_assert!(self.list.len() <= self.capacity);
        debug_assert_eq!(self.list.head().is_none(), self.list.tail().is_none());
    }
}

impl<V: Clone> LruCache<V> {
    /// Copy out every value, most recently used first
    ///
    /// The result is detached from the cache: later operations do not
    /// change it.
    pub fn snapshot(&self) -> Vec<V> {
        self.list.iter().map(|(_, value)| value.clone()).collect()
    }
}

impl<V: PartialEq> LruCache<V> {
    /// Insert or update a key and mark it most recently used
    ///
    /// An existing entry is promoted even when `value` equals the stored
    /// value; the stored value is only overwritten when it differs. A new key
    /// on a full cache evicts exactly one entry, the least recently used,
    /// which is returned.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<(String, V)> {
        let key = key.into();

        if let Some(&handle) = self.index.get(&key) {
            if let Some(current) = self.list.get_mut(handle) {
                if *current != value {
                    *current = value;
                }
            }
            self.list.move_to_front(handle);
            trace!(key = %key, "promoted on set");
            self.debug_check_invariants();
            return None;
        }

        let evicted = if self.list.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let handle = self.list.push_front(key.clone(), value);
        trace!(key = %key, "inserted");
        self.index.insert(key, handle);
        self.debug_check_invariants();

        evicted
    }
}
