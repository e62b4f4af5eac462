//! SharedLru: lock-guarded handle over an LruCache

use std::sync::Arc;
use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Cloneable, thread-safe LRU cache handle
///
/// The whole cache sits behind one exclusive lock: a promotion rewrites
/// several links at once, so there is no finer-grained locking. Clones share
/// the same entries and statistics.
pub struct SharedLru<V> {
    /// Cache entries
    cache: Arc<Mutex<LruCache<V>>>,

    /// Cache statistics
    stats: Arc<CacheStats>,

    /// Cache capacity
    capacity: usize,
}

impl<V> Clone for SharedLru<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            stats: Arc::clone(&self.stats),
            capacity: self.capacity,
        }
    }
}

impl<V: Clone + PartialEq> SharedLru<V> {
    /// Create a shared cache with the given capacity (clamped)
    pub fn new(capacity: usize) -> Self {
        Self::from_config(&CacheConfig::new(capacity))
    }

    /// Create a shared cache from a prepared config
    pub fn from_config(config: &CacheConfig) -> Self {
        let cache = LruCache::from_config(config);
        let capacity = cache.capacity();

        Self {
            cache: Arc::new(Mutex::new(cache)),
            stats: Arc::new(CacheStats::new()),
            capacity,
        }
    }

    /// Get a copy of a cached value, marking it most recently used
    ///
    /// # Errors
    /// * [`Error::EmptyCache`] - the cache holds no entries
    /// * [`Error::KeyNotFound`] - the key is not cached
    pub fn get(&self, key: &str) -> Result<V> {
        let mut cache = self.cache.lock();
        match cache.get(key) {
            Ok(value) => {
                self.stats.record_hit();
                Ok(value.clone())
            }
            Err(Error::EmptyCache) => {
                self.stats.record_empty_lookup();
                Err(Error::EmptyCache)
            }
            Err(err) => {
                self.stats.record_miss();
                Err(err)
            }
        }
    }

    /// Insert or update a value, returning the evicted entry if any
    pub fn set(&self, key: impl Into<String>, value: V) -> Option<(String, V)> {
        let key = key.into();
        let mut cache = self.cache.lock();

        if cache.contains(&key) {
            self.stats.record_update();
        } else {
            self.stats.record_insert();
        }

        let evicted = cache.set(key, value);
        if evicted.is_some() {
            self.stats.record_eviction();
        }

        evicted
    }

    /// Copy out every value, most recently used first
    pub fn snapshot(&self) -> Vec<V> {
        self.cache.lock().snapshot()
    }

    /// Clear the cache and reset statistics
    pub fn clear(&self) {
        self.cache.lock().clear();
        self.stats.reset();
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
