//! # fastlru
//!
//! Fixed-capacity, in-memory LRU cache.
//!
//! ## Architecture
//! - **Key index**: AHash map from key to arena handle (O(1))
//! - **Recency list**: arena-backed doubly linked list with a sentinel (O(1)
//!   promotion, insert and eviction)
//! - **SharedLru**: one lock around the whole cache for concurrent callers
//!
//! ## Example
//!
//! ```rust
//! use fastlru::{Error, LruCache};
//!
//! let mut cache = LruCache::new(10);
//! assert_eq!(cache.get("a"), Err(Error::EmptyCache));
//!
//! cache.set("a", 1);
//! cache.set("b", 2);
//! assert_eq!(cache.get("a"), Ok(&1));
//! assert_eq!(cache.snapshot(), vec![1, 2]);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod list;
mod lru;
mod shared;
mod stats;

pub use config::{
    clamp_capacity, CacheConfig, CAPACITY_ENV, DEFAULT_CAPACITY, MAX_CAPACITY, MIN_CAPACITY,
};
pub use error::{Error, Result};
pub use list::Iter;
pub use lru::LruCache;
pub use shared::SharedLru;
pub use stats::CacheStats;
