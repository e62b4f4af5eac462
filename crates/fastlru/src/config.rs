//! Capacity configuration
//!
//! Capacity is the only knob. Requests outside the supported range are
//! clamped, never rejected.

use tracing::warn;

/// Smallest capacity a cache will be built with
pub const MIN_CAPACITY: usize = 10;

/// Largest capacity a cache will be built with
pub const MAX_CAPACITY: usize = 1000;

/// Capacity used when none is requested
pub const DEFAULT_CAPACITY: usize = 100;

/// Environment variable read by [`CacheConfig::default`]
pub const CAPACITY_ENV: &str = "FASTLRU_CAPACITY";

/// Clamp a requested capacity into `[MIN_CAPACITY, MAX_CAPACITY]`
///
/// A request of `0` means "unspecified" and yields [`DEFAULT_CAPACITY`].
pub fn clamp_capacity(requested: usize) -> usize {
    let capacity = match requested {
        0 => DEFAULT_CAPACITY,
        n => n.clamp(MIN_CAPACITY, MAX_CAPACITY),
    };

    if capacity != requested {
        warn!(requested, capacity, "cache capacity out of range, clamped");
    }

    capacity
}

/// Settings for building a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    capacity: usize,
}

impl CacheConfig {
    /// Create a config with the given capacity (clamped)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: clamp_capacity(capacity),
        }
    }

    /// Build a config from the raw value of `FASTLRU_CAPACITY`
    ///
    /// Missing or unparsable values fall back to [`DEFAULT_CAPACITY`].
    pub fn from_env_value(value: Option<&str>) -> Self {
        let capacity = value
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_CAPACITY);

        Self::new(capacity)
    }

    /// Maximum number of entries the cache holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CacheConfig {
    /// Reads `FASTLRU_CAPACITY`, falling back to [`DEFAULT_CAPACITY`]
    fn default() -> Self {
        Self::from_env_value(std::env::var(CAPACITY_ENV).ok().as_deref())
    }
}
