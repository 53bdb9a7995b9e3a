//! Builder for [`LruCache`] instances.
//!
//! Collects capacity, default TTL, eviction callback, time source and arena
//! pre-allocation, then assembles the cache around the default
//! [`ShardedIndex`] or a caller-supplied [`ConcurrentIndex`].
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use lrukit::builder::LruBuilder;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: LruCache<u64, String> = LruBuilder::new(100)
//!     .default_ttl(Duration::from_secs(60))
//!     .on_eviction(|key: &u64, _value: &String| println!("evicted {key}"))
//!     .build();
//! cache.set(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::index::{ConcurrentIndex, ShardedIndex};
use crate::policy::lru::{EvictionCallback, LruCache, DEFAULT_MAX_SIZE};

/// Replaces a zero capacity with [`DEFAULT_MAX_SIZE`].
pub(crate) fn normalize_max_size(max_size: usize) -> usize {
    if max_size == 0 {
        warn!(
            default = DEFAULT_MAX_SIZE,
            "lru cache configured with max_size 0, using default"
        );
    }
    effective_max_size(max_size)
}

fn effective_max_size(max_size: usize) -> usize {
    if max_size == 0 {
        DEFAULT_MAX_SIZE
    } else {
        max_size
    }
}

/// Builder for [`LruCache`].
pub struct LruBuilder<K, V> {
    max_size: usize,
    default_ttl: Duration,
    on_eviction: Option<EvictionCallback<K, V>>,
    clock: Option<Arc<dyn Clock>>,
    initial_capacity: usize,
}

impl<K, V> LruBuilder<K, V> {
    /// Create a builder for a cache of at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            default_ttl: Duration::ZERO,
            on_eviction: None,
            clock: None,
            initial_capacity: 0,
        }
    }

    /// TTL applied by `set`. `Duration::ZERO` (the default) disables it.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Callback run for every entry leaving the cache, never under the
    /// cache lock.
    pub fn on_eviction<F>(mut self, callback: F) -> Self
    where
        F: Fn(&K, &V) + Send + Sync + 'static,
    {
        self.on_eviction = Some(Arc::new(callback));
        self
    }

    /// Time source used for expiration. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Arena slots and index buckets to allocate up front, capped at the
    /// cache capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Build the cache with the default [`ShardedIndex`].
    pub fn build(self) -> LruCache<K, V>
    where
        K: Clone + Eq + Hash + Send + Sync,
        V: Clone,
    {
        let prealloc = self.initial_capacity.min(effective_max_size(self.max_size));
        self.build_with_index(ShardedIndex::with_capacity(prealloc))
    }

    /// Build the cache around a caller-supplied index. The index must be
    /// empty.
    pub fn build_with_index<I>(self, index: I) -> LruCache<K, V, I>
    where
        K: Clone + Eq + Hash,
        V: Clone,
        I: ConcurrentIndex<K>,
    {
        let max_size = normalize_max_size(self.max_size);
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        LruCache::from_parts(
            max_size,
            self.default_ttl,
            self.on_eviction,
            clock,
            self.initial_capacity.min(max_size),
            index,
        )
    }
}

impl<K, V> Default for LruBuilder<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl<K, V> fmt::Debug for LruBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruBuilder")
            .field("max_size", &self.max_size)
            .field("default_ttl", &self.default_ttl)
            .field("on_eviction", &self.on_eviction.is_some())
            .field("clock", &self.clock)
            .field("initial_capacity", &self.initial_capacity)
            .finish()
    }
}
