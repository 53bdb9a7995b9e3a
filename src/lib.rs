//! lrukit: a bounded, concurrent, TTL-aware LRU cache.
//!
//! Recency order lives in an arena-backed intrusive list behind one mutex;
//! key lookups go through a sharded lock-free index. Entries can expire
//! individually, and an eviction callback sees every entry that leaves.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let cache: LruCache<&str, u32> = LruCache::new(2);
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.set("c", 3);
//! assert!(!cache.has(&"a"));
//! assert_eq!(cache.len(), 2);
//! ```

pub mod builder;
pub mod clock;
pub mod ds;
pub mod error;
pub mod index;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use builder::LruBuilder;
pub use policy::lru::LruCache;
