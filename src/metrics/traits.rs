//! # Metrics Traits
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │      LruMetricsRecorder      │   written by the cache engine
//!   │  get_hit/get_miss/insert     │
//!   │  evict/expire/remove/clear   │
//!   └──────────────┬───────────────┘
//!                  │
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders take `&self`: the engine is shared across threads and some
//! counters (misses) are recorded without holding the list lock.

/// Counters recorded by the LRU engine.
pub trait LruMetricsRecorder {
    fn record_get_hit(&self);
    fn record_get_miss(&self);
    fn record_insert_new(&self);
    fn record_insert_update(&self);
    fn record_evicted_entry(&self);
    fn record_expired_entry(&self);
    fn record_removed_entry(&self);
    fn record_clear(&self);
}

/// Read a point-in-time copy of a metrics set.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publish a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
