use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::LruMetricsRecorder;

#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_hits: AtomicU64,
    pub get_misses: AtomicU64,
    pub insert_new: AtomicU64,
    pub insert_updates: AtomicU64,
    pub evicted_entries: AtomicU64,
    pub expired_entries: AtomicU64,
    pub removed_entries: AtomicU64,
    pub clear_calls: AtomicU64,
}

impl LruMetrics {
    /// Copies the counters; `cache_len` and `capacity` are supplied by the caller.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> LruMetricsSnapshot {
        let get_hits = self.get_hits.load(Ordering::Relaxed);
        let get_misses = self.get_misses.load(Ordering::Relaxed);
        LruMetricsSnapshot {
            get_calls: get_hits + get_misses,
            get_hits,
            get_misses,
            insert_new: self.insert_new.load(Ordering::Relaxed),
            insert_updates: self.insert_updates.load(Ordering::Relaxed),
            evicted_entries: self.evicted_entries.load(Ordering::Relaxed),
            expired_entries: self.expired_entries.load(Ordering::Relaxed),
            removed_entries: self.removed_entries.load(Ordering::Relaxed),
            clear_calls: self.clear_calls.load(Ordering::Relaxed),
            cache_len,
            capacity,
        }
    }
}

impl LruMetricsRecorder for LruMetrics {
    #[inline]
    fn record_get_hit(&self) {
        self.get_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_get_miss(&self) {
        self.get_misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_insert_new(&self) {
        self.insert_new.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_insert_update(&self) {
        self.insert_updates.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_evicted_entry(&self) {
        self.evicted_entries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_expired_entry(&self) {
        self.expired_entries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_removed_entry(&self) {
        self.removed_entries.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_clear(&self) {
        self.clear_calls.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_derives_get_calls() {
        let metrics = LruMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_evicted_entry();

        let snap = metrics.snapshot(3, 10);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 2);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!(snap.cache_len, 3);
        assert_eq!(snap.capacity, 10);
        assert!((snap.hit_ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
    }
}
