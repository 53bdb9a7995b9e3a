//! DHAT heap profiler for lrukit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>
//!
//! After warm-up the cache should reuse arena slots, so the steady-state
//! phases are expected to add no heap blocks for `u64` keys and values.

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::time::Duration;

use lrukit::policy::lru::LruCache;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// 90% of accesses hit 10% of keys.
fn hotset_workload(cache: &LruCache<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe as f64 * 0.1) as u64;

    for _ in 0..operations {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (universe - hot_size))
        };

        if cache.get(&key).is_none() {
            cache.set(key, key);
        }
    }
}

fn get_or_set_workload(cache: &LruCache<u64, u64>, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for _ in 0..operations {
        let key = rng.next_u64() % universe;
        let _ = cache.get_or_set(key, key, Duration::ZERO);
    }
}

/// Every insert is a new key, so every insert evicts.
fn eviction_churn(cache: &LruCache<u64, u64>, start: u64, operations: usize) {
    for i in 0..operations as u64 {
        cache.set(start + i, i);
    }
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    let capacity = 4096;
    let operations = 100_000;
    let universe = 16_384;

    println!("=== Profiling LRU ===");
    let cache: LruCache<u64, u64> = LruCache::builder(capacity)
        .initial_capacity(capacity)
        .build();

    for i in 0..capacity as u64 {
        cache.set(i, i);
    }
    let warm = dhat::HeapStats::get();
    println!("  After warm-up: {} blocks, {} bytes", warm.total_blocks, warm.total_bytes);

    hotset_workload(&cache, operations, universe, 42);
    get_or_set_workload(&cache, operations / 2, universe, 7);
    eviction_churn(&cache, universe, operations / 4);

    let steady = dhat::HeapStats::get();
    println!(
        "  Steady state added: {} blocks, {} bytes",
        steady.total_blocks - warm.total_blocks,
        steady.total_bytes - warm.total_bytes
    );
    println!("  Final size: {}", cache.len());
}
