use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lrukit::policy::lru::LruCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 4096;
const UNIVERSE: u64 = 16_384;

/// Runs `ops_per_thread` mixed reads/writes on each of `threads` threads and
/// returns the wall time of the slowest.
fn run_mixed(cache: &Arc<LruCache<u64, u64>>, threads: usize, ops_per_thread: u64) -> Duration {
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|tid| {
            let cache = Arc::clone(cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(tid as u64);
                barrier.wait();
                let start = Instant::now();
                for _ in 0..ops_per_thread {
                    let key = rng.gen_range(0..UNIVERSE);
                    if rng.gen_bool(0.8) {
                        if cache.get(&key).is_none() {
                            cache.set(key, key);
                        }
                    } else {
                        cache.set(key, key);
                    }
                }
                start.elapsed()
            })
        })
        .collect();

    handles
        .into_iter()
        .filter_map(|h| h.join().ok())
        .max()
        .unwrap_or_default()
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_contention");
    for threads in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let cache: Arc<LruCache<u64, u64>> = Arc::new(
                LruCache::builder(CAPACITY)
                    .initial_capacity(CAPACITY)
                    .build(),
            );
            b.iter_custom(|iters| run_mixed(&cache, threads, iters.max(1)));
        });
    }
    group.finish();
}

fn bench_miss_fast_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_miss_fast_path");
    for threads in [1usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let cache: Arc<LruCache<u64, u64>> = Arc::new(LruCache::new(CAPACITY));
            for i in 0..CAPACITY as u64 {
                cache.set(i, i);
            }
            b.iter_custom(|iters| {
                let barrier = Arc::new(Barrier::new(threads));
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let cache = Arc::clone(&cache);
                        let barrier = Arc::clone(&barrier);
                        thread::spawn(move || {
                            barrier.wait();
                            let start = Instant::now();
                            for i in 0..iters {
                                std::hint::black_box(cache.get(&(UNIVERSE + i)));
                            }
                            start.elapsed()
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .filter_map(|h| h.join().ok())
                    .max()
                    .unwrap_or_default()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contention, bench_miss_fast_path);
criterion_main!(benches);
