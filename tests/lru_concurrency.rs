// ==============================================
// LRU CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Races between writers, readers and eviction callbacks on one shared
// cache. These require multi-threaded execution and cannot live inline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use lrukit::prelude::*;

// ==============================================
// GetOrSet atomicity
// ==============================================
//
// Two callers missing on the same key must not both insert.

mod get_or_set_race {
    use super::*;

    #[test]
    fn exactly_one_insert_wins() {
        let num_threads = 8;

        for round in 0..200u64 {
            let cache: Arc<LruCache<u64, u64>> = Arc::new(LruCache::new(64));
            let barrier = Arc::new(Barrier::new(num_threads));

            let handles: Vec<_> = (0..num_threads as u64)
                .map(|tid| {
                    let cache = cache.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        cache.get_or_set(round, tid, Duration::ZERO)
                    })
                })
                .collect();

            let outcomes: Vec<(u64, bool)> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();

            let inserts: Vec<_> = outcomes.iter().filter(|(_, loaded)| !loaded).collect();
            assert_eq!(inserts.len(), 1, "round {round}: {outcomes:?}");
            let winner = inserts[0].0;
            assert!(outcomes.iter().all(|(value, _)| *value == winner));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&round), Some(winner));
            cache.check_invariants().unwrap();
        }
    }
}

// ==============================================
// Capacity under contention
// ==============================================

mod capacity {
    use super::*;

    #[test]
    fn concurrent_inserts_respect_capacity() {
        let capacity = 10;
        let num_threads = 16;
        let inserts_per_thread = 50;

        for _ in 0..50 {
            let cache: Arc<LruCache<u64, u64>> = Arc::new(LruCache::new(capacity));
            let barrier = Arc::new(Barrier::new(num_threads));

            let handles: Vec<_> = (0..num_threads)
                .map(|tid| {
                    let cache = cache.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        for i in 0..inserts_per_thread {
                            let key = (tid * inserts_per_thread + i) as u64;
                            cache.set(key, key);
                            assert!(cache.len() <= capacity);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(cache.len(), capacity);
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn every_evicted_entry_is_reported_once() {
        let evicted = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&evicted);
        let cache: Arc<LruCache<u64, u64>> = Arc::new(
            LruCache::builder(32)
                .on_eviction(move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .build(),
        );

        let num_threads = 8;
        let per_thread = 1_000u64;
        let handles: Vec<_> = (0..num_threads as u64)
            .map(|tid| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..per_thread {
                        cache.set(tid * per_thread + i, i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let inserted = num_threads as usize * per_thread as usize;
        assert_eq!(evicted.load(Ordering::SeqCst) + cache.len(), inserted);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Callbacks outside the lock
// ==============================================
//
// A callback that reads the cache would deadlock if it ran under the
// mutation lock.

mod callbacks {
    use super::*;

    #[test]
    fn callback_can_read_cache_during_eviction() {
        let shared: Arc<Mutex<Option<Arc<LruCache<u64, u64>>>>> = Arc::new(Mutex::new(None));
        let handle = Arc::clone(&shared);
        let observed = Arc::new(AtomicUsize::new(0));
        let observed_in_cb = Arc::clone(&observed);

        let cache = Arc::new(
            LruCache::builder(4)
                .on_eviction(move |key: &u64, _: &u64| {
                    let guard = handle.lock().unwrap();
                    if let Some(cache) = guard.as_ref() {
                        assert!(!cache.has(key), "victim still visible in callback");
                        let _ = cache.peek(&0);
                        observed_in_cb.fetch_add(1, Ordering::SeqCst);
                    }
                })
                .build(),
        );
        *shared.lock().unwrap() = Some(Arc::clone(&cache));

        let writers: Vec<_> = (0..4u64)
            .map(|tid| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        cache.set(tid * 1_000 + i, i);
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(observed.load(Ordering::SeqCst), 800 - cache.len());
        shared.lock().unwrap().take();
    }
}

// ==============================================
// Mixed workload
// ==============================================

mod mixed {
    use super::*;

    #[test]
    fn mixed_operations_preserve_invariants() {
        let cache: Arc<LruCache<u64, u64>> = Arc::new(LruCache::new(64));
        let barrier = Arc::new(Barrier::new(6));

        let handles: Vec<_> = (0..6u64)
            .map(|tid| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..2_000u64 {
                        let key = (i * 7 + tid) % 128;
                        match (i + tid) % 6 {
                            0 => cache.set(key, i),
                            1 => {
                                cache.get(&key);
                            },
                            2 => {
                                cache.delete(&key);
                            },
                            3 => {
                                cache.get_or_set(key, i, Duration::ZERO);
                            },
                            4 => {
                                cache.peek(&key);
                            },
                            _ => {
                                let _ = cache.keys();
                            },
                        }
                    }
                })
            })
            .collect();

        let resizer = {
            let cache = cache.clone();
            thread::spawn(move || {
                for size in [32, 96, 16, 64] {
                    cache.resize(size);
                    thread::yield_now();
                }
            })
        };

        for handle in handles {
            handle.join().unwrap();
        }
        resizer.join().unwrap();

        assert!(cache.len() <= cache.max_size());
        cache.check_invariants().unwrap();
    }
}
