#![no_main]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use lrukit::clock::ManualClock;
use lrukit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// Drives every public operation with a manual clock and checks capacity,
// callback accounting and index/list consistency after each step.
fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };

    let clock = Arc::new(ManualClock::new());
    let removed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&removed);
    let cache: LruCache<u8, u16> = LruCache::builder(usize::from(first % 16) + 1)
        .clock(clock.clone())
        .on_eviction(move |_, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .build();
    let mut inserted = 0usize;

    for chunk in ops.chunks_exact(3) {
        let key = chunk[1] % 32;
        let arg = chunk[2];
        match chunk[0] % 12 {
            0 | 1 => {
                let before = cache.peek(&key).is_some();
                cache.set(key, u16::from(arg));
                if !before {
                    inserted += 1;
                }
            }
            2 => {
                let existed = cache.peek(&key).is_some();
                let ttl = Duration::from_millis(u64::from(arg));
                cache.set_with_ttl(key, u16::from(arg), ttl);
                if !existed {
                    inserted += 1;
                }
            }
            3 => {
                let _ = cache.get(&key);
            }
            4 => {
                let _ = cache.peek(&key);
            }
            5 => {
                let _ = cache.delete(&key);
            }
            6 => {
                let ttl = Duration::from_millis(u64::from(arg));
                let (_, loaded) = cache.get_or_set(key, u16::from(arg), ttl);
                if !loaded {
                    inserted += 1;
                }
            }
            7 => cache.resize(usize::from(arg % 16)),
            8 => {
                let _ = cache.purge_expired();
            }
            9 => clock.advance(Duration::from_millis(u64::from(arg))),
            10 => {
                let keys = cache.keys();
                assert!(keys.len() <= cache.len());
            }
            _ => cache.clear(),
        }

        assert!(cache.len() <= cache.max_size());
        assert_eq!(inserted, cache.len() + removed.load(Ordering::Relaxed));
        cache.check_invariants().expect("cache invariants");
    }
});
