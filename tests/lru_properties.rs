// ==============================================
// LRU CACHE PROPERTY TESTS (integration)
// ==============================================
//
// Random operation sequences checked against a VecDeque reference model
// (front = most recently used).

use std::collections::VecDeque;
use std::time::Duration;

use lrukit::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(u8, u16),
    Get(u8),
    Peek(u8),
    Delete(u8),
    GetOrSet(u8, u16),
    Resize(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..24, any::<u16>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => (0u8..24).prop_map(Op::Get),
        1 => (0u8..24).prop_map(Op::Peek),
        1 => (0u8..24).prop_map(Op::Delete),
        2 => (0u8..24, any::<u16>()).prop_map(|(k, v)| Op::GetOrSet(k, v)),
        1 => (1usize..12).prop_map(Op::Resize),
        1 => Just(Op::Clear),
    ]
}

#[derive(Default)]
struct Model {
    entries: VecDeque<(u8, u16)>,
    max: usize,
}

impl Model {
    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn touch(&mut self, pos: usize) -> u16 {
        let entry = self.entries.remove(pos).expect("position in range");
        self.entries.push_front(entry);
        entry.1
    }

    fn shrink(&mut self, room_for: usize) -> Vec<(u8, u16)> {
        let mut evicted = Vec::new();
        while self.entries.len() + room_for > self.max {
            match self.entries.pop_back() {
                Some(entry) => evicted.push(entry),
                None => break,
            }
        }
        evicted
    }
}

proptest! {
    #[cfg_attr(miri, ignore)]
    #[test]
    fn matches_reference_model(
        max in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 1..200)
    ) {
        let cache: LruCache<u8, u16> = LruCache::new(max);
        let mut model = Model { max, ..Model::default() };

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    cache.set(k, v);
                    match model.position(k) {
                        Some(pos) => {
                            model.touch(pos);
                            model.entries[0].1 = v;
                        },
                        None => {
                            model.shrink(1);
                            model.entries.push_front((k, v));
                        },
                    }
                },
                Op::Get(k) => {
                    let expected = model.position(k).map(|pos| model.touch(pos));
                    prop_assert_eq!(cache.get(&k), expected);
                },
                Op::Peek(k) => {
                    let expected = model.position(k).map(|pos| model.entries[pos].1);
                    prop_assert_eq!(cache.peek(&k), expected);
                },
                Op::Delete(k) => {
                    let expected = model.position(k).map(|pos| model.entries.remove(pos));
                    prop_assert_eq!(cache.delete(&k), expected.is_some());
                },
                Op::GetOrSet(k, v) => {
                    let expected = match model.position(k) {
                        Some(pos) => (model.touch(pos), true),
                        None => {
                            model.shrink(1);
                            model.entries.push_front((k, v));
                            (v, false)
                        },
                    };
                    prop_assert_eq!(cache.get_or_set(k, v, Duration::ZERO), expected);
                },
                Op::Resize(n) => {
                    cache.resize(n);
                    model.max = n;
                    model.shrink(0);
                },
                Op::Clear => {
                    cache.clear();
                    model.entries.clear();
                },
            }

            prop_assert!(cache.len() <= cache.max_size());
            prop_assert_eq!(cache.len(), model.entries.len());
            cache.check_invariants().unwrap();
        }

        let expected: Vec<u8> = model.entries.iter().map(|(k, _)| *k).collect();
        prop_assert_eq!(cache.keys(), expected);
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn callback_sees_exactly_the_evicted_entries(
        max in 1usize..6,
        keys in prop::collection::vec(0u8..32, 1..100)
    ) {
        use std::sync::{Arc, Mutex};

        let log: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let cache: LruCache<u8, u8> = LruCache::builder(max)
            .on_eviction(move |k: &u8, _: &u8| sink.lock().unwrap().push(*k))
            .build();
        let mut model = Model { max, ..Model::default() };
        let mut expected = Vec::new();

        for k in keys {
            cache.set(k, k);
            match model.position(k) {
                Some(pos) => {
                    model.touch(pos);
                },
                None => {
                    expected.extend(model.shrink(1).into_iter().map(|(k, _)| k));
                    model.entries.push_front((k, k as u16));
                },
            }
        }

        prop_assert_eq!(&*log.lock().unwrap(), &expected);
    }
}
