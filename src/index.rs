//! Concurrent key → slot index.
//!
//! The cache engine resolves keys to arena slots through a [`ConcurrentIndex`].
//! The index is safe for unsynchronized use from any number of threads; the
//! engine still performs every index mutation that mirrors a list mutation
//! while holding its list lock, so the index and the recency list stay in
//! one-to-one correspondence.
//!
//! [`ShardedIndex`] is the default implementation: a `DashMap` keyed with
//! `FxBuildHasher`. Any map offering the same four primitives can be plugged
//! in through [`LruBuilder::build_with_index`](crate::builder::LruBuilder::build_with_index).
//!
//! | Primitive | Meaning                                                  |
//! |-----------|----------------------------------------------------------|
//! | `load`    | Read the slot mapped to a key                            |
//! | `store`   | Map a key to a slot, returning the previous slot         |
//! | `delete`  | Unmap a key, returning the removed slot                  |
//! | `compute` | Atomic read-modify-write of an existing mapping          |

use std::borrow::Borrow;
use std::hash::Hash;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::ds::SlotId;

/// Decision returned by a [`ConcurrentIndex::compute`] closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compute {
    /// Leave the mapping untouched.
    Keep,
    /// Point the key at another slot.
    Replace(SlotId),
    /// Remove the mapping.
    Remove,
}

/// Capability interface for the lock-free key → slot map.
pub trait ConcurrentIndex<K>: Send + Sync {
    fn load<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    fn store(&self, key: K, slot: SlotId) -> Option<SlotId>;

    fn delete<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Runs `f` against the slot currently mapped to `key` and applies its
    /// decision atomically. Returns the slot `f` observed; `None` means the
    /// key was absent and `f` did not run.
    fn compute<Q, F>(&self, key: &Q, f: F) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(SlotId) -> Compute;

    /// Number of mappings. May lag concurrent writers.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}

/// Sharded, fine-grained-locked index backed by `DashMap`.
#[derive(Debug)]
pub struct ShardedIndex<K>
where
    K: Eq + Hash,
{
    map: DashMap<K, SlotId, FxBuildHasher>,
}

impl<K> ShardedIndex<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }
}

impl<K> Default for ShardedIndex<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ConcurrentIndex<K> for ShardedIndex<K>
where
    K: Eq + Hash + Send + Sync,
{
    #[inline]
    fn load<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).map(|slot| *slot)
    }

    #[inline]
    fn store(&self, key: K, slot: SlotId) -> Option<SlotId> {
        self.map.insert(key, slot)
    }

    #[inline]
    fn delete<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key).map(|(_, slot)| slot)
    }

    fn compute<Q, F>(&self, key: &Q, f: F) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(SlotId) -> Compute,
    {
        let mut observed = None;
        // The closure runs under the shard's write lock.
        self.map.remove_if_mut(key, |_, slot| {
            observed = Some(*slot);
            match f(*slot) {
                Compute::Keep => false,
                Compute::Replace(next) => {
                    *slot = next;
                    false
                },
                Compute::Remove => true,
            }
        });
        observed
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::SlotArena;

    fn ids(n: usize) -> Vec<SlotId> {
        let mut arena = SlotArena::new();
        (0..n).map(|i| arena.try_insert(i).unwrap()).collect()
    }

    #[test]
    fn load_store_delete() {
        let slots = ids(2);
        let index: ShardedIndex<String> = ShardedIndex::new();
        assert_eq!(index.store("a".to_string(), slots[0]), None);
        assert_eq!(index.load("a"), Some(slots[0]));
        assert_eq!(index.store("a".to_string(), slots[1]), Some(slots[0]));
        assert_eq!(index.len(), 1);
        assert_eq!(index.delete("a"), Some(slots[1]));
        assert_eq!(index.delete("a"), None);
        assert!(index.is_empty());
    }

    #[test]
    fn compute_remove_only_when_slot_matches() {
        let slots = ids(2);
        let index: ShardedIndex<u64> = ShardedIndex::new();
        index.store(1, slots[1]);

        let seen = index.compute(&1, |cur| {
            if cur == slots[0] {
                Compute::Remove
            } else {
                Compute::Keep
            }
        });
        assert_eq!(seen, Some(slots[1]));
        assert_eq!(index.load(&1), Some(slots[1]));

        let seen = index.compute(&1, |cur| {
            if cur == slots[1] {
                Compute::Remove
            } else {
                Compute::Keep
            }
        });
        assert_eq!(seen, Some(slots[1]));
        assert_eq!(index.load(&1), None);
    }

    #[test]
    fn compute_replace_and_absent_key() {
        let slots = ids(2);
        let index: ShardedIndex<u64> = ShardedIndex::with_capacity(4);
        index.store(7, slots[0]);

        assert_eq!(index.compute(&7, |_| Compute::Replace(slots[1])), Some(slots[0]));
        assert_eq!(index.load(&7), Some(slots[1]));

        let mut ran = false;
        let seen = index.compute(&8, |_| {
            ran = true;
            Compute::Remove
        });
        assert_eq!(seen, None);
        assert!(!ran);
    }

    #[test]
    fn clear_empties_index() {
        let slots = ids(3);
        let index: ShardedIndex<usize> = ShardedIndex::new();
        for (k, slot) in slots.iter().enumerate() {
            index.store(k, *slot);
        }
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.load(&0), None);
    }
}
