//! # Least Recently Used (LRU) Cache Engine
//!
//! Bounded, thread-safe LRU cache with per-entry expiration and an eviction
//! callback. Lookups go through a lock-free [`ConcurrentIndex`]; recency order
//! lives in an arena-backed [`IntrusiveList`] guarded by a single mutex.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V, I>                                │
//!   │                                                                          │
//!   │   ┌───────────────────────────────┐   size: AtomicUsize (authoritative)  │
//!   │   │ I: ConcurrentIndex<K>         │   max_size: AtomicUsize              │
//!   │   │ (DashMap<K, SlotId>)          │   on_eviction: Option<Arc<dyn Fn>>   │
//!   │   │  key ─► SlotId{index, gen}    │   clock: Arc<dyn Clock>              │
//!   │   └───────────────┬───────────────┘                                      │
//!   │                   │ load (lock-free)                                     │
//!   │                   ▼                                                      │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │ Mutex<IntrusiveList<Entry<K, V>>>                                  │ │
//!   │   │                                                                    │ │
//!   │   │   head ──► ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── tail          │ │
//!   │   │    (MRU)   │ key  │      │ key  │      │ key  │    (LRU)          │ │
//!   │   │            │ value│      │ value│      │ value│                   │ │
//!   │   │            │ exp  │      │ exp  │      │ exp  │                   │ │
//!   │   │            └──────┘      └──────┘      └──────┘                   │ │
//!   │   │   arena slots + free list, no per-operation allocation             │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method            | Lock     | Description                                   |
//! |-------------------|----------|-----------------------------------------------|
//! | `set`             | Mutex    | Insert/update with the default TTL, may evict |
//! | `set_with_ttl`    | Mutex    | Insert/update with an explicit TTL            |
//! | `get`             | Mutex*   | Value + move to MRU; lazily drops expired     |
//! | `peek`            | Mutex*   | Value without reordering; drops expired       |
//! | `has`             | Mutex*   | Present and unexpired, no side effects        |
//! | `delete`          | Mutex*   | Remove by key                                 |
//! | `get_or_set`      | Mutex    | Atomic hit-or-insert                          |
//! | `resize`          | Mutex    | Change capacity, evict down to it             |
//! | `purge_expired`   | Mutex    | Remove every expired entry                    |
//! | `clear`           | Mutex    | Remove everything                             |
//! | `keys`/`values`   | Mutex    | MRU → LRU snapshot, skips expired             |
//! | `for_each`        | Mutex    | MRU → LRU visit, skips expired                |
//! | `len`             | None     | Atomic live-entry count                       |
//!
//! `*` an index miss returns before the mutex is taken.
//!
//! ## Lock discipline
//!
//! Every mutation follows: acquire mutex → mutate arena/list → mutate index →
//! release mutex. Index entries are re-validated under the mutex (slot
//! generation + key equality) before their node is trusted.
//!
//! The eviction callback never runs while the mutex is held. Eviction loops
//! release the mutex around each callback (`MutexGuard::unlocked`) and
//! re-check state afterwards; `clear` and `purge_expired` detach their
//! victims first and notify after unlocking. A callback therefore observes an
//! entry that is already gone from the cache and already subtracted from
//! `len()`.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: LruCache<&str, u32> = LruCache::new(2);
//! cache.set("x", 1);
//! cache.set("y", 2);
//! assert_eq!(cache.get(&"x"), Some(1)); // "x" becomes MRU
//! cache.set("z", 3);                    // evicts "y"
//!
//! assert!(!cache.has(&"y"));
//! assert!(cache.has(&"x"));
//! assert!(cache.has(&"z"));
//!
//! let (value, loaded) = cache.get_or_set("x", 99, Duration::ZERO);
//! assert_eq!((value, loaded), (1, true));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace};

use crate::builder::{normalize_max_size, LruBuilder};
use crate::clock::Clock;
use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ArenaError, InvariantError};
use crate::index::{Compute, ConcurrentIndex, ShardedIndex};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{LruMetricsRecorder, MetricsSnapshotProvider};

/// Capacity used when a cache is configured with `max_size == 0`.
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Callback invoked with every entry leaving the cache.
pub type EvictionCallback<K, V> = Arc<dyn Fn(&K, &V) + Send + Sync>;

/// Arena-resident node payload.
struct Entry<K, V> {
    key: K,
    value: V,
    expires_at: Option<Instant>,
}

impl<K, V> Entry<K, V> {
    #[inline]
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(at) if now > at)
    }
}

type RecencyList<K, V> = IntrusiveList<Entry<K, V>>;
type ListGuard<'a, K, V> = MutexGuard<'a, RecencyList<K, V>>;

/// Concurrent, TTL-aware LRU cache.
///
/// Values are handed out by clone; wrap large values in `Arc` to share them.
pub struct LruCache<K, V, I = ShardedIndex<K>>
where
    K: Eq + Hash,
{
    index: I,
    list: Mutex<RecencyList<K, V>>,
    size: AtomicUsize,
    max_size: AtomicUsize,
    default_ttl: Duration,
    on_eviction: Option<EvictionCallback<K, V>>,
    clock: Arc<dyn Clock>,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone,
{
    /// Creates a cache holding at most `max_size` entries, no default TTL and
    /// no eviction callback. `0` selects [`DEFAULT_MAX_SIZE`].
    ///
    /// # Example
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.max_size(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(max_size: usize) -> Self {
        LruBuilder::new(max_size).build()
    }

    /// Starts a [`LruBuilder`] for caches needing a TTL, callback or clock.
    pub fn builder(max_size: usize) -> LruBuilder<K, V> {
        LruBuilder::new(max_size)
    }
}

impl<K, V, I> LruCache<K, V, I>
where
    K: Clone + Eq + Hash,
    V: Clone,
    I: ConcurrentIndex<K>,
{
    pub(crate) fn from_parts(
        max_size: usize,
        default_ttl: Duration,
        on_eviction: Option<EvictionCallback<K, V>>,
        clock: Arc<dyn Clock>,
        initial_capacity: usize,
        index: I,
    ) -> Self {
        Self {
            index,
            list: Mutex::new(IntrusiveList::with_capacity(initial_capacity)),
            size: AtomicUsize::new(0),
            max_size: AtomicUsize::new(max_size),
            default_ttl,
            on_eviction,
            clock,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    // -- accessors -----------------------------------------------------------

    /// Number of live entries, expired-but-unreaped ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size.load(Ordering::Acquire)
    }

    /// TTL applied by [`set`](Self::set). `Duration::ZERO` means none.
    #[inline]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // -- writes --------------------------------------------------------------

    /// Inserts or updates `key` with the default TTL.
    ///
    /// # Panics
    ///
    /// Panics if the node arena cannot grow; see [`try_set`](Self::try_set).
    pub fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl)
    }

    /// Inserts or updates `key`, expiring it `ttl` from now.
    /// `Duration::ZERO` stores the entry without expiration.
    ///
    /// Updating an existing key replaces its value and expiration and makes
    /// it most recently used. Inserting a new key first evicts from the LRU
    /// end until there is room.
    ///
    /// # Panics
    ///
    /// Panics if the node arena cannot grow; see
    /// [`try_set_with_ttl`](Self::try_set_with_ttl).
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<&str, &str> = LruCache::new(10);
    /// cache.set_with_ttl("session", "token", Duration::from_secs(30));
    /// assert_eq!(cache.get(&"session"), Some("token"));
    /// ```
    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        if let Err(err) = self.try_set_with_ttl(key, value, ttl) {
            panic!("lru cache insert failed: {err}");
        }
    }

    /// Fallible [`set`](Self::set).
    pub fn try_set(&self, key: K, value: V) -> Result<(), ArenaError> {
        self.try_set_with_ttl(key, value, self.default_ttl)
    }

    /// Fallible [`set_with_ttl`](Self::set_with_ttl): reports arena growth
    /// failure instead of panicking. The cache is unchanged on error, apart
    /// from entries already evicted to make room.
    pub fn try_set_with_ttl(&self, key: K, value: V, ttl: Duration) -> Result<(), ArenaError> {
        let mut list = self.list.lock();
        let expires_at = self.expiry(ttl);

        if let Some(id) = self.locate_or_make_room(&mut list, &key) {
            if let Some(entry) = list.get_mut(id) {
                entry.value = value;
                entry.expires_at = expires_at;
            }
            list.move_to_front(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return Ok(());
        }

        self.insert_front(&mut list, key, value, expires_at)?;
        Ok(())
    }

    /// Returns the live value for `key`, or inserts `value` if there is none.
    ///
    /// The lookup and the insert happen in one critical section: concurrent
    /// callers racing on an absent key insert exactly once, and every loser
    /// gets `(winner_value, true)`. An expired entry counts as absent and is
    /// replaced. `ttl` follows [`set_with_ttl`](Self::set_with_ttl).
    ///
    /// # Panics
    ///
    /// Panics if the node arena cannot grow; see
    /// [`try_get_or_set`](Self::try_get_or_set).
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<&str, u32> = LruCache::new(10);
    /// assert_eq!(cache.get_or_set("hits", 1, Duration::ZERO), (1, false));
    /// assert_eq!(cache.get_or_set("hits", 7, Duration::ZERO), (1, true));
    /// ```
    pub fn get_or_set(&self, key: K, value: V, ttl: Duration) -> (V, bool) {
        match self.try_get_or_set(key, value, ttl) {
            Ok(outcome) => outcome,
            Err(err) => panic!("lru cache insert failed: {err}"),
        }
    }

    /// Fallible [`get_or_set`](Self::get_or_set).
    pub fn try_get_or_set(&self, key: K, value: V, ttl: Duration) -> Result<(V, bool), ArenaError> {
        let mut list = self.list.lock();

        while let Some(id) = self.locate_or_make_room(&mut list, &key) {
            let now = self.clock.now();
            let live = list
                .get(id)
                .filter(|entry| !entry.is_expired(now))
                .map(|entry| entry.value.clone());
            if let Some(existing) = live {
                list.move_to_front(id);
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                return Ok((existing, true));
            }
            // Expired: reap it, then look again since the callback window
            // may have let another caller in.
            if let Some(entry) = self.detach(&mut list, id) {
                #[cfg(feature = "metrics")]
                self.metrics.record_expired_entry();
                self.dispatch_unlocked(&mut list, entry);
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_miss();
        let expires_at = self.expiry(ttl);
        let returned = value.clone();
        self.insert_front(&mut list, key, value, expires_at)?;
        Ok((returned, false))
    }

    // -- reads ---------------------------------------------------------------

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// An expired entry is removed (firing the eviction callback) and reported
    /// as a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read(key, true)
    }

    /// Returns the value for `key` without touching recency order.
    ///
    /// Like [`get`](Self::get), an expired entry is removed on the way.
    ///
    /// # Example
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, &str> = LruCache::new(2);
    /// cache.set(1, "first");
    /// cache.set(2, "second");
    /// assert_eq!(cache.peek(&1), Some("first"));
    ///
    /// cache.set(3, "third"); // 1 is still LRU
    /// assert!(!cache.has(&1));
    /// ```
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read(key, false)
    }

    /// Returns `true` if `key` is present and unexpired. Never reorders and
    /// never removes.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.index.load(key).is_none() {
            return false;
        }
        let list = self.list.lock();
        let now = self.clock.now();
        self.resolve(&list, key)
            .and_then(|id| list.get(id))
            .is_some_and(|entry| !entry.is_expired(now))
    }

    fn read<Q>(&self, key: &Q, promote: bool) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.index.load(key).is_none() {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }

        let mut list = self.list.lock();
        let now = self.clock.now();
        let Some(id) = self.resolve(&list, key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        let expired = list.get(id).is_some_and(|entry| entry.is_expired(now));
        if expired {
            let reaped = self.detach(&mut list, id);
            drop(list);
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            if let Some(entry) = reaped {
                trace!("expired entry removed on read");
                #[cfg(feature = "metrics")]
                self.metrics.record_expired_entry();
                self.notify(&entry);
            }
            return None;
        }

        if promote {
            list.move_to_front(id);
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        list.get(id).map(|entry| entry.value.clone())
    }

    // -- removal -------------------------------------------------------------

    /// Removes `key`, firing the eviction callback. Returns whether it was
    /// present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.index.load(key).is_none() {
            return false;
        }
        let mut list = self.list.lock();
        let Some(id) = self.resolve(&list, key) else {
            return false;
        };
        let Some(entry) = self.detach(&mut list, id) else {
            return false;
        };
        drop(list);

        #[cfg(feature = "metrics")]
        self.metrics.record_removed_entry();
        self.notify(&entry);
        true
    }

    /// Changes the capacity and evicts LRU entries until `len() <= new_max`.
    /// `0` selects [`DEFAULT_MAX_SIZE`].
    pub fn resize(&self, new_max: usize) {
        let new_max = normalize_max_size(new_max);
        let mut list = self.list.lock();
        self.max_size.store(new_max, Ordering::Release);

        let mut evicted = 0usize;
        while self.len() > self.max_size() {
            let Some(victim) = self.evict_lru(&mut list) else {
                break;
            };
            evicted += 1;
            self.dispatch_unlocked(&mut list, victim);
        }
        debug!(new_max, evicted, "resized lru cache");
    }

    /// Removes every expired entry and returns how many were removed.
    ///
    /// Victims are detached under the lock; callbacks fire after it is
    /// released.
    pub fn purge_expired(&self) -> usize {
        let mut list = self.list.lock();
        let now = self.clock.now();

        let expired: Vec<SlotId> = list
            .iter_entries()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(id, _)| id)
            .collect();

        let mut victims = Vec::new();
        let mut removed = 0usize;
        for id in expired {
            if let Some(entry) = self.detach(&mut list, id) {
                removed += 1;
                #[cfg(feature = "metrics")]
                self.metrics.record_expired_entry();
                if self.on_eviction.is_some() {
                    victims.push(entry);
                }
            }
        }
        drop(list);

        for entry in &victims {
            self.notify(entry);
        }
        debug!(removed, "purged expired entries");
        removed
    }

    /// Removes every entry. With a callback configured, it fires once per
    /// entry (LRU first) after the cache has been emptied.
    pub fn clear(&self) {
        let mut list = self.list.lock();
        let mut victims = Vec::new();
        if self.on_eviction.is_some() {
            victims.reserve(list.len());
            while let Some((_, entry)) = list.pop_back() {
                victims.push(entry);
            }
        }
        let cleared = self.size.swap(0, Ordering::AcqRel);
        list.clear();
        self.index.clear();
        drop(list);

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        for entry in &victims {
            self.notify(entry);
        }
        debug!(cleared, "cleared lru cache");
    }

    // -- iteration -----------------------------------------------------------

    /// Keys from most to least recently used, skipping expired entries.
    pub fn keys(&self) -> Vec<K> {
        let list = self.list.lock();
        let now = self.clock.now();
        list.iter()
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.key.clone())
            .collect()
    }

    /// Values from most to least recently used, skipping expired entries.
    pub fn values(&self) -> Vec<V> {
        let list = self.list.lock();
        let now = self.clock.now();
        list.iter()
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// Visits unexpired entries from most to least recently used until `f`
    /// returns `false`.
    ///
    /// The cache lock is held for the whole walk; `f` must not call back into
    /// this cache.
    ///
    /// # Example
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, u32> = LruCache::new(10);
    /// for i in 0..5 {
    ///     cache.set(i, i * 10);
    /// }
    /// let mut seen = Vec::new();
    /// cache.for_each(|k, _| {
    ///     seen.push(*k);
    ///     seen.len() < 3
    /// });
    /// assert_eq!(seen, vec![4, 3, 2]);
    /// ```
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let list = self.list.lock();
        let now = self.clock.now();
        for entry in list.iter() {
            if entry.is_expired(now) {
                continue;
            }
            if !f(&entry.key, &entry.value) {
                break;
            }
        }
    }

    // -- diagnostics ---------------------------------------------------------

    /// Verifies list structure, the size counter and the index ↔ list
    /// bijection. O(n); intended for tests.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let list = self.list.lock();
        list.check_invariants()?;

        let size = self.len();
        if size != list.len() {
            return Err(InvariantError::new(format!(
                "size counter {size} != {} linked nodes",
                list.len()
            )));
        }
        if size > self.max_size() {
            return Err(InvariantError::new(format!(
                "size {size} exceeds max_size {}",
                self.max_size()
            )));
        }
        if self.index.len() != list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} nodes",
                self.index.len(),
                list.len()
            )));
        }
        for (id, entry) in list.iter_entries() {
            if self.index.load(&entry.key) != Some(id) {
                return Err(InvariantError::new(format!(
                    "index does not map slot {} back to its node",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    // -- internals -----------------------------------------------------------

    fn expiry(&self, ttl: Duration) -> Option<Instant> {
        if ttl.is_zero() {
            None
        } else {
            self.clock.now().checked_add(ttl)
        }
    }

    /// Index lookup re-validated against the arena: the slot must still be
    /// live for the same generation and hold the same key.
    fn resolve<Q>(&self, list: &RecencyList<K, V>, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.load(key)?;
        let entry = list.get(id)?;
        (entry.key.borrow() == key).then_some(id)
    }

    /// Returns the slot already holding `key`, or evicts until a new entry
    /// fits and returns `None`. Callbacks release the lock, so the key is
    /// looked up again after every eviction.
    fn locate_or_make_room(&self, list: &mut ListGuard<'_, K, V>, key: &K) -> Option<SlotId> {
        loop {
            if let Some(id) = self.resolve(list, key) {
                return Some(id);
            }
            if self.len() < self.max_size() {
                return None;
            }
            let victim = self.evict_lru(list)?;
            self.dispatch_unlocked(list, victim);
        }
    }

    fn insert_front(
        &self,
        list: &mut ListGuard<'_, K, V>,
        key: K,
        value: V,
        expires_at: Option<Instant>,
    ) -> Result<SlotId, ArenaError> {
        let id = list.push_front(Entry {
            key: key.clone(),
            value,
            expires_at,
        })?;
        self.index.store(key, id);
        self.size.fetch_add(1, Ordering::AcqRel);
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        Ok(id)
    }

    fn evict_lru(&self, list: &mut RecencyList<K, V>) -> Option<Entry<K, V>> {
        let id = list.back_id()?;
        let entry = self.detach(list, id)?;
        trace!(len = self.len(), "evicted least recently used entry");
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        Some(entry)
    }

    /// Unlinks and releases `id`, drops its index mapping (only if it still
    /// points at `id`) and decrements the size.
    fn detach(&self, list: &mut RecencyList<K, V>, id: SlotId) -> Option<Entry<K, V>> {
        let entry = list.remove(id)?;
        self.index.compute(&entry.key, |current| {
            if current == id {
                Compute::Remove
            } else {
                Compute::Keep
            }
        });
        self.size.fetch_sub(1, Ordering::AcqRel);
        Some(entry)
    }

    /// Runs the eviction callback for `entry` with the list lock released.
    fn dispatch_unlocked(&self, list: &mut ListGuard<'_, K, V>, entry: Entry<K, V>) {
        if self.on_eviction.is_some() {
            MutexGuard::unlocked(list, || self.notify(&entry));
        }
    }

    #[inline]
    fn notify(&self, entry: &Entry<K, V>) {
        if let Some(callback) = &self.on_eviction {
            callback(&entry.key, &entry.value);
        }
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone,
{
    /// Creates a cache with [`DEFAULT_MAX_SIZE`] entries.
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl<K, V, I> fmt::Debug for LruCache<K, V, I>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.size.load(Ordering::Acquire))
            .field("max_size", &self.max_size.load(Ordering::Acquire))
            .field("default_ttl", &self.default_ttl)
            .field("on_eviction", &self.on_eviction.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, I> LruCache<K, V, I>
where
    K: Clone + Eq + Hash,
    V: Clone,
    I: ConcurrentIndex<K>,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.max_size())
    }
}

#[cfg(feature = "metrics")]
impl<K, V, I> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V, I>
where
    K: Clone + Eq + Hash,
    V: Clone,
    I: ConcurrentIndex<K>,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}
