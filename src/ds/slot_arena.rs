//! Growable slot arena addressed by stable, generation-tagged ids.
//!
//! Every node of the recency list lives in one [`SlotArena`] slot. Slots are
//! never compacted, so a slot's index is valid for the lifetime of the arena
//! (until [`clear`](SlotArena::clear)). Each slot carries a generation counter
//! bumped on release; a [`SlotId`] only resolves while its generation matches,
//! which rejects ids that outlived a release + reuse of the same slot.
//!
//! ## Architecture
//!
//! ```text
//!   slots: Vec<Slot<T>>
//!   ┌───────┬──────────────────────────────────────────────┐
//!   │ index │ Slot { value, generation, prev, next }       │
//!   ├───────┼──────────────────────────────────────────────┤
//!   │ 0     │ { Some(A), gen 0, prev: None, next: Some(2) }│  live
//!   │ 1     │ { None,    gen 3, prev: None, next: Some(3) }│  free ─┐
//!   │ 2     │ { Some(B), gen 1, prev: Some(0), next: None }│  live  │
//!   │ 3     │ { None,    gen 1, prev: None, next: None }   │  free ◄┘
//!   └───────┴──────────────────────────────────────────────┘
//!
//!   free_head ─► [1] ─► [3] ─► None      (threaded through `next`)
//! ```
//!
//! The `prev`/`next` fields of live slots belong to the list built on top of
//! the arena (see [`IntrusiveList`](crate::ds::IntrusiveList)); the arena only
//! uses `next` of free slots.
//!
//! ## Performance
//! - `try_insert`: O(1) amortized (free-list pop or `Vec` push)
//! - `remove` / `get` / `get_mut`: O(1)
//! - `clear`: O(n) drops, keeps the allocation

use crate::error::ArenaError;

/// Highest number of slots an arena can address.
const MAX_SLOTS: usize = u32::MAX as usize;

/// Stable handle to a slot: index plus the generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    /// Position of the slot in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation the id was issued for.
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }

    #[inline]
    pub(crate) fn raw_index(self) -> u32 {
        self.index
    }
}

#[derive(Debug)]
pub(crate) struct Slot<T> {
    value: Option<T>,
    generation: u32,
    pub(crate) prev: Option<u32>,
    pub(crate) next: Option<u32>,
}

/// Append-only arena of slots with an intrusive free list.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(MAX_SLOTS)),
            free_head: None,
            len: 0,
        }
    }

    /// Stores `value` in a free slot, growing the arena if none is free.
    pub fn try_insert(&mut self, value: T) -> Result<SlotId, ArenaError> {
        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            self.free_head = slot.next;
            slot.prev = None;
            slot.next = None;
            slot.value = Some(value);
            self.len += 1;
            return Ok(SlotId {
                index,
                generation: slot.generation,
            });
        }

        let next_len = self.slots.len() + 1;
        if next_len > MAX_SLOTS {
            return Err(ArenaError::CapacityOverflow);
        }
        if self.slots.len() == self.slots.capacity() {
            self.slots
                .try_reserve(1)
                .map_err(|_| ArenaError::AllocFailed {
                    requested: next_len,
                })?;
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            value: Some(value),
            generation: 0,
            prev: None,
            next: None,
        });
        self.len += 1;
        Ok(SlotId {
            index,
            generation: 0,
        })
    }

    /// Releases the slot, returning its value. Stale ids return `None`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        slot.prev = None;
        slot.next = self.free_head;
        self.free_head = Some(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots ever handed out (live + free).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Reserves room for `additional` more slots beyond the free ones.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArenaError> {
        let requested = self
            .slots
            .len()
            .checked_add(additional)
            .filter(|&n| n <= MAX_SLOTS)
            .ok_or(ArenaError::CapacityOverflow)?;
        self.slots
            .try_reserve(additional)
            .map_err(|_| ArenaError::AllocFailed { requested })
    }

    /// Drops every value and truncates the slot vector, keeping its allocation.
    ///
    /// Generations restart, so ids issued before the clear must be discarded
    /// by their holders.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Iterates live slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    SlotId {
                        index: idx as u32,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }

    // -- raw slot access for the recency list -------------------------------

    /// Current id of a live slot at `index`.
    pub(crate) fn id_at(&self, index: u32) -> Option<SlotId> {
        let slot = self.slots.get(index as usize)?;
        slot.value.as_ref().map(|_| SlotId {
            index,
            generation: slot.generation,
        })
    }

    pub(crate) fn slot(&self, index: u32) -> Option<&Slot<T>> {
        self.slots
            .get(index as usize)
            .filter(|slot| slot.value.is_some())
    }

    pub(crate) fn slot_mut(&mut self, index: u32) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(index as usize)
            .filter(|slot| slot.value.is_some())
    }

    pub(crate) fn free_list_len(&self) -> usize {
        let mut count = 0usize;
        let mut current = self.free_head;
        while let Some(index) = current {
            count += 1;
            if count > self.slots.len() {
                break;
            }
            current = self.slots[index as usize].next;
        }
        count
    }
}

impl<T> Slot<T> {
    pub(crate) fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
