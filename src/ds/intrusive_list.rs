//! Intrusive doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a `SlotArena` and are linked by slot index, so the list
//! never allocates per link and every splice is O(1). The `prev`/`next`
//! fields are stored in the arena slot itself; `head`/`tail` are indices.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<T>)
//!   ┌───────┬──────────────────────────────────────────────┐
//!   │ index │ Slot { value, prev, next }                   │
//!   ├───────┼──────────────────────────────────────────────┤
//!   │ 0     │ { value: A, prev: None,    next: Some(1) }   │
//!   │ 1     │ { value: B, prev: Some(0), next: Some(2) }   │
//!   │ 2     │ { value: C, prev: Some(1), next: None }      │
//!   └───────┴──────────────────────────────────────────────┘
//!
//!   head ─► [0] ◄──► [1] ◄──► [2] ◄── tail
//!           MRU                LRU
//! ```
//!
//! ## Operations
//! - `push_front(value)`: acquire slot + attach at head
//! - `move_to_front(id)`: unlink + attach at head (no-op when already head)
//! - `pop_back()`: unlink tail + release its slot
//! - `remove(id)`: unlink + release slot
//!
//! ## Performance
//! - `push_front` / `pop_back` / `move_to_front` / `remove`: O(1)
//! - `iter`: O(n)
//!
//! `check_invariants()` walks the whole list and is meant for tests and
//! diagnostics.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{ArenaError, InvariantError};

#[derive(Debug)]
/// Intrusive list that stores nodes in a `SlotArena` and links them by slot index.
pub struct IntrusiveList<T> {
    arena: SlotArena<T>,
    head: Option<u32>,
    tail: Option<u32>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Arena slots ever allocated, live or free.
    pub fn slot_count(&self) -> usize {
        self.arena.slot_count()
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the SlotId at the front (MRU) of the list.
    pub fn front_id(&self) -> Option<SlotId> {
        self.head.and_then(|index| self.arena.id_at(index))
    }

    /// Returns the SlotId at the back (LRU) of the list.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail.and_then(|index| self.arena.id_at(index))
    }

    /// Returns the value at the front (MRU) of the list.
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|index| self.arena.slot(index))
            .and_then(|slot| slot.value())
    }

    /// Returns the value at the back (LRU) of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|index| self.arena.slot(index))
            .and_then(|slot| slot.value())
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id)
    }

    /// Returns a mutable reference to a node value, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id)
    }

    /// Reserves arena room for `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArenaError> {
        self.arena.reserve(additional)
    }

    /// Inserts a new node at the front and returns its `SlotId`.
    pub fn push_front(&mut self, value: T) -> Result<SlotId, ArenaError> {
        let id = self.arena.try_insert(value)?;
        self.attach_front(id.raw_index());
        Ok(id)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        let index = id.raw_index();
        if Some(index) == self.head {
            return true;
        }
        self.unlink(index);
        self.attach_front(index);
        true
    }

    /// Unlinks the back (LRU) node, releases its slot and returns it.
    pub fn pop_back(&mut self) -> Option<(SlotId, T)> {
        let id = self.back_id()?;
        self.unlink(id.raw_index());
        self.arena.remove(id).map(|value| (id, value))
    }

    /// Unlinks the node `id`, releases its slot and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.arena.contains(id) {
            return None;
        }
        self.unlink(id.raw_index());
        self.arena.remove(id)
    }

    /// Drops every node. The arena keeps its allocation.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator over values from front (MRU) to back (LRU).
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator of `(SlotId, &T)` from front to back.
    pub fn iter_entries(&self) -> IntrusiveListEntryIter<'_, T> {
        IntrusiveListEntryIter {
            list: self,
            current: self.head,
        }
    }

    /// Splices the linked node at `index` out of the list. The slot stays
    /// allocated; callers either re-attach it or release it.
    fn unlink(&mut self, index: u32) {
        let (prev, next) = match self.arena.slot(index) {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match prev {
            Some(prev_index) => {
                if let Some(prev_slot) = self.arena.slot_mut(prev_index) {
                    prev_slot.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_index) => {
                if let Some(next_slot) = self.arena.slot_mut(next_index) {
                    next_slot.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(slot) = self.arena.slot_mut(index) {
            slot.prev = None;
            slot.next = None;
        }
    }

    fn attach_front(&mut self, index: u32) {
        let old_head = self.head;
        match self.arena.slot_mut(index) {
            Some(slot) => {
                slot.prev = None;
                slot.next = old_head;
            },
            None => return,
        }
        match old_head {
            Some(head_index) => {
                if let Some(head_slot) = self.arena.slot_mut(head_index) {
                    head_slot.prev = Some(index);
                }
            },
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    /// Walks the list and verifies link symmetry, endpoints and slot accounting.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new("head/tail must be both set or both empty"));
            }
            if !self.arena.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty list but arena holds {} live slots",
                    self.arena.len()
                )));
            }
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(index) = current {
            let slot = self
                .arena
                .slot(index)
                .ok_or_else(|| InvariantError::new(format!("linked slot {index} is free")))?;
            if slot.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {index} prev link {:?} != {:?}",
                    slot.prev, prev
                )));
            }
            count += 1;
            if count > self.arena.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = Some(index);
            current = slot.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new("forward walk does not end at tail"));
        }
        if count != self.arena.len() {
            return Err(InvariantError::new(format!(
                "{count} linked nodes but {} live slots",
                self.arena.len()
            )));
        }
        let free = self.arena.free_list_len();
        if count + free != self.arena.slot_count() {
            return Err(InvariantError::new(format!(
                "{count} live + {free} free != {} slots",
                self.arena.slot_count()
            )));
        }
        Ok(())
    }
}

/// Iterator over values from front to back.
pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<u32>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.list.arena.slot(self.current?)?;
        self.current = slot.next;
        slot.value()
    }
}

/// Iterator over `(SlotId, &T)` pairs from front to back.
pub struct IntrusiveListEntryIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<u32>,
}

impl<'a, T> Iterator for IntrusiveListEntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        let id = self.list.arena.id_at(index)?;
        let slot = self.list.arena.slot(index)?;
        self.current = slot.next;
        slot.value().map(|value| (id, value))
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}
