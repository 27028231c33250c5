//! Keyed Binary Heap implementation
//!
//! A fixed-capacity binary heap for element types that cannot carry their own
//! slot index. Each entry is a `(key, priority)` pair; a side table maps every
//! resident key to its current slot, so a key's priority can be changed or
//! the key removed in O(log n).
//!
//! Use [`IndexedHeap`](crate::IndexedHeap) when you control the element type
//! and can implement [`HeapItem`](crate::HeapItem) for it: it avoids the hash
//! table entirely. Reach for `KeyedHeap` when the things being prioritized are
//! foreign types, graph node ids, strings and the like.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity        |
//! |----------------|-------------------|
//! | `push`         | O(log n)          |
//! | `pop`          | O(log n)          |
//! | `peek`         | O(1)              |
//! | `contains_key` | O(1) expected     |
//! | `set_priority` | O(log n)          |
//! | `remove`       | O(log n)          |
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::{KeyedHeap, MinOrder};
//!
//! let mut frontier: KeyedHeap<&str, u32, MinOrder> = KeyedHeap::with_capacity(8);
//! frontier.push("a", 7).unwrap();
//! frontier.push("b", 3).unwrap();
//! frontier.push("c", 5).unwrap();
//!
//! // Found a cheaper route to "a"
//! assert_eq!(frontier.set_priority(&"a", 1), Ok(7));
//! assert_eq!(frontier.pop(), Ok(("a", 1)));
//! assert_eq!(frontier.pop(), Ok(("b", 3)));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::mem;

use rustc_hash::FxHashMap;

use crate::order::MinOrder;
use crate::traits::{BoundedHeap, HeapError, HeapOrder, PushError};

/// A fixed-capacity heap of `(key, priority)` entries addressed by key
pub struct KeyedHeap<K, P, O = MinOrder> {
    /// Entries in heap order
    entries: Vec<(K, P)>,
    /// Resident key -> slot in `entries`
    slots: FxHashMap<K, usize>,
    capacity: usize,
    _order: PhantomData<O>,
}

impl<K, P, O> KeyedHeap<K, P, O>
where
    K: Hash + Eq + Clone,
    P: Ord,
    O: HeapOrder,
{
    /// Creates an empty heap that can hold at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        log::trace!("creating keyed heap with capacity {capacity}");
        Self {
            entries: Vec::with_capacity(capacity),
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
            _order: PhantomData,
        }
    }

    /// Returns the fixed maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the heap holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if another push would be rejected
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Returns true if `key` is resident
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(key)
    }

    /// Returns the current priority of `key`
    pub fn priority<Q>(&self, key: &Q) -> Option<&P>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Returns the root entry without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::HeapEmpty`] if the heap has no entries.
    pub fn peek(&self) -> Result<(&K, &P), HeapError> {
        self.entries
            .first()
            .map(|(k, p)| (k, p))
            .ok_or(HeapError::HeapEmpty)
    }

    /// Inserts `key` with `priority`
    ///
    /// # Errors
    /// Hands the entry back inside a [`PushError`] carrying
    /// [`HeapError::HeapFull`] when at capacity, or
    /// [`HeapError::DuplicateKey`] when `key` is already resident.
    pub fn push(&mut self, key: K, priority: P) -> Result<(), PushError<(K, P)>> {
        if self.is_full() {
            log::debug!("push rejected: keyed heap at capacity {}", self.capacity);
            return Err(PushError::new(
                (key, priority),
                HeapError::HeapFull {
                    capacity: self.capacity,
                },
            ));
        }
        if self.slots.contains_key(&key) {
            log::debug!("push rejected: key already resident");
            return Err(PushError::new((key, priority), HeapError::DuplicateKey));
        }

        let index = self.entries.len();
        self.slots.insert(key.clone(), index);
        self.entries.push((key, priority));
        self.sift_up(index);
        Ok(())
    }

    /// Removes and returns the root entry
    ///
    /// # Errors
    /// Returns [`HeapError::HeapEmpty`] if the heap has no entries.
    pub fn pop(&mut self) -> Result<(K, P), HeapError> {
        if self.entries.is_empty() {
            log::debug!("pop rejected: keyed heap is empty");
            return Err(HeapError::HeapEmpty);
        }
        Ok(self.remove_at(0))
    }

    /// Replaces the priority of `key`, returning the old one
    ///
    /// The entry moves toward the root or the leaves as needed.
    ///
    /// # Errors
    /// Returns [`HeapError::NotInHeap`] if `key` is not resident.
    pub fn set_priority<Q>(&mut self, key: &Q, priority: P) -> Result<P, HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.slot_of(key)?;
        let old = mem::replace(&mut self.entries[index].1, priority);
        self.restore(index);
        Ok(old)
    }

    /// Removes `key` and returns its entry
    ///
    /// # Errors
    /// Returns [`HeapError::NotInHeap`] if `key` is not resident.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, P), HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.slot_of(key)?;
        Ok(self.remove_at(index))
    }

    /// Drops every entry, keeping the capacity
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.clear();
    }

    /// Iterates over the live entries in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &P)> + '_ {
        self.entries.iter().map(|(k, p)| (k, p))
    }

    fn slot_of<Q>(&self, key: &Q) -> Result<usize, HeapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).copied().ok_or_else(|| {
            log::debug!("key not resident in keyed heap");
            HeapError::NotInHeap
        })
    }

    /// Caller guarantees `index` is live
    fn remove_at(&mut self, index: usize) -> (K, P) {
        let removed = self.entries.swap_remove(index);
        self.slots.remove(&removed.0);
        if index < self.entries.len() {
            self.record_slot(index);
            self.restore(index);
        }
        removed
    }

    fn restore(&mut self, index: usize) {
        if self.sift_up(index) == index {
            self.sift_down(index);
        }
    }

    /// Point the side table at the entry now living in `index`
    #[inline]
    fn record_slot(&mut self, index: usize) {
        let slot = self.slots.get_mut(&self.entries[index].0);
        debug_assert!(slot.is_some(), "entry at slot {index} has no side-table record");
        if let Some(slot) = slot {
            *slot = index;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.record_slot(a);
        self.record_slot(b);
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if O::outranks(&self.entries[index].1, &self.entries[parent].1) {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;

            let mut candidate = left;
            if right < len && O::outranks(&self.entries[right].1, &self.entries[left].1) {
                candidate = right;
            }

            if O::outranks(&self.entries[candidate].1, &self.entries[index].1) {
                self.swap(index, candidate);
                index = candidate;
            } else {
                break;
            }
        }
    }
}

impl<K, P, O> BoundedHeap<(K, P)> for KeyedHeap<K, P, O>
where
    K: Hash + Eq + Clone,
    P: Ord,
    O: HeapOrder,
{
    fn with_capacity(capacity: usize) -> Self {
        KeyedHeap::with_capacity(capacity)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, (key, priority): (K, P)) -> Result<(), PushError<(K, P)>> {
        KeyedHeap::push(self, key, priority)
    }

    fn pop(&mut self) -> Result<(K, P), HeapError> {
        KeyedHeap::pop(self)
    }
}

impl<K, P, O> Default for KeyedHeap<K, P, O>
where
    K: Hash + Eq + Clone,
    P: Ord,
    O: HeapOrder,
{
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K: fmt::Debug, P: fmt::Debug, O> fmt::Debug for KeyedHeap<K, P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedHeap")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries)
            .finish()
    }
}
