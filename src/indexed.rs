//! Indexed Binary Heap implementation
//!
//! A fixed-capacity binary heap whose elements record their own slot in the
//! backing array. Because every element knows where it lives, a resident
//! element can be re-prioritized or removed in O(log n) without searching,
//! which `std::collections::BinaryHeap` cannot do.
//!
//! The comparison direction is a type parameter: [`MinHeap`] keeps the
//! smallest element at the root, [`MaxHeap`] the largest. Both are the same
//! [`IndexedHeap`] engine.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `push`         | O(log n)   |
//! | `pop`          | O(log n)   |
//! | `peek`         | O(1)       |
//! | `contains`     | O(1)       |
//! | `update_item`  | O(log n)   |
//! | `remove`       | O(log n)   |
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::{MinHeap, Slotted};
//!
//! let mut heap = MinHeap::with_capacity(4);
//! heap.push(Slotted::new(3)).unwrap();
//! heap.push(Slotted::new(1)).unwrap();
//! heap.push(Slotted::new(2)).unwrap();
//!
//! assert_eq!(*heap.peek().unwrap().value(), 1);
//!
//! // Re-prioritize whatever sits in slot 2
//! heap.update_with(2, |item| *item.value_mut() = 0).unwrap();
//! assert_eq!(heap.pop().unwrap().into_inner(), 0);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use crate::order::{MaxOrder, MinOrder};
use crate::traits::{BoundedHeap, HeapError, HeapItem, HeapOrder, PushError, DETACHED};

/// A fixed-capacity binary heap over self-indexing elements
///
/// `O` selects the comparison direction. Prefer the [`MinHeap`] and
/// [`MaxHeap`] aliases over naming the policy directly.
///
/// Only the live prefix of the conceptual capacity-sized array is stored;
/// the backing vector is reserved up front and never reallocates.
pub struct IndexedHeap<T, O = MinOrder> {
    /// Live elements in heap order; `store[i].heap_index() == i`
    store: Vec<T>,
    capacity: usize,
    _order: PhantomData<O>,
}

/// Indexed heap with the smallest element at the root
pub type MinHeap<T> = IndexedHeap<T, MinOrder>;

/// Indexed heap with the largest element at the root
pub type MaxHeap<T> = IndexedHeap<T, MaxOrder>;

impl<T: HeapItem, O: HeapOrder> IndexedHeap<T, O> {
    /// Creates an empty heap that can hold at most `capacity` elements
    ///
    /// A capacity of 0 yields a heap that is always empty.
    pub fn with_capacity(capacity: usize) -> Self {
        log::trace!("creating indexed heap with capacity {capacity}");
        Self {
            store: Vec::with_capacity(capacity),
            capacity,
            _order: PhantomData,
        }
    }

    /// Creates an empty heap from a signed capacity
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidCapacity`] if `capacity` is negative or
    /// the backing store cannot be allocated.
    pub fn try_with_capacity(capacity: i64) -> Result<Self, HeapError> {
        let invalid = || {
            log::debug!("rejecting heap capacity {capacity}");
            HeapError::InvalidCapacity {
                requested: capacity,
            }
        };
        let size = usize::try_from(capacity).map_err(|_| invalid())?;
        let mut store = Vec::new();
        store.try_reserve_exact(size).map_err(|_| invalid())?;
        log::trace!("creating indexed heap with capacity {size}");
        Ok(Self {
            store,
            capacity: size,
            _order: PhantomData,
        })
    }

    /// Returns the fixed maximum number of elements
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live elements
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the heap holds no elements
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns true if another push would be rejected
    pub fn is_full(&self) -> bool {
        self.store.len() >= self.capacity
    }

    /// Returns the live element in slot `index`, if any
    pub fn get(&self, index: usize) -> Option<&T> {
        self.store.get(index)
    }

    /// Returns the root element without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::HeapEmpty`] if the heap has no elements.
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.store.first().ok_or(HeapError::HeapEmpty)
    }

    /// Returns true if `item` is resident in this heap
    ///
    /// Checks that the recorded index points at a live slot holding an
    /// element equal to `item`. Stale or foreign elements yield `false`.
    pub fn contains(&self, item: &T) -> bool {
        self.store
            .get(item.heap_index())
            .is_some_and(|resident| resident == item)
    }

    /// Inserts an element
    ///
    /// # Errors
    /// If the heap is full the element is handed back inside a
    /// [`PushError`] carrying [`HeapError::HeapFull`]; the heap is unchanged.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn push(&mut self, mut item: T) -> Result<(), PushError<T>> {
        if self.is_full() {
            log::debug!("push rejected: heap at capacity {}", self.capacity);
            return Err(PushError::new(
                item,
                HeapError::HeapFull {
                    capacity: self.capacity,
                },
            ));
        }

        let index = self.store.len();
        item.set_heap_index(index);
        self.store.push(item);
        self.sift_up(index);
        Ok(())
    }

    /// Removes and returns the root element
    ///
    /// The returned element is marked [`DETACHED`].
    ///
    /// # Errors
    /// Returns [`HeapError::HeapEmpty`] if the heap has no elements.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn pop(&mut self) -> Result<T, HeapError> {
        if self.store.is_empty() {
            log::debug!("pop rejected: heap is empty");
            return Err(HeapError::HeapEmpty);
        }

        // The last live element takes over the root slot
        let mut top = self.store.swap_remove(0);
        if let Some(root) = self.store.first_mut() {
            root.set_heap_index(0);
            self.sift_down(0);
        }

        top.set_heap_index(DETACHED);
        Ok(top)
    }

    /// Removes and returns the element in slot `index`
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfBounds`] if `index` is not a live slot.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn remove(&mut self, index: usize) -> Result<T, HeapError> {
        self.check_live(index)?;

        let mut removed = self.store.swap_remove(index);
        if let Some(filler) = self.store.get_mut(index) {
            filler.set_heap_index(index);
            self.restore(index);
        }

        removed.set_heap_index(DETACHED);
        Ok(removed)
    }

    /// Removes and returns the resident element equal to `item`
    ///
    /// # Errors
    /// Returns [`HeapError::NotInHeap`] if [`contains`](Self::contains) is false.
    pub fn remove_item(&mut self, item: &T) -> Result<T, HeapError> {
        if !self.contains(item) {
            log::debug!("remove rejected: element not resident");
            return Err(HeapError::NotInHeap);
        }
        self.remove(item.heap_index())
    }

    /// Repositions `item` after its ordering key changed
    ///
    /// Call this after mutating (through a shared handle) data that affects
    /// how `item` compares. The element is moved toward the root if it now
    /// outranks its parent, otherwise toward the leaves if a child now
    /// outranks it.
    ///
    /// # Errors
    /// Returns [`HeapError::NotInHeap`] if [`contains`](Self::contains) is false.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn update_item(&mut self, item: &T) -> Result<(), HeapError> {
        if !self.contains(item) {
            log::debug!("update rejected: element not resident");
            return Err(HeapError::NotInHeap);
        }
        self.restore(item.heap_index());
        Ok(())
    }

    /// Repositions the element in slot `index` after its ordering key changed
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfBounds`] if `index` is not a live slot.
    pub fn update_at(&mut self, index: usize) -> Result<(), HeapError> {
        self.check_live(index)?;
        self.restore(index);
        Ok(())
    }

    /// Mutates the element in slot `index` in place, then repositions it
    ///
    /// Whatever the closure does to the recorded index is overwritten before
    /// the heap is repaired.
    ///
    /// # Errors
    /// Returns [`HeapError::IndexOutOfBounds`] if `index` is not a live slot.
    pub fn update_with<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, HeapError> {
        self.check_live(index)?;
        let item = &mut self.store[index];
        let result = f(item);
        item.set_heap_index(index);
        self.restore(index);
        Ok(result)
    }

    /// Detaches and drops every element, keeping the capacity
    pub fn clear(&mut self) {
        for mut item in self.store.drain(..) {
            item.set_heap_index(DETACHED);
        }
    }

    /// Drains the heap into a vector in pop order
    ///
    /// Ascending for a [`MinHeap`], descending for a [`MaxHeap`].
    pub fn into_pop_order(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.store.len());
        while let Ok(item) = self.pop() {
            out.push(item);
        }
        out
    }

    /// Iterates over the live elements in slot order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.store.iter()
    }

    /// Returns the live elements in slot order
    pub fn as_slice(&self) -> &[T] {
        &self.store
    }

    fn check_live(&self, index: usize) -> Result<(), HeapError> {
        let len = self.store.len();
        if index < len {
            Ok(())
        } else {
            log::debug!("slot {index} is not live (len {len})");
            Err(HeapError::IndexOutOfBounds { index, len })
        }
    }

    /// Restore heap order around `index` in whichever direction is needed
    fn restore(&mut self, index: usize) -> usize {
        let moved = self.sift_up(index);
        if moved == index {
            self.sift_down(index)
        } else {
            moved
        }
    }

    /// Exchange two slots and keep both recorded indices in sync
    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.store.swap(a, b);
        self.store[a].set_heap_index(a);
        self.store[b].set_heap_index(b);
    }

    /// Move element at index up while it outranks its parent
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if O::outranks(&self.store[index], &self.store[parent]) {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    /// Move element at index down while a child outranks it
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.store.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;

            let mut candidate = left;
            if right < len && O::outranks(&self.store[right], &self.store[left]) {
                candidate = right;
            }

            if O::outranks(&self.store[candidate], &self.store[index]) {
                self.swap(index, candidate);
                index = candidate;
            } else {
                break;
            }
        }
        index
    }
}

impl<T: HeapItem, O: HeapOrder> BoundedHeap<T> for IndexedHeap<T, O> {
    fn with_capacity(capacity: usize) -> Self {
        IndexedHeap::with_capacity(capacity)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn push(&mut self, item: T) -> Result<(), PushError<T>> {
        IndexedHeap::push(self, item)
    }

    fn pop(&mut self) -> Result<T, HeapError> {
        IndexedHeap::pop(self)
    }
}

impl<T, O> Index<usize> for IndexedHeap<T, O> {
    type Output = T;

    /// Panics if `index` is not a live slot
    fn index(&self, index: usize) -> &T {
        &self.store[index]
    }
}

impl<'a, T, O> IntoIterator for &'a IndexedHeap<T, O> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.store.iter()
    }
}

impl<T: HeapItem, O: HeapOrder> Default for IndexedHeap<T, O> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T: fmt::Debug, O> fmt::Debug for IndexedHeap<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedHeap")
            .field("capacity", &self.capacity)
            .field("items", &self.store)
            .finish()
    }
}

/// A plain value paired with its heap slot
///
/// Lets ordinary `Ord` values live in an [`IndexedHeap`] without writing a
/// [`HeapItem`] impl. Equality and ordering look at the value only.
#[derive(Debug, Clone, Copy)]
pub struct Slotted<V> {
    value: V,
    slot: usize,
}

impl<V> Slotted<V> {
    /// Wraps `value` as a detached element
    pub fn new(value: V) -> Self {
        Self {
            value,
            slot: DETACHED,
        }
    }

    /// Returns the wrapped value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the wrapped value mutably
    ///
    /// Changing the ordering of a resident element must be followed by an
    /// update; [`IndexedHeap::update_with`] does both.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Unwraps the value
    pub fn into_inner(self) -> V {
        self.value
    }
}

impl<V: Ord> HeapItem for Slotted<V> {
    fn heap_index(&self) -> usize {
        self.slot
    }

    fn set_heap_index(&mut self, index: usize) {
        self.slot = index;
    }
}

impl<V: PartialEq> PartialEq for Slotted<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Eq> Eq for Slotted<V> {}

impl<V: Ord> PartialOrd for Slotted<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord> Ord for Slotted<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<V> From<V> for Slotted<V> {
    fn from(value: V) -> Self {
        Self::new(value)
    }
}
