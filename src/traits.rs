//! Common traits for fixed-capacity heaps
//!
//! This module provides the contracts shared by every heap in the crate:
//!
//! - [`HeapItem`]: Capability an element needs to live in an [`IndexedHeap`](crate::IndexedHeap)
//!   (total order plus a recorded slot index)
//! - [`HeapOrder`]: The comparison direction policy (min or max)
//! - [`BoundedHeap`]: The capacity-bounded push/peek/pop surface
//!
//! Errors are reported through [`HeapError`]. A rejected push hands the
//! element back inside a [`PushError`] so the caller can retry elsewhere.

use std::fmt;

/// Recorded index of an element that is not resident in any heap
pub const DETACHED: usize = usize::MAX;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// A heap was requested with a negative capacity
    InvalidCapacity {
        /// The capacity that was asked for
        requested: i64,
    },
    /// The heap already holds `capacity` elements
    HeapFull {
        /// The fixed capacity of the heap
        capacity: usize,
    },
    /// The heap holds no elements
    HeapEmpty,
    /// The element or key is not resident in this heap
    NotInHeap,
    /// The slot index does not refer to a live element
    IndexOutOfBounds {
        /// The index that was asked for
        index: usize,
        /// The number of live elements
        len: usize,
    },
    /// The key is already resident in this heap
    DuplicateKey,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidCapacity { requested } => {
                write!(f, "invalid heap capacity {requested}: must not be negative")
            }
            HeapError::HeapFull { capacity } => {
                write!(f, "heap is full (capacity {capacity})")
            }
            HeapError::HeapEmpty => write!(f, "heap is empty"),
            HeapError::NotInHeap => write!(f, "element is not resident in this heap"),
            HeapError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for heap of length {len}")
            }
            HeapError::DuplicateKey => write!(f, "key is already resident in this heap"),
        }
    }
}

impl std::error::Error for HeapError {}

/// A push that was rejected, carrying the element back to the caller
///
/// Converts into [`HeapError`] so `?` works in functions that do not care
/// about recovering the element.
#[derive(Clone, PartialEq, Eq)]
pub struct PushError<T> {
    item: T,
    error: HeapError,
}

impl<T> PushError<T> {
    pub(crate) fn new(item: T, error: HeapError) -> Self {
        Self { item, error }
    }

    /// The reason the push was rejected
    pub fn error(&self) -> HeapError {
        self.error
    }

    /// Returns the rejected element
    pub fn into_inner(self) -> T {
        self.item
    }
}

// Manual impl so the element type does not need to be Debug
impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "push rejected: {}", self.error)
    }
}

impl<T> std::error::Error for PushError<T> {}

impl<T> From<PushError<T>> for HeapError {
    fn from(err: PushError<T>) -> Self {
        err.error
    }
}

/// Capability required of every element stored in an [`IndexedHeap`](crate::IndexedHeap)
///
/// The heap keeps the recorded index synchronized with the element's actual
/// slot, which is what makes O(1) [`contains`](crate::IndexedHeap::contains)
/// and O(log n) [`update_item`](crate::IndexedHeap::update_item) possible.
///
/// Fresh elements should report [`DETACHED`]. An element must be resident in
/// at most one heap at a time.
///
/// When the caller needs to keep its own handle to a resident element (to
/// change its priority later), store a shared handle such as `Rc<Node>` and
/// keep the index in a `Cell<usize>`:
///
/// ```rust
/// use std::cell::Cell;
/// use std::cmp::Ordering;
/// use std::rc::Rc;
/// use indexed_heaps::{HeapItem, MinHeap, DETACHED};
///
/// struct Task {
///     cost: Cell<u32>,
///     slot: Cell<usize>,
/// }
///
/// #[derive(Clone)]
/// struct TaskRef(Rc<Task>);
///
/// impl PartialEq for TaskRef {
///     fn eq(&self, other: &Self) -> bool {
///         Rc::ptr_eq(&self.0, &other.0)
///     }
/// }
/// impl Eq for TaskRef {}
/// impl PartialOrd for TaskRef {
///     fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
///         Some(self.cmp(other))
///     }
/// }
/// impl Ord for TaskRef {
///     fn cmp(&self, other: &Self) -> Ordering {
///         self.0.cost.get().cmp(&other.0.cost.get())
///     }
/// }
///
/// impl HeapItem for TaskRef {
///     fn heap_index(&self) -> usize {
///         self.0.slot.get()
///     }
///     fn set_heap_index(&mut self, index: usize) {
///         self.0.slot.set(index);
///     }
/// }
///
/// let a = TaskRef(Rc::new(Task { cost: Cell::new(10), slot: Cell::new(DETACHED) }));
/// let b = TaskRef(Rc::new(Task { cost: Cell::new(20), slot: Cell::new(DETACHED) }));
///
/// let mut heap = MinHeap::with_capacity(2);
/// heap.push(a.clone()).unwrap();
/// heap.push(b.clone()).unwrap();
///
/// b.0.cost.set(1);
/// heap.update_item(&b).unwrap();
/// assert!(heap.peek().unwrap() == &b);
/// ```
pub trait HeapItem: Ord {
    /// Returns the slot this element was last recorded at
    fn heap_index(&self) -> usize;

    /// Records the slot this element now occupies
    fn set_heap_index(&mut self, index: usize);
}

/// Comparison direction of a heap
///
/// Implementors are zero-sized policy types; the heap engine never holds a
/// value of them.
pub trait HeapOrder {
    /// Returns true if `a` belongs strictly closer to the root than `b`
    ///
    /// Must be a strict relation: equal elements never outrank each other.
    fn outranks<T: Ord + ?Sized>(a: &T, b: &T) -> bool;
}

/// Fixed-capacity heap surface shared by every heap in this crate
///
/// Unlike `std::collections::BinaryHeap`, capacity is chosen once at
/// construction and never grows. Running out of room is reported as
/// [`HeapError::HeapFull`] rather than reallocating.
///
/// # Example
///
/// ```rust
/// use indexed_heaps::{BoundedHeap, HeapError, MinHeap, Slotted};
///
/// fn fill<H: BoundedHeap<Slotted<u32>>>(heap: &mut H) -> Result<(), HeapError> {
///     heap.push(Slotted::new(2))?;
///     heap.push(Slotted::new(1))?;
///     heap.push(Slotted::new(3))?;
///     Ok(())
/// }
///
/// let mut heap: MinHeap<Slotted<u32>> = BoundedHeap::with_capacity(2);
/// assert_eq!(fill(&mut heap), Err(HeapError::HeapFull { capacity: 2 }));
/// assert!(BoundedHeap::is_full(&heap));
/// assert_eq!(BoundedHeap::pop(&mut heap).map(Slotted::into_inner), Ok(1));
/// ```
pub trait BoundedHeap<T> {
    /// Creates an empty heap that can hold at most `capacity` elements
    fn with_capacity(capacity: usize) -> Self;

    /// Returns the fixed maximum number of elements
    fn capacity(&self) -> usize;

    /// Returns the number of live elements
    fn len(&self) -> usize;

    /// Returns true if the heap holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if another push would fail with [`HeapError::HeapFull`]
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Inserts an element
    ///
    /// # Errors
    /// Returns the element inside a [`PushError`] if the heap is full.
    ///
    /// # Time Complexity
    /// O(log n)
    fn push(&mut self, item: T) -> Result<(), PushError<T>>;

    /// Removes and returns the top element
    ///
    /// # Errors
    /// Returns [`HeapError::HeapEmpty`] if there is nothing to pop.
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Result<T, HeapError>;
}
