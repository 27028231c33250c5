//! Fixed-capacity Indexed Heaps for Rust
//!
//! This crate provides binary heaps whose elements can be re-prioritized or
//! removed while resident, in O(log n), without scanning the heap. The
//! standard library's `BinaryHeap` exposes no stable handle to a resident
//! element, so "decrease-key" style updates are impossible there.
//!
//! # Features
//!
//! - **[`IndexedHeap`]** ([`MinHeap`] / [`MaxHeap`]): intrusive heap; each element records
//!   its own slot through the [`HeapItem`] trait. O(1) `contains`, O(log n) update and removal
//! - **[`KeyedHeap`]** (feature `keyed`, on by default): non-intrusive heap of
//!   `(key, priority)` entries with a key-to-slot side table, for element types that cannot
//!   carry an index
//!
//! Capacity is fixed at construction. Pushing into a full heap is an error
//! ([`HeapError::HeapFull`]), never a reallocation. Neither heap is thread-safe and
//! ties between equal priorities are broken arbitrarily.
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::{MaxHeap, MinHeap, Slotted};
//!
//! let mut min = MinHeap::with_capacity(5);
//! let mut max = MaxHeap::with_capacity(5);
//! for rank in [5, 3, 8, 1, 9] {
//!     min.push(Slotted::new(rank)).unwrap();
//!     max.push(Slotted::new(rank)).unwrap();
//! }
//!
//! let ascending: Vec<i32> = min.into_pop_order().into_iter().map(Slotted::into_inner).collect();
//! let descending: Vec<i32> = max.into_pop_order().into_iter().map(Slotted::into_inner).collect();
//! assert_eq!(ascending, [1, 3, 5, 8, 9]);
//! assert_eq!(descending, [9, 8, 5, 3, 1]);
//! ```

pub mod indexed;
#[cfg(feature = "keyed")]
pub mod keyed;
pub mod order;
pub mod traits;

pub use indexed::{IndexedHeap, MaxHeap, MinHeap, Slotted};
#[cfg(feature = "keyed")]
pub use keyed::KeyedHeap;
pub use order::{MaxOrder, MinOrder};
pub use traits::{BoundedHeap, HeapError, HeapItem, HeapOrder, PushError, DETACHED};
