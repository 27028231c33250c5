//! Comparison direction policies
//!
//! A heap in this crate is one engine parameterized by a zero-sized
//! [`HeapOrder`] type. The policy answers a single question: does `a` belong
//! closer to the root than `b`?
//!
//! | Policy       | `outranks(a, b)` | Root holds |
//! |--------------|------------------|------------|
//! | [`MinOrder`] | `a < b`          | minimum    |
//! | [`MaxOrder`] | `a > b`          | maximum    |

use crate::traits::HeapOrder;

/// Smallest element at the root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MinOrder;

/// Largest element at the root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaxOrder;

impl HeapOrder for MinOrder {
    #[inline]
    fn outranks<T: Ord + ?Sized>(a: &T, b: &T) -> bool {
        a < b
    }
}

impl HeapOrder for MaxOrder {
    #[inline]
    fn outranks<T: Ord + ?Sized>(a: &T, b: &T) -> bool {
        a > b
    }
}
