//! Stress tests that push the heaps to their capacity limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use indexed_heaps::{HeapItem, HeapOrder, IndexedHeap, MaxHeap, MaxOrder, MinHeap, MinOrder, Slotted};
#[cfg(feature = "keyed")]
use indexed_heaps::KeyedHeap;

fn assert_valid<O: HeapOrder>(heap: &IndexedHeap<Slotted<i64>, O>) {
    for (i, item) in heap.iter().enumerate() {
        assert_eq!(item.heap_index(), i);
        if i > 0 {
            assert!(!O::outranks(item, &heap[(i - 1) / 2]));
        }
    }
}

/// Deterministic scrambled sequence so failures are reproducible
fn scrambled(n: i64) -> impl Iterator<Item = i64> {
    (0..n).map(move |i| (i * 7919) % n)
}

/// Fill to capacity, then drain
fn test_massive_operations<O: HeapOrder>(expected_first: i64) {
    let mut heap: IndexedHeap<Slotted<i64>, O> = IndexedHeap::with_capacity(1000);

    for v in scrambled(1000) {
        heap.push(Slotted::new(v)).unwrap();
    }

    assert_eq!(heap.len(), 1000);
    assert!(heap.is_full());
    assert!(heap.push(Slotted::new(0)).is_err());
    assert_valid(&heap);
    assert_eq!(*heap.peek().unwrap().value(), expected_first);

    let drained = heap.into_pop_order();
    assert_eq!(drained.len(), 1000);
    for pair in drained.windows(2) {
        assert!(!O::outranks(&pair[1], &pair[0]));
    }
}

/// Update every element, alternating improvements and regressions
fn test_many_updates<O: HeapOrder>() {
    let mut heap: IndexedHeap<Slotted<i64>, O> = IndexedHeap::with_capacity(500);
    for v in scrambled(500) {
        heap.push(Slotted::new(v)).unwrap();
    }

    for round in 0..500usize {
        let slot = (round * 31) % heap.len();
        heap.update_with(slot, |s| {
            let v = s.value_mut();
            *v = if round % 2 == 0 { *v - 1000 } else { *v + 1000 };
        })
        .unwrap();
    }
    assert_valid(&heap);

    let drained = heap.into_pop_order();
    for pair in drained.windows(2) {
        assert!(!O::outranks(&pair[1], &pair[0]));
    }
}

/// Alternate push and pop at the capacity boundary
fn test_alternating_ops<O: HeapOrder>() {
    let mut heap: IndexedHeap<Slotted<i64>, O> = IndexedHeap::with_capacity(64);

    for i in 0..2000 {
        if heap.is_full() {
            heap.pop().unwrap();
        }
        heap.push(Slotted::new((i * 37) % 101)).unwrap();
        if i % 3 == 0 {
            heap.pop().unwrap();
        }
    }
    assert_valid(&heap);

    while heap.pop().is_ok() {}
    assert!(heap.is_empty());
}

/// Remove from the middle until empty
fn test_remove_everything<O: HeapOrder>() {
    let mut heap: IndexedHeap<Slotted<i64>, O> = IndexedHeap::with_capacity(300);
    for v in scrambled(300) {
        heap.push(Slotted::new(v)).unwrap();
    }

    let mut seen = Vec::new();
    while !heap.is_empty() {
        let slot = heap.len() / 2;
        seen.push(heap.remove(slot).unwrap().into_inner());
        assert_valid(&heap);
    }

    seen.sort_unstable();
    assert_eq!(seen, (0..300).collect::<Vec<_>>());
}

/// Very large and very small priorities
fn test_large_priorities<O: HeapOrder>(expected: [i64; 3]) {
    let mut heap: IndexedHeap<Slotted<i64>, O> = IndexedHeap::with_capacity(3);

    heap.push(Slotted::new(1_000_000_000_000)).unwrap();
    heap.push(Slotted::new(i64::MIN)).unwrap();
    heap.push(Slotted::new(i64::MAX)).unwrap();

    let drained: Vec<i64> = heap.into_pop_order().into_iter().map(Slotted::into_inner).collect();
    assert_eq!(drained, expected);
}

#[test]
fn test_min_massive() {
    test_massive_operations::<MinOrder>(0);
}

#[test]
fn test_min_many_updates() {
    test_many_updates::<MinOrder>();
}

#[test]
fn test_min_alternating() {
    test_alternating_ops::<MinOrder>();
}

#[test]
fn test_min_remove_everything() {
    test_remove_everything::<MinOrder>();
}

#[test]
fn test_min_large_priorities() {
    test_large_priorities::<MinOrder>([i64::MIN, 1_000_000_000_000, i64::MAX]);
}

// Max heap stress tests

#[test]
fn test_max_massive() {
    test_massive_operations::<MaxOrder>(999);
}

#[test]
fn test_max_many_updates() {
    test_many_updates::<MaxOrder>();
}

#[test]
fn test_max_alternating() {
    test_alternating_ops::<MaxOrder>();
}

#[test]
fn test_max_remove_everything() {
    test_remove_everything::<MaxOrder>();
}

#[test]
fn test_max_large_priorities() {
    test_large_priorities::<MaxOrder>([i64::MAX, 1_000_000_000_000, i64::MIN]);
}

#[test]
fn test_aliases_under_load() {
    let mut min: MinHeap<Slotted<i64>> = MinHeap::with_capacity(256);
    let mut max: MaxHeap<Slotted<i64>> = MaxHeap::with_capacity(256);
    for v in scrambled(256) {
        min.push(Slotted::new(v)).unwrap();
        max.push(Slotted::new(v)).unwrap();
    }
    for i in 0..256 {
        assert_eq!(min.pop().unwrap().into_inner(), i);
        assert_eq!(max.pop().unwrap().into_inner(), 255 - i);
    }
}

#[cfg(feature = "keyed")]
#[test]
fn test_keyed_rapid_reprioritization() {
    let mut heap: KeyedHeap<u32, i64> = KeyedHeap::with_capacity(1000);
    for k in 0..1000u32 {
        heap.push(k, i64::from(k)).unwrap();
    }

    // Reverse every priority: key k ends at 1000 - k
    for k in 0..1000u32 {
        heap.set_priority(&k, 1000 - i64::from(k)).unwrap();
    }

    for expected in (0..1000u32).rev() {
        let (k, p) = heap.pop().unwrap();
        assert_eq!(k, expected);
        assert_eq!(p, 1000 - i64::from(expected));
    }
    assert!(heap.is_empty());
}
