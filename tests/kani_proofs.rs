//! Kani verification proofs for indexed heap operations
//!
//! Kani is AWS's model checker for Rust. It can verify properties of Rust code
//! by checking all possible executions up to certain bounds.
//!
//! To run these proofs:
//!   cargo kani --tests

#[cfg(kani)]
use indexed_heaps::{HeapError, HeapItem, HeapOrder, IndexedHeap, MaxOrder, MinHeap, MinOrder, Slotted};

/// Heap order and index consistency over the live prefix
#[cfg(kani)]
fn invariants_hold<O: HeapOrder>(heap: &IndexedHeap<Slotted<u8>, O>) -> bool {
    heap.iter().enumerate().all(|(i, item)| {
        item.heap_index() == i && (i == 0 || !O::outranks(item, &heap[(i - 1) / 2]))
    })
}

/// Proof that push into a non-full heap increments the length and keeps invariants
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_push_increments_len() {
    let mut heap: MinHeap<Slotted<u8>> = MinHeap::with_capacity(4);
    for _ in 0..3 {
        assert!(heap.push(Slotted::new(kani::any())).is_ok());
    }
    let initial_len = heap.len();

    assert!(heap.push(Slotted::new(kani::any())).is_ok());

    assert!(heap.len() == initial_len + 1);
    assert!(invariants_hold(&heap));
}

/// Proof that push at capacity fails and leaves the heap untouched
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(4)]
fn verify_push_at_capacity_rejected() {
    let mut heap: MinHeap<Slotted<u8>> = MinHeap::with_capacity(2);
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    heap.push(Slotted::new(a)).unwrap();
    heap.push(Slotted::new(b)).unwrap();
    let root = *heap.peek().unwrap().value();

    let err = heap.push(Slotted::new(kani::any())).unwrap_err();

    assert!(err.error() == HeapError::HeapFull { capacity: 2 });
    assert!(heap.len() == 2);
    assert!(*heap.peek().unwrap().value() == root);
}

/// Proof that pop returns the minimum of three arbitrary values
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(5)]
fn verify_pop_returns_min() {
    let mut heap: MinHeap<Slotted<u8>> = MinHeap::with_capacity(3);
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();
    heap.push(Slotted::new(a)).unwrap();
    heap.push(Slotted::new(b)).unwrap();
    heap.push(Slotted::new(c)).unwrap();

    let popped = heap.pop().unwrap().into_inner();

    assert!(popped <= a && popped <= b && popped <= c);
    assert!(heap.len() == 2);
    assert!(invariants_hold(&heap));
}

/// Proof that update in either direction restores both invariants
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_update_restores_invariants() {
    let mut heap: IndexedHeap<Slotted<u8>, MaxOrder> = IndexedHeap::with_capacity(4);
    for _ in 0..4 {
        heap.push(Slotted::new(kani::any())).unwrap();
    }
    let slot: usize = kani::any();
    kani::assume(slot < 4);
    let value: u8 = kani::any();

    heap.update_with(slot, |s| *s.value_mut() = value).unwrap();

    assert!(invariants_hold(&heap));
}

/// Proof that pop on an empty heap always reports HeapEmpty
#[cfg(kani)]
#[kani::proof]
fn verify_pop_empty() {
    let mut heap: IndexedHeap<Slotted<u8>, MinOrder> = IndexedHeap::with_capacity(0);
    assert!(heap.pop() == Err(HeapError::HeapEmpty));
}
