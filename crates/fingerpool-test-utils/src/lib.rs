//! Test utilities for fingerpool development.
//!
//! Provides the canonical ten-slot scenario fixture ([`fixtures`]),
//! invariant assertions for modulus tables and pools, and a one-call
//! tracing setup for tests that want to see arena events.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashSet;

use fingerpool_arena::{Arena, PoolId};
use fingerpool_modular::ModulusTable;
use num_integer::Integer;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test: only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Assert that every pair of moduli in `table` is coprime and that each is
/// at least the table length.
pub fn assert_pairwise_coprime(table: &ModulusTable) {
    let capacity = table.len() as u64;
    for (i, a) in table.iter().enumerate() {
        assert!(a >= capacity, "modulus {i} = {a} is below {capacity}");
        for (j, b) in table.iter().enumerate().skip(i + 1) {
            assert_eq!(a.gcd(&b), 1, "moduli {i} = {a} and {j} = {b} share a factor");
        }
    }
}

/// Assert the per-pool invariants of an active pool:
///
/// - `num_used` equals the number of used flags
/// - `num_used <= capacity`
/// - no two local indices map to the same parent slot
/// - no two local indices map to the same physical cell
pub fn assert_pool_invariants<T>(arena: &Arena<T>, pool: PoolId) {
    let capacity = arena.capacity(pool).expect("pool capacity");
    let used = arena.num_used(pool).expect("pool num_used");
    let flagged = (0..capacity)
        .filter(|&i| arena.is_used(pool, i).expect("pool flag"))
        .count();
    assert_eq!(flagged, used, "pool {pool}: num_used disagrees with flags");
    assert!(used <= capacity, "pool {pool}: {used} used of {capacity}");

    let parent_slots: HashSet<usize> = arena.slot_view(pool).expect("slot view").slots().collect();
    assert_eq!(parent_slots.len(), capacity, "pool {pool}: parent slots alias");

    let physical: HashSet<usize> = arena
        .physical_slots(pool)
        .expect("physical slots")
        .into_iter()
        .collect();
    assert_eq!(physical.len(), capacity, "pool {pool}: physical cells alias");
}

/// Every cell of `pool`, cloned, in local order.
pub fn contents<T: Clone>(arena: &Arena<T>, pool: PoolId) -> Vec<Option<T>> {
    arena
        .iter(pool)
        .expect("iterable pool")
        .map(|cell| cell.cloned())
        .collect()
}
