//! Benchmark profiles for fingerpool.
//!
//! - [`churn_profile`]: a root split into many small pools, half released
//! - [`deep_profile`]: a halving chain of nested pools for access latency

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fingerpool_arena::{Arena, PoolId};
use fingerpool_test_utils::fixtures::nested_chain;

/// Root of `capacity` cells carved into pools of `pool_size`, with every
/// other pool released so the free set is fragmented.
pub fn churn_profile(capacity: u32, pool_size: usize) -> (Arena<u64>, Vec<PoolId>) {
    let pool_size = pool_size.max(1);
    let mut arena = Arena::with_capacity(capacity).expect("bench arena");
    let root = arena.root();
    let pools: Vec<PoolId> = std::iter::from_fn(|| arena.carve(root, pool_size).ok()).collect();

    let mut live = Vec::with_capacity(pools.len() / 2);
    for (i, pool) in pools.into_iter().enumerate() {
        if i % 2 == 0 {
            arena.release(pool).expect("childless pool");
        } else {
            live.push(pool);
        }
    }
    (arena, live)
}

/// A chain of `depth` nested pools under a root of `capacity` cells.
///
/// Returns the arena and the deepest pool.
pub fn deep_profile(capacity: u32, depth: usize) -> (Arena<u64>, PoolId) {
    let (arena, chain) = nested_chain(capacity, depth);
    let deepest = chain.last().copied().unwrap_or(PoolId::ROOT);
    (arena, deepest)
}
