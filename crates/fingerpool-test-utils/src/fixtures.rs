//! Reusable arena fixtures.
//!
//! [`ten_slot_scenario`] builds the canonical layout used across the
//! integration tests: a 10-cell root split into four children.
//!
//! ```text
//! root:  0  1 | 2  3  4 | 5  6  7  8 | 9
//!        a  a | b  b  b | c  c  c  c | d
//!          A  |    B    |     C      | D
//! ```

use fingerpool_arena::{Arena, PoolId};

/// A 10-cell arena carved into A(2), B(3), C(4), D(1), each filled with its
/// own letter.
pub struct TenSlotScenario {
    pub arena: Arena<char>,
    pub a: PoolId,
    pub b: PoolId,
    pub c: PoolId,
    pub d: PoolId,
}

/// Build the [`TenSlotScenario`].
pub fn ten_slot_scenario() -> TenSlotScenario {
    let mut arena = Arena::with_capacity(10).expect("10-cell arena");
    let root = arena.root();
    let mut carve_filled = |size: usize, letter: char| {
        let pool = arena.carve(root, size).expect("root has room");
        for i in 0..size {
            arena.set(pool, i, letter).expect("fresh pool index");
        }
        pool
    };
    let a = carve_filled(2, 'a');
    let b = carve_filled(3, 'b');
    let c = carve_filled(4, 'c');
    let d = carve_filled(1, 'd');
    TenSlotScenario { arena, a, b, c, d }
}

/// Build an arena of `capacity` cells with a chain of nested pools, each
/// half the size of its parent (rounded down, at least one slot).
///
/// Returns the arena and the pool ids from root to deepest.
pub fn nested_chain<T>(capacity: u32, depth: usize) -> (Arena<T>, Vec<PoolId>) {
    let mut arena = Arena::with_capacity(capacity).expect("arena");
    let mut chain = vec![arena.root()];
    let mut size = capacity as usize;
    for _ in 0..depth {
        size = (size / 2).max(1);
        let parent = *chain.last().expect("chain starts at root");
        let child = arena.carve(parent, size).expect("half of parent fits");
        chain.push(child);
    }
    (arena, chain)
}
