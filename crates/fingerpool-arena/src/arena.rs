//! The arena: physical cells plus a tree of CRT-addressed pools.
//!
//! # Lifecycle
//!
//! ```text
//! Arena::new ──► root (Active)
//!                 │ carve(size)
//!                 ▼
//!               child (Active) ── carve ──► grandchild ...
//!                 │ release()      (refused while children are active)
//!                 ▼
//!               child (Released, slots back in parent's free set)
//! ```
//!
//! A released pool's table slot goes on a free list and is reused by a
//! later carve under the next generation, so the table stays as large as
//! the peak number of live pools. Ids carry the generation they were issued
//! with, which makes stale ids fail loudly instead of aliasing. A slot whose
//! generation would overflow is retired for good. Releasing the root (once
//! it has no active children) ends the arena's usable life; its cells are
//! dropped with the `Arena` itself.

use std::sync::Arc;

use fingerpool_modular::{build_moduli_with, Finger, MillerRabin, SharedModulusTable, SlotView};

use crate::config::ArenaConfig;
use crate::error::PoolError;
use crate::handle::{PoolId, PoolState};
use crate::iter::Cells;
use crate::pool::{Backing, PoolRecord, Slots};

/// Owner of the physical cells and every pool carved from them.
#[derive(Debug)]
pub struct Arena<T> {
    /// Root storage, one entry per root slot.
    cells: Vec<Option<T>>,
    moduli: SharedModulusTable,
    /// Indexed by `PoolId::slot`; entry 0 is the root.
    pools: Vec<PoolEntry>,
    /// Released slots available for reuse.
    free_list: Vec<u32>,
}

/// One slot of the pool table.
#[derive(Debug)]
struct PoolEntry {
    /// Generation of the current (or most recent) occupant.
    generation: u32,
    /// `None` once the occupant is released.
    record: Option<PoolRecord>,
}

impl<T> Arena<T> {
    /// Create an arena and its root pool.
    ///
    /// Builds the modulus table for `config.capacity` and gives the root
    /// the identity finger, so root index `i` is physical cell `i`.
    pub fn new(config: ArenaConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let capacity = config.capacity as usize;

        let mut oracle = MillerRabin::new(config.witness_rounds, config.seed);
        let moduli = build_moduli_with(capacity, &mut oracle)?.into_shared();
        let finger = Finger::identity(&moduli)?;

        tracing::debug!(
            capacity,
            finger_bits = finger.bits(),
            "created arena root"
        );

        let root = PoolRecord::new(capacity, Backing::Raw, Arc::clone(&moduli), finger);
        Ok(Self {
            cells: std::iter::repeat_with(|| None).take(capacity).collect(),
            moduli,
            pools: vec![PoolEntry {
                generation: 0,
                record: Some(root),
            }],
            free_list: Vec::new(),
        })
    }

    /// Create an arena of `capacity` cells with default parameters.
    pub fn with_capacity(capacity: u32) -> Result<Self, PoolError> {
        Self::new(ArenaConfig::new(capacity))
    }

    /// Handle of the root pool.
    pub fn root(&self) -> PoolId {
        PoolId::ROOT
    }

    /// The modulus table shared by every pool in this arena.
    pub fn moduli(&self) -> &SharedModulusTable {
        &self.moduli
    }

    // ── Carve / release ────────────────────────────────────────────

    /// Carve a child of `size` slots out of `parent`.
    ///
    /// Takes the first `size` free slots of `parent` in ascending order.
    /// They need not be contiguous. `size == 0` yields an empty pool.
    ///
    /// # Errors
    ///
    /// - [`PoolError::OutOfSpace`] if `parent` has fewer than `size` free
    ///   slots; `parent` is left untouched.
    /// - [`PoolError::UseAfterRelease`] / [`PoolError::UnknownPool`] for an
    ///   unusable `parent`.
    /// - [`PoolError::TooManyPools`] if no table slot can be issued.
    pub fn carve(&mut self, parent: PoolId, size: usize) -> Result<PoolId, PoolError> {
        let record = self.active(parent)?;
        let available = record.free();
        let slots = record.first_free(size).ok_or(PoolError::OutOfSpace {
            requested: size,
            available,
        })?;
        let finger = Finger::encode(&slots, &record.moduli)?;
        let moduli = Arc::clone(&record.moduli);
        let id = self.next_id()?;

        // Nothing below can fail: commit.
        let record = self.live_mut(parent);
        record.reserve(&slots);
        record.children.insert(id);

        tracing::debug!(
            pool = %id,
            parent = %parent,
            size,
            finger_bits = finger.bits(),
            "carved pool"
        );
        let record = PoolRecord::new(size, Backing::Parent(parent), moduli, finger);
        if id.slot() == self.pools.len() {
            self.pools.push(PoolEntry {
                generation: id.generation(),
                record: Some(record),
            });
        } else {
            self.free_list.pop();
            self.pools[id.slot()].record = Some(record);
        }
        Ok(id)
    }

    /// The id the next carve will hand out: a recycled slot if one is
    /// free, otherwise a fresh one at the end of the table.
    fn next_id(&self) -> Result<PoolId, PoolError> {
        if let Some(&index) = self.free_list.last() {
            return Ok(PoolId::new(index, self.pools[index as usize].generation));
        }
        let index = u32::try_from(self.pools.len()).map_err(|_| PoolError::TooManyPools)?;
        Ok(PoolId::new(index, 0))
    }

    /// Release `pool`, returning its slots to its parent.
    ///
    /// Releasing the root only marks it released; its cells are reclaimed
    /// when the arena is dropped.
    ///
    /// # Errors
    ///
    /// - [`PoolError::DoubleRelease`] if `pool` was already released,
    ///   including when its slot has since been reused.
    /// - [`PoolError::PoolBusy`] if `pool` still has active children.
    /// - [`PoolError::UnknownPool`] for an id this arena never issued.
    pub fn release(&mut self, pool: PoolId) -> Result<(), PoolError> {
        let record = match self.lookup(pool)? {
            Some(record) => record,
            None => return Err(PoolError::DoubleRelease { pool }),
        };
        if !record.children.is_empty() {
            return Err(PoolError::PoolBusy {
                pool,
                active_children: record.children.len(),
            });
        }

        let recyclable = record.backing != Backing::Raw;
        if let Backing::Parent(parent) = record.backing {
            let slots: Slots = record.slot_view().slots().collect();
            let parent_record = self.live_mut(parent);
            parent_record.unreserve(&slots);
            parent_record.children.shift_remove(&pool);
            tracing::debug!(pool = %pool, parent = %parent, size = slots.len(), "released pool");
        } else {
            tracing::debug!(pool = %pool, "released arena root");
        }

        let entry = &mut self.pools[pool.slot()];
        entry.record = None;
        match entry.generation.checked_add(1) {
            Some(next) => {
                entry.generation = next;
                if recyclable {
                    self.free_list.push(pool.index());
                }
            }
            None => tracing::debug!(slot = pool.index(), "retired pool slot"),
        }
        Ok(())
    }

    /// Release every active descendant of `pool`, most recently carved
    /// first, then `pool` itself. Returns how many pools were released.
    ///
    /// On the root this tears down the whole tree.
    ///
    /// # Errors
    ///
    /// [`PoolError::DoubleRelease`] if `pool` was already released,
    /// [`PoolError::UnknownPool`] for a foreign id.
    pub fn release_cascade(&mut self, pool: PoolId) -> Result<usize, PoolError> {
        if self.lookup(pool)?.is_none() {
            return Err(PoolError::DoubleRelease { pool });
        }

        // Post-order walk without recursion: descend to the newest leaf,
        // release it, then resume from its parent. Chains can be as deep
        // as the root is wide.
        let mut released = 0;
        let mut current = pool;
        loop {
            let record = self.active(current)?;
            if let Some(&child) = record.children.last() {
                current = child;
                continue;
            }
            let backing = record.backing;
            self.release(current)?;
            released += 1;
            match backing {
                _ if current == pool => break,
                Backing::Parent(parent) => current = parent,
                Backing::Raw => break,
            }
        }
        tracing::debug!(pool = %pool, released, "cascade released pool");
        Ok(released)
    }

    // ── Indexed access ─────────────────────────────────────────────

    /// Physical cell index behind local index `i` of `pool`.
    ///
    /// Walks the parent chain, translating through each finger.
    pub fn resolve(&self, pool: PoolId, i: usize) -> Result<usize, PoolError> {
        let mut current = pool;
        let mut index = i;
        loop {
            let record = self.active(current)?;
            if index >= record.capacity {
                return Err(PoolError::IndexOutOfRange {
                    index,
                    capacity: record.capacity,
                });
            }
            match record.backing {
                Backing::Raw => return Ok(index),
                Backing::Parent(parent) => {
                    index = record.finger.residue(record.moduli[index]) as usize;
                    current = parent;
                }
            }
        }
    }

    /// Physical cell indices of every local index of `pool`, in order.
    pub fn physical_slots(&self, pool: PoolId) -> Result<Vec<usize>, PoolError> {
        let capacity = self.active(pool)?.capacity;
        (0..capacity).map(|i| self.resolve(pool, i)).collect()
    }

    /// Read local cell `i` of `pool`. `None` means the cell is empty.
    pub fn get(&self, pool: PoolId, i: usize) -> Result<Option<&T>, PoolError> {
        let cell = self.resolve(pool, i)?;
        Ok(self.cells[cell].as_ref())
    }

    /// Mutable access to local cell `i` of `pool`.
    pub fn get_mut(&mut self, pool: PoolId, i: usize) -> Result<Option<&mut T>, PoolError> {
        let cell = self.resolve(pool, i)?;
        Ok(self.cells[cell].as_mut())
    }

    /// Write `value` into local cell `i` of `pool`.
    ///
    /// The write lands in the physical cell, so every pool aliasing that
    /// cell observes it immediately.
    pub fn set(&mut self, pool: PoolId, i: usize, value: T) -> Result<(), PoolError> {
        let cell = self.resolve(pool, i)?;
        self.cells[cell] = Some(value);
        Ok(())
    }

    /// Empty local cell `i` of `pool`, returning what it held.
    pub fn take(&mut self, pool: PoolId, i: usize) -> Result<Option<T>, PoolError> {
        let cell = self.resolve(pool, i)?;
        Ok(self.cells[cell].take())
    }

    /// Iterate over `pool`'s cells in local index order.
    ///
    /// The iterator is finite (`capacity` items) and can be cloned to
    /// restart it.
    pub fn iter(&self, pool: PoolId) -> Result<Cells<'_, T>, PoolError> {
        let capacity = self.active(pool)?.capacity;
        Ok(Cells::new(self, pool, capacity))
    }

    // ── Introspection ──────────────────────────────────────────────

    /// Number of local slots in `pool`.
    pub fn capacity(&self, pool: PoolId) -> Result<usize, PoolError> {
        Ok(self.active(pool)?.capacity)
    }

    /// Number of `pool`'s slots currently carved out to children.
    pub fn num_used(&self, pool: PoolId) -> Result<usize, PoolError> {
        Ok(self.active(pool)?.num_used())
    }

    /// Number of `pool`'s slots available for carving.
    pub fn free(&self, pool: PoolId) -> Result<usize, PoolError> {
        Ok(self.active(pool)?.free())
    }

    /// Whether local slot `i` of `pool` is carved out to a child.
    pub fn is_used(&self, pool: PoolId, i: usize) -> Result<bool, PoolError> {
        let record = self.active(pool)?;
        if i >= record.capacity {
            return Err(PoolError::IndexOutOfRange {
                index: i,
                capacity: record.capacity,
            });
        }
        Ok(record.is_used(i))
    }

    /// Lifecycle state of `pool`. Stale ids report `Released` even after
    /// their slot has been reused.
    pub fn state(&self, pool: PoolId) -> Result<PoolState, PoolError> {
        Ok(match self.lookup(pool)? {
            Some(_) => PoolState::Active,
            None => PoolState::Released,
        })
    }

    /// Parent of `pool`, or `None` for the root.
    pub fn parent(&self, pool: PoolId) -> Result<Option<PoolId>, PoolError> {
        Ok(match self.active(pool)?.backing {
            Backing::Raw => None,
            Backing::Parent(parent) => Some(parent),
        })
    }

    /// Active children of `pool`, in carve order.
    pub fn children(&self, pool: PoolId) -> Result<Vec<PoolId>, PoolError> {
        Ok(self.active(pool)?.children.iter().copied().collect())
    }

    /// Number of parent hops from `pool` to the root.
    pub fn depth(&self, pool: PoolId) -> Result<usize, PoolError> {
        let mut depth = 0;
        let mut current = self.active(pool)?;
        while let Backing::Parent(parent) = current.backing {
            current = self.active(parent)?;
            depth += 1;
        }
        Ok(depth)
    }

    /// The finger encoding `pool`'s local-to-parent mapping.
    pub fn finger(&self, pool: PoolId) -> Result<&Finger, PoolError> {
        Ok(&self.active(pool)?.finger)
    }

    /// Translation view from `pool`'s local indices to its parent's.
    pub fn slot_view(&self, pool: PoolId) -> Result<SlotView<'_>, PoolError> {
        Ok(self.active(pool)?.slot_view())
    }

    /// Size of the pool table: the peak number of simultaneously live
    /// pools, root included.
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Pools currently active.
    pub fn active_pool_count(&self) -> usize {
        self.pools.iter().filter(|e| e.record.is_some()).count()
    }

    /// `Ok(Some)` for a live pool, `Ok(None)` for one this arena released.
    fn lookup(&self, pool: PoolId) -> Result<Option<&PoolRecord>, PoolError> {
        let entry = self
            .pools
            .get(pool.slot())
            .ok_or(PoolError::UnknownPool { pool })?;
        if pool.generation() > entry.generation {
            return Err(PoolError::UnknownPool { pool });
        }
        if pool.generation() < entry.generation {
            return Ok(None);
        }
        Ok(entry.record.as_ref())
    }

    fn active(&self, pool: PoolId) -> Result<&PoolRecord, PoolError> {
        self.lookup(pool)?
            .ok_or(PoolError::UseAfterRelease { pool })
    }

    /// Mutable record of a pool already checked live in this call.
    fn live_mut(&mut self, pool: PoolId) -> &mut PoolRecord {
        match self.pools[pool.slot()].record.as_mut() {
            Some(record) => record,
            None => unreachable!("pool {pool} checked live before mutation"),
        }
    }
}

impl<T: std::fmt::Display> Arena<T> {
    /// Render `pool` for inspection. See [`crate::render::render`].
    pub fn render(&self, pool: PoolId) -> Result<String, PoolError> {
        crate::render::render(self, pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(capacity: u32) -> Arena<char> {
        Arena::with_capacity(capacity).unwrap()
    }

    #[test]
    fn root_reads_back_each_index_independently() {
        let mut a = arena(8);
        let root = a.root();
        for i in 0..8 {
            a.set(root, i, char::from(b'a' + i as u8)).unwrap();
        }
        for i in 0..8 {
            assert_eq!(a.get(root, i).unwrap(), Some(&char::from(b'a' + i as u8)));
        }
    }

    #[test]
    fn fresh_cells_are_empty() {
        let a = arena(3);
        assert_eq!(a.get(a.root(), 2).unwrap(), None);
    }

    #[test]
    fn carve_takes_first_free_slots() {
        let mut a = arena(10);
        let root = a.root();
        let first = a.carve(root, 2).unwrap();
        let second = a.carve(root, 3).unwrap();
        assert_eq!(a.physical_slots(first).unwrap(), vec![0, 1]);
        assert_eq!(a.physical_slots(second).unwrap(), vec![2, 3, 4]);
        assert_eq!(a.num_used(root).unwrap(), 5);
        assert_eq!(a.children(root).unwrap(), vec![first, second]);
        assert_eq!(a.parent(second).unwrap(), Some(root));
        assert_eq!(a.parent(root).unwrap(), None);
    }

    #[test]
    fn carve_out_of_space_leaves_parent_untouched() {
        let mut a = arena(4);
        let root = a.root();
        let first = a.carve(root, 3).unwrap();
        let flags = |a: &Arena<char>| -> Vec<bool> {
            (0..4).map(|i| a.is_used(root, i).unwrap()).collect()
        };
        let before = flags(&a);
        let err = a.carve(root, 2).unwrap_err();
        assert_eq!(
            err,
            PoolError::OutOfSpace {
                requested: 2,
                available: 1
            }
        );
        assert_eq!(flags(&a), before);
        assert_eq!(a.num_used(root).unwrap(), 3);
        assert_eq!(a.children(root).unwrap(), vec![first]);
        assert_eq!(a.pool_count(), 2);
    }

    #[test]
    fn zero_sized_carve_is_empty() {
        let mut a = arena(4);
        let empty = a.carve(a.root(), 0).unwrap();
        assert_eq!(a.capacity(empty).unwrap(), 0);
        assert_eq!(a.num_used(a.root()).unwrap(), 0);
        assert_eq!(a.iter(empty).unwrap().count(), 0);
        a.release(empty).unwrap();
    }

    #[test]
    fn child_writes_land_in_root_cells() {
        let mut a = arena(6);
        let root = a.root();
        let _skip = a.carve(root, 2).unwrap();
        let child = a.carve(root, 3).unwrap();
        a.set(child, 0, 'x').unwrap();
        a.set(child, 2, 'z').unwrap();
        assert_eq!(a.get(root, 2).unwrap(), Some(&'x'));
        assert_eq!(a.get(root, 4).unwrap(), Some(&'z'));
        a.set(root, 3, 'y').unwrap();
        assert_eq!(a.get(child, 1).unwrap(), Some(&'y'));
    }

    #[test]
    fn index_out_of_range() {
        let mut a = arena(5);
        let child = a.carve(a.root(), 2).unwrap();
        assert_eq!(
            a.get(child, 2).unwrap_err(),
            PoolError::IndexOutOfRange {
                index: 2,
                capacity: 2
            }
        );
        assert!(a.set(child, 9, 'q').is_err());
        assert!(a.is_used(child, 2).is_err());
    }

    #[test]
    fn release_restores_parent_flags() {
        let mut a = arena(6);
        let root = a.root();
        let keep = a.carve(root, 1).unwrap();
        let before: Vec<bool> = (0..6).map(|i| a.is_used(root, i).unwrap()).collect();
        let child = a.carve(root, 3).unwrap();
        a.release(child).unwrap();
        let after: Vec<bool> = (0..6).map(|i| a.is_used(root, i).unwrap()).collect();
        assert_eq!(before, after);
        assert_eq!(a.num_used(root).unwrap(), 1);
        assert_eq!(a.children(root).unwrap(), vec![keep]);
        assert_eq!(a.state(child).unwrap(), PoolState::Released);
    }

    #[test]
    fn released_pool_rejects_everything() {
        let mut a = arena(4);
        let child = a.carve(a.root(), 2).unwrap();
        a.release(child).unwrap();
        let expected = PoolError::UseAfterRelease { pool: child };
        assert_eq!(a.get(child, 0).unwrap_err(), expected);
        assert_eq!(a.set(child, 0, 'a').unwrap_err(), expected);
        assert_eq!(a.carve(child, 1).unwrap_err(), expected);
        assert!(a.iter(child).is_err());
        assert_eq!(
            a.release(child).unwrap_err(),
            PoolError::DoubleRelease { pool: child }
        );
        // The parent's books were only adjusted once.
        assert_eq!(a.num_used(a.root()).unwrap(), 0);
    }

    #[test]
    fn busy_pools_refuse_release() {
        let mut a = arena(6);
        let root = a.root();
        let child = a.carve(root, 4).unwrap();
        let _grandchild = a.carve(child, 2).unwrap();
        assert_eq!(
            a.release(child).unwrap_err(),
            PoolError::PoolBusy {
                pool: child,
                active_children: 1
            }
        );
        assert!(matches!(
            a.release(root),
            Err(PoolError::PoolBusy { .. })
        ));
        assert_eq!(a.num_used(root).unwrap(), 4);
    }

    #[test]
    fn cascade_releases_whole_subtree() {
        let mut a = arena(8);
        let root = a.root();
        let child = a.carve(root, 5).unwrap();
        let g1 = a.carve(child, 2).unwrap();
        let g2 = a.carve(child, 2).unwrap();
        let _gg = a.carve(g2, 1).unwrap();
        let sibling = a.carve(root, 2).unwrap();

        assert_eq!(a.release_cascade(child).unwrap(), 4);
        assert_eq!(a.state(g1).unwrap(), PoolState::Released);
        assert_eq!(a.num_used(root).unwrap(), 2);
        assert_eq!(a.children(root).unwrap(), vec![sibling]);
        assert_eq!(a.active_pool_count(), 2);

        assert_eq!(a.release_cascade(root).unwrap(), 2);
        assert_eq!(a.active_pool_count(), 0);
        assert_eq!(
            a.release_cascade(root).unwrap_err(),
            PoolError::DoubleRelease { pool: root }
        );
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut a = arena(2);
        let stray = PoolId::new(42, 0);
        assert_eq!(
            a.get(stray, 0).unwrap_err(),
            PoolError::UnknownPool { pool: stray }
        );
        // A generation this slot has not reached yet was never issued.
        let future = PoolId::new(0, 7);
        assert_eq!(
            a.release(future).unwrap_err(),
            PoolError::UnknownPool { pool: future }
        );
    }

    #[test]
    fn released_slots_are_reused_with_new_generation() {
        let mut a = arena(4);
        let root = a.root();
        let old = a.carve(root, 2).unwrap();
        a.release(old).unwrap();
        let new = a.carve(root, 3).unwrap();

        assert_eq!(new.index(), old.index());
        assert_eq!(new.generation(), old.generation() + 1);
        assert_eq!(a.pool_count(), 2);

        assert_eq!(
            a.get(old, 0).unwrap_err(),
            PoolError::UseAfterRelease { pool: old }
        );
        assert_eq!(
            a.release(old).unwrap_err(),
            PoolError::DoubleRelease { pool: old }
        );
        assert_eq!(a.state(old).unwrap(), PoolState::Released);

        // The stale id touched nothing that belongs to the new occupant.
        assert_eq!(a.state(new).unwrap(), PoolState::Active);
        assert_eq!(a.capacity(new).unwrap(), 3);
        a.set(new, 2, 'n').unwrap();
        assert_eq!(a.get(root, 2).unwrap(), Some(&'n'));
        a.release(new).unwrap();
    }

    #[test]
    fn carve_release_churn_keeps_table_bounded() {
        let mut a = arena(4);
        let root = a.root();
        for _ in 0..10_000 {
            let child = a.carve(root, 2).unwrap();
            a.release(child).unwrap();
        }
        assert!(a.pool_count() <= 2, "table grew to {}", a.pool_count());
        assert_eq!(a.active_pool_count(), 1);
        assert_eq!(a.num_used(root).unwrap(), 0);
    }

    #[test]
    fn exhausted_generation_retires_slot() {
        let mut a = arena(4);
        let root = a.root();
        let child = a.carve(root, 1).unwrap();
        a.release(child).unwrap();
        a.pools[child.slot()].generation = u32::MAX;
        a.free_list.clear();
        a.free_list.push(child.index());

        let last = a.carve(root, 1).unwrap();
        assert_eq!(last, PoolId::new(child.index(), u32::MAX));
        a.release(last).unwrap();
        assert_eq!(
            a.release(last).unwrap_err(),
            PoolError::DoubleRelease { pool: last }
        );

        // The retired slot is skipped; the next carve extends the table.
        let next = a.carve(root, 1).unwrap();
        assert_ne!(next.index(), child.index());
        assert_eq!(next.generation(), 0);
        assert_eq!(a.pool_count(), 3);
    }

    #[test]
    fn released_root_is_not_recycled() {
        let mut a = arena(2);
        let root = a.root();
        a.release(root).unwrap();
        assert_eq!(
            a.carve(root, 1).unwrap_err(),
            PoolError::UseAfterRelease { pool: root }
        );
        assert!(a.free_list.is_empty());
        assert_eq!(a.active_pool_count(), 0);
    }

    #[test]
    fn cascade_handles_deep_chains_without_recursion() {
        let depth = 20_000;
        let mut a: Arena<u32> = Arena::with_capacity(1).unwrap();
        let root = a.root();
        let mut current = root;
        for _ in 0..depth {
            current = a.carve(current, 1).unwrap();
        }
        assert_eq!(a.depth(current).unwrap(), depth);
        a.set(current, 0, 99).unwrap();
        assert_eq!(a.get(root, 0).unwrap(), Some(&99));

        assert_eq!(a.release_cascade(root).unwrap(), depth + 1);
        assert_eq!(a.active_pool_count(), 0);
        assert_eq!(
            a.get(current, 0).unwrap_err(),
            PoolError::UseAfterRelease { pool: current }
        );
    }

    #[test]
    fn depth_counts_parent_hops() {
        let mut a = arena(8);
        let c = a.carve(a.root(), 4).unwrap();
        let g = a.carve(c, 2).unwrap();
        assert_eq!(a.depth(a.root()).unwrap(), 0);
        assert_eq!(a.depth(g).unwrap(), 2);
    }

    #[test]
    fn take_and_get_mut() {
        let mut a = arena(3);
        let root = a.root();
        a.set(root, 1, 'm').unwrap();
        if let Some(cell) = a.get_mut(root, 1).unwrap() {
            *cell = 'n';
        }
        assert_eq!(a.take(root, 1).unwrap(), Some('n'));
        assert_eq!(a.get(root, 1).unwrap(), None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            Arena::<u8>::with_capacity(0),
            Err(PoolError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn slot_view_reports_parent_relative_slots() {
        let mut a = arena(10);
        let root = a.root();
        let outer = a.carve(root, 6).unwrap();
        let _pad = a.carve(outer, 1).unwrap();
        let inner = a.carve(outer, 3).unwrap();
        assert!(a.slot_view(inner).unwrap().slots().eq(1..4));
        assert_eq!(a.physical_slots(inner).unwrap(), vec![1, 2, 3]);
        assert_eq!(a.finger(root).unwrap(), &Finger::identity(a.moduli()).unwrap());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn carve_release_round_trip(
                capacity in 1u32..40,
                sizes in proptest::collection::vec(0usize..10, 1..8),
                victim in any::<prop::sample::Index>(),
            ) {
                let mut a: Arena<u32> = Arena::with_capacity(capacity).unwrap();
                let root = a.root();
                let mut carved = Vec::new();
                for size in sizes {
                    if let Ok(id) = a.carve(root, size) {
                        carved.push(id);
                    }
                }
                prop_assume!(!carved.is_empty());
                let victim = carved[victim.index(carved.len())];
                let size = a.capacity(victim).unwrap();
                a.release(victim).unwrap();

                let flags: Vec<bool> = (0..capacity as usize)
                    .map(|i| a.is_used(root, i).unwrap())
                    .collect();
                let used = a.num_used(root).unwrap();
                prop_assert_eq!(flags.iter().filter(|&&f| f).count(), used);

                let again = a.carve(root, size).unwrap();
                a.release(again).unwrap();
                let after: Vec<bool> = (0..capacity as usize)
                    .map(|i| a.is_used(root, i).unwrap())
                    .collect();
                prop_assert_eq!(flags, after);
                prop_assert_eq!(a.num_used(root).unwrap(), used);
            }

            #[test]
            fn sibling_pools_never_share_cells(
                sizes in proptest::collection::vec(1usize..6, 1..6),
            ) {
                let mut a: Arena<u32> = Arena::with_capacity(32).unwrap();
                let root = a.root();
                let mut seen = std::collections::HashSet::new();
                for size in sizes {
                    let id = a.carve(root, size).unwrap();
                    for slot in a.physical_slots(id).unwrap() {
                        prop_assert!(seen.insert(slot), "slot {} aliased", slot);
                    }
                }
            }
        }
    }
}
