//! Per-pool bookkeeping.
//!
//! A [`PoolRecord`] is everything a pool owns: its capacity, which of its
//! local slots are carved out to children, its finger, and a non-owning
//! reference to where its slots live. Cell data never lives here.

use fingerpool_modular::{Finger, SharedModulusTable, SlotView};
use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::handle::PoolId;

/// Slot lists gathered during carve and release. Most pools are small.
pub(crate) type Slots = SmallVec<[usize; 16]>;

/// Where a pool's local indices point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Backing {
    /// Directly into the arena's cells (the root).
    Raw,
    /// Into the slots of a parent pool (lookup only, never ownership).
    Parent(PoolId),
}

#[derive(Debug)]
pub(crate) struct PoolRecord {
    pub(crate) capacity: usize,
    /// `used[i]` is set while local slot `i` is carved out to a child.
    used: Vec<bool>,
    num_used: usize,
    pub(crate) backing: Backing,
    pub(crate) moduli: SharedModulusTable,
    pub(crate) finger: Finger,
    /// Active children, in carve order.
    pub(crate) children: IndexSet<PoolId>,
}

impl PoolRecord {
    pub(crate) fn new(
        capacity: usize,
        backing: Backing,
        moduli: SharedModulusTable,
        finger: Finger,
    ) -> Self {
        Self {
            capacity,
            used: vec![false; capacity],
            num_used: 0,
            backing,
            moduli,
            finger,
            children: IndexSet::new(),
        }
    }

    pub(crate) fn num_used(&self) -> usize {
        self.num_used
    }

    pub(crate) fn free(&self) -> usize {
        self.capacity - self.num_used
    }

    pub(crate) fn is_used(&self, i: usize) -> bool {
        self.used.get(i).copied().unwrap_or(false)
    }

    /// First `size` free local slots in ascending order, or `None` if there
    /// are fewer than `size`.
    pub(crate) fn first_free(&self, size: usize) -> Option<Slots> {
        if size > self.free() {
            return None;
        }
        let slots: Slots = self
            .used
            .iter()
            .enumerate()
            .filter(|&(_, &used)| !used)
            .map(|(i, _)| i)
            .take(size)
            .collect();
        (slots.len() == size).then_some(slots)
    }

    /// Mark `slots` as carved out. All of them must currently be free.
    pub(crate) fn reserve(&mut self, slots: &[usize]) {
        for &slot in slots {
            debug_assert!(!self.used[slot], "slot {slot} reserved twice");
            self.used[slot] = true;
        }
        self.num_used += slots.len();
    }

    /// Return `slots` to the free set. All of them must currently be used.
    pub(crate) fn unreserve(&mut self, slots: &[usize]) {
        for &slot in slots {
            debug_assert!(self.used[slot], "slot {slot} freed while free");
            self.used[slot] = false;
        }
        self.num_used -= slots.len();
    }

    /// Translation view from this pool's local indices to its backing.
    pub(crate) fn slot_view(&self) -> SlotView<'_> {
        self.finger.view(&self.moduli, self.capacity)
    }
}
