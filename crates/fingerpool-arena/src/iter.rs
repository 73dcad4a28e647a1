//! Lazy iteration over a pool's cells.

use std::iter::FusedIterator;

use crate::arena::Arena;
use crate::handle::PoolId;

/// Iterator over a pool's cells in local index order.
///
/// Yields `capacity` items, each `None` for an empty cell. Holding the
/// iterator borrows the arena, so the pool cannot be released mid-walk.
/// Clone it to restart from the same position.
pub struct Cells<'a, T> {
    arena: &'a Arena<T>,
    pool: PoolId,
    next: usize,
    end: usize,
}

impl<'a, T> Cells<'a, T> {
    pub(crate) fn new(arena: &'a Arena<T>, pool: PoolId, capacity: usize) -> Self {
        Self {
            arena,
            pool,
            next: 0,
            end: capacity,
        }
    }

    /// The pool being walked.
    pub fn pool(&self) -> PoolId {
        self.pool
    }
}

impl<T> Clone for Cells<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            pool: self.pool,
            next: self.next,
            end: self.end,
        }
    }
}

impl<'a, T> Iterator for Cells<'a, T> {
    type Item = Option<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;
        // The pool was active when the iterator was built and the shared
        // borrow keeps it that way, so resolution cannot fail here.
        self.arena.get(self.pool, i).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cells<'_, T> {}

impl<T> FusedIterator for Cells<'_, T> {}
