//! Pool handles and lifecycle state.
//!
//! A [`PoolId`] is a stable, copyable handle into an arena's pool table:
//! a slot index plus the generation the slot had when the pool was carved.
//! Released slots are recycled with a bumped generation, so an id that
//! outlives its pool fails the generation check instead of aliasing the
//! slot's next occupant.

use std::fmt;

/// Identifies a pool within one [`Arena`](crate::Arena).
///
/// [`PoolId::ROOT`] is always the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct PoolId {
    /// Slot in the arena's pool table.
    index: u32,
    /// Slot generation when this pool was carved.
    generation: u32,
}

impl PoolId {
    /// The root pool of every arena.
    pub const ROOT: PoolId = PoolId {
        index: 0,
        generation: 0,
    };

    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the pool table.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot this id was issued for.
    pub fn generation(self) -> u32 {
        self.generation
    }

    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.index, self.generation)
    }
}

/// Lifecycle of a pool: `Active → Released`, exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoolState {
    /// Usable for carve, access and release.
    Active,
    /// Terminal. Every further operation fails.
    Released,
}

impl PoolState {
    /// Whether the pool can still be used.
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Released => write!(f, "released"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_slot_zero_generation_zero() {
        assert_eq!(PoolId::ROOT, PoolId::new(0, 0));
        assert_eq!(PoolId::ROOT.slot(), 0);
    }

    #[test]
    fn generations_distinguish_ids_for_one_slot() {
        let old = PoolId::new(3, 0);
        let new = PoolId::new(3, 1);
        assert_ne!(old, new);
        assert_eq!(old.index(), new.index());
        assert_eq!(new.generation(), 1);
    }

    #[test]
    fn display_shows_index_and_generation() {
        assert_eq!(PoolId::new(7, 2).to_string(), "7.2");
        assert_eq!(PoolState::Released.to_string(), "released");
        assert!(PoolState::Active.is_active());
    }
}
