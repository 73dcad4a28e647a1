//! Pool-level error types.

use std::error::Error;
use std::fmt;

use fingerpool_modular::ModulusError;

use crate::handle::PoolId;

/// Errors that can occur during arena operations.
///
/// Every error is raised synchronously by the call that detects it, and a
/// failing call leaves the arena exactly as it found it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// `carve` asked for more slots than the parent has free.
    OutOfSpace {
        /// Number of slots requested.
        requested: usize,
        /// Number of free slots in the parent.
        available: usize,
    },
    /// A local index outside `[0, capacity)`.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Capacity of the pool it was used on.
        capacity: usize,
    },
    /// An operation on a pool that has already been released.
    UseAfterRelease {
        /// The released pool.
        pool: PoolId,
    },
    /// `release` on a pool that has already been released.
    DoubleRelease {
        /// The released pool.
        pool: PoolId,
    },
    /// `release` on a pool that still has active children.
    PoolBusy {
        /// The pool that could not be released.
        pool: PoolId,
        /// Number of children still active.
        active_children: usize,
    },
    /// A `PoolId` that was never issued by this arena.
    UnknownPool {
        /// The unrecognised id.
        pool: PoolId,
    },
    /// Every `u32` pool slot is live or retired; no id can be issued.
    TooManyPools,
    /// Arena configuration failed validation.
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// Modulus table or finger construction failed.
    Modulus(ModulusError),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                available,
            } => {
                write!(
                    f,
                    "out of space: requested {requested} slots, {available} free"
                )
            }
            Self::IndexOutOfRange { index, capacity } => {
                write!(f, "index {index} out of range for capacity {capacity}")
            }
            Self::UseAfterRelease { pool } => write!(f, "pool {pool} used after release"),
            Self::DoubleRelease { pool } => write!(f, "pool {pool} released twice"),
            Self::PoolBusy {
                pool,
                active_children,
            } => {
                write!(
                    f,
                    "pool {pool} still has {active_children} active children"
                )
            }
            Self::UnknownPool { pool } => write!(f, "unknown pool {pool}"),
            Self::TooManyPools => write!(f, "pool table exhausted"),
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
            Self::Modulus(err) => write!(f, "modulus construction failed: {err}"),
        }
    }
}

impl Error for PoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Modulus(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModulusError> for PoolError {
    fn from(err: ModulusError) -> Self {
        Self::Modulus(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulus_errors_keep_their_source() {
        let err = PoolError::from(ModulusError::ZeroCapacity);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("modulus construction failed"));
    }

    #[test]
    fn out_of_space_reports_both_counts() {
        let err = PoolError::OutOfSpace {
            requested: 5,
            available: 2,
        };
        assert_eq!(err.to_string(), "out of space: requested 5 slots, 2 free");
        assert!(err.source().is_none());
    }
}
