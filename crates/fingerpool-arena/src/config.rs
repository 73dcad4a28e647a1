//! Arena configuration parameters.

use crate::error::PoolError;

/// Configuration for an [`Arena`](crate::Arena).
///
/// Validated at construction; all values are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of physical cells, which is also the root pool's capacity
    /// and the length of the modulus table.
    ///
    /// Must be in `1..=MAX_CAPACITY`.
    pub capacity: u32,

    /// Miller-Rabin witness rounds used while building the modulus table.
    ///
    /// Default: 5. Must be at least 1.
    pub witness_rounds: u32,

    /// Seed for the witness RNG. Identical seeds build identical tables.
    pub seed: u64,
}

impl ArenaConfig {
    /// Default number of primality witness rounds.
    pub const DEFAULT_WITNESS_ROUNDS: u32 = 5;

    /// Default witness RNG seed.
    pub const DEFAULT_SEED: u64 = 0;

    /// Largest supported capacity.
    ///
    /// The root finger grows by roughly `log2(capacity)` bits per cell, and
    /// building it is quadratic in that size.
    pub const MAX_CAPACITY: u32 = 16_384;

    /// Create a config for `capacity` cells with default parameters.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            witness_rounds: Self::DEFAULT_WITNESS_ROUNDS,
            seed: Self::DEFAULT_SEED,
        }
    }

    /// Override the witness round count.
    pub fn with_witness_rounds(mut self, rounds: u32) -> Self {
        self.witness_rounds = rounds;
        self
    }

    /// Override the witness RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if:
    /// - `capacity` is zero or above [`Self::MAX_CAPACITY`]
    /// - `witness_rounds` is zero
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.capacity == 0 {
            return Err(PoolError::InvalidConfig {
                reason: "capacity must be positive".into(),
            });
        }
        if self.capacity > Self::MAX_CAPACITY {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "capacity {} exceeds maximum {}",
                    self.capacity,
                    Self::MAX_CAPACITY
                ),
            });
        }
        if self.witness_rounds == 0 {
            return Err(PoolError::InvalidConfig {
                reason: "witness_rounds must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(64)
    }
}
