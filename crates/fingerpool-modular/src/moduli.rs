//! Pairwise-coprime modulus tables.
//!
//! A [`ModulusTable`] for capacity `C` holds `C` values, each a power of a
//! distinct prime raised just far enough to reach `C`. Distinct prime bases
//! make every pair coprime, and every value being `≥ C` means any local
//! index `< C` is a valid residue under any modulus.

use std::ops::Index;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::One;

use crate::error::ModulusError;
use crate::primality::{MillerRabin, PrimalityTest};

/// Lazy, unbounded sequence of primes `2, 3, 5, 7, ...`.
///
/// Candidates are screened by the borrowed oracle. The sequence only ends
/// if the next candidate would overflow `u64`.
pub struct Primes<'a, P: PrimalityTest + ?Sized> {
    oracle: &'a mut P,
    next: Option<u64>,
}

impl<'a, P: PrimalityTest + ?Sized> Primes<'a, P> {
    /// Start the sequence at 2.
    pub fn new(oracle: &'a mut P) -> Self {
        Self {
            oracle,
            next: Some(2),
        }
    }
}

impl<P: PrimalityTest + ?Sized> Iterator for Primes<'_, P> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        loop {
            let candidate = self.next?;
            // After 2, only odd candidates can be prime.
            self.next = match candidate {
                2 => Some(3),
                _ => candidate.checked_add(2),
            };
            if self.oracle.is_probably_prime(candidate) {
                return Some(candidate);
            }
        }
    }
}

/// Immutable table of pairwise-coprime moduli shared by one pool tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulusTable {
    values: Box<[u64]>,
}

/// Shared handle to a modulus table. Every pool carved from one root holds
/// a clone of the root's handle.
pub type SharedModulusTable = Arc<ModulusTable>;

impl ModulusTable {
    /// Number of moduli (equal to the root capacity).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table is empty. Never true for a built table.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The modulus at position `i`, if any.
    pub fn get(&self, i: usize) -> Option<u64> {
        self.values.get(i).copied()
    }

    /// All moduli in order.
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    /// Iterate over the moduli in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = u64> + '_ {
        self.values.iter().copied()
    }

    /// Product of the first `k` moduli (1 when `k == 0`).
    ///
    /// # Panics
    ///
    /// Panics if `k > self.len()`.
    pub fn product(&self, k: usize) -> BigUint {
        self.values[..k]
            .iter()
            .fold(BigUint::one(), |acc, &m| acc * m)
    }

    /// Wrap this table in an `Arc` for sharing across pools.
    pub fn into_shared(self) -> SharedModulusTable {
        Arc::new(self)
    }
}

impl Index<usize> for ModulusTable {
    type Output = u64;

    fn index(&self, i: usize) -> &u64 {
        &self.values[i]
    }
}

/// Build a modulus table for `capacity` slots with the default oracle.
pub fn build_moduli(capacity: usize) -> Result<ModulusTable, ModulusError> {
    build_moduli_with(capacity, &mut MillerRabin::default())
}

/// Build a modulus table for `capacity` slots, drawing primes from `oracle`.
///
/// Each of the first `capacity` primes is raised to its smallest power that
/// is at least `capacity`.
pub fn build_moduli_with<P: PrimalityTest + ?Sized>(
    capacity: usize,
    oracle: &mut P,
) -> Result<ModulusTable, ModulusError> {
    if capacity == 0 {
        return Err(ModulusError::ZeroCapacity);
    }
    let target = capacity as u64;

    let mut values = Vec::with_capacity(capacity);
    for prime in Primes::new(oracle).take(capacity) {
        let mut power = prime;
        while power < target {
            power = power.checked_mul(prime).ok_or(ModulusError::Overflow {
                prime,
                capacity: target,
            })?;
        }
        values.push(power);
    }
    tracing::trace!(
        capacity,
        largest = values.last().copied().unwrap_or_default(),
        "built modulus table"
    );

    Ok(ModulusTable {
        values: values.into_boxed_slice(),
    })
}
