//! Modular arithmetic for CRT-addressed pools.
//!
//! This is the leaf crate with zero internal dependencies. It provides the
//! number theory the arena is built on:
//!
//! ```text
//! MillerRabin (PrimalityTest)
//! └── Primes (lazy 2, 3, 5, 7, ...)
//!     └── build_moduli → ModulusTable (pairwise coprime, each ≥ capacity)
//!                         └── crt / Finger → SlotView (local → parent slot)
//! ```
//!
//! A [`Finger`] is a single integer that encodes a pool's mapping from local
//! indices to parent slots: `finger mod moduli[i]` is the slot occupied by
//! local index `i`. Pools therefore carry O(1) addressing metadata no matter
//! how many slots they own.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod crt;
pub mod error;
pub mod finger;
pub mod moduli;
pub mod primality;

pub use crt::{crt, crt_indices, extended_gcd};
pub use error::ModulusError;
pub use finger::{Finger, SlotView};
pub use moduli::{build_moduli, build_moduli_with, ModulusTable, Primes, SharedModulusTable};
pub use primality::{is_probably_prime, MillerRabin, PrimalityTest};
