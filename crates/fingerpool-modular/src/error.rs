//! Errors raised while building modulus tables or solving congruences.

use std::error::Error;
use std::fmt;

/// Failure to construct a modulus table or a CRT solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModulusError {
    /// A modulus table was requested for zero slots.
    ZeroCapacity,
    /// A prime power does not fit in `u64`.
    Overflow {
        /// The prime being raised.
        prime: u64,
        /// The capacity the power had to reach.
        capacity: u64,
    },
    /// Residues and moduli differ in length.
    LengthMismatch {
        /// Number of residues supplied.
        residues: usize,
        /// Number of moduli supplied.
        moduli: usize,
    },
    /// A modulus of zero was supplied.
    ZeroModulus {
        /// Position of the zero modulus.
        index: usize,
    },
    /// The modulus at `index` shares a factor with the others.
    NotCoprime {
        /// Position of the offending modulus.
        index: usize,
    },
}

impl fmt::Display for ModulusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "modulus table capacity must be positive"),
            Self::Overflow { prime, capacity } => {
                write!(f, "power of {prime} reaching {capacity} overflows u64")
            }
            Self::LengthMismatch { residues, moduli } => {
                write!(f, "{residues} residues supplied for {moduli} moduli")
            }
            Self::ZeroModulus { index } => write!(f, "modulus {index} is zero"),
            Self::NotCoprime { index } => {
                write!(f, "modulus {index} is not coprime with the others")
            }
        }
    }
}

impl Error for ModulusError {}
