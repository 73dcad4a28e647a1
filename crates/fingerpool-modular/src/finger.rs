//! Fingers: CRT-compressed index maps.
//!
//! A [`Finger`] built from indices `s_0, s_1, ..., s_{k-1}` over a modulus
//! table satisfies `finger mod moduli[i] == s_i`. A [`SlotView`] pairs a
//! finger with the shared table and reads the mapping back one index at a
//! time, without ever materialising the index array.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::crt::crt_indices;
use crate::error::ModulusError;
use crate::moduli::ModulusTable;

/// Single integer encoding a local-to-parent slot mapping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Finger(BigUint);

impl Finger {
    /// Encode `slots` (local index `i` ↦ `slots[i]`) against `table`.
    ///
    /// Every slot must be smaller than the corresponding modulus for the
    /// mapping to read back unchanged; slots below the table length always
    /// are.
    pub fn encode(slots: &[usize], table: &ModulusTable) -> Result<Self, ModulusError> {
        crt_indices(slots, table).map(Self)
    }

    /// The identity mapping `i ↦ i` over the whole table.
    pub fn identity(table: &ModulusTable) -> Result<Self, ModulusError> {
        let slots: Vec<usize> = (0..table.len()).collect();
        Self::encode(&slots, table)
    }

    /// `finger mod modulus`.
    pub fn residue(&self, modulus: u64) -> u64 {
        // The remainder is below `modulus`, so it fits in one digit.
        (&self.0 % modulus).iter_u64_digits().next().unwrap_or(0)
    }

    /// Number of significant bits in the encoded integer.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Whether the finger is zero (the empty mapping, or all slots zero).
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The underlying integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Build a view that translates `len` local indices through `table`.
    pub fn view<'a>(&'a self, table: &'a ModulusTable, len: usize) -> SlotView<'a> {
        SlotView {
            finger: self,
            moduli: table,
            len: len.min(table.len()),
        }
    }
}

impl From<BigUint> for Finger {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning local-to-parent index translation view.
#[derive(Clone, Copy, Debug)]
pub struct SlotView<'a> {
    finger: &'a Finger,
    moduli: &'a ModulusTable,
    len: usize,
}

impl<'a> SlotView<'a> {
    /// Number of local indices covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view covers no indices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Parent slot of local index `i`, or `None` when `i >= len`.
    pub fn slot(&self, i: usize) -> Option<usize> {
        if i >= self.len {
            return None;
        }
        Some(self.finger.residue(self.moduli[i]) as usize)
    }

    /// Parent slots of every local index, ascending by local index.
    pub fn slots(&self) -> impl ExactSizeIterator<Item = usize> + 'a {
        let finger = self.finger;
        self.moduli.as_slice()[..self.len]
            .iter()
            .map(move |&m| finger.residue(m) as usize)
    }
}
