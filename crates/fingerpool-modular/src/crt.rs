//! Extended Euclid and Chinese Remainder Theorem solver.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::ModulusError;
use crate::moduli::ModulusTable;

/// Bezout coefficients `(x, y)` with `a·x + b·y = gcd(a, b)`.
///
/// Iterative coefficient tracking: `(a, b)` is repeatedly replaced by
/// `(b, a mod b)` until `b` reaches zero.
///
/// ```
/// use fingerpool_modular::extended_gcd;
/// use num_bigint::BigInt;
///
/// let (x, y) = extended_gcd(&BigInt::from(120), &BigInt::from(23));
/// assert_eq!((x, y), (BigInt::from(-9), BigInt::from(47)));
/// ```
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    let (mut a, mut b) = (a.clone(), b.clone());
    let (mut x, mut last_x) = (BigInt::zero(), BigInt::one());
    let (mut y, mut last_y) = (BigInt::one(), BigInt::zero());

    while !b.is_zero() {
        let (quotient, remainder) = a.div_mod_floor(&b);
        a = std::mem::replace(&mut b, remainder);

        let next_x = &last_x - &quotient * &x;
        last_x = std::mem::replace(&mut x, next_x);
        let next_y = &last_y - &quotient * &y;
        last_y = std::mem::replace(&mut y, next_y);
    }
    (last_x, last_y)
}

/// The unique `r` in `[0, Π moduli)` with `r ≡ residues[i] (mod moduli[i])`.
///
/// Moduli must be non-zero and pairwise coprime. Coprimality is verified
/// per modulus from its Bezout identity against the cofactor reduced mod
/// that modulus, so no pairwise scan is needed. An empty system yields 0.
pub fn crt(residues: &[u64], moduli: &[u64]) -> Result<BigUint, ModulusError> {
    if residues.len() != moduli.len() {
        return Err(ModulusError::LengthMismatch {
            residues: residues.len(),
            moduli: moduli.len(),
        });
    }
    if let Some(index) = moduli.iter().position(|&m| m == 0) {
        return Err(ModulusError::ZeroModulus { index });
    }

    let product = moduli
        .iter()
        .fold(BigInt::one(), |acc, &m| acc * BigInt::from(m));
    let mut summation = BigInt::zero();

    for (index, (&residue, &modulus)) in residues.iter().zip(moduli).enumerate() {
        let modulus = BigInt::from(modulus);
        let cofactor = &product / &modulus;
        // Only the inverse of the cofactor mod `modulus` matters, so solve
        // against the reduced cofactor and keep every coefficient word-sized.
        let reduced = cofactor.mod_floor(&modulus);
        let (x, y) = extended_gcd(&modulus, &reduced);
        if &modulus * &x + &reduced * &y != BigInt::one() {
            return Err(ModulusError::NotCoprime { index });
        }
        let inverse = y.mod_floor(&modulus);
        summation += BigInt::from(residue) * inverse * cofactor;
    }

    // mod_floor by a positive product is never negative.
    Ok(non_negative(summation.mod_floor(&product)))
}

/// Solve for a list of slot indices against the leading moduli of `table`.
///
/// `indices[i]` becomes the residue under `table[i]`; the table must hold
/// at least `indices.len()` moduli.
pub fn crt_indices(indices: &[usize], table: &ModulusTable) -> Result<BigUint, ModulusError> {
    if indices.len() > table.len() {
        return Err(ModulusError::LengthMismatch {
            residues: indices.len(),
            moduli: table.len(),
        });
    }
    let residues: Vec<u64> = indices.iter().map(|&i| i as u64).collect();
    crt(&residues, &table.as_slice()[..indices.len()])
}

/// Reinterpret a non-negative `BigInt` as `BigUint`; negatives clamp to 0.
fn non_negative(value: BigInt) -> BigUint {
    match value.into_parts() {
        (Sign::Minus, _) => BigUint::zero(),
        (_, magnitude) => magnitude,
    }
}
