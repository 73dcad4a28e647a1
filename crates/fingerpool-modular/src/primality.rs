//! Probabilistic primality testing.
//!
//! [`MillerRabin`] never reports a prime as composite. A composite slips
//! through a single round with probability at most 1/4, so the default five
//! rounds leave at most a 1/1024 chance per query. Witnesses come from a
//! seeded `ChaCha8Rng`, so identical seeds give identical answers.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Primality oracle consumed by the modulus generator.
pub trait PrimalityTest {
    /// Whether `n` is (probably) prime.
    fn is_probably_prime(&mut self, n: u64) -> bool;
}

/// Miller-Rabin test with a fixed number of random witness rounds.
#[derive(Clone, Debug)]
pub struct MillerRabin {
    rounds: u32,
    rng: ChaCha8Rng,
}

impl MillerRabin {
    /// Default number of witness rounds.
    pub const DEFAULT_ROUNDS: u32 = 5;

    /// Default witness RNG seed.
    pub const DEFAULT_SEED: u64 = 0;

    /// Create an oracle running `rounds` witnesses per query.
    pub fn new(rounds: u32, seed: u64) -> Self {
        Self {
            rounds,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of witness rounds per query.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

impl Default for MillerRabin {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROUNDS, Self::DEFAULT_SEED)
    }
}

impl PrimalityTest for MillerRabin {
    fn is_probably_prime(&mut self, n: u64) -> bool {
        match n {
            0 | 1 => return false,
            2 | 3 => return true,
            _ if n % 2 == 0 => return false,
            _ => {}
        }

        // n - 1 = 2^s * d with d odd.
        let s = (n - 1).trailing_zeros();
        let d = (n - 1) >> s;

        'witness: for _ in 0..self.rounds {
            let a = self.rng.random_range(2..n - 1);
            let mut x = pow_mod(a, d, n);
            if x == 1 || x == n - 1 {
                continue;
            }
            for _ in 1..s {
                x = mul_mod(x, x, n);
                if x == n - 1 {
                    continue 'witness;
                }
            }
            return false;
        }
        true
    }
}

/// Test `n` with a default-configured [`MillerRabin`] oracle.
pub fn is_probably_prime(n: u64) -> bool {
    MillerRabin::default().is_probably_prime(n)
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut acc = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    acc
}
