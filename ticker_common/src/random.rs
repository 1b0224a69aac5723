//! Injectable randomness.
//!
//! Every probabilistic decision in the engine goes through [`RandomSource`],
//! which yields uniform values in `[0, 1)`. Production code uses
//! [`SeededRandom`] (a `StdRng`, seeded or from OS entropy); tests can swap in
//! [`FixedRandom`] to pin every draw to one value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[low, high)`.
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    /// `len` uppercase hexadecimal digits.
    fn hex(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| HEX_DIGITS[self.index(HEX_DIGITS.len())] as char)
            .collect()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// `StdRng`-backed source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic source for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Source that returns the same value for every draw.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}
