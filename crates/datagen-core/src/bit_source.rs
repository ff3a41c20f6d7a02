//! Raw random bit sources.
//!
//! In production this wraps a seeded `StdRng`. In tests a scripted
//! implementation can be injected to drive the bounded-value arithmetic
//! through specific paths.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::seed::Seed;

/// A uniform random bit generator that can be reseeded on demand.
pub trait RandomBitSource: Send {
    /// Restarts the output sequence from `seed`.
    fn reseed(&mut self, seed: Seed);

    /// Next 32 uniformly distributed bits.
    fn next_u32(&mut self) -> u32;

    /// Next 64 uniformly distributed bits.
    fn next_u64(&mut self) -> u64;

    /// A uniform fraction in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Fills `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Production bit source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdBitSource {
    rng: StdRng,
}

impl StdBitSource {
    /// Creates a bit source seeded with `seed`.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed_bits(seed)),
        }
    }
}

#[allow(clippy::cast_sign_loss)]
fn seed_bits(seed: Seed) -> u64 {
    seed as u64
}

impl RandomBitSource for StdBitSource {
    fn reseed(&mut self, seed: Seed) {
        self.rng = StdRng::seed_from_u64(seed_bits(seed));
    }

    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdBitSource::new(42);
        let mut b = StdBitSource::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut source = StdBitSource::new(7);
        let first: Vec<u32> = (0..8).map(|_| source.next_u32()).collect();
        source.reseed(7);
        let second: Vec<u32> = (0..8).map(|_| source.next_u32()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_seed_is_usable() {
        let mut a = StdBitSource::new(-1);
        let mut b = StdBitSource::new(-1);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_next_f64_is_unit_interval() {
        let mut source = StdBitSource::new(3);
        for _ in 0..1000 {
            let f = source.next_f64();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_fill_bytes_is_deterministic() {
        let mut a = StdBitSource::new(11);
        let mut b = StdBitSource::new(11);
        let mut left = [0u8; 32];
        let mut right = [0u8; 32];
        a.fill_bytes(&mut left);
        b.fill_bytes(&mut right);
        assert_eq!(left, right);
    }
}
