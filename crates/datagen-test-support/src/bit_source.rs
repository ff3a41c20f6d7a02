//! Test bit sources: scripted `RandomBitSource` implementations.

use datagen_core::{RandomBitSource, Seed};

/// A source that only ever produces zero bits. Bounded draws from it always
/// return the lower bound. Suitable for tests that do not depend on specific
/// random values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroBitSource;

impl RandomBitSource for ZeroBitSource {
    fn reseed(&mut self, _seed: Seed) {}

    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
}

/// A source that replays a predetermined sequence of raw 64-bit draws.
///
/// 32-bit draws take the low half of the next value; fractions take its top
/// 53 bits. Reseeding restarts the script. Panics if the sequence is
/// exhausted, which makes tests that expect a certain number of draws
/// (for example rejection sampling) fail loudly.
#[derive(Debug, Clone)]
pub struct SequenceBitSource {
    values: Vec<u64>,
    index: usize,
}

impl SequenceBitSource {
    /// Create a new `SequenceBitSource` with the given draws.
    #[must_use]
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, index: 0 }
    }

    /// How many draws have been consumed.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RandomBitSource for SequenceBitSource {
    fn reseed(&mut self, _seed: Seed) {
        self.index = 0;
    }

    #[allow(clippy::cast_possible_truncation)]
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }

    #[allow(clippy::cast_precision_loss)]
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
