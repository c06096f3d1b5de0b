//! Seeded xorshift generator for reproducible panel generation.
//!
//! The generator is a 64-bit xorshift* with a SplitMix64 seeding step.
//! Key properties:
//! - Same seed always yields the same sequence, on every platform
//! - Seed `0` maps to a fixed non-zero state instead of a stuck sequence
//! - Independent streams can be derived from one seed

use rand::{RngCore, SeedableRng};

/// Output multiplier for xorshift64*.
const XORSHIFT_STAR_MULT: u64 = 0x2545_F491_4F6C_DD1D;
/// SplitMix64 increment (golden ratio).
const SPLITMIX_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;
/// Replacement seed for a zero seed.
const ZERO_SEED: u64 = 0x853C_49E6_748F_EA9B;

/// Deterministic random source.
///
/// Implements [`RngCore`], so range, Bernoulli and slice sampling go through
/// [`rand::Rng`] and [`rand::seq::SliceRandom`] while the bit stream stays
/// under our control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRng {
    state: u64,
}

#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(SPLITMIX_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl PanelRng {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        let seed = if seed == 0 { ZERO_SEED } else { seed };
        let mut state = splitmix64(seed);
        if state == 0 {
            state = ZERO_SEED;
        }
        Self { state }
    }

    /// Create a generator for an independent stream of the same seed.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        Self::new(seed ^ splitmix64(stream.wrapping_mul(SPLITMIX_GAMMA)))
    }

    /// Create a generator keyed by a string, e.g. a brand name.
    ///
    /// Uses FNV-1a so the mapping is stable across processes.
    pub fn keyed(seed: u64, key: &str) -> Self {
        let mut hash: u64 = 0xCBF2_9CE4_8422_2325;
        for byte in key.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x0100_0000_01B3);
        }
        Self::with_stream(seed, hash)
    }

    /// Next raw 64-bit value.
    #[inline]
    pub fn next_raw(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(XORSHIFT_STAR_MULT)
    }

    /// Next uniform value in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        // Upper 53 bits for full f64 mantissa precision
        (self.next_raw() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Pick an index by relative weight. Falls back to the last index.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return 0;
        }
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        weights.len() - 1
    }
}

impl RngCore for PanelRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_raw() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_raw()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for PanelRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
