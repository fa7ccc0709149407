//! Deterministic xorshift128+ random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Never zero**: `RngSeed` constructors refuse the all-zero state
//! - **Forkable**: Draw an independent generator from an existing stream
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use rust_mcts::core::{GameRng, RngSeed};
//!
//! let mut a = GameRng::from_seed(RngSeed::from_u64(42));
//! let mut b = GameRng::from_seed(RngSeed::from_u64(42));
//!
//! let x = a.random();
//! assert!((0.0..1.0).contains(&x));
//! assert_eq!(x, b.random());
//! ```

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Substitute state used whenever an all-zero seed would otherwise be built.
const NONZERO_WORDS: [u32; 4] = [0x9E37_79B9, 0x7F4A_7C15, 0xBF58_476D, 0x1CE4_E5B9];

/// 2^-32
const HI_SCALE: f64 = 2.328_306_436_538_696_3e-10;
/// 2^-52
const LO_SCALE: f64 = 2.220_446_049_250_313e-16;

/// Seed for a [`GameRng`]: two 64-bit lanes stored as four 32-bit words.
///
/// Words 0 and 1 form the high and low halves of the first lane, words 2
/// and 3 the second. The all-zero seed is a fixed point of xorshift and is
/// never produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RngSeed {
    words: [u32; 4],
}

impl RngSeed {
    /// Create a seed from raw words. An all-zero input is replaced by a
    /// fixed non-zero constant.
    #[must_use]
    pub fn new(words: [u32; 4]) -> Self {
        if words.iter().all(|&w| w == 0) {
            Self { words: NONZERO_WORDS }
        } else {
            Self { words }
        }
    }

    /// Draw a fresh seed from another generator, redrawing until non-zero.
    pub fn from_rng<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        loop {
            let words = [rng.next_u32(), rng.next_u32(), rng.next_u32(), rng.next_u32()];
            if words.iter().any(|&w| w != 0) {
                return Self { words };
            }
        }
    }

    /// Expand a single integer into a full seed.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        let mut expander = ChaCha8Rng::seed_from_u64(seed);
        Self::from_rng(&mut expander)
    }

    /// Raw seed words.
    #[must_use]
    pub fn words(&self) -> [u32; 4] {
        self.words
    }

    fn lanes(&self) -> (u64, u64) {
        let [a, b, c, d] = self.words.map(u64::from);
        ((a << 32) | b, (c << 32) | d)
    }
}

impl Default for RngSeed {
    fn default() -> Self {
        Self { words: NONZERO_WORDS }
    }
}

/// Deterministic xorshift128+ generator.
///
/// Games with chance events own one of these; the search engine owns
/// another for rollouts, tie-breaking and determinization seeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRng {
    s0: u64,
    s1: u64,
}

impl GameRng {
    /// Create a generator from a seed.
    #[must_use]
    pub fn from_seed(seed: RngSeed) -> Self {
        let (s0, s1) = seed.lanes();
        Self { s0, s1 }
    }

    /// Convenience: create a generator from a single integer.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_seed(RngSeed::from_u64(seed))
    }

    /// Fork this generator: the child is seeded from this stream, so each
    /// fork is different but reproducible.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::from_seed(RngSeed::from_rng(self))
    }

    /// Advance the state and return the raw 64-bit output.
    fn step(&mut self) -> u64 {
        let result = self.s0.wrapping_add(self.s1);
        let mut x = self.s0;
        let y = self.s1;
        self.s0 = y;
        x ^= x << 23;
        self.s1 = x ^ y ^ (x >> 18) ^ (y >> 5);
        result
    }

    /// Uniform value in [0, 1).
    pub fn random(&mut self) -> f64 {
        let raw = self.step();
        let hi = (raw >> 32) as u32;
        let lo = raw as u32;
        f64::from(hi) * HI_SCALE + f64::from(lo >> 12) * LO_SCALE
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "gen_index on empty range");
        let idx = (self.random() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Roll a die with faces `1..=sides`.
    pub fn roll_die(&mut self, sides: u8) -> u8 {
        1 + self.gen_index(usize::from(sides)) as u8
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            Some(&slice[self.gen_index(slice.len())])
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState { s0: self.s0, s1: self.s1 }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        if state.s0 == 0 && state.s1 == 0 {
            return Self::from_seed(RngSeed::default());
        }
        Self { s0: state.s0, s1: state.s1 }
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Serializable generator state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub s0: u64,
    pub s1: u64,
}
