//! Numerical Recipes Linear Congruential Generator
//!
//! The sequence must match the worksheet gallery's generator exactly so that
//! a stored seed always redraws the same maze.
//!
//! Constants:
//! - Multiplier (a): 1664525
//! - Increment (c): 1013904223
//! - Modulus (m): 2^32 (native u32 wraparound)
//!
//! Reference: https://en.wikipedia.org/wiki/Linear_congruential_generator

use crate::DEFAULT_SEED;

const MULTIPLIER: u32 = 1664525;
const INCREMENT: u32 = 1013904223;

/// 2^32 as a float, the divisor that maps state into [0, 1)
const MODULUS_F64: f64 = 4294967296.0;

/// Linear Congruential Generator over the full u32 range
///
/// Generates a deterministic sequence of pseudo-random numbers from a seed.
/// Same seed always produces the same sequence.
#[derive(Clone, Debug)]
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    /// Create a new LCG with the given seed
    ///
    /// If seed is 0, it's replaced with [`DEFAULT_SEED`]
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Resume from a raw state, without the zero-seed fallback
    ///
    /// A state of 0 is valid here: the next value is 1013904223 / 2^32.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    fn advance(&mut self) {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
    }

    /// Next value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.advance();
        self.state as f64 / MODULUS_F64
    }

    /// Choose random index from a range [0, len)
    ///
    /// Uses pure integer arithmetic, equal to `floor(next_f64() * len)`
    /// because `state / 2^32` is exact in an f64.
    pub fn choice_index(&mut self, len: usize) -> usize {
        self.advance();
        ((self.state as u64 * len as u64) >> 32) as usize
    }
}
