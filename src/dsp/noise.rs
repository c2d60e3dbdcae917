#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Brownian Noise Source
=====================

The synthesizer never plays the same pitch twice in a row. Every requested
frequency is nudged by a small random fraction, which makes a bare square
wave from a piezo sound less like a test tone and more like an engine,
a flame, or wind.

The randomness comes from a linear congruential generator (LCG):

    seed' = (seed * 1103515245 + 12345) mod 2^31

and the output is the new seed mapped onto a symmetric range:

    value = (seed' / 2^31 - 0.5) * 2 * amount        ∈ [-amount, +amount)

Brownian character
------------------

The seed is the only state and it is carried from call to call, so each
draw depends on every draw before it. The same starting seed yields the
same sequence on every run.

Seed advancement
----------------

The seed advances on EVERY call, including `amount == 0.0`, so the
sequence position depends only on the number of draws. A zero amount
always yields +0.0, never -0.0.

    call     amount   value    seed advanced?
    1        0.10     ±0.1     yes
    2        0.00     0.0      yes
    3        0.10     ±0.1     yes
*/

const LCG_MULTIPLIER: u32 = 1_103_515_245;
const LCG_INCREMENT: u32 = 12_345;
const SEED_MASK: u32 = 0x7fff_ffff;
const MODULUS: f64 = 2_147_483_648.0; // 2^31

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrownianNoise {
    seed: u32, // always within [0, 0x7fffffff]
}

impl BrownianNoise {
    /// Create a noise source. Seeds above 31 bits are masked.
    pub fn new(seed: u32) -> Self {
        Self {
            seed: seed & SEED_MASK,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance the generator one step and return the new seed.
    #[inline]
    pub fn next_seed(&mut self) -> u32 {
        // Wrapping in 32 bits then masking equals reduction mod 2^31.
        self.seed = self
            .seed
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & SEED_MASK;
        self.seed
    }

    /// Draw a value in `[-amount, +amount)`.
    #[inline]
    pub fn sample(&mut self, amount: f32) -> f32 {
        let seed = self.next_seed();
        if amount == 0.0 {
            return 0.0;
        }
        ((seed as f64 / MODULUS - 0.5) * 2.0 * amount as f64) as f32
    }
}

impl Default for BrownianNoise {
    fn default() -> Self {
        Self::new(crate::DEFAULT_NOISE_SEED)
    }
}
