//! Seeded random number generator
//!
//! Wraps a ChaCha8 stream cipher RNG so every simulation run is
//! reproducible from a single `u64` seed. Seed `0` means "seed from OS
//! entropy".

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Deterministic simulation RNG.
#[derive(Debug)]
pub struct SimRng {
    rng: ChaCha8Rng,
}

impl SimRng {
    /// Create a generator from a seed. Seed `0` draws a random seed
    /// from OS entropy.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            ChaCha8Rng::from_entropy()
        } else {
            ChaCha8Rng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn uniform_01(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform draw in `[min, max)`.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        assert!(min < max, "uniform range must be non-empty");
        self.rng.gen_range(min..max)
    }

    /// Standard normal draw, Z ~ N(0, 1).
    pub fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    /// Normal draw with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, stddev: f64) -> f64 {
        assert!(stddev >= 0.0, "stddev must be non-negative");
        mean + stddev * self.standard_normal()
    }
}
