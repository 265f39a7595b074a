//! Flag sampler adapters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::FlagSampler;

/// Entropy-backed sampler for production use.
#[derive(Debug, Default)]
pub struct ThreadRngSampler;

impl ThreadRngSampler {
    /// Create an entropy-backed sampler.
    pub fn new() -> Self {
        Self
    }
}

impl FlagSampler for ThreadRngSampler {
    fn should_flag(&mut self, probability: f64) -> bool {
        rand::thread_rng().gen_bool(probability)
    }
}

/// Seedable sampler for reproducible runs and statistical tests.
#[derive(Debug)]
pub struct SeededSampler {
    rng: StdRng,
}

impl SeededSampler {
    /// Create a sampler with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl FlagSampler for SeededSampler {
    fn should_flag(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }
}

/// Constant sampler: always or never flags, regardless of probability.
///
/// Useful in tests that need one branch of the pipeline pinned down
/// without touching the configured probability.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSampler(pub bool);

impl FlagSampler for ConstantSampler {
    fn should_flag(&mut self, _probability: f64) -> bool {
        self.0
    }
}
