//! Injected randomness for mid-exon breakpoints.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

/// A uniform integer source owned by the caller.
///
/// Breakpoint code only draws from it; seeding belongs to whoever constructs
/// the source. One instance must not be shared across threads without
/// external synchronization.
pub trait RandomSource {
    /// Draw an integer uniformly from the inclusive range `[low, high]`.
    fn uniform_int(&mut self, low: u64, high: u64) -> u64;
}

/// Seedable [`RandomSource`] backed by xoshiro128**.
///
/// The generator is fixed, so a seed and a sequence of draws give the same
/// values across builds and platforms.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Xoshiro128StarStar,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Xoshiro128StarStar::seed_from_u64(seed),
        }
    }

    /// Seed from system entropy; the chosen seed is kept so the run can be repeated.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, low: u64, high: u64) -> u64 {
        self.rng.gen_range(low..=high)
    }
}
