use crate::domain::ports::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

/// OS-seeded random source used by the running server.
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible stream for local debugging and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        // `random_range` panics on an empty range; NaN bounds compare as unordered.
        if low.partial_cmp(&high) != Some(Ordering::Less) {
            return low;
        }
        self.rng.random_range(low..high)
    }
}
