#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;
use rand::rngs::SmallRng;
use std::sync::Mutex;

/// A seed used by default to get reproducible search results.
pub const DEFAULT_SEED: u64 = 4711;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max].
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the half open interval [min, max).
    fn uniform_real(&self, min: f64, max: f64) -> f64;

    /// Flips a coin and returns true if it is "heads", false otherwise.
    fn is_head_not_tails(&self) -> bool;

    /// Tests probability value in (0., 1.) range.
    fn is_hit(&self, probability: f64) -> bool;

    /// Returns an index from the weights slice, proportionally to the weight at it, spending
    /// a single uniform draw over the total weight. Zero weighted items are never returned.
    fn weighted(&self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let draw = self.uniform_real(0., total);

        let mut acc = 0.;
        let mut selected = 0;
        for (index, weight) in weights.iter().enumerate() {
            if *weight <= 0. {
                continue;
            }

            acc += weight;
            selected = index;
            if draw < acc {
                break;
            }
        }

        selected
    }

    /// Restarts the random sequence from the given seed.
    fn reset(&self, seed: u64);
}

/// A default random implementation which wraps a small, but fast pseudo random number generator.
/// All draws share a single sequential stream, so runs with the same seed see the same values.
pub struct DefaultRandom {
    rng: Mutex<SmallRng>,
}

impl DefaultRandom {
    /// Creates an instance of `DefaultRandom` initialized with the given seed.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { rng: Mutex::new(SmallRng::seed_from_u64(seed)) }
    }
}

impl Default for DefaultRandom {
    fn default() -> Self {
        Self::new_with_seed(DEFAULT_SEED)
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        assert!(min < max);
        self.rng.lock().unwrap().gen_range(min..=max)
    }

    fn uniform_real(&self, min: f64, max: f64) -> f64 {
        if (min - max).abs() < f64::EPSILON {
            return min;
        }

        assert!(min < max);
        self.rng.lock().unwrap().gen_range(min..max)
    }

    fn is_head_not_tails(&self) -> bool {
        self.uniform_int(1, 2) == 1
    }

    fn is_hit(&self, probability: f64) -> bool {
        self.uniform_real(0., 1.) < probability
    }

    fn reset(&self, seed: u64) {
        *self.rng.lock().unwrap() = SmallRng::seed_from_u64(seed);
    }
}
