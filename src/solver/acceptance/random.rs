#[cfg(test)]
#[path = "../../../tests/unit/solver/acceptance/random_test.rs"]
mod random_test;

use crate::construction::heuristics::InsertionContext;
use crate::solver::acceptance::{Acceptance, Greedy};
use crate::solver::{ObjectiveCost, RefinementContext};

/// An acceptance which behaves as the inner one, but additionally accepts a worse solution
/// with the given probability.
pub struct RandomizedGreedy {
    other: Box<dyn Acceptance + Send + Sync>,
    probability: f64,
}

impl RandomizedGreedy {
    /// Creates a new instance of `RandomizedGreedy`.
    pub fn new(other: Box<dyn Acceptance + Send + Sync>, probability: f64) -> Self {
        Self { other, probability }
    }
}

impl Default for RandomizedGreedy {
    fn default() -> Self {
        Self::new(Box::new(Greedy::default()), 0.01)
    }
}

impl Acceptance for RandomizedGreedy {
    fn is_accepted(&self, refinement_ctx: &RefinementContext, candidate: (&InsertionContext, &ObjectiveCost)) -> bool {
        let random = candidate.0.environment.random.clone();

        self.other.is_accepted(refinement_ctx, candidate) || random.is_hit(self.probability)
    }
}
