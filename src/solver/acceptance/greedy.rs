#[cfg(test)]
#[path = "../../../tests/unit/solver/acceptance/greedy_test.rs"]
mod greedy_test;

use crate::construction::heuristics::InsertionContext;
use crate::solver::acceptance::Acceptance;
use crate::solver::{ObjectiveCost, RefinementContext};

/// A greedy acceptance which accepts only solutions cheaper than the best known one.
#[derive(Default)]
pub struct Greedy {}

impl Acceptance for Greedy {
    fn is_accepted(&self, refinement_ctx: &RefinementContext, candidate: (&InsertionContext, &ObjectiveCost)) -> bool {
        match refinement_ctx.pool.best() {
            Some((_, cost)) => candidate.1.total() < cost.total(),
            None => true,
        }
    }
}
