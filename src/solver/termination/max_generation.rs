#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/max_generation_test.rs"]
mod max_generation_test;

use crate::solver::termination::Termination;
use crate::solver::RefinementContext;

/// Stops when the refinement generation exceeds the given limit.
pub struct MaxGeneration {
    limit: usize,
}

impl MaxGeneration {
    /// Creates a new instance of `MaxGeneration`.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for MaxGeneration {
    fn default() -> Self {
        Self::new(2000)
    }
}

impl Termination for MaxGeneration {
    fn is_termination(&self, refinement_ctx: &RefinementContext) -> bool {
        refinement_ctx.generation > self.limit
    }
}
