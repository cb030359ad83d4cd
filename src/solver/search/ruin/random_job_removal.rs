#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/ruin/random_job_removal_test.rs"]
mod random_job_removal_test;

use super::*;
use std::cell::RefCell;

/// A ruin strategy which removes random jobs from the solution.
pub struct RandomJobRemoval {
    limits: RemovalLimits,
}

impl RandomJobRemoval {
    /// Creates a new instance of `RandomJobRemoval`.
    pub fn new(limits: RemovalLimits) -> Self {
        Self { limits }
    }
}

impl Ruin for RandomJobRemoval {
    fn run(&self, _refinement_ctx: &RefinementContext, mut insertion_ctx: InsertionContext) -> InsertionContext {
        if insertion_ctx.solution.routes.is_empty() {
            return insertion_ctx;
        }

        let random = insertion_ctx.environment.random.clone();
        let tracker = RefCell::new(JobRemovalTracker::new(&self.limits, random.as_ref()));

        (0..self.limits.removed_activities_range.end).take_while(|_| !tracker.borrow().is_limit()).for_each(|_| {
            if let Some((route_index, job)) = select_seed_job(&insertion_ctx.solution.routes, random.as_ref()) {
                tracker.borrow_mut().try_remove_job(&mut insertion_ctx.solution, route_index, &job);
            }
        });

        insertion_ctx
    }
}
