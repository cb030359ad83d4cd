#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/ruin/neighbour_removal_test.rs"]
mod neighbour_removal_test;

use super::*;
use std::cell::RefCell;
use std::iter::once;

/// A ruin strategy which removes a seed job and its closest neighbours from the solution.
pub struct NeighbourRemoval {
    limits: RemovalLimits,
}

impl NeighbourRemoval {
    /// Creates a new instance of `NeighbourRemoval`.
    pub fn new(limits: RemovalLimits) -> Self {
        Self { limits }
    }
}

impl Ruin for NeighbourRemoval {
    fn run(&self, _refinement_ctx: &RefinementContext, mut insertion_ctx: InsertionContext) -> InsertionContext {
        if insertion_ctx.solution.routes.is_empty() {
            return insertion_ctx;
        }

        let problem = insertion_ctx.problem.clone();
        let random = insertion_ctx.environment.random.clone();

        let tracker = RefCell::new(JobRemovalTracker::new(&self.limits, random.as_ref()));
        let route_jobs = get_route_jobs(&insertion_ctx.solution);

        if let Some((_, seed)) = select_seed_job(&insertion_ctx.solution.routes, random.as_ref()) {
            once(seed.clone())
                .chain(problem.jobs.neighbors(&seed).map(|(job, _)| job.clone()))
                .take_while(|_| !tracker.borrow().is_limit())
                .for_each(|job| {
                    if let Some(&route_index) = route_jobs.get(&job) {
                        tracker.borrow_mut().try_remove_job(&mut insertion_ctx.solution, route_index, &job);
                    }
                });
        }

        insertion_ctx
    }
}
