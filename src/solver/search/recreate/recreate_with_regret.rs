#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/recreate/recreate_with_regret_test.rs"]
mod recreate_with_regret_test;

use super::*;
use crate::models::problem::Job;
use crate::utils::{compare_floats, parallel_collect};

/// A recreate method which prioritizes jobs by their regret value: the difference between the
/// best and the second best insertion cost. Jobs with the biggest regret are inserted first
/// even when their best position is not the globally cheapest one.
pub struct RecreateWithRegret {
    recreate: ConfigurableRecreate,
}

impl RecreateWithRegret {
    /// Creates a new instance of `RecreateWithRegret`.
    pub fn new(listeners: InsertionListeners) -> Self {
        Self {
            recreate: ConfigurableRecreate::new(
                Box::<AllJobSelector>::default(),
                Box::<AllRouteSelector>::default(),
                Box::<BestResultSelector>::default(),
                InsertionHeuristic::new(Box::<RegretInsertionEvaluator>::default()).with_listeners(listeners),
            ),
        }
    }
}

impl Recreate for RecreateWithRegret {
    fn run(&self, refinement_ctx: &RefinementContext, insertion_ctx: InsertionContext) -> InsertionContext {
        self.recreate.run(refinement_ctx, insertion_ctx)
    }
}

#[derive(Default)]
struct RegretInsertionEvaluator {
    fallback: ParallelInsertionEvaluator,
}

impl InsertionEvaluator for RegretInsertionEvaluator {
    fn evaluate_one(&self, ctx: &InsertionContext, job: &Job, routes: &[(usize, RouteContext)]) -> InsertionResult {
        self.fallback.evaluate_one(ctx, job, routes)
    }

    fn evaluate_all(
        &self,
        ctx: &InsertionContext,
        jobs: &[Job],
        routes: &[(usize, RouteContext)],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult {
        if jobs.len() == 1 || ctx.solution.routes.len() < 2 {
            return self.fallback.evaluate_all(ctx, jobs, routes, result_selector);
        }

        let mut regrets = parallel_collect(jobs, |job| {
            let mut successes = routes
                .iter()
                .filter_map(|(route_index, route_ctx)| {
                    evaluate_job_insertion_in_route(job, ctx, route_ctx, *route_index, InsertionResult::make_failure())
                        .into_success()
                })
                .collect::<Vec<_>>();

            successes.sort_by(compare_insertion_successes);

            match successes.len() {
                // job cannot be inserted anywhere, let the fallback report a proper failure
                0 => None,
                // the only insertion left, consider the job scarce and handle it first
                1 => Some((true, 0., successes.swap_remove(0))),
                _ => {
                    let regret = successes[1].cost - successes[0].cost;
                    Some((false, regret, successes.swap_remove(0)))
                }
            }
        })
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        if regrets.is_empty() {
            return self.fallback.evaluate_all(ctx, jobs, routes, result_selector);
        }

        regrets.sort_by(|(a_scarce, a_regret, a_best), (b_scarce, b_regret, b_best)| {
            b_scarce
                .cmp(a_scarce)
                .then_with(|| compare_floats(*b_regret, *a_regret))
                .then_with(|| compare_insertion_successes(a_best, b_best))
        });

        let (_, _, best) = regrets.swap_remove(0);

        InsertionResult::Success(best)
    }
}
