#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/selectors_test.rs"]
mod selectors_test;

use crate::construction::heuristics::*;
use crate::models::problem::Job;
use crate::utils::map_reduce;

/// On each insertion step, selects a list of routes where jobs can be inserted.
/// It is up to implementation to decide whether list consists of all possible routes or just some subset.
pub trait RouteSelector {
    /// Returns routes with their indices for job insertion. Indices behind the current route
    /// list refer to routes of vehicles which are not used yet.
    fn select<'a>(
        &'a self,
        ctx: &'a InsertionContext,
        jobs: &[Job],
    ) -> Box<dyn Iterator<Item = (usize, RouteContext)> + 'a>;
}

/// Returns a list of all possible routes for insertion in their solution order.
#[derive(Default)]
pub struct AllRouteSelector {}

impl RouteSelector for AllRouteSelector {
    fn select<'a>(
        &'a self,
        ctx: &'a InsertionContext,
        _jobs: &[Job],
    ) -> Box<dyn Iterator<Item = (usize, RouteContext)> + 'a> {
        Box::new(
            ctx.solution
                .routes
                .iter()
                .cloned()
                .chain(ctx.solution.registry.next().map(RouteContext::new))
                .enumerate(),
        )
    }
}

/// On each insertion step, selects a list of jobs to be inserted.
/// It is up to implementation to decide whether list consists of all jobs or just some subset.
pub trait JobSelector {
    /// Returns a portion of all jobs.
    fn select<'a>(&'a self, ctx: &'a InsertionContext) -> Box<dyn Iterator<Item = Job> + 'a>;
}

/// Returns a list of all jobs which require assignment in their discovery order.
#[derive(Default)]
pub struct AllJobSelector {}

impl JobSelector for AllJobSelector {
    fn select<'a>(&'a self, ctx: &'a InsertionContext) -> Box<dyn Iterator<Item = Job> + 'a> {
        Box::new(ctx.solution.required.iter().cloned())
    }
}

/// Evaluates insertion.
pub trait InsertionEvaluator {
    /// Evaluates insertion of a single job into given collection of routes.
    fn evaluate_one(&self, ctx: &InsertionContext, job: &Job, routes: &[(usize, RouteContext)]) -> InsertionResult;

    /// Evaluates insertion of a job collection into given collection of routes.
    fn evaluate_all(
        &self,
        ctx: &InsertionContext,
        jobs: &[Job],
        routes: &[(usize, RouteContext)],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult;
}

/// Evaluates job insertions in parallel spreading jobs over the thread pool.
#[derive(Default)]
pub struct ParallelInsertionEvaluator {}

impl InsertionEvaluator for ParallelInsertionEvaluator {
    fn evaluate_one(&self, ctx: &InsertionContext, job: &Job, routes: &[(usize, RouteContext)]) -> InsertionResult {
        routes.iter().fold(InsertionResult::make_failure(), |acc, (route_index, route_ctx)| {
            evaluate_job_insertion_in_route(job, ctx, route_ctx, *route_index, acc)
        })
    }

    fn evaluate_all(
        &self,
        ctx: &InsertionContext,
        jobs: &[Job],
        routes: &[(usize, RouteContext)],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult {
        map_reduce(
            jobs,
            |job| self.evaluate_one(ctx, job, routes),
            InsertionResult::make_failure,
            |left, right| result_selector.select_insertion(ctx, left, right),
        )
    }
}

/// Insertion result selector.
pub trait ResultSelector {
    /// Selects one insertion result from two to promote as best.
    fn select_insertion(&self, ctx: &InsertionContext, left: InsertionResult, right: InsertionResult)
        -> InsertionResult;
}

/// Selects the best result regardless of the insertion context.
#[derive(Default)]
pub struct BestResultSelector {}

impl ResultSelector for BestResultSelector {
    fn select_insertion(&self, _: &InsertionContext, left: InsertionResult, right: InsertionResult) -> InsertionResult {
        InsertionResult::choose_best_result(left, right)
    }
}
