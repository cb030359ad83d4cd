#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/insertions_test.rs"]
mod insertions_test;

use crate::construction::constraints::TotalDurationTourState;
use crate::construction::heuristics::*;
use crate::models::common::{Cost, Duration};
use crate::models::problem::Job;
use crate::models::solution::Activity;
use crate::utils::compare_floats;
use std::cmp::Ordering;
use std::sync::Arc;

/// Specifies insertion result variant.
pub enum InsertionResult {
    /// Successful insertion result.
    Success(InsertionSuccess),
    /// Insertion failure.
    Failure(InsertionFailure),
}

/// Specifies insertion success result needed to insert job into tour.
pub struct InsertionSuccess {
    /// Specifies delta cost change for the insertion.
    pub cost: Cost,

    /// Original job to be inserted.
    pub job: Job,

    /// Specifies activities within index where they have to be inserted.
    pub activities: Vec<(Activity, usize)>,

    /// Specifies route context where insertion happens.
    pub context: RouteContext,

    /// An index of the route within the solution. An index behind the current route list
    /// refers to a route of a vehicle which is not used yet.
    pub route_index: usize,
}

/// Specifies insertion failure.
pub struct InsertionFailure {
    /// Failed constraint code.
    pub constraint: i32,
    /// A flag which signalizes that algorithm should stop trying to insert at next positions.
    pub stopped: bool,
    /// Original job failed to be inserted.
    pub job: Option<Job>,
}

impl InsertionResult {
    /// Creates result which represents insertion success.
    pub fn make_success(
        cost: Cost,
        job: Job,
        activities: Vec<(Activity, usize)>,
        route_ctx: &RouteContext,
        route_index: usize,
    ) -> Self {
        Self::Success(InsertionSuccess { cost, job, activities, context: route_ctx.clone(), route_index })
    }

    /// Creates result which represents insertion failure without any code.
    pub fn make_failure() -> Self {
        Self::make_failure_with_code(-1, false, None)
    }

    /// Creates result which represents insertion failure with given code.
    pub fn make_failure_with_code(code: i32, stopped: bool, job: Option<Job>) -> Self {
        Self::Failure(InsertionFailure { constraint: code, stopped, job })
    }

    /// Compares two insertion results and returns the preferred one. Success results are ranked
    /// by cost with route index, activity position and job id as tie breakers, so the pick does
    /// not depend on the order in which the results were produced.
    pub fn choose_best_result(left: Self, right: Self) -> Self {
        match (&left, &right) {
            (Self::Success(_), Self::Failure(_)) => left,
            (Self::Failure(_), Self::Success(_)) => right,
            (Self::Success(lhs), Self::Success(rhs)) => match compare_insertion_successes(lhs, rhs) {
                Ordering::Greater => right,
                _ => left,
            },
            (Self::Failure(_), Self::Failure(rhs)) => {
                if rhs.constraint == -1 {
                    left
                } else {
                    right
                }
            }
        }
    }

    /// Returns insertion result as success.
    pub fn as_success(&self) -> Option<&InsertionSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// Converts insertion result into success.
    pub fn into_success(self) -> Option<InsertionSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }
}

pub(crate) fn compare_insertion_successes(left: &InsertionSuccess, right: &InsertionSuccess) -> Ordering {
    compare_floats(left.cost, right.cost)
        .then_with(|| left.route_index.cmp(&right.route_index))
        .then_with(|| {
            let left_index = left.activities.first().map_or(0, |(_, index)| *index);
            let right_index = right.activities.first().map_or(0, |(_, index)| *index);
            left_index.cmp(&right_index)
        })
        .then_with(|| left.job.id().cmp(right.job.id()))
}

/// Listens to the events of the insertion process.
pub trait InsertionListener {
    /// Called before an evaluated insertion is applied to the solution.
    fn before_job_insertion(&self, _success: &InsertionSuccess) {}

    /// Called when a job was inserted into the route within the cost and duration change.
    fn job_inserted(&self, _job: &Job, _route_ctx: &RouteContext, _extra_cost: Cost, _extra_time: Duration) {}
}

/// A registry of insertion listeners invoked in their registration order.
#[derive(Clone, Default)]
pub struct InsertionListeners {
    listeners: Vec<Arc<dyn InsertionListener + Send + Sync>>,
}

impl InsertionListeners {
    /// Registers a new listener.
    pub fn add(&mut self, listener: Arc<dyn InsertionListener + Send + Sync>) {
        self.listeners.push(listener);
    }

    /// Notifies all listeners about upcoming insertion.
    pub fn before_job_insertion(&self, success: &InsertionSuccess) {
        self.listeners.iter().for_each(|listener| listener.before_job_insertion(success));
    }

    /// Notifies all listeners about performed insertion.
    pub fn job_inserted(&self, job: &Job, route_ctx: &RouteContext, extra_cost: Cost, extra_time: Duration) {
        self.listeners.iter().for_each(|listener| listener.job_inserted(job, route_ctx, extra_cost, extra_time));
    }
}

/// Implements generalized insertion heuristic.
/// Using `JobSelector`, `RouteSelector`, and `ResultSelector` it tries to identify next job to
/// be inserted until there are no jobs left or it is not possible to insert due to constraint
/// limitations.
pub struct InsertionHeuristic {
    insertion_evaluator: Box<dyn InsertionEvaluator + Send + Sync>,
    listeners: InsertionListeners,
}

impl Default for InsertionHeuristic {
    fn default() -> Self {
        InsertionHeuristic::new(Box::new(ParallelInsertionEvaluator::default()))
    }
}

impl InsertionHeuristic {
    /// Creates a new instance of `InsertionHeuristic`.
    pub fn new(insertion_evaluator: Box<dyn InsertionEvaluator + Send + Sync>) -> Self {
        Self { insertion_evaluator, listeners: InsertionListeners::default() }
    }

    /// Attaches insertion listeners which are notified on each applied insertion.
    pub fn with_listeners(mut self, listeners: InsertionListeners) -> Self {
        self.listeners = listeners;
        self
    }

    /// Runs common insertion heuristic algorithm using given selector specializations.
    pub fn process(
        &self,
        insertion_ctx: InsertionContext,
        job_selector: &(dyn JobSelector + Send + Sync),
        route_selector: &(dyn RouteSelector + Send + Sync),
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionContext {
        let mut insertion_ctx = insertion_ctx;

        prepare_insertion_ctx(&mut insertion_ctx);

        while !insertion_ctx.solution.required.is_empty()
            && !insertion_ctx.environment.quota.as_ref().map_or(false, |quota| quota.is_reached())
        {
            let jobs = job_selector.select(&insertion_ctx).collect::<Vec<_>>();
            let routes = route_selector.select(&insertion_ctx, jobs.as_slice()).collect::<Vec<_>>();

            let result =
                self.insertion_evaluator.evaluate_all(&insertion_ctx, jobs.as_slice(), routes.as_slice(), result_selector);

            match result {
                InsertionResult::Success(success) => {
                    apply_insertion_success(&mut insertion_ctx, success, &self.listeners);
                }
                InsertionResult::Failure(failure) => {
                    apply_insertion_failure(&mut insertion_ctx, failure);
                }
            }
        }

        finalize_insertion_ctx(&mut insertion_ctx);

        insertion_ctx
    }
}

pub(crate) fn prepare_insertion_ctx(insertion_ctx: &mut InsertionContext) {
    insertion_ctx.solution.required.extend(insertion_ctx.solution.unassigned.iter().map(|(job, _)| job.clone()));
    insertion_ctx.problem.constraint.accept_solution_state(&mut insertion_ctx.solution);
}

pub(crate) fn finalize_insertion_ctx(insertion_ctx: &mut InsertionContext) {
    let unassigned = &insertion_ctx.solution.unassigned;
    insertion_ctx.solution.required.retain(|job| !unassigned.contains_key(job));
    insertion_ctx.solution.unassigned.extend(insertion_ctx.solution.required.drain(0..).map(|job| (job, 0)));

    insertion_ctx.restore();
}

pub(crate) fn apply_insertion_success(
    insertion_ctx: &mut InsertionContext,
    success: InsertionSuccess,
    listeners: &InsertionListeners,
) {
    listeners.before_job_insertion(&success);

    let extra_cost = success.cost;
    let route_index = if success.route_index >= insertion_ctx.solution.routes.len() {
        insertion_ctx.solution.registry.use_vehicle(&success.context.route().vehicle);
        insertion_ctx.solution.routes.push(success.context);
        insertion_ctx.solution.routes.len() - 1
    } else {
        success.route_index
    };

    let route_ctx = insertion_ctx.solution.routes.get_mut(route_index).unwrap();
    let old_duration = route_ctx.state().get_total_duration().copied().unwrap_or(0.);

    let route = route_ctx.route_mut();
    success.activities.into_iter().for_each(|(activity, index)| {
        route.tour.insert_at(activity, index + 1);
    });

    let job = success.job;
    insertion_ctx.solution.required.retain(|other| *other != job);
    insertion_ctx.solution.unassigned.remove(&job);
    insertion_ctx.problem.constraint.accept_insertion(&mut insertion_ctx.solution, route_index, &job);

    let route_ctx = &insertion_ctx.solution.routes[route_index];
    let extra_time = route_ctx.state().get_total_duration().copied().unwrap_or(0.) - old_duration;
    listeners.job_inserted(&job, route_ctx, extra_cost, extra_time);
}

pub(crate) fn apply_insertion_failure(insertion_ctx: &mut InsertionContext, failure: InsertionFailure) {
    if let Some(job) = failure.job {
        insertion_ctx.solution.unassigned.insert(job.clone(), failure.constraint);
        insertion_ctx.solution.required.retain(|other| *other != job);
    } else {
        // no routes left in the registry to try
        let code = failure.constraint;
        insertion_ctx.solution.unassigned.extend(insertion_ctx.solution.required.drain(0..).map(|job| (job, code)));
    }
}
