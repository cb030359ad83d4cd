#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/evaluators_test.rs"]
mod evaluators_test;

use crate::construction::constraints::{ActivityConstraintViolation, ActivityContext, ConstraintPipeline};
use crate::construction::heuristics::*;
use crate::models::common::{Cost, Demand, TimeWindow};
use crate::models::problem::{Job, Place as JobPlace, Service, Shipment};
use crate::models::solution::{Activity, Place};
use crate::utils::unwrap_from_result;

/// Evaluates possibility to perform insertion of the job into any route of the solution,
/// including routes of vehicles which are not used yet.
pub fn evaluate_job_insertion(job: &Job, ctx: &InsertionContext) -> InsertionResult {
    ctx.solution
        .routes
        .iter()
        .cloned()
        .chain(ctx.solution.registry.next().map(RouteContext::new))
        .enumerate()
        .fold(InsertionResult::make_failure(), |acc, (route_index, route_ctx)| {
            evaluate_job_insertion_in_route(job, ctx, &route_ctx, route_index, acc)
        })
}

/// Evaluates possibility to perform insertion of the job into the given route, comparing
/// the outcome with an alternative result and returning the better of the two.
pub fn evaluate_job_insertion_in_route(
    job: &Job,
    ctx: &InsertionContext,
    route_ctx: &RouteContext,
    route_index: usize,
    alternative: InsertionResult,
) -> InsertionResult {
    if let Some(violation) = ctx.problem.constraint.evaluate_hard_route(&ctx.solution, route_ctx, job) {
        return InsertionResult::choose_best_result(
            alternative,
            InsertionResult::make_failure_with_code(violation.code, true, Some(job.clone())),
        );
    }

    let best_known_cost = match &alternative {
        InsertionResult::Success(success) => Some(success.cost),
        _ => None,
    };

    let result = match job {
        Job::Service(service) => evaluate_service(job, service, ctx, route_ctx, route_index, best_known_cost),
        Job::Shipment(shipment) => evaluate_shipment(job, shipment, ctx, route_ctx, route_index, best_known_cost),
    };

    InsertionResult::choose_best_result(alternative, result)
}

fn evaluate_service(
    job: &Job,
    service: &Service,
    ctx: &InsertionContext,
    route_ctx: &RouteContext,
    route_index: usize,
    best_known_cost: Option<Cost>,
) -> InsertionResult {
    let route_costs = ctx.problem.constraint.evaluate_soft_route(&ctx.solution, route_ctx, job);
    let mut activity = make_activity(job.clone(), &service.place, service.demand);

    let result = analyze_insertion_in_route(
        ctx,
        route_ctx,
        &service.place,
        &mut activity,
        route_costs,
        SingleContext::new(best_known_cost, 0),
    );

    if let Some(place) = result.place {
        activity.place = place;
        let activities = vec![(activity, result.index)];
        InsertionResult::make_success(result.cost.unwrap_or_default(), job.clone(), activities, route_ctx, route_index)
    } else {
        let (code, stopped) = result.violation.map_or((0, false), |v| (v.code, v.stopped));
        InsertionResult::make_failure_with_code(code, stopped, Some(job.clone()))
    }
}

fn evaluate_shipment(
    job: &Job,
    shipment: &Shipment,
    ctx: &InsertionContext,
    route_ctx: &RouteContext,
    route_index: usize,
    best_known_cost: Option<Cost>,
) -> InsertionResult {
    let route_costs = ctx.problem.constraint.evaluate_soft_route(&ctx.solution, route_ctx, job);
    let stops = [(&shipment.pickup, shipment.pickup_demand()), (&shipment.delivery, shipment.delivery_demand())];

    let mut shadow = ShadowContext::new(&ctx.problem.constraint, route_ctx);
    // 1. analyze pickup positions
    let result = unwrap_from_result(std::iter::repeat(0).try_fold(MultiContext::new(best_known_cost), |out, _| {
        if out.is_failure(route_ctx.route().tour.job_activity_count()) {
            return Err(out);
        }
        shadow.restore(route_ctx);

        // 2. analyze stops in their service order
        let sq_res = unwrap_from_result(stops.iter().try_fold(out.next(), |in1, &(place, demand)| {
            if in1.violation.is_some() {
                return Err(in1);
            }
            let mut activity = make_activity(job.clone(), place, demand);
            // 3. analyze legs
            let srv_res = analyze_insertion_in_route(
                ctx,
                shadow.route_ctx(),
                place,
                &mut activity,
                0.,
                SingleContext::new(None, in1.next_index),
            );

            if let Some(place) = srv_res.place {
                activity.place = place;
                let activity = shadow.insert(activity, srv_res.index);
                let activities = concat_activities(in1.activities, (activity, srv_res.index));
                return MultiContext::success(
                    in1.cost.unwrap_or(route_costs) + srv_res.cost.unwrap_or_default(),
                    activities,
                );
            }

            MultiContext::fail(srv_res, in1)
        }));

        MultiContext::promote(sq_res, out)
    }));

    if result.is_success() {
        let activities = result.activities.unwrap_or_default();
        InsertionResult::make_success(result.cost.unwrap_or_default(), job.clone(), activities, route_ctx, route_index)
    } else {
        let (code, stopped) = result.violation.map_or((0, false), |v| (v.code, v.stopped));
        InsertionResult::make_failure_with_code(code, stopped, Some(job.clone()))
    }
}

fn analyze_insertion_in_route(
    ctx: &InsertionContext,
    route_ctx: &RouteContext,
    place: &JobPlace,
    target: &mut Activity,
    extra_costs: Cost,
    init: SingleContext,
) -> SingleContext {
    unwrap_from_result(route_ctx.route().tour.legs().skip(init.index).try_fold(init, |out, (items, index)| {
        let (prev, next) = match items {
            [prev] => (prev, None),
            [prev, next] => (prev, Some(next)),
            _ => panic!("unexpected route leg configuration"),
        };

        // analyze place time windows
        place.times.iter().try_fold(out, |in1, time| {
            target.place = Place { location: place.location, duration: place.duration, time: *time };

            let activity_ctx = ActivityContext { index, prev, target, next };

            if let Some(violation) = ctx.problem.constraint.evaluate_hard_activity(route_ctx, &activity_ctx) {
                return SingleContext::fail(violation, in1);
            }

            let costs = extra_costs + ctx.problem.constraint.evaluate_soft_activity(route_ctx, &activity_ctx);

            if costs < in1.cost.unwrap_or(f64::MAX) {
                SingleContext::success(activity_ctx.index, costs, target.place.clone())
            } else {
                SingleContext::skip(in1)
            }
        })
    }))
}

/// Stores information needed for a single stop insertion.
#[derive(Debug)]
struct SingleContext {
    /// Constraint violation.
    pub violation: Option<ActivityConstraintViolation>,
    /// Insertion index.
    pub index: usize,
    /// Best cost.
    pub cost: Option<Cost>,
    /// Activity place.
    pub place: Option<Place>,
}

impl SingleContext {
    /// Creates a new empty context with given cost.
    fn new(cost: Option<Cost>, index: usize) -> Self {
        Self { violation: None, index, cost, place: None }
    }

    fn fail(violation: ActivityConstraintViolation, other: SingleContext) -> Result<Self, Self> {
        let stopped = violation.stopped;
        let ctx = Self { violation: Some(violation), index: other.index, cost: other.cost, place: other.place };
        if stopped {
            Err(ctx)
        } else {
            Ok(ctx)
        }
    }

    fn success(index: usize, cost: Cost, place: Place) -> Result<Self, Self> {
        Ok(Self { violation: None, index, cost: Some(cost), place: Some(place) })
    }

    fn skip(other: SingleContext) -> Result<Self, Self> {
        Ok(other)
    }
}

/// Stores information needed for a linked stops insertion.
struct MultiContext {
    /// Constraint violation.
    pub violation: Option<ActivityConstraintViolation>,
    /// Insertion index for the first stop.
    pub start_index: usize,
    /// Insertion index for the next stop.
    pub next_index: usize,
    /// Cost accumulator.
    pub cost: Option<Cost>,
    /// Activities with their indices.
    pub activities: Option<Vec<(Activity, usize)>>,
}

impl MultiContext {
    /// Creates new empty insertion context.
    fn new(cost: Option<Cost>) -> Self {
        Self { violation: None, start_index: 0, next_index: 0, cost, activities: None }
    }

    /// Promotes insertion context by best price.
    fn promote(left: Self, right: Self) -> Result<Self, Self> {
        let index = left.start_index.max(right.start_index) + 1;
        let best = match (left.cost, right.cost) {
            (Some(left_cost), Some(right_cost)) => {
                if left_cost < right_cost {
                    left
                } else {
                    right
                }
            }
            (Some(_), None) => left,
            (None, Some(_)) => right,
            _ => {
                if left.violation.is_some() {
                    left
                } else {
                    right
                }
            }
        };

        let result = Self {
            violation: best.violation,
            start_index: index,
            next_index: index,
            cost: best.cost,
            activities: best.activities,
        };

        if result.violation.as_ref().map_or(false, |v| v.stopped) {
            Err(result)
        } else {
            Ok(result)
        }
    }

    /// Creates failed insertion context within reason code.
    fn fail(err_ctx: SingleContext, other_ctx: MultiContext) -> Result<Self, Self> {
        let (code, stopped) =
            err_ctx.violation.map_or((0, false), |v| (v.code, v.stopped && other_ctx.activities.is_none()));

        Err(Self {
            violation: Some(ActivityConstraintViolation { code, stopped }),
            start_index: other_ctx.start_index,
            next_index: other_ctx.start_index,
            cost: None,
            activities: None,
        })
    }

    /// Creates successful insertion context.
    fn success(cost: Cost, activities: Vec<(Activity, usize)>) -> Result<Self, Self> {
        let start_index = activities.first().map_or(0, |(_, index)| *index);
        let next_index = activities.last().map_or(0, |(_, index)| *index) + 1;

        Ok(Self { violation: None, start_index, next_index, cost: Some(cost), activities: Some(activities) })
    }

    /// Creates next insertion context from existing one.
    fn next(&self) -> Self {
        Self {
            violation: None,
            start_index: self.start_index,
            next_index: self.start_index,
            cost: None,
            activities: None,
        }
    }

    /// Checks whether insertion is found.
    fn is_success(&self) -> bool {
        self.violation.is_none() && self.cost.is_some() && self.activities.is_some()
    }

    /// Checks whether insertion is failed.
    fn is_failure(&self, index: usize) -> bool {
        self.violation.as_ref().map_or(false, |v| v.stopped) || (self.start_index > index)
    }
}

/// A scratch route context used to evaluate a dependent stop on top of an already placed one
/// without touching the original route.
struct ShadowContext<'a> {
    constraint: &'a ConstraintPipeline,
    ctx: RouteContext,
}

impl<'a> ShadowContext<'a> {
    fn new(constraint: &'a ConstraintPipeline, ctx: &RouteContext) -> Self {
        Self { constraint, ctx: ctx.clone() }
    }

    fn route_ctx(&self) -> &RouteContext {
        &self.ctx
    }

    fn insert(&mut self, activity: Activity, index: usize) -> Activity {
        self.ctx.route_mut().tour.insert_at(activity.clone(), index + 1);
        self.constraint.accept_route_state(&mut self.ctx);

        activity
    }

    fn restore(&mut self, original: &RouteContext) {
        self.ctx = original.clone();
    }
}

fn make_activity(job: Job, place: &JobPlace, demand: Demand) -> Activity {
    let place = Place { location: place.location, duration: place.duration, time: TimeWindow::max() };

    Activity::new_with_job(job, place, demand)
}

fn concat_activities(
    activities: Option<Vec<(Activity, usize)>>,
    activity: (Activity, usize),
) -> Vec<(Activity, usize)> {
    let mut activities = activities.unwrap_or_default();
    activities.push((activity.0, activity.1));

    activities
}
