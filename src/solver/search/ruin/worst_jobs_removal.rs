#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/ruin/worst_jobs_removal_test.rs"]
mod worst_jobs_removal_test;

use super::*;
use crate::models::common::Cost;
use crate::models::problem::TransportCost;
use crate::models::solution::{Activity, Route};
use crate::utils::{compare_floats, parallel_collect};
use std::cell::RefCell;

/// A ruin strategy which removes jobs with the biggest cost savings first.
pub struct WorstJobRemoval {
    limits: RemovalLimits,
    worst_skip: usize,
}

impl WorstJobRemoval {
    /// Creates a new instance of `WorstJobRemoval` where `worst_skip` defines a top amount
    /// of jobs which can be randomly skipped in each removal round.
    pub fn new(worst_skip: usize, limits: RemovalLimits) -> Self {
        Self { limits, worst_skip }
    }
}

impl Ruin for WorstJobRemoval {
    fn run(&self, _refinement_ctx: &RefinementContext, mut insertion_ctx: InsertionContext) -> InsertionContext {
        if insertion_ctx.solution.routes.is_empty() {
            return insertion_ctx;
        }

        let problem = insertion_ctx.problem.clone();
        let random = insertion_ctx.environment.random.clone();

        let tracker = RefCell::new(JobRemovalTracker::new(&self.limits, random.as_ref()));
        let route_jobs = get_route_jobs(&insertion_ctx.solution);

        let mut savings = get_cost_savings(&insertion_ctx.solution, problem.transport.as_ref());
        savings.sort_by(|(a_job, a), (b_job, b)| compare_floats(*b, *a).then_with(|| a_job.id().cmp(b_job.id())));

        while !tracker.borrow().is_limit() {
            let skip = savings.len().min(random.uniform_int(0, self.worst_skip as i32) as usize);
            let removed = savings.iter().skip(skip).any(|(job, _)| {
                route_jobs.get(job).map_or(false, |&route_index| {
                    tracker.borrow_mut().try_remove_job(&mut insertion_ctx.solution, route_index, job)
                })
            });

            if !removed {
                break;
            }
        }

        insertion_ctx
    }
}

fn get_cost_savings(solution: &SolutionContext, transport: &(dyn TransportCost + Send + Sync)) -> Vec<(Job, Cost)> {
    parallel_collect(solution.routes.as_slice(), |route_ctx| get_job_savings(route_ctx, transport))
        .into_iter()
        .flatten()
        .collect()
}

fn get_job_savings(route_ctx: &RouteContext, transport: &(dyn TransportCost + Send + Sync)) -> Vec<(Job, Cost)> {
    let route = route_ctx.route();

    route
        .tour
        .all_activities()
        .as_slice()
        .windows(3)
        .fold(FxHashMap::<Job, Cost>::default(), |mut acc, window| {
            if let [start, middle, end] = window {
                if let Some(job) = middle.job.clone() {
                    *acc.entry(job).or_insert(0.) += get_cost(route, start, middle, end, transport);
                }
            }

            acc
        })
        .into_iter()
        .collect()
}

#[inline(always)]
fn get_cost(
    route: &Route,
    start: &Activity,
    middle: &Activity,
    end: &Activity,
    transport: &(dyn TransportCost + Send + Sync),
) -> Cost {
    let vehicle = route.vehicle.as_ref();

    let waiting_time = (middle.place.time.start - middle.schedule.arrival).max(0.);
    let transport_cost = transport.cost(vehicle, start.place.location, middle.place.location)
        + transport.cost(vehicle, middle.place.location, end.place.location)
        - transport.cost(vehicle, start.place.location, end.place.location);

    waiting_time * vehicle.costs.per_waiting_time + transport_cost
}
