#[cfg(test)]
#[path = "../../tests/unit/solver/objective_test.rs"]
mod objective_test;

use crate::construction::heuristics::InsertionContext;
use crate::models::common::Cost;

/// Represents actual solution cost and a penalty for unassigned jobs.
#[derive(Clone, Debug)]
pub struct ObjectiveCost {
    /// Actual cost of all routes without penalties.
    pub actual: Cost,
    /// Penalty cost of unassigned jobs.
    pub penalty: Cost,
}

impl ObjectiveCost {
    /// Creates a new instance of `ObjectiveCost`.
    pub fn new(actual: Cost, penalty: Cost) -> Self {
        Self { actual, penalty }
    }

    /// Returns total cost.
    pub fn total(&self) -> Cost {
        self.actual + self.penalty
    }
}

/// Encapsulates objective function behaviour.
pub trait Objective {
    /// Estimates cost of the given solution.
    fn estimate(&self, insertion_ctx: &InsertionContext) -> ObjectiveCost;
}

/// An objective function which computes the transport and activity costs of all routes and
/// penalizes each unassigned job based on its priority: the more important the job is, the
/// higher the penalty.
pub struct PenalizeUnassigned {
    penalty_base: Cost,
}

impl PenalizeUnassigned {
    /// Creates a new instance of `PenalizeUnassigned`.
    pub fn new(penalty_base: Cost) -> Self {
        Self { penalty_base }
    }
}

impl Default for PenalizeUnassigned {
    fn default() -> Self {
        Self::new(1E3)
    }
}

impl Objective for PenalizeUnassigned {
    fn estimate(&self, insertion_ctx: &InsertionContext) -> ObjectiveCost {
        let problem = &insertion_ctx.problem;

        let actual = insertion_ctx.solution.routes.iter().fold(Cost::default(), |acc, route_ctx| {
            let route = route_ctx.route();
            let vehicle = route.vehicle.as_ref();

            let initial = route
                .tour
                .start()
                .map_or(0., |start| problem.activity.cost(vehicle, start, start.schedule.arrival))
                + vehicle.costs.fixed;

            acc + route.tour.legs().fold(initial, |acc, (items, _)| {
                acc + match items {
                    [from, to] => {
                        problem.activity.cost(vehicle, to, to.schedule.arrival)
                            + problem.transport.cost(vehicle, from.place.location, to.place.location)
                    }
                    [_] => 0.,
                    _ => panic!("unexpected route leg configuration"),
                }
            })
        });

        let penalty = insertion_ctx
            .solution
            .unassigned
            .keys()
            .map(|job| self.penalty_base * (4 - job.data().priority) as f64)
            .sum::<Cost>();

        ObjectiveCost::new(actual, penalty)
    }
}
