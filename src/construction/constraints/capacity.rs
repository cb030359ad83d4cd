#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/capacity_test.rs"]
mod capacity_test;

use crate::construction::constraints::*;
use crate::construction::heuristics::{
    custom_activity_state, RouteContext, RouteState, SolutionContext,
};
use crate::models::common::{Capacity, Demand};
use crate::models::problem::Job;
use std::slice::Iter;
use std::sync::Arc;

custom_activity_state!(CurrentLoadActivityState via CurrentLoadKey with get_current_load, set_current_loads of Capacity);
custom_activity_state!(MaxPastLoadActivityState via MaxPastLoadKey with get_max_past_load, set_max_past_loads of Capacity);
custom_activity_state!(MaxFutureLoadActivityState via MaxFutureLoadKey with get_max_future_load, set_max_future_loads of Capacity);

/// A module which checks whether a vehicle can handle jobs' demand.
pub struct CapacityConstraintModule {
    constraints: Vec<ConstraintVariant>,
}

impl CapacityConstraintModule {
    /// Creates a new instance of `CapacityConstraintModule`.
    pub fn new(code: i32) -> Self {
        Self {
            constraints: vec![
                ConstraintVariant::HardRoute(Arc::new(CapacityHardRouteConstraint { code })),
                ConstraintVariant::HardActivity(Arc::new(CapacityHardActivityConstraint { code })),
            ],
        }
    }

    fn recalculate_states(route_ctx: &mut RouteContext) {
        let (route, state) = route_ctx.as_mut();
        let total = route.tour.total();

        // static deliveries are loaded at the route start
        let start_delivery = route
            .tour
            .all_activities()
            .fold(Capacity::default(), |acc, activity| acc + activity.demand.delivery.0);

        // determine actual load at each activity and max load discovered in the past
        let mut currents = Vec::with_capacity(total);
        let mut max_pasts = Vec::with_capacity(total);
        route.tour.all_activities().fold((start_delivery, Capacity::default()), |(current, max), activity| {
            let current = current + activity.demand.change();
            let max = max.max_load(current);

            currents.push(current);
            max_pasts.push(max);

            (current, max)
        });

        let mut max_futures = vec![Capacity::default(); total];
        currents.iter().enumerate().rev().fold(Capacity::default(), |max, (idx, current)| {
            let max = max.max_load(*current);
            max_futures[idx] = max;

            max
        });

        state.set_current_loads(currents);
        state.set_max_past_loads(max_pasts);
        state.set_max_future_loads(max_futures);
    }

    fn has_demand_violation(
        state: &RouteState,
        pivot_idx: usize,
        capacity: &Capacity,
        demand: &Demand,
        stopped: bool,
    ) -> Option<bool> {
        let default = Capacity::default();

        // cannot handle more static deliveries
        if demand.delivery.0.is_not_empty() {
            let past = state.get_max_past_load(pivot_idx).copied().unwrap_or(default);
            if !capacity.can_fit(&(past + demand.delivery.0)) {
                return Some(stopped);
            }
        }

        let change = demand.change();

        // cannot handle more pickups
        if !default.can_fit(&change) {
            let future = state.get_max_future_load(pivot_idx).copied().unwrap_or(default);
            if !capacity.can_fit(&(future + change)) {
                return Some(stopped);
            }
        }

        // can load more at the pivot
        let current = state.get_current_load(pivot_idx).copied().unwrap_or(default);
        if capacity.can_fit(&(current + change)) {
            None
        } else {
            Some(false)
        }
    }
}

impl ConstraintModule for CapacityConstraintModule {
    fn accept_insertion(&self, solution_ctx: &mut SolutionContext, route_index: usize, _job: &Job) {
        self.accept_route_state(solution_ctx.routes.get_mut(route_index).unwrap());
    }

    fn accept_route_state(&self, ctx: &mut RouteContext) {
        Self::recalculate_states(ctx);
    }

    fn accept_solution_state(&self, ctx: &mut SolutionContext) {
        ctx.routes.iter_mut().for_each(|route_ctx| {
            Self::recalculate_states(route_ctx);
        })
    }

    fn get_constraints(&self) -> Iter<ConstraintVariant> {
        self.constraints.iter()
    }
}

struct CapacityHardRouteConstraint {
    code: i32,
}

impl HardRouteConstraint for CapacityHardRouteConstraint {
    fn evaluate_job(
        &self,
        _: &SolutionContext,
        ctx: &RouteContext,
        job: &Job,
    ) -> Option<RouteConstraintViolation> {
        let capacity = &ctx.route().vehicle.capacity;
        let demand = match job {
            Job::Service(service) => service.demand,
            Job::Shipment(shipment) => shipment.pickup_demand(),
        };

        let can_handle =
            CapacityConstraintModule::has_demand_violation(ctx.state(), 0, capacity, &demand, true).is_none();

        if can_handle {
            None
        } else {
            Some(RouteConstraintViolation { code: self.code })
        }
    }
}

struct CapacityHardActivityConstraint {
    code: i32,
}

impl HardActivityConstraint for CapacityHardActivityConstraint {
    fn evaluate_activity(
        &self,
        route_ctx: &RouteContext,
        activity_ctx: &ActivityContext,
    ) -> Option<ActivityConstraintViolation> {
        let capacity = &route_ctx.route().vehicle.capacity;
        let demand = &activity_ctx.target.demand;

        // a two stop job has dynamic demand which is not kept over the whole tour, so a failure
        // at this position does not block insertions at next ones
        let is_dynamic = activity_ctx.target.job.as_ref().map_or(false, |job| job.as_shipment().is_some());

        let violation = if is_dynamic {
            CapacityConstraintModule::has_demand_violation(
                route_ctx.state(),
                activity_ctx.index,
                capacity,
                demand,
                false,
            )
            .map(|_| false)
        } else {
            CapacityConstraintModule::has_demand_violation(
                route_ctx.state(),
                activity_ctx.index,
                capacity,
                demand,
                true,
            )
        };

        violation.map(|stopped| ActivityConstraintViolation { code: self.code, stopped })
    }
}
