#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/transport_test.rs"]
mod transport_test;

use crate::construction::constraints::*;
use crate::construction::heuristics::{custom_activity_state, custom_tour_state, RouteContext, SolutionContext};
use crate::models::common::{Cost, Distance, Duration, Timestamp, TimeWindow};
use crate::models::problem::{ActivityCost, Job, TransportCost};
use crate::models::solution::Activity;
use crate::utils::parallel_foreach_mut;
use std::slice::Iter;
use std::sync::Arc;

custom_activity_state!(LatestArrivalActivityState via LatestArrivalKey with get_latest_arrival, set_latest_arrivals of Timestamp);
custom_activity_state!(WaitingTimeActivityState via WaitingTimeKey with get_waiting_time, set_waiting_times of Timestamp);

custom_tour_state!(TotalDistanceTourState via TotalDistanceKey with get_total_distance, set_total_distance of Distance);
custom_tour_state!(TotalDurationTourState via TotalDurationKey with get_total_duration, set_total_duration of Duration);

/// A module which checks whether a vehicle can serve activities taking into account their time
/// windows. Also it is responsible for transport cost calculations.
pub struct TransportConstraintModule {
    constraints: Vec<ConstraintVariant>,
    activity: Arc<dyn ActivityCost + Send + Sync>,
    transport: Arc<dyn TransportCost + Send + Sync>,
}

impl ConstraintModule for TransportConstraintModule {
    fn accept_insertion(&self, solution_ctx: &mut SolutionContext, route_index: usize, _job: &Job) {
        self.accept_route_state(solution_ctx.routes.get_mut(route_index).unwrap());
    }

    fn accept_route_state(&self, ctx: &mut RouteContext) {
        let activity = self.activity.as_ref();
        let transport = self.transport.as_ref();

        Self::update_route_schedules(ctx, activity, transport);
        Self::update_route_states(ctx, activity, transport);
        Self::update_statistics(ctx, transport);
    }

    fn accept_solution_state(&self, ctx: &mut SolutionContext) {
        parallel_foreach_mut(&mut ctx.routes, |route_ctx| {
            let activity = self.activity.as_ref();
            let transport = self.transport.as_ref();

            Self::update_route_schedules(route_ctx, activity, transport);
            Self::update_route_states(route_ctx, activity, transport);
            Self::update_statistics(route_ctx, transport);
        })
    }

    fn get_constraints(&self) -> Iter<ConstraintVariant> {
        self.constraints.iter()
    }
}

impl TransportConstraintModule {
    /// Creates a new instance of `TransportConstraintModule`.
    pub fn new(
        activity: Arc<dyn ActivityCost + Send + Sync>,
        transport: Arc<dyn TransportCost + Send + Sync>,
        time_window_code: i32,
    ) -> Self {
        Self {
            constraints: vec![
                ConstraintVariant::HardRoute(Arc::new(TimeHardRouteConstraint { code: time_window_code })),
                ConstraintVariant::SoftRoute(Arc::new(RouteCostSoftRouteConstraint {})),
                ConstraintVariant::HardActivity(Arc::new(TimeHardActivityConstraint {
                    code: time_window_code,
                    activity: activity.clone(),
                    transport: transport.clone(),
                })),
                ConstraintVariant::SoftActivity(Arc::new(CostSoftActivityConstraint {
                    activity: activity.clone(),
                    transport: transport.clone(),
                })),
            ],
            activity,
            transport,
        }
    }

    fn update_route_schedules(
        route_ctx: &mut RouteContext,
        activity: &(dyn ActivityCost + Send + Sync),
        transport: &(dyn TransportCost + Send + Sync),
    ) {
        let init = {
            let start = route_ctx.route().tour.start().unwrap();
            (start.place.location, start.schedule.departure)
        };

        let vehicle = route_ctx.route().vehicle.clone();

        route_ctx.route_mut().tour.all_activities_mut().skip(1).fold(init, |(loc, dep), a| {
            a.schedule.arrival = dep + transport.duration(loc, a.place.location);
            a.schedule.departure = activity.estimate_departure(&vehicle, a, a.schedule.arrival);

            (a.place.location, a.schedule.departure)
        });
    }

    fn update_route_states(
        route_ctx: &mut RouteContext,
        activity: &(dyn ActivityCost + Send + Sync),
        transport: &(dyn TransportCost + Send + Sync),
    ) {
        // update latest arrival and waiting states of non-terminal (job) activities
        let (route, state) = route_ctx.as_mut();
        let vehicle = route.vehicle.as_ref();
        let total = route.tour.total();

        let init = (vehicle.time.end, vehicle.end.unwrap_or(vehicle.start), 0_f64);

        let mut latest_arrivals = vec![Timestamp::default(); total];
        let mut waiting_times = vec![Timestamp::default(); total];

        (0..total).rev().fold(init, |acc, idx| {
            let act = route.tour.get(idx).unwrap();

            if act.job.is_none() {
                latest_arrivals[idx] = act.place.time.end;
                waiting_times[idx] = acc.2;
                return acc;
            }

            let (end_time, prev_loc, waiting) = acc;
            let latest_departure = end_time - transport.duration(act.place.location, prev_loc);
            let latest_arrival_time = activity.estimate_arrival(vehicle, act, latest_departure);
            let future_waiting = waiting + (act.place.time.start - act.schedule.arrival).max(0.);

            latest_arrivals[idx] = latest_arrival_time;
            waiting_times[idx] = future_waiting;

            (latest_arrival_time, act.place.location, future_waiting)
        });

        state.set_latest_arrivals(latest_arrivals);
        state.set_waiting_times(waiting_times);
    }

    fn update_statistics(route_ctx: &mut RouteContext, transport: &(dyn TransportCost + Send + Sync)) {
        let (route, state) = route_ctx.as_mut();

        let start = route.tour.start().unwrap();
        let end = route.tour.end().unwrap();

        let total_dur = end.schedule.departure - start.schedule.departure;

        let init = (start.place.location, Distance::default());
        let (_, total_dist) = route.tour.all_activities().skip(1).fold(init, |(loc, total_dist), a| {
            (a.place.location, total_dist + transport.distance(loc, a.place.location))
        });

        state.set_total_distance(total_dist);
        state.set_total_duration(total_dur);
    }
}

struct TimeHardRouteConstraint {
    code: i32,
}

impl HardRouteConstraint for TimeHardRouteConstraint {
    fn evaluate_job(
        &self,
        _: &SolutionContext,
        ctx: &RouteContext,
        job: &Job,
    ) -> Option<RouteConstraintViolation> {
        let departure = ctx.route().tour.start().unwrap().schedule.departure;
        let shift = TimeWindow::new(departure, ctx.route().vehicle.time.end);

        let check_place = |place: &crate::models::problem::Place| place.times.iter().any(|time| time.intersects(&shift));

        let has_time_intersection = match job {
            Job::Service(service) => check_place(&service.place),
            Job::Shipment(shipment) => check_place(&shipment.pickup) && check_place(&shipment.delivery),
        };

        if has_time_intersection {
            None
        } else {
            Some(RouteConstraintViolation { code: self.code })
        }
    }
}

/// Checks time windows of vehicle and job.
struct TimeHardActivityConstraint {
    code: i32,
    activity: Arc<dyn ActivityCost + Send + Sync>,
    transport: Arc<dyn TransportCost + Send + Sync>,
}

impl TimeHardActivityConstraint {
    fn fail(&self) -> Option<ActivityConstraintViolation> {
        Some(ActivityConstraintViolation { code: self.code, stopped: true })
    }

    fn stop(&self) -> Option<ActivityConstraintViolation> {
        Some(ActivityConstraintViolation { code: self.code, stopped: false })
    }

    fn success(&self) -> Option<ActivityConstraintViolation> {
        None
    }
}

impl HardActivityConstraint for TimeHardActivityConstraint {
    fn evaluate_activity(
        &self,
        route_ctx: &RouteContext,
        activity_ctx: &ActivityContext,
    ) -> Option<ActivityConstraintViolation> {
        let vehicle = route_ctx.route().vehicle.as_ref();

        let prev = activity_ctx.prev;
        let target = activity_ctx.target;
        let next = activity_ctx.next;

        let departure = prev.schedule.departure;

        if vehicle.time.end < prev.place.time.start
            || vehicle.time.end < target.place.time.start
            || next.map_or(false, |next| vehicle.time.end < next.place.time.start)
        {
            return self.fail();
        }

        let (next_act_location, latest_arr_time_at_next) = if let Some(next) = next {
            // closed vrp
            let next_idx = activity_ctx.index + 1;
            (
                next.place.location,
                *route_ctx.state().get_latest_arrival(next_idx).unwrap_or(&next.place.time.end),
            )
        } else {
            // open vrp
            (target.place.location, target.place.time.end.min(vehicle.time.end))
        };

        let arr_time_at_next = departure + self.transport.duration(prev.place.location, next_act_location);

        if arr_time_at_next > latest_arr_time_at_next {
            return self.fail();
        }
        if target.place.time.start > latest_arr_time_at_next {
            return self.stop();
        }

        let arr_time_at_target = departure + self.transport.duration(prev.place.location, target.place.location);

        let latest_departure_at_target =
            latest_arr_time_at_next - self.transport.duration(target.place.location, next_act_location);

        let latest_arr_time_at_target =
            target.place.time.end.min(self.activity.estimate_arrival(vehicle, target, latest_departure_at_target));

        if arr_time_at_target > latest_arr_time_at_target {
            return self.stop();
        }

        if next.is_none() {
            return self.success();
        }

        let end_time_at_target = self.activity.estimate_departure(vehicle, target, arr_time_at_target);

        let arr_time_at_next = end_time_at_target + self.transport.duration(target.place.location, next_act_location);

        if arr_time_at_next > latest_arr_time_at_next {
            self.stop()
        } else {
            self.success()
        }
    }
}

/// Applies fixed cost for vehicle usage.
struct RouteCostSoftRouteConstraint {}

impl SoftRouteConstraint for RouteCostSoftRouteConstraint {
    fn estimate_job(&self, _: &SolutionContext, ctx: &RouteContext, _job: &Job) -> f64 {
        if ctx.route().tour.job_count() == 0 {
            ctx.route().vehicle.costs.fixed
        } else {
            0.
        }
    }
}

/// Calculates transportation costs.
struct CostSoftActivityConstraint {
    activity: Arc<dyn ActivityCost + Send + Sync>,
    transport: Arc<dyn TransportCost + Send + Sync>,
}

impl CostSoftActivityConstraint {
    fn analyze_route_leg(
        &self,
        route_ctx: &RouteContext,
        start: &Activity,
        end: &Activity,
        time: Timestamp,
    ) -> (Cost, Cost, Timestamp) {
        let vehicle = route_ctx.route().vehicle.as_ref();

        let arrival = time + self.transport.duration(start.place.location, end.place.location);
        let departure = self.activity.estimate_departure(vehicle, end, arrival);

        let transport_cost = self.transport.cost(vehicle, start.place.location, end.place.location);
        let activity_cost = self.activity.cost(vehicle, end, arrival);

        (transport_cost, activity_cost, departure)
    }
}

impl SoftActivityConstraint for CostSoftActivityConstraint {
    fn estimate_activity(&self, route_ctx: &RouteContext, activity_ctx: &ActivityContext) -> f64 {
        let prev = activity_ctx.prev;
        let target = activity_ctx.target;
        let next = activity_ctx.next;

        let (tp_cost_left, act_cost_left, dep_time_left) =
            self.analyze_route_leg(route_ctx, prev, target, prev.schedule.departure);

        let (tp_cost_right, act_cost_right, dep_time_right) = if let Some(next) = next {
            self.analyze_route_leg(route_ctx, target, next, dep_time_left)
        } else {
            (0., 0., 0.)
        };

        let new_costs = tp_cost_left + tp_cost_right + act_cost_left + act_cost_right;

        // no jobs yet or open vrp
        if !route_ctx.route().tour.has_jobs() || next.is_none() {
            return new_costs;
        }

        let next = next.unwrap();
        let next_idx = activity_ctx.index + 1;
        let waiting_time = *route_ctx.state().get_waiting_time(next_idx).unwrap_or(&0_f64);

        let (tp_cost_old, act_cost_old, dep_time_old) =
            self.analyze_route_leg(route_ctx, prev, next, prev.schedule.departure);

        let waiting_cost = waiting_time.min(0.0_f64.max(dep_time_right - dep_time_old))
            * route_ctx.route().vehicle.costs.per_waiting_time;

        let old_costs = tp_cost_old + act_cost_old + waiting_cost;

        new_costs - old_costs
    }
}
