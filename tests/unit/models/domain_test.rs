use super::*;
use crate::construction::constraints::{ConstraintVariant, HardRouteConstraint, RouteConstraintViolation};
use crate::construction::heuristics::{RouteContext, SolutionContext};
use crate::helpers::construction::create_empty_solution_context;
use crate::helpers::models::problem::{test_service, test_service_at, test_vehicle};
use crate::models::common::{Distance, Duration};
use std::slice::Iter;

#[test]
fn can_build_problem_with_defaults() {
    let problem = ProblemBuilder::default()
        .add_vehicle(test_vehicle("v1"))
        .add_jobs(vec![test_service("s1"), test_service("s2")])
        .build()
        .unwrap();

    assert_eq!(problem.fleet_size, FleetSize::Infinite);
    assert_eq!(problem.fleet.vehicles.len(), 1);
    assert_eq!(problem.jobs.size(), 2);
}

#[test]
fn can_reject_duplicate_ids() {
    assert_eq!(
        ProblemBuilder::default()
            .add_vehicle(test_vehicle("v1"))
            .add_jobs(vec![test_service("s1"), test_service("s1")])
            .build()
            .err(),
        Some("duplicate job id: 's1'".into())
    );
    assert_eq!(
        ProblemBuilder::default()
            .add_vehicle(test_vehicle("v1"))
            .add_vehicle(test_vehicle("v1"))
            .add_job(test_service("s1"))
            .build()
            .err(),
        Some("duplicate vehicle id: 'v1'".into())
    );
}

struct BrokenTransport {}

impl TransportCost for BrokenTransport {
    fn duration(&self, from: Location, to: Location) -> Duration {
        self.distance(from, to)
    }

    fn distance(&self, _: Location, to: Location) -> Distance {
        if to.x > 1. {
            f64::NAN
        } else {
            0.
        }
    }
}

#[test]
fn can_reject_non_finite_transport_costs() {
    let result = ProblemBuilder::default()
        .add_vehicle(test_vehicle("v1"))
        .add_job(test_service_at("s1", Location::new(5., 5.)))
        .with_transport(Arc::new(BrokenTransport {}))
        .build();

    assert_eq!(result.err(), Some("transport costs are not finite between (0, 0) and (5, 5)".into()));
}

struct RejectAll {
    constraints: Vec<ConstraintVariant>,
}

impl RejectAll {
    fn new(code: i32) -> Self {
        struct Inner(i32);
        impl HardRouteConstraint for Inner {
            fn evaluate_job(&self, _: &SolutionContext, _: &RouteContext, _: &Job) -> Option<RouteConstraintViolation> {
                Some(RouteConstraintViolation { code: self.0 })
            }
        }

        Self { constraints: vec![ConstraintVariant::HardRoute(Arc::new(Inner(code)))] }
    }
}

impl ConstraintModule for RejectAll {
    fn accept_insertion(&self, _: &mut SolutionContext, _: usize, _: &Job) {}

    fn accept_route_state(&self, _: &mut RouteContext) {}

    fn accept_solution_state(&self, _: &mut SolutionContext) {}

    fn get_constraints(&self) -> Iter<ConstraintVariant> {
        self.constraints.iter()
    }
}

#[test]
fn can_add_extra_constraint_module() {
    let problem = ProblemBuilder::default()
        .add_vehicle(test_vehicle("v1"))
        .add_job(test_service("s1"))
        .with_constraint_module(Arc::new(RejectAll::new(42)))
        .build()
        .unwrap();

    let solution_ctx = create_empty_solution_context(&problem.fleet);
    let route_ctx = RouteContext::new(problem.fleet.vehicles[0].clone());
    let job = problem.jobs.all().next().unwrap();

    assert_eq!(
        problem.constraint.evaluate_hard_route(&solution_ctx, &route_ctx, &job),
        Some(RouteConstraintViolation { code: 42 })
    );
}
