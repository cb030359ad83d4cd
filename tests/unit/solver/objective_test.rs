use super::*;
use crate::helpers::construction::{create_insertion_context, create_route_ctx};
use crate::helpers::models::domain::create_problem;
use crate::helpers::models::problem::{fixed_costs, test_service, test_service_at, test_vehicle};
use crate::helpers::models::solution::test_activity;
use crate::helpers::utils::create_test_environment;
use crate::models::common::{Location, TimeWindow};
use crate::models::problem::{Job, ServiceBuilder, VehicleBuilder};

fn create_service_with_priority(id: &str, priority: i32) -> Job {
    ServiceBuilder::new(id).with_location(Location::default()).with_priority(priority).build().unwrap().into()
}

#[test]
fn can_sum_actual_and_penalty_costs() {
    let cost = ObjectiveCost::new(10., 5.);

    assert_eq!(cost.total(), 15.);
}

#[test]
fn can_estimate_empty_solution() {
    let problem = create_problem(vec![test_vehicle("v1")], vec![test_service("c1")]);
    let insertion_ctx = InsertionContext::new_empty(problem, create_test_environment());

    let cost = PenalizeUnassigned::default().estimate(&insertion_ctx);

    assert_eq!(cost.actual, 0.);
    assert_eq!(cost.penalty, 0.);
}

#[test]
fn can_estimate_transport_costs_of_routes() {
    let jobs = vec![test_service_at("c1", Location::new(10., 0.)), test_service_at("c2", Location::new(20., 0.))];
    let problem = create_problem(vec![test_vehicle("v1")], jobs.clone());
    let routes = vec![create_route_ctx(&problem.fleet, "v1", jobs.iter().map(test_activity).collect())];
    let insertion_ctx = create_insertion_context(problem, routes, create_test_environment());

    let cost = PenalizeUnassigned::default().estimate(&insertion_ctx);

    assert_eq!(cost.actual, 80.);
    assert_eq!(cost.penalty, 0.);
}

#[test]
fn can_estimate_waiting_and_service_costs() {
    let job: Job = ServiceBuilder::new("c1")
        .with_location(Location::new(10., 0.))
        .with_time_window(TimeWindow::new(20., 30.))
        .with_duration(5.)
        .build()
        .unwrap()
        .into();
    let problem = create_problem(vec![test_vehicle("v1")], vec![job.clone()]);
    let routes = vec![create_route_ctx(&problem.fleet, "v1", vec![test_activity(&job)])];
    let insertion_ctx = create_insertion_context(problem, routes, create_test_environment());

    let cost = PenalizeUnassigned::default().estimate(&insertion_ctx);

    assert_eq!(cost.actual, 55.);
}

#[test]
fn can_include_fixed_vehicle_cost() {
    let job = test_service_at("c1", Location::new(10., 0.));
    let vehicle = VehicleBuilder::new("v1").with_start(Location::default()).with_costs(fixed_costs()).build().unwrap();
    let problem = create_problem(vec![vehicle], vec![job.clone()]);
    let routes = vec![create_route_ctx(&problem.fleet, "v1", vec![test_activity(&job)])];
    let insertion_ctx = create_insertion_context(problem, routes, create_test_environment());

    let cost = PenalizeUnassigned::default().estimate(&insertion_ctx);

    assert_eq!(cost.actual, 140.);
}

parameterized_test! {can_penalize_unassigned_jobs_by_priority, (priority, expected), {
    can_penalize_unassigned_jobs_by_priority_impl(priority, expected);
}}

can_penalize_unassigned_jobs_by_priority! {
    case_01_high: (1, 3000.),
    case_02_normal: (2, 2000.),
    case_03_low: (3, 1000.),
}

fn can_penalize_unassigned_jobs_by_priority_impl(priority: i32, expected: f64) {
    let job = create_service_with_priority("c1", priority);
    let problem = create_problem(vec![test_vehicle("v1")], vec![job.clone()]);
    let mut insertion_ctx = InsertionContext::new_empty(problem, create_test_environment());
    insertion_ctx.solution.unassigned.insert(job, 0);

    let cost = PenalizeUnassigned::default().estimate(&insertion_ctx);

    assert_eq!(cost.actual, 0.);
    assert_eq!(cost.penalty, expected);
}

#[test]
fn can_use_custom_penalty_base() {
    let job = create_service_with_priority("c1", 2);
    let problem = create_problem(vec![test_vehicle("v1")], vec![job.clone()]);
    let mut insertion_ctx = InsertionContext::new_empty(problem, create_test_environment());
    insertion_ctx.solution.unassigned.insert(job, 0);

    let cost = PenalizeUnassigned::new(10.).estimate(&insertion_ctx);

    assert_eq!(cost.penalty, 20.);
}
