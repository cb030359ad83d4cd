use super::*;
use crate::helpers::models::domain::create_problem;
use crate::helpers::models::problem::{
    test_costs, test_delivery_at, test_service_at, test_shipment, test_vehicle, test_vehicle_at,
    test_vehicle_with_capacity,
};
use crate::helpers::utils::create_test_environment;
use crate::models::common::Location;
use crate::models::problem::{ServiceBuilder, Vehicle, VehicleBuilder};
use std::sync::Arc;

fn create_test_ctx(vehicles: Vec<Vehicle>, jobs: Vec<Job>) -> InsertionContext {
    let problem = create_problem(vehicles, jobs);

    InsertionContext::new_empty(problem, create_test_environment())
}

#[test]
fn can_insert_service_into_empty_route() {
    let job = test_service_at("s1", Location::new(5., 0.));
    let insertion_ctx = create_test_ctx(vec![test_vehicle("v1")], vec![job.clone()]);

    let result = evaluate_job_insertion(&job, &insertion_ctx);

    let success = result.as_success().expect("insertion should succeed");
    assert_eq!(success.cost, 20.);
    assert_eq!(success.route_index, 0);
    assert_eq!(success.activities.len(), 1);
    assert_eq!(success.activities[0].1, 0);
    assert_eq!(success.activities[0].0.place.location, Location::new(5., 0.));
    assert_eq!(success.job.id(), "s1");
}

#[test]
fn can_prefer_cheaper_route_for_insertion() {
    let job = test_service_at("s1", Location::new(90., 0.));
    let insertion_ctx = create_test_ctx(
        vec![test_vehicle("v1"), test_vehicle_at("v2", Location::new(100., 0.))],
        vec![job.clone()],
    );

    let result = evaluate_job_insertion(&job, &insertion_ctx);

    let success = result.as_success().expect("insertion should succeed");
    assert_eq!(success.route_index, 1);
    assert_eq!(success.context.route().vehicle.id, "v2");
    assert_eq!(success.cost, 40.);
}

#[test]
fn can_pick_feasible_time_window() {
    let job: Job = ServiceBuilder::new("s1")
        .with_location(Location::new(10., 0.))
        .with_time_window(TimeWindow::new(0., 5.))
        .with_time_window(TimeWindow::new(20., 30.))
        .build()
        .unwrap()
        .into();
    let insertion_ctx = create_test_ctx(vec![test_vehicle("v1")], vec![job.clone()]);

    let result = evaluate_job_insertion(&job, &insertion_ctx);

    let success = result.as_success().expect("insertion should succeed");
    assert_eq!(success.activities[0].0.place.time, TimeWindow::new(20., 30.));
}

#[test]
fn can_report_time_violation_for_unreachable_job() {
    let vehicle = VehicleBuilder::new("v1")
        .with_start(Location::new(0., 0.))
        .with_costs(test_costs())
        .with_time(TimeWindow::new(0., 1000.))
        .build()
        .unwrap();
    let job: Job = ServiceBuilder::new("s1")
        .with_location(Location::new(5., 0.))
        .with_time_window(TimeWindow::new(2000., 3000.))
        .build()
        .unwrap()
        .into();
    let insertion_ctx = create_test_ctx(vec![vehicle], vec![job.clone()]);

    let result = evaluate_job_insertion(&job, &insertion_ctx);

    match result {
        InsertionResult::Failure(failure) => {
            assert_eq!(failure.constraint, 3);
            assert!(failure.stopped);
            assert_eq!(failure.job.map(|job| job.id().to_string()), Some("s1".to_string()));
        }
        InsertionResult::Success(_) => unreachable!("expected insertion failure"),
    }
}

#[test]
fn can_report_capacity_violation_when_demand_exceeds_vehicle() {
    let job = test_delivery_at("s1", Location::new(5., 0.), 10);
    let insertion_ctx = create_test_ctx(vec![test_vehicle_with_capacity("v1", 1)], vec![job.clone()]);

    let result = evaluate_job_insertion(&job, &insertion_ctx);

    match result {
        InsertionResult::Failure(failure) => {
            assert_eq!(failure.constraint, 2);
            assert!(failure.stopped);
        }
        InsertionResult::Success(_) => unreachable!("expected insertion failure"),
    }
}

#[test]
fn can_keep_better_alternative_result() {
    let job = test_service_at("s1", Location::new(5., 0.));
    let insertion_ctx = create_test_ctx(vec![test_vehicle("v1")], vec![job.clone()]);
    let route_ctx = insertion_ctx.solution.registry.next().map(RouteContext::new).next().unwrap();
    let alternative = InsertionResult::make_success(1., job.clone(), vec![], &route_ctx, 0);

    let result = evaluate_job_insertion_in_route(&job, &insertion_ctx, &route_ctx, 0, alternative);

    assert_eq!(result.as_success().map(|success| success.cost), Some(1.));
}

#[test]
fn can_insert_shipment_with_ordered_stops() {
    let job = test_shipment("s1", Location::new(10., 0.), Location::new(20., 0.), 1);
    let insertion_ctx = create_test_ctx(vec![test_vehicle_with_capacity("v1", 2)], vec![job.clone()]);

    let result = evaluate_job_insertion(&job, &insertion_ctx);

    let success = result.as_success().expect("insertion should succeed");
    assert_eq!(success.cost, 80.);
    let stops = success
        .activities
        .iter()
        .map(|(activity, index)| (activity.place.location.x, *index))
        .collect::<Vec<_>>();
    assert_eq!(stops, vec![(10., 0), (20., 1)]);
}
