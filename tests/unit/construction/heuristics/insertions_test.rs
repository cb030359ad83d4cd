use super::*;
use crate::helpers::construction::create_route_ctx;
use crate::helpers::models::domain::{create_problem, get_customer_ids_from_routes, test_logger, test_random};
use crate::helpers::models::problem::{
    test_delivery_at, test_fleet, test_service, test_service_at, test_vehicle, test_vehicle_with_capacity,
};
use crate::helpers::models::solution::test_activity;
use crate::helpers::utils::create_test_environment;
use crate::models::common::{Location, TimeWindow};
use crate::models::problem::{FleetSize, ServiceBuilder};
use crate::models::solution::Registry;
use crate::utils::{Environment, Quota, ThreadPool};
use std::sync::Mutex;

fn make_success(cost: Cost, id: &str, route_index: usize, activity_index: usize) -> InsertionResult {
    let job = test_service(id);
    let route_ctx = create_route_ctx(&test_fleet(), "v1", vec![]);

    InsertionResult::make_success(cost, job.clone(), vec![(test_activity(&job), activity_index)], &route_ctx, route_index)
}

parameterized_test! {can_choose_best_result, (left_cost, right_cost, expected_cost), {
    can_choose_best_result_impl(left_cost, right_cost, expected_cost);
}}

can_choose_best_result! {
    case_01_success_over_failure: (Some(10.), None, Some(10.)),
    case_02_failure_under_success: (None, Some(10.), Some(10.)),
    case_03_cheaper_success: (Some(5.), Some(10.), Some(5.)),
    case_04_two_failures: (None, None, None),
}

fn can_choose_best_result_impl(left_cost: Option<Cost>, right_cost: Option<Cost>, expected_cost: Option<Cost>) {
    let create = |cost: Option<Cost>| match cost {
        Some(cost) => make_success(cost, "job", 0, 0),
        None => InsertionResult::make_failure(),
    };

    let result = InsertionResult::choose_best_result(create(left_cost), create(right_cost));

    assert_eq!(result.as_success().map(|success| success.cost), expected_cost);
}

#[test]
fn can_prefer_coded_failure_over_unknown() {
    let get_code = |result: InsertionResult| match result {
        InsertionResult::Failure(failure) => failure.constraint,
        InsertionResult::Success(_) => unreachable!("expected insertion failure"),
    };

    let result = InsertionResult::choose_best_result(
        InsertionResult::make_failure(),
        InsertionResult::make_failure_with_code(3, true, None),
    );
    assert_eq!(get_code(result), 3);

    let result = InsertionResult::choose_best_result(
        InsertionResult::make_failure_with_code(3, true, None),
        InsertionResult::make_failure(),
    );
    assert_eq!(get_code(result), 3);
}

parameterized_test! {can_break_success_ties_deterministically, (left, right, expected), {
    can_break_success_ties_deterministically_impl(left, right, expected);
}}

can_break_success_ties_deterministically! {
    case_01_by_cost: ((1., 0, 0, "a"), (2., 0, 0, "a"), Ordering::Less),
    case_02_by_route_index: ((1., 1, 0, "a"), (1., 0, 0, "a"), Ordering::Greater),
    case_03_by_activity_index: ((1., 0, 0, "a"), (1., 0, 1, "a"), Ordering::Less),
    case_04_by_job_id: ((1., 0, 0, "b"), (1., 0, 0, "a"), Ordering::Greater),
    case_05_all_equal: ((1., 0, 0, "a"), (1., 0, 0, "a"), Ordering::Equal),
}

fn can_break_success_ties_deterministically_impl(
    left: (Cost, usize, usize, &str),
    right: (Cost, usize, usize, &str),
    expected: Ordering,
) {
    let create = |(cost, route_index, activity_index, id): (Cost, usize, usize, &str)| {
        make_success(cost, id, route_index, activity_index).into_success().unwrap()
    };

    assert_eq!(compare_insertion_successes(&create(left), &create(right)), expected);
}

#[test]
fn can_insert_jobs_by_cheapest_cost() {
    let c1 = test_service_at("c1", Location::new(10., 0.));
    let c2: Job = ServiceBuilder::new("c2")
        .with_location(Location::new(5., 0.))
        .with_time_window(TimeWindow::new(50., 100.))
        .build()
        .unwrap()
        .into();
    let problem = create_problem(vec![test_vehicle("v1")], vec![c1, c2]);
    let insertion_ctx = InsertionContext::new(problem, create_test_environment());

    let result_ctx = InsertionHeuristic::default().process(
        insertion_ctx,
        &AllJobSelector::default(),
        &AllRouteSelector::default(),
        &BestResultSelector::default(),
    );

    assert!(result_ctx.solution.required.is_empty());
    assert!(result_ctx.solution.unassigned.is_empty());
    assert_eq!(get_customer_ids_from_routes(&result_ctx), vec![vec!["c1".to_string(), "c2".to_string()]]);
}

#[derive(Default)]
struct RecordingListener {
    upcoming: Mutex<Vec<String>>,
    inserted: Mutex<Vec<(String, Cost, Duration)>>,
}

impl InsertionListener for RecordingListener {
    fn before_job_insertion(&self, success: &InsertionSuccess) {
        self.upcoming.lock().unwrap().push(success.job.id().to_string());
    }

    fn job_inserted(&self, job: &Job, _route_ctx: &RouteContext, extra_cost: Cost, extra_time: Duration) {
        self.inserted.lock().unwrap().push((job.id().to_string(), extra_cost, extra_time));
    }
}

#[test]
fn can_notify_insertion_listeners() {
    let c1 = test_service_at("c1", Location::new(10., 0.));
    let c2: Job = ServiceBuilder::new("c2")
        .with_location(Location::new(5., 0.))
        .with_time_window(TimeWindow::new(50., 100.))
        .build()
        .unwrap()
        .into();
    let problem = create_problem(vec![test_vehicle("v1")], vec![c1, c2]);
    let insertion_ctx = InsertionContext::new(problem, create_test_environment());
    let listener = Arc::new(RecordingListener::default());
    let mut listeners = InsertionListeners::default();
    listeners.add(listener.clone());

    InsertionHeuristic::default().with_listeners(listeners).process(
        insertion_ctx,
        &AllJobSelector::default(),
        &AllRouteSelector::default(),
        &BestResultSelector::default(),
    );

    assert_eq!(*listener.upcoming.lock().unwrap(), vec!["c1".to_string(), "c2".to_string()]);
    assert_eq!(
        *listener.inserted.lock().unwrap(),
        vec![("c1".to_string(), 40., 20.), ("c2".to_string(), 35., 35.)]
    );
}

#[test]
fn can_keep_unassignable_job_in_unassigned() {
    let job = test_delivery_at("c1", Location::new(1., 0.), 10);
    let problem = create_problem(vec![test_vehicle_with_capacity("v1", 1)], vec![job.clone()]);
    let insertion_ctx = InsertionContext::new(problem, create_test_environment());
    let heuristic = InsertionHeuristic::default();

    let result_ctx = heuristic.process(
        insertion_ctx,
        &AllJobSelector::default(),
        &AllRouteSelector::default(),
        &BestResultSelector::default(),
    );
    assert!(result_ctx.solution.routes.is_empty());
    assert_eq!(result_ctx.solution.unassigned.get(&job).copied(), Some(2));

    let result_ctx = heuristic.process(
        result_ctx,
        &AllJobSelector::default(),
        &AllRouteSelector::default(),
        &BestResultSelector::default(),
    );
    assert!(result_ctx.solution.required.is_empty());
    assert_eq!(result_ctx.solution.unassigned.get(&job).copied(), Some(2));
}

#[test]
fn can_move_required_to_unassigned_when_no_routes_left() {
    let job = test_service("c1");
    let problem = create_problem(vec![test_vehicle("v1")], vec![job.clone()]);
    let mut insertion_ctx = InsertionContext::new(problem.clone(), create_test_environment());
    insertion_ctx.solution.registry = Registry::new(&problem.fleet, FleetSize::Finite);
    let vehicle = problem.fleet.vehicles.first().cloned().unwrap();
    insertion_ctx.solution.registry.use_vehicle(&vehicle);

    let result_ctx = InsertionHeuristic::default().process(
        insertion_ctx,
        &AllJobSelector::default(),
        &AllRouteSelector::default(),
        &BestResultSelector::default(),
    );

    assert!(result_ctx.solution.required.is_empty());
    assert_eq!(result_ctx.solution.unassigned.get(&job).copied(), Some(-1));
}

struct AlwaysReached;

impl Quota for AlwaysReached {
    fn is_reached(&self) -> bool {
        true
    }
}

#[test]
fn can_stop_insertion_when_quota_is_reached() {
    let job = test_service("c1");
    let problem = create_problem(vec![test_vehicle("v1")], vec![job.clone()]);
    let environment =
        Arc::new(Environment::new(test_random(), Some(Arc::new(AlwaysReached)), ThreadPool::new(4), test_logger()));
    let insertion_ctx = InsertionContext::new(problem, environment);

    let result_ctx = InsertionHeuristic::default().process(
        insertion_ctx,
        &AllJobSelector::default(),
        &AllRouteSelector::default(),
        &BestResultSelector::default(),
    );

    assert!(result_ctx.solution.routes.is_empty());
    assert_eq!(result_ctx.solution.unassigned.get(&job).copied(), Some(0));
}
