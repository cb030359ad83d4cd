use super::*;
use crate::helpers::construction::create_route_ctx;
use crate::helpers::models::domain::{create_problem, get_sorted_customer_ids_from_jobs};
use crate::helpers::models::problem::{test_service_at, test_shipment, test_vehicle};
use crate::helpers::models::solution::{test_activity, test_shipment_activities};
use crate::helpers::solver::{create_default_refinement_ctx, generate_matrix_routes};
use crate::helpers::utils::create_test_environment_with_random;
use crate::helpers::utils::random::FakeRandom;
use crate::models::common::Location;

parameterized_test! {can_remove_random_jobs, (limits, ints, expected), {
    can_remove_random_jobs_impl(limits, ints, expected);
}}

can_remove_random_jobs! {
    case_01_same_route: (RemovalLimits { removed_activities_range: 2..3, affected_routes_range: 1..2 },
        vec![2, 1, 1, 3, 1, 3], vec!["c7", "c8"]),
    case_02_two_routes: (RemovalLimits { removed_activities_range: 2..3, affected_routes_range: 2..3 },
        vec![2, 2, 0, 1, 2, 1], vec!["c0", "c10"]),
}

fn can_remove_random_jobs_impl(limits: RemovalLimits, ints: Vec<i32>, expected: Vec<&str>) {
    let environment = create_test_environment_with_random(Arc::new(FakeRandom::new(ints, vec![])));
    let insertion_ctx = generate_matrix_routes(5, 3, environment.clone());
    let refinement_ctx = create_default_refinement_ctx(insertion_ctx.problem.clone(), environment);

    let insertion_ctx = RandomJobRemoval::new(limits).run(&refinement_ctx, insertion_ctx);

    assert_eq!(get_sorted_customer_ids_from_jobs(&insertion_ctx.solution.required), expected);
}

#[test]
fn can_remove_whole_shipment_at_once() {
    let shipment = test_shipment("s1", Location::new(1., 0.), Location::new(2., 0.), 1);
    let service = test_service_at("c1", Location::new(3., 0.));
    let problem = create_problem(vec![test_vehicle("v1")], vec![shipment.clone(), service.clone()]);
    let environment = create_test_environment_with_random(Arc::new(FakeRandom::new(vec![2, 1, 0, 1], vec![])));
    let mut insertion_ctx = InsertionContext::new_empty(problem.clone(), environment.clone());
    let (pickup, delivery) = test_shipment_activities(&shipment);
    let route_ctx = create_route_ctx(&problem.fleet, "v1", vec![pickup, delivery, test_activity(&service)]);
    insertion_ctx.solution.routes.push(route_ctx);
    let refinement_ctx = create_default_refinement_ctx(problem, environment);

    let limits = RemovalLimits { removed_activities_range: 2..3, affected_routes_range: 1..2 };
    let insertion_ctx = RandomJobRemoval::new(limits).run(&refinement_ctx, insertion_ctx);

    assert_eq!(get_sorted_customer_ids_from_jobs(&insertion_ctx.solution.required), vec!["s1"]);
    let tour = &insertion_ctx.solution.routes[0].route().tour;
    assert!(!tour.contains(&shipment));
    assert!(tour.contains(&service));
    assert_eq!(tour.job_activity_count(), 1);
}

#[test]
fn can_skip_routes_without_jobs_when_selecting_seed() {
    let job = test_service_at("c1", Location::new(5., 0.));
    let problem = create_problem(vec![test_vehicle("v1"), test_vehicle("v2")], vec![job.clone()]);
    let environment = create_test_environment_with_random(Arc::new(FakeRandom::new(vec![1, 1, 0, 1], vec![])));
    let mut insertion_ctx = InsertionContext::new_empty(problem.clone(), environment.clone());
    insertion_ctx.solution.routes.push(create_route_ctx(&problem.fleet, "v1", vec![]));
    insertion_ctx.solution.routes.push(create_route_ctx(&problem.fleet, "v2", vec![test_activity(&job)]));
    let refinement_ctx = create_default_refinement_ctx(problem, environment);

    let limits = RemovalLimits { removed_activities_range: 1..2, affected_routes_range: 1..2 };
    let insertion_ctx = RandomJobRemoval::new(limits).run(&refinement_ctx, insertion_ctx);

    assert_eq!(get_sorted_customer_ids_from_jobs(&insertion_ctx.solution.required), vec!["c1"]);
    assert!(!insertion_ctx.solution.routes[1].route().tour.has_jobs());
}
