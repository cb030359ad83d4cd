use super::*;

#[test]
fn can_calculate_distance_between_locations() {
    assert_eq!(Location::new(0., 0.).distance_to(&Location::new(3., 4.)), 5.);
    assert_eq!(Location::new(1., 1.).distance_to(&Location::new(1., 1.)), 0.);
}

parameterized_test! {can_check_time_window_intersection, (left, right, expected), {
    can_check_time_window_intersection_impl(left, right, expected);
}}

can_check_time_window_intersection! {
    case_01_overlap: ((0., 10.), (5., 15.), true),
    case_02_touching: ((0., 10.), (10., 20.), true),
    case_03_inside: ((0., 10.), (2., 5.), true),
    case_04_disjoint: ((0., 10.), (11., 20.), false),
    case_05_disjoint_reversed: ((11., 20.), (0., 10.), false),
}

fn can_check_time_window_intersection_impl(left: (f64, f64), right: (f64, f64), expected: bool) {
    let left = TimeWindow::new(left.0, left.1);
    let right = TimeWindow::new(right.0, right.1);

    assert_eq!(left.intersects(&right), expected);
    assert_eq!(right.intersects(&left), expected);
}

#[test]
fn can_check_time_window_contains() {
    let time_window = TimeWindow::new(5., 10.);

    assert!(time_window.contains(5.));
    assert!(time_window.contains(7.));
    assert!(time_window.contains(10.));
    assert!(!time_window.contains(4.9));
    assert!(!time_window.contains(10.1));
}

#[test]
fn can_use_unlimited_time_window_as_default() {
    let time_window = TimeWindow::default();

    assert_eq!(time_window, TimeWindow::max());
    assert_eq!(time_window.start, 0.);
    assert_eq!(time_window.end, f64::MAX);
}

#[test]
fn can_compare_schedules() {
    assert_eq!(Schedule::new(1., 2.), Schedule::new(1., 2.));
    assert_ne!(Schedule::new(1., 2.), Schedule::new(1., 3.));
}
