use super::*;
use crate::helpers::models::problem::{test_service, test_service_at, test_shipment};
use crate::models::problem::EuclideanTransportCost;

#[test]
fn can_compare_jobs_by_id_only() {
    let left = test_service_at("job1", Location::new(0., 0.));
    let right = test_service_at("job1", Location::new(5., 5.));

    assert_eq!(left, right);

    let mut jobs = FxHashSet::default();
    jobs.insert(left);
    assert!(jobs.contains(&right));
}

#[test]
fn can_iterate_over_job_places() {
    let service = test_service_at("service", Location::new(1., 0.));
    let shipment = test_shipment("shipment", Location::new(2., 0.), Location::new(3., 0.), 1);

    assert_eq!(service.places().map(|place| place.location.x).collect::<Vec<_>>(), vec![1.]);
    assert_eq!(shipment.places().map(|place| place.location.x).collect::<Vec<_>>(), vec![2., 3.]);
}

#[test]
fn can_get_neighbors_sorted_by_distance_then_id() {
    let transport = EuclideanTransportCost::default();
    let jobs = Jobs::new(
        vec![
            test_service_at("s0", Location::new(0., 0.)),
            test_service_at("s1", Location::new(1., 0.)),
            test_service_at("s2", Location::new(2., 0.)),
            test_service_at("s3", Location::new(5., 0.)),
        ],
        &transport,
    );

    let neighbors = jobs
        .neighbors(&test_service("s1"))
        .map(|(job, distance)| (job.id().to_string(), distance))
        .collect::<Vec<_>>();

    assert_eq!(neighbors, vec![("s0".to_string(), 1.), ("s2".to_string(), 1.), ("s3".to_string(), 4.)]);
}

#[test]
fn can_use_closest_place_pair_as_job_distance() {
    let transport = EuclideanTransportCost::default();
    let jobs = Jobs::new(
        vec![
            test_shipment("shipment", Location::new(10., 0.), Location::new(0., 0.), 1),
            test_service_at("service", Location::new(9., 0.)),
        ],
        &transport,
    );

    let neighbors = jobs.neighbors(&test_service("service")).collect::<Vec<_>>();

    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].0.id(), "shipment");
    assert_eq!(neighbors[0].1, 1.);
}

#[test]
fn can_return_no_neighbors_for_unknown_job() {
    let transport = EuclideanTransportCost::default();
    let jobs = Jobs::new(vec![test_service("s1")], &transport);

    assert_eq!(jobs.neighbors(&test_service("unknown")).count(), 0);
}

#[test]
fn can_keep_original_job_order() {
    let transport = EuclideanTransportCost::default();
    let jobs = Jobs::new(vec![test_service("s2"), test_service("s1"), test_service("s3")], &transport);

    assert_eq!(jobs.size(), 3);
    assert_eq!(jobs.all().map(|job| job.id().to_string()).collect::<Vec<_>>(), vec!["s2", "s1", "s3"]);
}
