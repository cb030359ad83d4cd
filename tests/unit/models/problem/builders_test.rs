use super::*;
use crate::helpers::models::problem::test_costs;

#[test]
fn can_build_service_with_defaults() {
    let service = ServiceBuilder::new("s1").with_location(Location::new(1., 2.)).build().unwrap();

    assert_eq!(service.data.id, "s1");
    assert_eq!(service.data.name, DEFAULT_JOB_NAME);
    assert_eq!(service.data.priority, 2);
    assert_eq!(service.place.location, Location::new(1., 2.));
    assert_eq!(service.place.duration, 0.);
    assert_eq!(service.place.times.as_slice(), &[TimeWindow::max()]);
}

#[test]
fn can_reject_invalid_service_definitions() {
    assert_eq!(
        ServiceBuilder::new("").with_location(Location::default()).build().err(),
        Some("job id should not be empty".into())
    );
    assert_eq!(
        ServiceBuilder::new("s1").with_location(Location::default()).with_priority(0).build().err(),
        Some("job 's1' has priority 0, expected a value in [1, 3] range".into())
    );
    assert_eq!(ServiceBuilder::new("s1").build().err(), Some("job 's1' has no location".into()));
    assert_eq!(
        ServiceBuilder::new("s1").with_location(Location::default()).with_duration(-1.).build().err(),
        Some("job 's1' has invalid duration: -1".into())
    );
    assert_eq!(
        ServiceBuilder::new("s1")
            .with_location(Location::default())
            .with_time_window(TimeWindow::new(10., 5.))
            .build()
            .err(),
        Some("'s1' has invalid time window: [10, 5]".into())
    );
    assert_eq!(
        ServiceBuilder::new("s1")
            .with_location(Location::default())
            .with_demand(Demand::delivery(Capacity::new(vec![-1])))
            .build()
            .err(),
        Some("'s1' has negative capacity dimension".into())
    );
}

#[test]
fn can_accept_boundary_priorities() {
    assert!(ServiceBuilder::new("s1").with_location(Location::default()).with_priority(1).build().is_ok());
    assert!(ServiceBuilder::new("s1").with_location(Location::default()).with_priority(3).build().is_ok());
    assert!(ServiceBuilder::new("s1").with_location(Location::default()).with_priority(4).build().is_err());
}

#[test]
fn can_accumulate_time_windows_keeping_addition_order() {
    let service = ServiceBuilder::new("s1")
        .with_location(Location::default())
        .with_time_window(TimeWindow::new(10., 20.))
        .with_time_window(TimeWindow::new(0., 5.))
        .build()
        .unwrap();

    assert_eq!(service.place.times.as_slice(), &[TimeWindow::new(10., 20.), TimeWindow::new(0., 5.)]);
}

#[test]
fn can_build_shipment_with_two_places() {
    let shipment = ShipmentBuilder::new("p1")
        .with_pickup_location(Location::new(1., 0.))
        .with_pickup_duration(2.)
        .with_delivery_location(Location::new(2., 0.))
        .with_delivery_time_window(TimeWindow::new(10., 20.))
        .with_load(Capacity::new(vec![3]))
        .build()
        .unwrap();

    assert_eq!(shipment.pickup.location, Location::new(1., 0.));
    assert_eq!(shipment.pickup.duration, 2.);
    assert_eq!(shipment.pickup.times.as_slice(), &[TimeWindow::max()]);
    assert_eq!(shipment.delivery.times.as_slice(), &[TimeWindow::new(10., 20.)]);
    assert_eq!(shipment.pickup_demand().pickup.1, Capacity::new(vec![3]));
    assert_eq!(shipment.delivery_demand().delivery.1, Capacity::new(vec![3]));
}

#[test]
fn can_reject_invalid_shipment_definitions() {
    assert_eq!(
        ShipmentBuilder::new("p1").with_delivery_location(Location::default()).build().err(),
        Some("job 'p1' has no location".into())
    );
    assert_eq!(
        ShipmentBuilder::new("p1")
            .with_pickup_location(Location::default())
            .with_delivery_location(Location::default())
            .with_load(Capacity::new(vec![-1]))
            .build()
            .err(),
        Some("'p1' has negative capacity dimension".into())
    );
}

#[test]
fn can_build_vehicle_with_closed_tour_by_default() {
    let vehicle = VehicleBuilder::new("v1").with_start(Location::new(1., 1.)).build().unwrap();

    assert_eq!(vehicle.start, Location::new(1., 1.));
    assert_eq!(vehicle.end, Some(Location::new(1., 1.)));
    assert_eq!(vehicle.time, TimeWindow::max());

    let vehicle =
        VehicleBuilder::new("v1").with_start(Location::new(1., 1.)).with_end(Location::new(2., 2.)).build().unwrap();
    assert_eq!(vehicle.end, Some(Location::new(2., 2.)));

    let vehicle = VehicleBuilder::new("v1").with_start(Location::new(1., 1.)).with_open_end().build().unwrap();
    assert_eq!(vehicle.end, None);
}

#[test]
fn can_reject_invalid_vehicle_definitions() {
    assert_eq!(
        VehicleBuilder::new("").with_start(Location::default()).build().err(),
        Some("vehicle id should not be empty".into())
    );
    assert_eq!(VehicleBuilder::new("v1").build().err(), Some("vehicle 'v1' has no start location".into()));
    assert_eq!(
        VehicleBuilder::new("v1").with_start(Location::default()).with_time(TimeWindow::new(-1., 10.)).build().err(),
        Some("'v1' has invalid time window: [-1, 10]".into())
    );
    assert_eq!(
        VehicleBuilder::new("v1")
            .with_start(Location::default())
            .with_capacity(Capacity::new(vec![1, -2]))
            .build()
            .err(),
        Some("'v1' has negative capacity dimension".into())
    );
    assert_eq!(
        VehicleBuilder::new("v1")
            .with_start(Location::default())
            .with_costs(VehicleCosts { fixed: -1., ..test_costs() })
            .build()
            .err(),
        Some("'v1' has a negative or non-finite cost".into())
    );
}
