#[cfg(test)]
#[path = "../../../tests/unit/models/problem/costs_test.rs"]
mod costs_test;

use crate::models::common::{Cost, Distance, Duration, Location, Timestamp};
use crate::models::problem::Vehicle;
use crate::models::solution::Activity;
use crate::utils::GenericResult;

/// Provides the way to get activity costs and time estimates.
pub trait ActivityCost {
    /// Returns cost to perform activity.
    fn cost(&self, vehicle: &Vehicle, activity: &Activity, arrival: Timestamp) -> Cost {
        let waiting = if activity.place.time.start > arrival { activity.place.time.start - arrival } else { 0. };
        let service = activity.place.duration;

        waiting * vehicle.costs.per_waiting_time + service * vehicle.costs.per_service_time
    }

    /// Estimates departure time for activity and actual arrival time.
    fn estimate_departure(&self, vehicle: &Vehicle, activity: &Activity, arrival: Timestamp) -> Timestamp;

    /// Estimates arrival time for activity and next departure time.
    fn estimate_arrival(&self, vehicle: &Vehicle, activity: &Activity, departure: Timestamp) -> Timestamp;
}

/// An activity cost implementation which counts waiting before the time window
/// and service within it.
#[derive(Default)]
pub struct SimpleActivityCost {}

impl ActivityCost for SimpleActivityCost {
    fn estimate_departure(&self, _: &Vehicle, activity: &Activity, arrival: Timestamp) -> Timestamp {
        arrival.max(activity.place.time.start) + activity.place.duration
    }

    fn estimate_arrival(&self, _: &Vehicle, activity: &Activity, departure: Timestamp) -> Timestamp {
        activity.place.time.end.min(departure - activity.place.duration)
    }
}

/// Provides the way to get routing information for the locations of the problem.
pub trait TransportCost {
    /// Returns travelling cost between two locations for given vehicle.
    fn cost(&self, vehicle: &Vehicle, from: Location, to: Location) -> Cost {
        self.distance(from, to) * vehicle.costs.per_distance + self.duration(from, to) * vehicle.costs.per_driving_time
    }

    /// Returns travel duration between two locations.
    fn duration(&self, from: Location, to: Location) -> Duration;

    /// Returns travel distance between two locations.
    fn distance(&self, from: Location, to: Location) -> Distance;
}

/// A transport cost implementation which computes straight line distance between
/// two locations and derives duration from it using a fixed speed.
pub struct EuclideanTransportCost {
    speed: f64,
}

impl EuclideanTransportCost {
    /// Creates a new instance of `EuclideanTransportCost` with a given speed.
    pub fn new(speed: f64) -> GenericResult<Self> {
        if !speed.is_finite() || speed <= 0. {
            return Err(format!("speed should be positive and finite, got: {speed}").into());
        }

        Ok(Self { speed })
    }
}

impl Default for EuclideanTransportCost {
    fn default() -> Self {
        Self { speed: 1. }
    }
}

impl TransportCost for EuclideanTransportCost {
    fn duration(&self, from: Location, to: Location) -> Duration {
        from.distance_to(&to) / self.speed
    }

    fn distance(&self, from: Location, to: Location) -> Distance {
        from.distance_to(&to)
    }
}
