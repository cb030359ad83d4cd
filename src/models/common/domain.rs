#[cfg(test)]
#[path = "../../../tests/unit/models/common/domain_test.rs"]
mod domain_test;

use crate::utils::compare_floats;
use std::cmp::Ordering;

/// Specifies a type for timestamp.
pub type Timestamp = f64;

/// Specifies a type for duration.
pub type Duration = f64;

/// Specifies a type for distance.
pub type Distance = f64;

/// Specifies a type for cost.
pub type Cost = f64;

/// Represents a location in two dimensional space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
    /// A coordinate on x axis.
    pub x: f64,
    /// A coordinate on y axis.
    pub y: f64,
}

impl Location {
    /// Creates a new instance of `Location`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns an euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> Distance {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Represents a time window.
#[derive(Clone, Copy, Debug)]
pub struct TimeWindow {
    /// Start of time window.
    pub start: Timestamp,
    /// End of time window.
    pub end: Timestamp,
}

impl TimeWindow {
    /// Creates a new instance of `TimeWindow`.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns unlimited time window.
    pub fn max() -> Self {
        Self { start: 0., end: f64::MAX }
    }

    /// Checks whether time window has intersection with another one.
    pub fn intersects(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks whether time window contains given time.
    pub fn contains(&self, time: Timestamp) -> bool {
        time >= self.start && time <= self.end
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::max()
    }
}

impl PartialEq<TimeWindow> for TimeWindow {
    fn eq(&self, other: &TimeWindow) -> bool {
        compare_floats(self.start, other.start) == Ordering::Equal
            && compare_floats(self.end, other.end) == Ordering::Equal
    }
}

impl Eq for TimeWindow {}

/// Represents a schedule.
#[derive(Clone, Debug)]
pub struct Schedule {
    /// Arrival time.
    pub arrival: Timestamp,
    /// Departure time.
    pub departure: Timestamp,
}

impl Schedule {
    /// Creates a new instance of `Schedule`.
    pub fn new(arrival: Timestamp, departure: Timestamp) -> Self {
        Self { arrival, departure }
    }
}

impl PartialEq<Schedule> for Schedule {
    fn eq(&self, other: &Schedule) -> bool {
        compare_floats(self.arrival, other.arrival) == Ordering::Equal
            && compare_floats(self.departure, other.departure) == Ordering::Equal
    }
}

impl Eq for Schedule {}
