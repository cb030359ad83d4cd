use crate::models::common::{Capacity, Cost, Location, TimeWindow};
use rustc_hash::FxHashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Specifies vehicle costs per unit.
#[derive(Clone, Debug)]
pub struct VehicleCosts {
    /// A fixed cost to use a vehicle.
    pub fixed: Cost,
    /// A cost per distance unit.
    pub per_distance: Cost,
    /// A cost per driving time unit.
    pub per_driving_time: Cost,
    /// A cost per waiting time unit.
    pub per_waiting_time: Cost,
    /// A cost per service time unit.
    pub per_service_time: Cost,
}

impl Default for VehicleCosts {
    fn default() -> Self {
        Self { fixed: 0., per_distance: 1., per_driving_time: 0., per_waiting_time: 0., per_service_time: 0. }
    }
}

/// Represents a vehicle.
#[derive(Debug)]
pub struct Vehicle {
    /// A vehicle id, unique within the problem.
    pub id: String,
    /// A vehicle capacity.
    pub capacity: Capacity,
    /// Skills the vehicle offers.
    pub skills: FxHashSet<String>,
    /// Vehicle costs.
    pub costs: VehicleCosts,
    /// A location where the tour starts.
    pub start: Location,
    /// A location where the tour ends. An empty value means an open tour.
    pub end: Option<Location>,
    /// A time window limiting the whole tour.
    pub time: TimeWindow,
}

impl PartialEq<Vehicle> for Vehicle {
    fn eq(&self, other: &Vehicle) -> bool {
        self.id == other.id
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Represents available vehicles.
pub struct Fleet {
    /// All fleet vehicles in the original order.
    pub vehicles: Vec<Arc<Vehicle>>,
}

impl Fleet {
    /// Creates a new instance of `Fleet`.
    pub fn new(vehicles: Vec<Arc<Vehicle>>) -> Self {
        Self { vehicles }
    }
}

/// Specifies how many tours each fleet vehicle can serve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FleetSize {
    /// Each vehicle can be used by at most one tour.
    Finite,
    /// Each vehicle can be used by any amount of tours.
    Infinite,
}

impl Default for FleetSize {
    fn default() -> Self {
        FleetSize::Infinite
    }
}
