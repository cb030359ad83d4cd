#[cfg(test)]
#[path = "../../../tests/unit/models/solution/registry_test.rs"]
mod registry_test;

use crate::models::problem::{Fleet, FleetSize, Vehicle};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Specifies an entity responsible for vehicle usage tracking.
pub struct Registry {
    all: Vec<Arc<Vehicle>>,
    used: FxHashSet<String>,
    fleet_size: FleetSize,
}

impl Registry {
    /// Creates a new instance of `Registry`.
    pub fn new(fleet: &Fleet, fleet_size: FleetSize) -> Self {
        Self { all: fleet.vehicles.clone(), used: FxHashSet::default(), fleet_size }
    }

    /// Marks vehicle as used. Has no effect for the infinite fleet.
    pub fn use_vehicle(&mut self, vehicle: &Arc<Vehicle>) {
        if self.fleet_size == FleetSize::Finite {
            self.used.insert(vehicle.id.clone());
        }
    }

    /// Marks vehicle as available again.
    pub fn free_vehicle(&mut self, vehicle: &Arc<Vehicle>) {
        self.used.remove(vehicle.id.as_str());
    }

    /// Returns vehicles which can still start a new tour, in the original fleet order.
    pub fn next(&self) -> impl Iterator<Item = Arc<Vehicle>> + '_ {
        self.all.iter().filter(move |vehicle| !self.used.contains(vehicle.id.as_str())).cloned()
    }

    /// Creates a copy of the registry.
    pub fn deep_copy(&self) -> Self {
        Self { all: self.all.clone(), used: self.used.clone(), fleet_size: self.fleet_size }
    }
}
