#[cfg(test)]
#[path = "../../../tests/unit/models/problem/builders_test.rs"]
mod builders_test;

use crate::models::common::{Capacity, Demand, Duration, Location, TimeWindow};
use crate::models::problem::{JobData, Place, Service, Shipment, Vehicle, VehicleCosts, DEFAULT_JOB_NAME};
use crate::utils::{GenericError, GenericResult};
use rustc_hash::FxHashSet;
use tinyvec::TinyVec;

/// A default job priority.
const DEFAULT_PRIORITY: i32 = 2;

/// Provides the way to build a service job.
pub struct ServiceBuilder {
    id: String,
    name: String,
    location: Option<Location>,
    duration: Duration,
    times: TinyVec<[TimeWindow; 2]>,
    demand: Demand,
    skills: FxHashSet<String>,
    priority: i32,
}

impl ServiceBuilder {
    /// Creates a new instance of `ServiceBuilder` for a job with the given id.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: DEFAULT_JOB_NAME.to_string(),
            location: None,
            duration: 0.,
            times: TinyVec::new(),
            demand: Demand::default(),
            skills: FxHashSet::default(),
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Sets a user facing job name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Sets job location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets service duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Adds a time window. The first added window replaces the default unlimited one,
    /// all further windows extend the list.
    pub fn with_time_window(mut self, time: TimeWindow) -> Self {
        self.times.push(time);
        self
    }

    /// Sets job demand.
    pub fn with_demand(mut self, demand: Demand) -> Self {
        self.demand = demand;
        self
    }

    /// Adds a skill required to serve the job.
    pub fn with_skill(mut self, skill: &str) -> Self {
        self.skills.insert(skill.to_string());
        self
    }

    /// Sets job priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builds a service job.
    pub fn build(self) -> GenericResult<Service> {
        let data = build_job_data(self.id, self.name, self.skills, self.priority)?;
        let place = build_place(data.id.as_str(), self.location, self.duration, self.times)?;
        validate_demand(data.id.as_str(), &self.demand)?;

        Ok(Service { data, place, demand: self.demand })
    }
}

/// Provides the way to build a shipment job.
pub struct ShipmentBuilder {
    id: String,
    name: String,
    pickup_location: Option<Location>,
    pickup_duration: Duration,
    pickup_times: TinyVec<[TimeWindow; 2]>,
    delivery_location: Option<Location>,
    delivery_duration: Duration,
    delivery_times: TinyVec<[TimeWindow; 2]>,
    load: Capacity,
    skills: FxHashSet<String>,
    priority: i32,
}

impl ShipmentBuilder {
    /// Creates a new instance of `ShipmentBuilder` for a job with the given id.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: DEFAULT_JOB_NAME.to_string(),
            pickup_location: None,
            pickup_duration: 0.,
            pickup_times: TinyVec::new(),
            delivery_location: None,
            delivery_duration: 0.,
            delivery_times: TinyVec::new(),
            load: Capacity::default(),
            skills: FxHashSet::default(),
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Sets a user facing job name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Sets pickup location.
    pub fn with_pickup_location(mut self, location: Location) -> Self {
        self.pickup_location = Some(location);
        self
    }

    /// Sets pickup duration.
    pub fn with_pickup_duration(mut self, duration: Duration) -> Self {
        self.pickup_duration = duration;
        self
    }

    /// Adds a pickup time window.
    pub fn with_pickup_time_window(mut self, time: TimeWindow) -> Self {
        self.pickup_times.push(time);
        self
    }

    /// Sets delivery location.
    pub fn with_delivery_location(mut self, location: Location) -> Self {
        self.delivery_location = Some(location);
        self
    }

    /// Sets delivery duration.
    pub fn with_delivery_duration(mut self, duration: Duration) -> Self {
        self.delivery_duration = duration;
        self
    }

    /// Adds a delivery time window.
    pub fn with_delivery_time_window(mut self, time: TimeWindow) -> Self {
        self.delivery_times.push(time);
        self
    }

    /// Sets an amount moved from pickup to delivery stop.
    pub fn with_load(mut self, load: Capacity) -> Self {
        self.load = load;
        self
    }

    /// Adds a skill required to serve the job.
    pub fn with_skill(mut self, skill: &str) -> Self {
        self.skills.insert(skill.to_string());
        self
    }

    /// Sets job priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builds a shipment job.
    pub fn build(self) -> GenericResult<Shipment> {
        let data = build_job_data(self.id, self.name, self.skills, self.priority)?;
        let pickup = build_place(data.id.as_str(), self.pickup_location, self.pickup_duration, self.pickup_times)?;
        let delivery =
            build_place(data.id.as_str(), self.delivery_location, self.delivery_duration, self.delivery_times)?;
        validate_capacity(data.id.as_str(), &self.load)?;

        Ok(Shipment { data, pickup, delivery, load: self.load })
    }
}

/// Provides the way to build a vehicle.
pub struct VehicleBuilder {
    id: String,
    capacity: Capacity,
    skills: FxHashSet<String>,
    costs: VehicleCosts,
    start: Option<Location>,
    end: Option<Location>,
    open_end: bool,
    time: TimeWindow,
}

impl VehicleBuilder {
    /// Creates a new instance of `VehicleBuilder` for a vehicle with the given id.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            capacity: Capacity::default(),
            skills: FxHashSet::default(),
            costs: VehicleCosts::default(),
            start: None,
            end: None,
            open_end: false,
            time: TimeWindow::max(),
        }
    }

    /// Sets vehicle capacity.
    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// Adds a skill the vehicle offers.
    pub fn with_skill(mut self, skill: &str) -> Self {
        self.skills.insert(skill.to_string());
        self
    }

    /// Sets vehicle costs.
    pub fn with_costs(mut self, costs: VehicleCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Sets a location where the tour starts.
    pub fn with_start(mut self, start: Location) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets a location where the tour ends. When nothing is set, the tour ends
    /// at the start location.
    pub fn with_end(mut self, end: Location) -> Self {
        self.end = Some(end);
        self
    }

    /// Marks the tour as open: the vehicle does not come back after its last stop.
    pub fn with_open_end(mut self) -> Self {
        self.open_end = true;
        self
    }

    /// Sets a time window limiting the whole tour.
    pub fn with_time(mut self, time: TimeWindow) -> Self {
        self.time = time;
        self
    }

    /// Builds a vehicle.
    pub fn build(self) -> GenericResult<Vehicle> {
        if self.id.is_empty() {
            return Err("vehicle id should not be empty".into());
        }

        let start = self
            .start
            .ok_or_else(|| GenericError::from(format!("vehicle '{}' has no start location", self.id)))?;
        let end = if self.open_end { None } else { Some(self.end.unwrap_or(start)) };

        validate_time_window(self.id.as_str(), &self.time)?;
        validate_capacity(self.id.as_str(), &self.capacity)?;
        validate_costs(self.id.as_str(), &self.costs)?;

        Ok(Vehicle {
            id: self.id,
            capacity: self.capacity,
            skills: self.skills,
            costs: self.costs,
            start,
            end,
            time: self.time,
        })
    }
}

fn build_job_data(id: String, name: String, skills: FxHashSet<String>, priority: i32) -> GenericResult<JobData> {
    if id.is_empty() {
        return Err("job id should not be empty".into());
    }

    if !(1..=3).contains(&priority) {
        return Err(format!("job '{id}' has priority {priority}, expected a value in [1, 3] range").into());
    }

    Ok(JobData { id, name, skills, priority })
}

fn build_place(
    id: &str,
    location: Option<Location>,
    duration: Duration,
    mut times: TinyVec<[TimeWindow; 2]>,
) -> GenericResult<Place> {
    let location = location.ok_or_else(|| GenericError::from(format!("job '{id}' has no location")))?;

    if !duration.is_finite() || duration < 0. {
        return Err(format!("job '{id}' has invalid duration: {duration}").into());
    }

    if times.is_empty() {
        times.push(TimeWindow::max());
    }

    times.iter().try_for_each(|time| validate_time_window(id, time))?;

    Ok(Place { location, duration, times })
}

fn validate_time_window(id: &str, time: &TimeWindow) -> GenericResult<()> {
    if time.start.is_nan() || time.end.is_nan() || time.start > time.end || time.start < 0. {
        return Err(format!("'{id}' has invalid time window: [{}, {}]", time.start, time.end).into());
    }

    Ok(())
}

fn validate_capacity(id: &str, capacity: &Capacity) -> GenericResult<()> {
    if !capacity.can_fit(&Capacity::default()) {
        return Err(format!("'{id}' has negative capacity dimension").into());
    }

    Ok(())
}

fn validate_demand(id: &str, demand: &Demand) -> GenericResult<()> {
    [demand.pickup.0, demand.pickup.1, demand.delivery.0, demand.delivery.1]
        .iter()
        .try_for_each(|capacity| validate_capacity(id, capacity))
}

fn validate_costs(id: &str, costs: &VehicleCosts) -> GenericResult<()> {
    let has_invalid = [costs.fixed, costs.per_distance, costs.per_driving_time, costs.per_waiting_time, costs.per_service_time]
        .iter()
        .any(|cost| !cost.is_finite() || *cost < 0.);

    if has_invalid {
        return Err(format!("'{id}' has a negative or non-finite cost").into());
    }

    Ok(())
}
