#[cfg(test)]
#[path = "../../tests/unit/models/domain_test.rs"]
mod domain_test;

use crate::construction::constraints::{
    CapacityConstraintModule, ConstraintModule, ConstraintPipeline, SkillsConstraintModule, TransportConstraintModule,
    CAPACITY_CONSTRAINT_CODE, SKILLS_CONSTRAINT_CODE, TIME_CONSTRAINT_CODE,
};
use crate::models::common::Location;
use crate::models::problem::{
    ActivityCost, EuclideanTransportCost, Fleet, FleetSize, Job, Jobs, SimpleActivityCost, TransportCost, Vehicle,
};
use crate::models::solution::Route;
use crate::utils::GenericResult;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Defines a vehicle routing problem.
pub struct Problem {
    /// Specifies used fleet.
    pub fleet: Arc<Fleet>,
    /// Specifies all jobs.
    pub jobs: Arc<Jobs>,
    /// Specifies how many tours each fleet vehicle can serve.
    pub fleet_size: FleetSize,
    /// Specifies constraints pipeline used to check insertion feasibility.
    pub constraint: Arc<ConstraintPipeline>,
    /// Specifies activity costs.
    pub activity: Arc<dyn ActivityCost + Send + Sync>,
    /// Specifies transport costs.
    pub transport: Arc<dyn TransportCost + Send + Sync>,
}

/// Represents a solution of the vehicle routing problem.
pub struct Solution {
    /// A list of routes, each one serving at least one job.
    pub routes: Vec<Route>,
    /// Jobs which could not be assigned, with the reason code of the last insertion attempt.
    pub unassigned: FxHashMap<Job, i32>,
}

/// Provides the way to assemble a vehicle routing problem.
pub struct ProblemBuilder {
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
    fleet_size: FleetSize,
    transport: Option<Arc<dyn TransportCost + Send + Sync>>,
    activity: Option<Arc<dyn ActivityCost + Send + Sync>>,
    modules: Vec<Arc<dyn ConstraintModule + Send + Sync>>,
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self {
            jobs: Default::default(),
            vehicles: Default::default(),
            fleet_size: Default::default(),
            transport: None,
            activity: None,
            modules: Default::default(),
        }
    }
}

impl ProblemBuilder {
    /// Adds a job to the problem.
    pub fn add_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Adds multiple jobs to the problem.
    pub fn add_jobs<I: IntoIterator<Item = Job>>(mut self, jobs: I) -> Self {
        self.jobs.extend(jobs);
        self
    }

    /// Adds a vehicle to the problem.
    pub fn add_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Sets fleet size, `FleetSize::Infinite` is used by default.
    pub fn with_fleet_size(mut self, fleet_size: FleetSize) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    /// Sets transport costs, straight line distance is used by default.
    pub fn with_transport(mut self, transport: Arc<dyn TransportCost + Send + Sync>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets activity costs.
    pub fn with_activity(mut self, activity: Arc<dyn ActivityCost + Send + Sync>) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Adds an extra constraint module on top of the default ones.
    pub fn with_constraint_module(mut self, module: Arc<dyn ConstraintModule + Send + Sync>) -> Self {
        self.modules.push(module);
        self
    }

    /// Builds a problem definition.
    pub fn build(self) -> GenericResult<Problem> {
        check_unique_ids("job", self.jobs.iter().map(|job| job.id()))?;
        check_unique_ids("vehicle", self.vehicles.iter().map(|vehicle| vehicle.id.as_str()))?;

        let transport = self.transport.unwrap_or_else(|| Arc::new(EuclideanTransportCost::default()));
        let activity = self.activity.unwrap_or_else(|| Arc::new(SimpleActivityCost::default()));

        probe_transport(transport.as_ref(), &self.jobs, &self.vehicles)?;

        let fleet = Arc::new(Fleet::new(self.vehicles.into_iter().map(Arc::new).collect()));
        let jobs = Arc::new(Jobs::new(self.jobs, transport.as_ref()));

        let mut constraint = ConstraintPipeline::default();
        constraint.add_module(Arc::new(SkillsConstraintModule::new(SKILLS_CONSTRAINT_CODE)));
        constraint.add_module(Arc::new(CapacityConstraintModule::new(CAPACITY_CONSTRAINT_CODE)));
        constraint
            .add_module(Arc::new(TransportConstraintModule::new(activity.clone(), transport.clone(), TIME_CONSTRAINT_CODE)));
        self.modules.into_iter().for_each(|module| {
            constraint.add_module(module);
        });

        Ok(Problem {
            fleet,
            jobs,
            fleet_size: self.fleet_size,
            constraint: Arc::new(constraint),
            activity,
            transport,
        })
    }
}

fn check_unique_ids<'a, I: Iterator<Item = &'a str>>(entity: &str, ids: I) -> GenericResult<()> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(format!("duplicate {entity} id: '{id}'").into());
        }
    }

    Ok(())
}

/// Checks that transport costs are finite for the locations present in the problem.
fn probe_transport(
    transport: &(dyn TransportCost + Send + Sync),
    jobs: &[Job],
    vehicles: &[Vehicle],
) -> GenericResult<()> {
    let locations: Vec<Location> = vehicles
        .iter()
        .flat_map(|vehicle| std::iter::once(vehicle.start).chain(vehicle.end))
        .chain(jobs.iter().flat_map(|job| job.places().map(|place| place.location)))
        .collect();

    if let Some(origin) = locations.first().copied() {
        for location in locations.iter() {
            let distance = transport.distance(origin, *location);
            let duration = transport.duration(origin, *location);
            if !distance.is_finite() || !duration.is_finite() {
                return Err(format!(
                    "transport costs are not finite between ({}, {}) and ({}, {})",
                    origin.x, origin.y, location.x, location.y
                )
                .into());
            }
        }
    }

    Ok(())
}
