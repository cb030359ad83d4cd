#[cfg(test)]
#[path = "../../../tests/unit/models/problem/jobs_test.rs"]
mod jobs_test;

use crate::models::common::{Capacity, Demand, Distance, Duration, Location, TimeWindow};
use crate::models::problem::TransportCost;
use crate::utils::compare_floats;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::{Hash, Hasher};
use std::iter::once;
use std::sync::Arc;
use tinyvec::TinyVec;

/// A name used when no user facing name is set on a job.
pub const DEFAULT_JOB_NAME: &str = "no-name";

/// Represents a job place with its location, service duration and time windows
/// when it can be visited.
#[derive(Clone, Debug)]
pub struct Place {
    /// Location where job is performed.
    pub location: Location,
    /// Duration of the service.
    pub duration: Duration,
    /// Time windows when job can be started.
    pub times: TinyVec<[TimeWindow; 2]>,
}

/// Keeps essential properties shared by all job types.
#[derive(Clone, Debug)]
pub struct JobData {
    /// A job id, unique within the problem.
    pub id: String,
    /// A user facing job name.
    pub name: String,
    /// Skills required to serve the job.
    pub skills: FxHashSet<String>,
    /// A job priority in [1, 3] range, a lower value means a more important job.
    pub priority: i32,
}

/// A job with a single stop.
#[derive(Debug)]
pub struct Service {
    /// Common job properties.
    pub data: JobData,
    /// A place to visit.
    pub place: Place,
    /// A job demand.
    pub demand: Demand,
}

/// A job with linked pickup and delivery stops. Both stops are always kept in the same tour
/// with pickup served before delivery.
#[derive(Debug)]
pub struct Shipment {
    /// Common job properties.
    pub data: JobData,
    /// A pickup place.
    pub pickup: Place,
    /// A delivery place.
    pub delivery: Place,
    /// An amount moved from pickup to delivery stop.
    pub load: Capacity,
}

impl Shipment {
    /// Returns a demand of the pickup stop.
    pub fn pickup_demand(&self) -> Demand {
        Demand::shipment_pickup(self.load)
    }

    /// Returns a demand of the delivery stop.
    pub fn delivery_demand(&self) -> Demand {
        Demand::shipment_delivery(self.load)
    }
}

/// Represents a job variant.
#[derive(Clone, Debug)]
pub enum Job {
    /// A job with a single stop.
    Service(Arc<Service>),
    /// A job with linked pickup and delivery stops.
    Shipment(Arc<Shipment>),
}

impl Job {
    /// Returns service job if it is one, otherwise none.
    pub fn as_service(&self) -> Option<&Arc<Service>> {
        match self {
            Job::Service(service) => Some(service),
            _ => None,
        }
    }

    /// Returns shipment job if it is one, otherwise none.
    pub fn as_shipment(&self) -> Option<&Arc<Shipment>> {
        match self {
            Job::Shipment(shipment) => Some(shipment),
            _ => None,
        }
    }

    /// Returns common job properties.
    pub fn data(&self) -> &JobData {
        match self {
            Job::Service(service) => &service.data,
            Job::Shipment(shipment) => &shipment.data,
        }
    }

    /// Returns job id.
    pub fn id(&self) -> &str {
        self.data().id.as_str()
    }

    /// Returns all places of the job.
    pub fn places(&self) -> Box<dyn Iterator<Item = &Place> + '_> {
        match self {
            Job::Service(service) => Box::new(once(&service.place)),
            Job::Shipment(shipment) => Box::new(once(&shipment.pickup).chain(once(&shipment.delivery))),
        }
    }
}

impl From<Service> for Job {
    fn from(service: Service) -> Self {
        Job::Service(Arc::new(service))
    }
}

impl From<Shipment> for Job {
    fn from(shipment: Shipment) -> Self {
        Job::Shipment(Arc::new(shipment))
    }
}

impl PartialEq<Job> for Job {
    fn eq(&self, other: &Job) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Job {}

impl Hash for Job {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

/// Stores all jobs of the problem and provides distance related lookups.
pub struct Jobs {
    jobs: Vec<Job>,
    index: FxHashMap<String, Vec<(Job, Distance)>>,
}

impl Jobs {
    /// Creates a new instance of `Jobs`.
    pub fn new(jobs: Vec<Job>, transport: &(dyn TransportCost + Send + Sync)) -> Jobs {
        let index = create_index(&jobs, transport);
        Jobs { jobs, index }
    }

    /// Returns all jobs in the original order.
    pub fn all(&self) -> impl Iterator<Item = Job> + '_ {
        self.jobs.iter().cloned()
    }

    /// Returns jobs sorted by distance to the given one, starting from the closest.
    pub fn neighbors<'a>(&'a self, job: &Job) -> Box<dyn Iterator<Item = (&'a Job, Distance)> + 'a> {
        match self.index.get(job.id()) {
            Some(neighbors) => Box::new(neighbors.iter().map(|(job, distance)| (job, *distance))),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Returns amount of jobs.
    pub fn size(&self) -> usize {
        self.jobs.len()
    }
}

/// Returns the smallest distance between places of two jobs.
fn job_distance(lhs: &Job, rhs: &Job, transport: &(dyn TransportCost + Send + Sync)) -> Distance {
    lhs.places()
        .flat_map(|outer| rhs.places().map(move |inner| (outer, inner)))
        .map(|(outer, inner)| transport.distance(outer.location, inner.location))
        .min_by(|&a, &b| compare_floats(a, b))
        .unwrap_or(0.)
}

fn create_index(jobs: &[Job], transport: &(dyn TransportCost + Send + Sync)) -> FxHashMap<String, Vec<(Job, Distance)>> {
    jobs.iter()
        .map(|job| {
            let mut neighbors = jobs
                .iter()
                .filter(|other| other.id() != job.id())
                .map(|other| (other.clone(), job_distance(job, other, transport)))
                .collect::<Vec<_>>();
            neighbors.sort_by(|(a_job, a), (b_job, b)| {
                compare_floats(*a, *b).then_with(|| a_job.id().cmp(b_job.id()))
            });

            (job.id().to_string(), neighbors)
        })
        .collect()
}
