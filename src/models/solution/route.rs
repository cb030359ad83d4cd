use crate::models::common::{Demand, Duration, Location, Schedule, TimeWindow};
use crate::models::problem::{Job, Vehicle};
use crate::models::solution::Tour;
use std::sync::Arc;

/// Specifies an activity place: a location with a time window when it can be visited.
#[derive(Clone, Debug)]
pub struct Place {
    /// Location where activity is performed.
    pub location: Location,
    /// Duration of the activity.
    pub duration: Duration,
    /// A time window assigned to the activity.
    pub time: TimeWindow,
}

/// Represents an activity within a tour.
#[derive(Clone, Debug)]
pub struct Activity {
    /// A place where activity is performed.
    pub place: Place,
    /// Current activity schedule.
    pub schedule: Schedule,
    /// A job served by the activity. Empty for start and end activities.
    pub job: Option<Job>,
    /// A load change at the activity.
    pub demand: Demand,
}

impl Activity {
    /// Creates a terminal activity of the tour at the given location.
    pub fn new_terminal(location: Location, time: TimeWindow) -> Self {
        Activity {
            place: Place { location, duration: 0., time },
            schedule: Schedule::new(time.start, time.start),
            job: None,
            demand: Demand::default(),
        }
    }

    /// Creates an activity which serves the given job.
    pub fn new_with_job(job: Job, place: Place, demand: Demand) -> Self {
        Activity { place, schedule: Schedule::new(0., 0.), job: Some(job), demand }
    }

    /// Checks whether activity serves the given job.
    pub fn has_same_job(&self, job: &Job) -> bool {
        self.job.as_ref().map_or(false, |other| other == job)
    }
}

/// Represents a tour performing vehicle.
#[derive(Clone)]
pub struct Route {
    /// A vehicle performing the route.
    pub vehicle: Arc<Vehicle>,
    /// A tour assigned to the vehicle.
    pub tour: Tour,
}

impl Route {
    /// Creates a new route for the given vehicle with an empty tour.
    pub fn new(vehicle: Arc<Vehicle>) -> Self {
        let mut tour = Tour::default();
        tour.set_start(Activity::new_terminal(vehicle.start, vehicle.time));

        if let Some(end) = vehicle.end {
            tour.set_end(Activity::new_terminal(end, vehicle.time));
        }

        Self { vehicle, tour }
    }
}
