#[cfg(test)]
#[path = "../../../tests/unit/models/solution/tour_test.rs"]
mod tour_test;

use crate::models::problem::Job;
use crate::models::solution::Activity;
use rustc_hash::FxHashSet;
use std::iter::Iterator;
use std::slice::{Iter, IterMut};

/// Represents a tour: an ordered list of activities with the start and, for a closed
/// tour, the end terminal.
#[derive(Clone, Default)]
pub struct Tour {
    /// Stores activities in the order the vehicle visits them.
    activities: Vec<Activity>,
    /// Stores jobs which have activities in the tour.
    jobs: FxHashSet<Job>,
    /// Keeps track whether tour is set as closed.
    is_closed: bool,
}

impl Tour {
    /// Sets tour start.
    pub fn set_start(&mut self, activity: Activity) -> &mut Tour {
        assert!(activity.job.is_none());
        assert!(self.activities.is_empty());
        self.activities.push(activity);

        self
    }

    /// Sets tour end.
    pub fn set_end(&mut self, activity: Activity) -> &mut Tour {
        assert!(activity.job.is_none());
        assert!(!self.activities.is_empty());
        self.activities.push(activity);
        self.is_closed = true;

        self
    }

    /// Inserts activity within its job to the end of tour.
    pub fn insert_last(&mut self, activity: Activity) -> &mut Tour {
        self.insert_at(activity, self.job_activity_count() + 1)
    }

    /// Inserts activity within its job at specified index.
    pub fn insert_at(&mut self, activity: Activity, index: usize) -> &mut Tour {
        assert!(!self.activities.is_empty());

        if let Some(job) = activity.job.clone() {
            self.jobs.insert(job);
        }
        self.activities.insert(index, activity);

        self
    }

    /// Removes job within its activities from the tour.
    pub fn remove(&mut self, job: &Job) -> bool {
        self.activities.retain(|activity| !activity.has_same_job(job));
        self.jobs.remove(job)
    }

    /// Returns all activities in tour.
    pub fn all_activities(&self) -> Iter<Activity> {
        self.activities.iter()
    }

    /// Returns all activities in tour for mutation.
    pub fn all_activities_mut(&mut self) -> IterMut<Activity> {
        self.activities.iter_mut()
    }

    /// Returns activities belonging to the given job.
    pub fn job_activities<'a>(&'a self, job: &'a Job) -> impl Iterator<Item = &'a Activity> + 'a {
        self.activities.iter().filter(move |activity| activity.has_same_job(job))
    }

    /// Returns all activities in tour as legs with their indices.
    pub fn legs(&self) -> impl Iterator<Item = (&[Activity], usize)> + Clone + '_ {
        let last_index = if self.activities.is_empty() { 0 } else { self.activities.len() - 1 };
        let window_size = if last_index == 0 { 1 } else { 2 };

        self.activities.windows(window_size).enumerate().map(|(index, slice)| (slice, index))
    }

    /// Returns activity at specified index.
    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    /// Returns mutable activity at specified index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Activity> {
        self.activities.get_mut(index)
    }

    /// Returns start activity in tour.
    pub fn start(&self) -> Option<&Activity> {
        self.activities.first()
    }

    /// Returns end activity in tour.
    pub fn end(&self) -> Option<&Activity> {
        self.activities.last()
    }

    /// Checks whether job is present in tour.
    pub fn contains(&self, job: &Job) -> bool {
        self.jobs.contains(job)
    }

    /// Returns all jobs of the tour.
    pub fn jobs<'a>(&'a self) -> impl Iterator<Item = Job> + 'a {
        self.jobs.iter().cloned()
    }

    /// Checks whether tour has any job.
    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// Returns amount of jobs in the tour.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Returns amount of job activities, terminals are not counted.
    pub fn job_activity_count(&self) -> usize {
        if self.activities.is_empty() {
            0
        } else {
            self.activities.len() - (if self.is_closed { 2 } else { 1 })
        }
    }

    /// Returns amount of all activities in tour.
    pub fn total(&self) -> usize {
        self.activities.len()
    }

    /// Checks whether tour is closed, e.g. vehicle comes back after the last stop.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }
}
