//! Contains ruin methods which destroy parts of an existing solution.

use crate::construction::heuristics::{InsertionContext, RouteContext, SolutionContext};
use crate::models::problem::Job;
use crate::models::Problem;
use crate::solver::RefinementContext;
use crate::utils::Random;
use rustc_hash::{FxHashMap, FxHashSet};
use std::ops::Range;
use std::sync::Arc;

/// A trait which specifies logic to destroy parts of solution.
pub trait Ruin {
    /// Ruins given solution and returns a new one with less jobs assigned.
    fn run(&self, refinement_ctx: &RefinementContext, insertion_ctx: InsertionContext) -> InsertionContext;
}

mod neighbour_removal;
pub use self::neighbour_removal::NeighbourRemoval;

mod random_job_removal;
pub use self::random_job_removal::RandomJobRemoval;

mod worst_jobs_removal;
pub use self::worst_jobs_removal::WorstJobRemoval;

/// Specifies a limit for amount of activities and routes affected by one ruin application.
#[derive(Clone)]
pub struct RemovalLimits {
    /// A range of activities to be removed.
    pub removed_activities_range: Range<usize>,
    /// A range of routes which can be affected by the removal.
    pub affected_routes_range: Range<usize>,
}

impl RemovalLimits {
    /// Creates limits proportional to the problem size.
    pub fn new(problem: &Problem) -> Self {
        let max_activities = ((problem.jobs.size() as f64 * 0.1).round() as usize).clamp(1, 30);

        Self { removed_activities_range: 1..(max_activities + 1), affected_routes_range: 1..9 }
    }
}

/// Keeps track of the ruin progress. It enforces the removal limits and records removed jobs
/// in the removal order within solution's required list.
pub struct JobRemovalTracker {
    affected_routes: FxHashSet<usize>,
    activities_left: i32,
    routes_left: i32,
}

impl JobRemovalTracker {
    /// Creates a new instance of `JobRemovalTracker` drawing actual removal targets from
    /// the given limits.
    pub fn new(limits: &RemovalLimits, random: &(dyn Random + Send + Sync)) -> Self {
        Self {
            affected_routes: FxHashSet::default(),
            activities_left: random.uniform_int(
                limits.removed_activities_range.start as i32,
                limits.removed_activities_range.end as i32 - 1,
            ),
            routes_left: random.uniform_int(
                limits.affected_routes_range.start as i32,
                limits.affected_routes_range.end as i32 - 1,
            ),
        }
    }

    /// Checks whether the removal limit is reached.
    pub fn is_limit(&self) -> bool {
        self.activities_left <= 0
    }

    /// Tries to remove the job from the route with the given index. A job is removed as a
    /// whole: for a shipment, both pickup and delivery activities leave the tour together.
    pub fn try_remove_job(&mut self, solution: &mut SolutionContext, route_index: usize, job: &Job) -> bool {
        if self.activities_left <= 0 {
            return false;
        }

        if !self.affected_routes.contains(&route_index) && self.routes_left <= 0 {
            return false;
        }

        if solution.routes[route_index].route_mut().tour.remove(job) {
            self.activities_left -= match job {
                Job::Service(_) => 1,
                Job::Shipment(_) => 2,
            };

            if self.affected_routes.insert(route_index) {
                self.routes_left -= 1;
            }

            solution.required.push(job.clone());

            true
        } else {
            false
        }
    }
}

/// Returns routed jobs with their route index.
pub(crate) fn get_route_jobs(solution: &SolutionContext) -> FxHashMap<Job, usize> {
    solution
        .routes
        .iter()
        .enumerate()
        .flat_map(|(route_index, route_ctx)| route_ctx.route().tour.jobs().map(move |job| (job, route_index)))
        .collect()
}

/// Selects a random job from a random route, starting from a random route and continuing
/// with the next ones if the route has no jobs.
pub(crate) fn select_seed_job(
    routes: &[RouteContext],
    random: &(dyn Random + Send + Sync),
) -> Option<(usize, Job)> {
    if routes.is_empty() {
        return None;
    }

    let initial_route_index = random.uniform_int(0, routes.len() as i32 - 1) as usize;
    let mut route_index = initial_route_index;

    loop {
        let route_ctx = &routes[route_index];

        if route_ctx.route().tour.has_jobs() {
            if let Some(job) = select_random_job(route_ctx, random) {
                return Some((route_index, job));
            }
        }

        route_index = (route_index + 1) % routes.len();
        if route_index == initial_route_index {
            break;
        }
    }

    None
}

fn select_random_job(route_ctx: &RouteContext, random: &(dyn Random + Send + Sync)) -> Option<Job> {
    let size = route_ctx.route().tour.job_activity_count();
    if size == 0 {
        return None;
    }

    let initial_activity_index = random.uniform_int(1, size as i32) as usize;
    let mut activity_index = initial_activity_index;

    loop {
        let job = route_ctx.route().tour.get(activity_index).and_then(|activity| activity.job.clone());
        if job.is_some() {
            return job;
        }

        activity_index = (activity_index + 1) % (size + 1);
        if activity_index == initial_activity_index {
            break;
        }
    }

    None
}

/// Provides the way to run multiple ruin methods one by one on the same solution.
pub struct CompositeRuin {
    ruins: Vec<(Arc<dyn Ruin + Send + Sync>, f64)>,
}

impl CompositeRuin {
    /// Creates a new instance of `CompositeRuin` using a list of ruin methods with their
    /// probability to be applied.
    pub fn new(ruins: Vec<(Arc<dyn Ruin + Send + Sync>, f64)>) -> Self {
        Self { ruins }
    }
}

impl Ruin for CompositeRuin {
    fn run(&self, refinement_ctx: &RefinementContext, insertion_ctx: InsertionContext) -> InsertionContext {
        if insertion_ctx.solution.routes.is_empty() {
            return insertion_ctx;
        }

        let random = insertion_ctx.environment.random.clone();

        let mut insertion_ctx = self
            .ruins
            .iter()
            .filter(|(_, probability)| random.is_hit(*probability))
            .fold(insertion_ctx, |ctx, (ruin, _)| ruin.run(refinement_ctx, ctx));

        insertion_ctx.restore();

        insertion_ctx
    }
}
