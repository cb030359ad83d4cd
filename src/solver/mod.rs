//! The solver improves a solution with the ruin and recreate principle: on each generation a
//! part of the best known solution is destroyed by a ruin method and rebuilt by a recreate
//! method, keeping the result when the acceptance criterion likes it.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

use crate::construction::heuristics::{InsertionContext, InsertionListener, RouteContext};
use crate::models::common::{Cost, Duration};
use crate::models::problem::Job;
use crate::models::{Problem, Solution};
use crate::utils::{compare_floats, Environment, GenericError, GenericResult, Timer};
use std::sync::{Arc, Mutex};

pub mod acceptance;
pub mod search;
pub mod termination;

mod builder;
pub use self::builder::SolverBuilder;

mod listener;
pub use self::listener::*;

mod objective;
pub use self::objective::*;

mod telemetry;
pub use self::telemetry::{Telemetry, TelemetryMode};

use self::search::{Recreate, SearchStrategy};
use self::termination::{CompositeTermination, Termination};

/// Contains information needed to perform the refinement.
pub struct RefinementContext {
    /// Original problem.
    pub problem: Arc<Problem>,
    /// A pool of accepted solutions.
    pub pool: SolutionPool,
    /// An environment.
    pub environment: Arc<Environment>,
    /// A current refinement generation, starts from one.
    pub generation: usize,
}

impl RefinementContext {
    /// Creates a new instance of `RefinementContext`.
    pub fn new(problem: Arc<Problem>, environment: Arc<Environment>, pool_capacity: usize) -> Self {
        Self { problem, pool: SolutionPool::new(pool_capacity), environment, generation: 1 }
    }
}

/// A capacity bounded collection of accepted solutions sorted by their total cost in
/// ascending order. On a cost tie an older solution keeps its position.
pub struct SolutionPool {
    capacity: usize,
    solutions: Vec<(InsertionContext, ObjectiveCost)>,
}

impl SolutionPool {
    /// Creates a new instance of `SolutionPool` which can hold at least one solution.
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), solutions: vec![] }
    }

    /// Adds a new solution to the pool discarding the most expensive ones above the capacity.
    pub fn add(&mut self, insertion_ctx: InsertionContext, cost: ObjectiveCost) {
        self.solutions.push((insertion_ctx, cost));
        self.solutions.sort_by(|(_, left), (_, right)| compare_floats(left.total(), right.total()));
        self.solutions.truncate(self.capacity);
    }

    /// Returns the best solution with its cost.
    pub fn best(&self) -> Option<(&InsertionContext, &ObjectiveCost)> {
        self.solutions.first().map(|(insertion_ctx, cost)| (insertion_ctx, cost))
    }

    /// Returns all solutions, best first.
    pub fn all(&self) -> impl Iterator<Item = (&InsertionContext, &ObjectiveCost)> + '_ {
        self.solutions.iter().map(|(insertion_ctx, cost)| (insertion_ctx, cost))
    }

    /// Returns amount of solutions in the pool.
    pub fn size(&self) -> usize {
        self.solutions.len()
    }
}

/// Watches insertion events to catch a non finite insertion cost produced by a broken
/// transport or activity cost implementation.
#[derive(Default)]
struct InvalidCostTracker {
    invalid_job: Mutex<Option<String>>,
}

impl InvalidCostTracker {
    /// Returns an error if a non finite insertion cost was seen so far.
    fn check(&self) -> GenericResult<()> {
        match self.invalid_job.lock().unwrap().as_ref() {
            Some(id) => Err(format!("insertion cost of job '{id}' is not finite").into()),
            None => Ok(()),
        }
    }
}

impl InsertionListener for InvalidCostTracker {
    fn job_inserted(&self, job: &Job, _route_ctx: &RouteContext, extra_cost: Cost, _extra_time: Duration) {
        if !extra_cost.is_finite() {
            let mut invalid_job = self.invalid_job.lock().unwrap();
            if invalid_job.is_none() {
                *invalid_job = Some(job.id().to_string());
            }
        }
    }
}

/// A solver which runs the ruin and recreate loop. Use `SolverBuilder` to get an instance
/// of it.
pub struct Solver {
    problem: Arc<Problem>,
    environment: Arc<Environment>,
    strategies: Vec<SearchStrategy>,
    weights: Vec<f64>,
    initial: Arc<dyn Recreate + Send + Sync>,
    objective: Box<dyn Objective + Send + Sync>,
    termination: CompositeTermination,
    telemetry: Telemetry,
    strategy_listeners: StrategyListeners,
    ruin_listeners: RuinListeners,
    invalid_cost: Arc<InvalidCostTracker>,
}

impl Solver {
    /// Runs the solver until a termination criterion or the quota decides to stop and returns
    /// the best discovered solution with its total cost.
    pub fn solve(&mut self) -> GenericResult<(Solution, Cost)> {
        let environment = self.environment.clone();

        environment.thread_pool.execute(|| self.run())
    }

    fn run(&mut self) -> GenericResult<(Solution, Cost)> {
        self.telemetry.start();

        let mut refinement_ctx = RefinementContext::new(self.problem.clone(), self.environment.clone(), 1);

        let construction_time = Timer::start();
        let insertion_ctx = InsertionContext::new(self.problem.clone(), self.environment.clone());
        let insertion_ctx = self.initial.run(&refinement_ctx, insertion_ctx);
        self.invalid_cost.check()?;

        let cost = self.objective.estimate(&insertion_ctx);
        self.telemetry.on_initial(&insertion_ctx, &cost, construction_time);
        refinement_ctx.pool.add(insertion_ctx, cost);

        while !(self.termination.is_termination(&refinement_ctx) || self.is_quota_reached()) {
            let generation_time = Timer::start();

            let strategy_index = self.environment.random.weighted(self.weights.as_slice());
            let strategy = &self.strategies[strategy_index];

            let insertion_ctx = refinement_ctx
                .pool
                .best()
                .map(|(best, _)| best.deep_copy())
                .ok_or_else(|| GenericError::from("the solution pool is empty"))?;

            self.ruin_listeners.ruin_starts(&insertion_ctx.solution);
            let insertion_ctx = strategy.ruin.run(&refinement_ctx, insertion_ctx);
            insertion_ctx.solution.required.iter().for_each(|job| self.ruin_listeners.job_removed(job));
            self.ruin_listeners.ruin_ends(&insertion_ctx.solution);

            let insertion_ctx = strategy.recreate.run(&refinement_ctx, insertion_ctx);
            self.invalid_cost.check()?;

            let cost = self.objective.estimate(&insertion_ctx);
            let is_accepted = strategy.acceptance.is_accepted(&refinement_ctx, (&insertion_ctx, &cost));

            self.telemetry.on_generation(
                refinement_ctx.generation,
                generation_time,
                &refinement_ctx.pool,
                (&insertion_ctx, &cost),
                is_accepted,
            );
            self.strategy_listeners.strategy_selected(
                strategy.id.as_str(),
                &insertion_ctx,
                &refinement_ctx.pool,
                is_accepted,
            );

            if is_accepted {
                refinement_ctx.pool.add(insertion_ctx, cost);
            }

            refinement_ctx.generation += 1;
        }

        self.telemetry.on_result(&refinement_ctx);

        let (insertion_ctx, cost) =
            refinement_ctx.pool.best().ok_or_else(|| GenericError::from("the solution pool is empty"))?;

        Ok((insertion_ctx.solution.to_solution(), cost.total()))
    }

    fn is_quota_reached(&self) -> bool {
        self.environment.quota.as_ref().map_or(false, |quota| quota.is_reached())
    }
}
