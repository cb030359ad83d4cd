use crate::construction::heuristics::{InsertionContext, SolutionContext};
use crate::models::problem::Job;
use crate::solver::SolutionPool;
use std::sync::Arc;

/// Listens to the events of the search loop.
pub trait StrategyListener {
    /// Called once per generation after the acceptance decision is made, with the id of the
    /// selected strategy, the evaluated solution and the pool it was compared against.
    fn strategy_selected(&self, id: &str, insertion_ctx: &InsertionContext, pool: &SolutionPool, is_accepted: bool);
}

/// Listens to the events of the ruin process.
pub trait RuinListener {
    /// Called before ruin methods start to modify the solution.
    fn ruin_starts(&self, _solution: &SolutionContext) {}

    /// Called for each removed job in removal order.
    fn job_removed(&self, _job: &Job) {}

    /// Called when ruin methods finished to modify the solution.
    fn ruin_ends(&self, _solution: &SolutionContext) {}
}

/// Keeps track of strategy listeners notifying them in registration order.
#[derive(Clone, Default)]
pub struct StrategyListeners {
    listeners: Vec<Arc<dyn StrategyListener + Send + Sync>>,
}

impl StrategyListeners {
    /// Adds a new listener.
    pub fn add(&mut self, listener: Arc<dyn StrategyListener + Send + Sync>) {
        self.listeners.push(listener);
    }

    /// Notifies all listeners about a strategy selection.
    pub fn strategy_selected(&self, id: &str, insertion_ctx: &InsertionContext, pool: &SolutionPool, is_accepted: bool) {
        self.listeners.iter().for_each(|listener| listener.strategy_selected(id, insertion_ctx, pool, is_accepted));
    }
}

/// Keeps track of ruin listeners notifying them in registration order.
#[derive(Clone, Default)]
pub struct RuinListeners {
    listeners: Vec<Arc<dyn RuinListener + Send + Sync>>,
}

impl RuinListeners {
    /// Adds a new listener.
    pub fn add(&mut self, listener: Arc<dyn RuinListener + Send + Sync>) {
        self.listeners.push(listener);
    }

    /// Notifies all listeners about the ruin start.
    pub fn ruin_starts(&self, solution: &SolutionContext) {
        self.listeners.iter().for_each(|listener| listener.ruin_starts(solution));
    }

    /// Notifies all listeners about a removed job.
    pub fn job_removed(&self, job: &Job) {
        self.listeners.iter().for_each(|listener| listener.job_removed(job));
    }

    /// Notifies all listeners about the ruin end.
    pub fn ruin_ends(&self, solution: &SolutionContext) {
        self.listeners.iter().for_each(|listener| listener.ruin_ends(solution));
    }
}
