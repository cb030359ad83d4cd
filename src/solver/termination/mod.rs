//! Termination criteria which define when the refinement process should be stopped.

use crate::solver::RefinementContext;

/// Encapsulates termination criterion behaviour.
pub trait Termination {
    /// Checks whether the refinement process should be stopped.
    fn is_termination(&self, refinement_ctx: &RefinementContext) -> bool;
}

mod max_generation;
pub use self::max_generation::MaxGeneration;

mod max_time;
pub use self::max_time::MaxTime;

/// A termination criterion which stops when any of its inner criteria is met.
pub struct CompositeTermination {
    terminations: Vec<Box<dyn Termination + Send + Sync>>,
}

impl CompositeTermination {
    /// Creates a new instance of `CompositeTermination`.
    pub fn new(terminations: Vec<Box<dyn Termination + Send + Sync>>) -> Self {
        Self { terminations }
    }
}

impl Default for CompositeTermination {
    fn default() -> Self {
        Self::new(vec![Box::new(MaxGeneration::default())])
    }
}

impl Termination for CompositeTermination {
    fn is_termination(&self, refinement_ctx: &RefinementContext) -> bool {
        self.terminations.iter().any(|termination| termination.is_termination(refinement_ctx))
    }
}
