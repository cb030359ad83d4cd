//! Acceptance criteria which decide whether a discovered solution should replace the best
//! known one.

use crate::construction::heuristics::InsertionContext;
use crate::solver::{ObjectiveCost, RefinementContext};

/// Encapsulates acceptance criterion behaviour.
pub trait Acceptance {
    /// Checks whether the given candidate solution is accepted as a new incumbent.
    fn is_accepted(&self, refinement_ctx: &RefinementContext, candidate: (&InsertionContext, &ObjectiveCost)) -> bool;
}

mod greedy;
pub use self::greedy::Greedy;

mod random;
pub use self::random::RandomizedGreedy;
