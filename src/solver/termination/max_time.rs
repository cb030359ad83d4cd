#[cfg(test)]
#[path = "../../../tests/unit/solver/termination/max_time_test.rs"]
mod max_time_test;

use crate::solver::termination::Termination;
use crate::solver::RefinementContext;
use crate::utils::Timer;

/// Stops when the given time limit is passed since construction of the object.
pub struct MaxTime {
    start: Timer,
    limit_in_secs: f64,
}

impl MaxTime {
    /// Creates a new instance of `MaxTime`.
    pub fn new(limit_in_secs: f64) -> Self {
        Self { start: Timer::start(), limit_in_secs }
    }
}

impl Default for MaxTime {
    fn default() -> Self {
        Self::new(300.)
    }
}

impl Termination for MaxTime {
    fn is_termination(&self, _: &RefinementContext) -> bool {
        self.start.elapsed_secs_as_f64() > self.limit_in_secs
    }
}
