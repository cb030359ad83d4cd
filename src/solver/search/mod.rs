//! Contains a ruin and recreate implementation of the search. The main idea is to destroy a
//! part of an existing solution and rebuild the missing part in a different way, as described
//! in "Record Breaking Optimization Results Using the Ruin and Recreate Principle" by
//! G. Schrimpf et al. (2000).

use crate::solver::acceptance::Acceptance;
use std::sync::Arc;

mod recreate;
pub use self::recreate::*;

mod ruin;
pub use self::ruin::*;

/// A search strategy which combines ruin and recreate methods with an acceptance criterion.
pub struct SearchStrategy {
    /// A name used to refer to the strategy in logs and listeners.
    pub id: String,
    /// A ruin method.
    pub ruin: Arc<dyn Ruin + Send + Sync>,
    /// A recreate method.
    pub recreate: Arc<dyn Recreate + Send + Sync>,
    /// An acceptance criterion applied to solutions discovered by the strategy.
    pub acceptance: Arc<dyn Acceptance + Send + Sync>,
    /// A selection weight. A strategy with the zero weight is never selected.
    pub weight: f64,
}
