//! A generalized insertion heuristic implementation.

mod context;
pub use self::context::*;
pub(crate) use self::context::{custom_activity_state, custom_tour_state};

mod evaluators;
pub use self::evaluators::*;

mod insertions;
pub use self::insertions::*;

mod selectors;
pub use self::selectors::*;
