//! Common types used by the models.

mod domain;
pub use self::domain::*;

mod load;
pub use self::load::{Capacity, Demand};
