//! Various built-in constraints applied to jobs and vehicles.
//!
//!
//! ## Constraint
//!
//! Constraint represents some limitation which should be applied to solution. A good examples:
//!
//! - **time**: a job can be served only in specific time window, e.g. from 9am till 11am
//! - **capacity**: there is a fleet and multiple jobs with total demand exceeding capacity
//!   of one vehicle from the fleet.
//! - **skills**: a job can require some specific vehicle equipment or driver training.
//!
//!
//! ## Design
//!
//! Each constraint has two characteristics:
//!
//! - **hard or soft**: this characteristic defines what should happen when constraint is violated.
//!     When hard constraint is violated, it means that given job cannot be served with given
//!     route. In contrast to this, soft constraint allows insertion but applies some penalty to
//!     make violation less attractive.
//!
//! - **route or activity**: this characteristic defines on which level constraint is executed.
//!     As the algorithm is based on insertion heuristic, insertion of one job is evaluated on each
//!     leg of one route. When it does not make sense, the route constraint can be used as it is
//!     called only once to check whether job can be inserted in given route.
//!
//! Multiple constraints with different characteristics which implement one aspect of the VRP
//! variation are grouped together by a [`ConstraintModule`]. Besides the constraints, the module
//! maintains the route state its constraints need, recalculated once an insertion is committed.
//! All modules are organized inside one [`ConstraintPipeline`] which specifies the order of their
//! execution.

/// A violation code used when a job requires a skill the vehicle does not have.
pub const SKILLS_CONSTRAINT_CODE: i32 = 1;
/// A violation code used when a job demand does not fit into the vehicle capacity.
pub const CAPACITY_CONSTRAINT_CODE: i32 = 2;
/// A violation code used when a job cannot be served in time.
pub const TIME_CONSTRAINT_CODE: i32 = 3;

mod pipeline;
pub use self::pipeline::*;

mod transport;
pub use self::transport::*;

mod capacity;
pub use self::capacity::*;

mod skills;
pub use self::skills::*;
