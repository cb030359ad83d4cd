//! A crate which solves variations of the ***Vehicle Routing Problem*** with a ruin and
//! recreate metaheuristic. Search results are reproducible for a fixed seed regardless of
//! the amount of threads used.
//!

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod construction;
pub mod models;
pub mod solver;
pub mod utils;
