//! A collection of models to represent problem and solution in vehicle routing domain.

pub mod common;
pub mod problem;
pub mod solution;

mod domain;
pub use self::domain::{Problem, ProblemBuilder, Solution};
