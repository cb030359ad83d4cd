#[cfg(test)]
#[path = "../../../tests/unit/construction/constraints/skills_test.rs"]
mod skills_test;

use crate::construction::constraints::*;
use crate::construction::heuristics::{RouteContext, SolutionContext};
use crate::models::problem::Job;
use std::slice::Iter;
use std::sync::Arc;

/// A module which ensures that a job gets assigned only to a vehicle with all required skills.
pub struct SkillsConstraintModule {
    constraints: Vec<ConstraintVariant>,
}

impl SkillsConstraintModule {
    /// Creates a new instance of `SkillsConstraintModule`.
    pub fn new(code: i32) -> Self {
        Self { constraints: vec![ConstraintVariant::HardRoute(Arc::new(SkillsHardRouteConstraint { code }))] }
    }
}

impl ConstraintModule for SkillsConstraintModule {
    fn accept_insertion(&self, _solution_ctx: &mut SolutionContext, _route_index: usize, _job: &Job) {}

    fn accept_route_state(&self, _ctx: &mut RouteContext) {}

    fn accept_solution_state(&self, _ctx: &mut SolutionContext) {}

    fn get_constraints(&self) -> Iter<ConstraintVariant> {
        self.constraints.iter()
    }
}

struct SkillsHardRouteConstraint {
    code: i32,
}

impl HardRouteConstraint for SkillsHardRouteConstraint {
    fn evaluate_job(
        &self,
        _: &SolutionContext,
        ctx: &RouteContext,
        job: &Job,
    ) -> Option<RouteConstraintViolation> {
        let requirement = &job.data().skills;

        if requirement.is_empty() || requirement.is_subset(&ctx.route().vehicle.skills) {
            None
        } else {
            Some(RouteConstraintViolation { code: self.code })
        }
    }
}
