use crate::construction::heuristics::{RouteContext, SolutionContext};
use crate::models::common::Cost;
use crate::models::problem::Job;
use crate::models::solution::Activity;
use std::slice::Iter;
use std::sync::Arc;

/// Specifies result of hard route constraint check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteConstraintViolation {
    /// Violation code.
    pub code: i32,
}

/// Specifies result of hard activity constraint check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActivityConstraintViolation {
    /// Violation code.
    pub code: i32,
    /// True if further insertions at next positions of the same route are blocked.
    pub stopped: bool,
}

/// Specifies an insertion context of the single activity.
pub struct ActivityContext<'a> {
    /// Activity insertion index.
    pub index: usize,
    /// Previous activity.
    pub prev: &'a Activity,
    /// Target activity.
    pub target: &'a Activity,
    /// Next activity. Absent if insertion is done at the end of an open tour.
    pub next: Option<&'a Activity>,
}

/// A hard constraint which blocks a job insertion into the whole route.
pub trait HardRouteConstraint {
    /// Checks whether the job can be inserted into the route.
    fn evaluate_job(&self, solution_ctx: &SolutionContext, ctx: &RouteContext, job: &Job)
        -> Option<RouteConstraintViolation>;
}

/// A hard constraint which blocks an activity insertion at the concrete position.
pub trait HardActivityConstraint {
    /// Checks whether the target activity can be inserted between prev and next.
    fn evaluate_activity(
        &self,
        route_ctx: &RouteContext,
        activity_ctx: &ActivityContext,
    ) -> Option<ActivityConstraintViolation>;
}

/// A soft constraint which estimates an extra cost of a job insertion into the route.
pub trait SoftRouteConstraint {
    /// Estimates an extra cost of the job insertion.
    fn estimate_job(&self, solution_ctx: &SolutionContext, ctx: &RouteContext, job: &Job) -> Cost;
}

/// A soft constraint which estimates an extra cost of an activity insertion at the concrete position.
pub trait SoftActivityConstraint {
    /// Estimates an extra cost of the activity insertion.
    fn estimate_activity(&self, route_ctx: &RouteContext, activity_ctx: &ActivityContext) -> Cost;
}

/// An enumeration which specifies all possible constraint types.
pub enum ConstraintVariant {
    /// Hard route constraint.
    HardRoute(Arc<dyn HardRouteConstraint + Send + Sync>),
    /// Hard activity constraint.
    HardActivity(Arc<dyn HardActivityConstraint + Send + Sync>),
    /// Soft route constraint.
    SoftRoute(Arc<dyn SoftRouteConstraint + Send + Sync>),
    /// Soft activity constraint.
    SoftActivity(Arc<dyn SoftActivityConstraint + Send + Sync>),
}

/// Represents a constraint module which can be injected into the constraint pipeline.
pub trait ConstraintModule {
    /// Accepts insertion of the job into the route at given index.
    /// Called once the job has been inserted into the solution.
    fn accept_insertion(&self, solution_ctx: &mut SolutionContext, route_index: usize, job: &Job);

    /// Accepts a route change and recalculates the route state.
    fn accept_route_state(&self, ctx: &mut RouteContext);

    /// Accepts a solution change and recalculates all its route states.
    fn accept_solution_state(&self, ctx: &mut SolutionContext);

    /// Returns all constraints of the module.
    fn get_constraints(&self) -> Iter<ConstraintVariant>;
}

/// Provides the way to work with multiple constraints.
#[derive(Default)]
pub struct ConstraintPipeline {
    modules: Vec<Arc<dyn ConstraintModule + Send + Sync>>,
    hard_route_constraints: Vec<Arc<dyn HardRouteConstraint + Send + Sync>>,
    hard_activity_constraints: Vec<Arc<dyn HardActivityConstraint + Send + Sync>>,
    soft_route_constraints: Vec<Arc<dyn SoftRouteConstraint + Send + Sync>>,
    soft_activity_constraints: Vec<Arc<dyn SoftActivityConstraint + Send + Sync>>,
}

impl ConstraintPipeline {
    /// Adds a constraint module to the pipeline.
    pub fn add_module(&mut self, module: Arc<dyn ConstraintModule + Send + Sync>) -> &mut Self {
        module.get_constraints().for_each(|constraint| match constraint {
            ConstraintVariant::HardRoute(c) => self.hard_route_constraints.push(c.clone()),
            ConstraintVariant::HardActivity(c) => self.hard_activity_constraints.push(c.clone()),
            ConstraintVariant::SoftRoute(c) => self.soft_route_constraints.push(c.clone()),
            ConstraintVariant::SoftActivity(c) => self.soft_activity_constraints.push(c.clone()),
        });
        self.modules.push(module);

        self
    }

    /// Accepts insertion of the job into the route.
    pub fn accept_insertion(&self, solution_ctx: &mut SolutionContext, route_index: usize, job: &Job) {
        self.modules.iter().for_each(|module| module.accept_insertion(solution_ctx, route_index, job))
    }

    /// Accepts a route change.
    pub fn accept_route_state(&self, ctx: &mut RouteContext) {
        self.modules.iter().for_each(|module| module.accept_route_state(ctx))
    }

    /// Accepts a solution change.
    pub fn accept_solution_state(&self, ctx: &mut SolutionContext) {
        self.modules.iter().for_each(|module| module.accept_solution_state(ctx))
    }

    /// Checks whether all hard route constraints are met.
    pub fn evaluate_hard_route(
        &self,
        solution_ctx: &SolutionContext,
        ctx: &RouteContext,
        job: &Job,
    ) -> Option<RouteConstraintViolation> {
        self.hard_route_constraints.iter().find_map(|constraint| constraint.evaluate_job(solution_ctx, ctx, job))
    }

    /// Checks whether all hard activity constraints are met.
    pub fn evaluate_hard_activity(
        &self,
        route_ctx: &RouteContext,
        activity_ctx: &ActivityContext,
    ) -> Option<ActivityConstraintViolation> {
        self.hard_activity_constraints.iter().find_map(|constraint| constraint.evaluate_activity(route_ctx, activity_ctx))
    }

    /// Estimates an extra cost of the job insertion given by all soft route constraints.
    pub fn evaluate_soft_route(&self, solution_ctx: &SolutionContext, ctx: &RouteContext, job: &Job) -> Cost {
        self.soft_route_constraints.iter().map(|constraint| constraint.estimate_job(solution_ctx, ctx, job)).sum()
    }

    /// Estimates an extra cost of the activity insertion given by all soft activity constraints.
    pub fn evaluate_soft_activity(&self, route_ctx: &RouteContext, activity_ctx: &ActivityContext) -> Cost {
        self.soft_activity_constraints
            .iter()
            .map(|constraint| constraint.estimate_activity(route_ctx, activity_ctx))
            .sum()
    }
}
