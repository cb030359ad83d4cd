#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/context_test.rs"]
mod context_test;

use crate::models::problem::{Job, Vehicle};
use crate::models::solution::{Registry, Route};
use crate::models::{Problem, Solution};
use crate::utils::Environment;
use rustc_hash::{FxHashMap, FxHasher};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

/// A context which contains the whole state needed by the insertion heuristic.
pub struct InsertionContext {
    /// Original problem.
    pub problem: Arc<Problem>,

    /// Solution context: discovered solution.
    pub solution: SolutionContext,

    /// Information about environment.
    pub environment: Arc<Environment>,
}

impl InsertionContext {
    /// Creates insertion context for given problem with all jobs unassigned.
    pub fn new(problem: Arc<Problem>, environment: Arc<Environment>) -> Self {
        let mut ctx = Self::new_empty(problem, environment);
        ctx.solution.required.extend(ctx.problem.jobs.all());

        ctx
    }

    /// Creates insertion context for given problem with empty solution.
    pub fn new_empty(problem: Arc<Problem>, environment: Arc<Environment>) -> Self {
        let registry = Registry::new(&problem.fleet, problem.fleet_size);
        let solution =
            SolutionContext { required: vec![], unassigned: FxHashMap::default(), routes: vec![], registry };

        InsertionContext { problem, solution, environment }
    }

    /// Restores valid context state.
    pub fn restore(&mut self) {
        self.problem.constraint.accept_solution_state(&mut self.solution);
        self.solution.remove_empty_routes();
    }

    /// Creates a deep copy of the context.
    pub fn deep_copy(&self) -> Self {
        InsertionContext {
            problem: self.problem.clone(),
            solution: self.solution.deep_copy(),
            environment: self.environment.clone(),
        }
    }
}

/// Contains information regarding the discovered solution.
pub struct SolutionContext {
    /// List of jobs which require assignment.
    pub required: Vec<Job>,

    /// Map of jobs which cannot be assigned with the reason code of the last attempt.
    pub unassigned: FxHashMap<Job, i32>,

    /// Set of routes within their state.
    pub routes: Vec<RouteContext>,

    /// Keeps track of used vehicles.
    pub registry: Registry,
}

impl SolutionContext {
    /// Keeps routes for which the given predicate returns true, freeing vehicles of the others.
    pub fn keep_routes(&mut self, predicate: &dyn Fn(&RouteContext) -> bool) {
        let (keep, remove): (Vec<_>, Vec<_>) = self.routes.drain(0..).partition(predicate);

        remove.into_iter().for_each(|route_ctx| {
            self.registry.free_vehicle(&route_ctx.route().vehicle);
        });

        self.routes = keep;
    }

    /// Removes routes which serve no jobs.
    pub fn remove_empty_routes(&mut self) {
        self.keep_routes(&|route_ctx| route_ctx.route().tour.has_jobs())
    }

    /// Converts the discovered solution into a final one.
    pub fn to_solution(&self) -> Solution {
        Solution {
            routes: self.routes.iter().map(|route_ctx| route_ctx.route().clone()).collect(),
            unassigned: self.unassigned.clone(),
        }
    }

    /// Creates a deep copy of `SolutionContext`.
    pub fn deep_copy(&self) -> Self {
        Self {
            required: self.required.clone(),
            unassigned: self.unassigned.clone(),
            routes: self.routes.iter().map(|route_ctx| route_ctx.deep_copy()).collect(),
            registry: self.registry.deep_copy(),
        }
    }
}

/// Specifies insertion context for a single route.
#[derive(Clone)]
pub struct RouteContext {
    route: Arc<Route>,
    state: Arc<RouteState>,
}

impl RouteContext {
    /// Creates a new instance of `RouteContext` for an empty tour of the vehicle.
    pub fn new(vehicle: Arc<Vehicle>) -> Self {
        Self::new_with_state(Route::new(vehicle), RouteState::default())
    }

    /// Creates a new instance of `RouteContext` with arguments provided.
    pub fn new_with_state(route: Route, state: RouteState) -> Self {
        RouteContext { route: Arc::new(route), state: Arc::new(state) }
    }

    /// Returns a reference to the route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns a reference to the state.
    pub fn state(&self) -> &RouteState {
        &self.state
    }

    /// Returns a mutable reference to the route, detaching it from other context clones.
    pub fn route_mut(&mut self) -> &mut Route {
        Arc::make_mut(&mut self.route)
    }

    /// Returns a mutable reference to the state, detaching it from other context clones.
    pub fn state_mut(&mut self) -> &mut RouteState {
        Arc::make_mut(&mut self.state)
    }

    /// Unwraps given `RouteContext` as a pair of mutable references.
    pub fn as_mut(&mut self) -> (&mut Route, &mut RouteState) {
        (Arc::make_mut(&mut self.route), Arc::make_mut(&mut self.state))
    }

    /// Creates a detached copy of `RouteContext`.
    pub fn deep_copy(&self) -> Self {
        RouteContext { route: Arc::new(self.route.as_ref().clone()), state: Arc::new(self.state.as_ref().clone()) }
    }
}

impl PartialEq<RouteContext> for RouteContext {
    fn eq(&self, other: &RouteContext) -> bool {
        Arc::ptr_eq(&self.route, &other.route)
    }
}

impl Eq for RouteContext {}

/// Provides a way to associate arbitrary typed data with a route or its activities.
/// Any state is recalculated by `accept_route_state` call after a route change.
#[derive(Clone)]
pub struct RouteState {
    index: HashMap<TypeId, Arc<dyn Any + Send + Sync>, BuildHasherDefault<FxHasher>>,
}

impl Default for RouteState {
    fn default() -> RouteState {
        RouteState { index: HashMap::with_capacity_and_hasher(4, BuildHasherDefault::<FxHasher>::default()) }
    }
}

impl RouteState {
    /// Gets a value associated with the whole tour using `K` type as a key.
    pub fn get_tour_state<K: 'static, V: Send + Sync + 'static>(&self) -> Option<&V> {
        self.index.get(&TypeId::of::<K>()).and_then(|any| any.downcast_ref::<V>())
    }

    /// Sets a value associated with the whole tour using `K` type as a key.
    pub fn set_tour_state<K: 'static, V: Send + Sync + 'static>(&mut self, value: V) {
        self.index.insert(TypeId::of::<K>(), Arc::new(value));
    }

    /// Gets a value associated with the activity at the given index.
    pub fn get_activity_state<K: 'static, V: Send + Sync + 'static>(&self, activity_idx: usize) -> Option<&V> {
        self.index
            .get(&TypeId::of::<K>())
            .and_then(|any| any.downcast_ref::<Vec<V>>())
            .and_then(|states| states.get(activity_idx))
    }

    /// Gets values associated with all activities.
    pub fn get_activity_states<K: 'static, V: Send + Sync + 'static>(&self) -> Option<&Vec<V>> {
        self.index.get(&TypeId::of::<K>()).and_then(|any| any.downcast_ref::<Vec<V>>())
    }

    /// Sets values associated with all activities.
    pub fn set_activity_states<K: 'static, V: Send + Sync + 'static>(&mut self, values: Vec<V>) {
        self.index.insert(TypeId::of::<K>(), Arc::new(values));
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.index.clear();
    }
}

/// Declares a typed accessor for a value associated with the whole tour.
macro_rules! custom_tour_state {
    ($trait_name:ident via $key:ident with $getter:ident, $setter:ident of $type:ty) => {
        struct $key;

        #[doc = " Provides a typed access to a tour state."]
        pub trait $trait_name {
            #[doc = " Gets the state value."]
            fn $getter(&self) -> Option<&$type>;
            #[doc = " Sets the state value."]
            fn $setter(&mut self, value: $type);
        }

        impl $trait_name for $crate::construction::heuristics::RouteState {
            fn $getter(&self) -> Option<&$type> {
                self.get_tour_state::<$key, $type>()
            }

            fn $setter(&mut self, value: $type) {
                self.set_tour_state::<$key, $type>(value);
            }
        }
    };
}

/// Declares a typed accessor for values associated with tour activities.
macro_rules! custom_activity_state {
    ($trait_name:ident via $key:ident with $getter:ident, $setter:ident of $type:ty) => {
        struct $key;

        #[doc = " Provides a typed access to an activity state."]
        pub trait $trait_name {
            #[doc = " Gets the state value for the activity at the given index."]
            fn $getter(&self, activity_idx: usize) -> Option<&$type>;
            #[doc = " Sets the state values for all activities."]
            fn $setter(&mut self, values: Vec<$type>);
        }

        impl $trait_name for $crate::construction::heuristics::RouteState {
            fn $getter(&self, activity_idx: usize) -> Option<&$type> {
                self.get_activity_state::<$key, $type>(activity_idx)
            }

            fn $setter(&mut self, values: Vec<$type>) {
                self.set_activity_states::<$key, $type>(values);
            }
        }
    };
}

pub(crate) use custom_activity_state;
pub(crate) use custom_tour_state;
