#[cfg(test)]
#[path = "../../tests/unit/solver/builder_test.rs"]
mod builder_test;

use super::{InvalidCostTracker, PenalizeUnassigned, RuinListeners, Solver, StrategyListeners};
use crate::construction::heuristics::{InsertionListener, InsertionListeners};
use crate::models::Problem;
use crate::solver::acceptance::{Acceptance, Greedy, RandomizedGreedy};
use crate::solver::search::{
    CompositeRuin, NeighbourRemoval, RandomJobRemoval, Recreate, RecreateWithCheapest, RecreateWithRegret,
    RemovalLimits, Ruin, SearchStrategy, WorstJobRemoval,
};
use crate::solver::termination::{CompositeTermination, MaxGeneration, MaxTime, Termination};
use crate::solver::{RuinListener, StrategyListener, Telemetry, TelemetryMode};
use crate::utils::{
    get_cpus, DefaultRandom, Environment, GenericError, GenericResult, InfoLogger, Quota, ThreadPool, DEFAULT_SEED,
};
use std::str::FromStr;
use std::sync::Arc;

/// A default amount of generations to run.
const DEFAULT_GENERATIONS: usize = 2000;

/// A default amount of the top ranked jobs which the worst removal can skip in one round.
const DEFAULT_WORST_SKIP: usize = 3;

/// A default frequency of generation logging.
const DEFAULT_LOG_BEST: usize = 100;

/// Provides the way to configure and build a solver.
///
/// Scalar parameters can be set via dedicated methods or via the flat key value interface of
/// [`SolverBuilder::with_setting`]. A dedicated method takes precedence over a flat setting
/// with the same meaning.
pub struct SolverBuilder {
    problem: Arc<Problem>,
    iterations: Option<usize>,
    max_time: Option<f64>,
    seed: Option<u64>,
    threads: Option<usize>,
    penalty_base: Option<f64>,
    probability: Option<f64>,
    weights: Vec<(String, f64)>,
    settings: Vec<(String, String)>,
    strategies: Option<Vec<SearchStrategy>>,
    logger: Option<InfoLogger>,
    quota: Option<Arc<dyn Quota>>,
    telemetry: Option<TelemetryMode>,
    strategy_listeners: StrategyListeners,
    ruin_listeners: RuinListeners,
    insertion_listeners: InsertionListeners,
}

impl SolverBuilder {
    /// Creates a new instance of `SolverBuilder` for the given problem.
    pub fn new(problem: Arc<Problem>) -> Self {
        Self {
            problem,
            iterations: None,
            max_time: None,
            seed: None,
            threads: None,
            penalty_base: None,
            probability: None,
            weights: vec![],
            settings: vec![],
            strategies: None,
            logger: None,
            quota: None,
            telemetry: None,
            strategy_listeners: StrategyListeners::default(),
            ruin_listeners: RuinListeners::default(),
            insertion_listeners: InsertionListeners::default(),
        }
    }

    /// Sets an amount of generations to run, default is 2000.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets a wall clock limit in seconds counted from the build call.
    pub fn with_max_time(mut self, max_time: f64) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Sets a seed of the random generator, default is 4711.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an amount of threads used by parallelized work, default is amount of CPUs.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets a base of the unassigned job penalty, default is 1E3.
    pub fn with_penalty_base(mut self, penalty_base: f64) -> Self {
        self.penalty_base = Some(penalty_base);
        self
    }

    /// Sets a probability to accept a worse solution. When it is set, the default strategies
    /// use the randomized greedy acceptance instead of the plain greedy one.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Sets a selection weight of the search strategy with the given id.
    pub fn with_strategy_weight(mut self, id: &str, weight: f64) -> Self {
        self.weights.push((id.to_string(), weight));
        self
    }

    /// Adds a flat configuration setting. Known keys are `iterations`, `max_time`, `seed`,
    /// `threads`, `penalty_base`, `probability` and one key per search strategy id which
    /// configures its selection weight. Unknown keys and unparsable values fail the build.
    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.push((key.to_string(), value.to_string()));
        self
    }

    /// Replaces the default search strategies with the given ones.
    pub fn with_strategies(mut self, strategies: Vec<SearchStrategy>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Sets a logger used by the environment and the default telemetry.
    pub fn with_logger(mut self, logger: InfoLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets an interruption quota checked between generations.
    pub fn with_quota(mut self, quota: Arc<dyn Quota>) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Sets a telemetry mode, logging every accepted and each 100th generation by default.
    pub fn with_telemetry(mut self, telemetry: TelemetryMode) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Registers a strategy listener.
    pub fn with_strategy_listener(mut self, listener: Arc<dyn StrategyListener + Send + Sync>) -> Self {
        self.strategy_listeners.add(listener);
        self
    }

    /// Registers a ruin listener.
    pub fn with_ruin_listener(mut self, listener: Arc<dyn RuinListener + Send + Sync>) -> Self {
        self.ruin_listeners.add(listener);
        self
    }

    /// Registers an insertion listener.
    pub fn with_insertion_listener(mut self, listener: Arc<dyn InsertionListener + Send + Sync>) -> Self {
        self.insertion_listeners.add(listener);
        self
    }

    /// Validates the configuration and builds a solver.
    pub fn build(self) -> GenericResult<Solver> {
        let Self {
            problem,
            iterations,
            max_time,
            seed,
            threads,
            penalty_base,
            probability,
            weights: typed_weights,
            settings,
            strategies,
            logger,
            quota,
            telemetry,
            strategy_listeners,
            ruin_listeners,
            mut insertion_listeners,
        } = self;

        // scalar settings are parsed here, strategy weight keys once the strategy table is known
        let mut flat_iterations = None;
        let mut flat_max_time = None;
        let mut flat_seed = None;
        let mut flat_threads = None;
        let mut flat_penalty_base = None;
        let mut flat_probability = None;
        let mut flat_weight_settings = Vec::new();

        for (key, value) in settings.iter() {
            match key.as_str() {
                "iterations" => flat_iterations = Some(parse_value::<usize>(key, value)?),
                "max_time" => flat_max_time = Some(parse_value::<f64>(key, value)?),
                "seed" => flat_seed = Some(parse_value::<u64>(key, value)?),
                "threads" => flat_threads = Some(parse_value::<usize>(key, value)?),
                "penalty_base" => flat_penalty_base = Some(parse_value::<f64>(key, value)?),
                "probability" => flat_probability = Some(parse_value::<f64>(key, value)?),
                _ => flat_weight_settings.push((key.as_str(), value.as_str())),
            }
        }

        let iterations = iterations.or(flat_iterations).unwrap_or(DEFAULT_GENERATIONS);
        let max_time = max_time.or(flat_max_time);
        let seed = seed.or(flat_seed).unwrap_or(DEFAULT_SEED);
        let threads = threads.or(flat_threads).unwrap_or_else(get_cpus);
        let penalty_base = penalty_base.or(flat_penalty_base);
        let probability = probability.or(flat_probability);

        if let Some(probability) = probability {
            if !(0. ..=1.).contains(&probability) {
                return Err(format!("acceptance probability must be in [0, 1] range, got {probability}").into());
            }
        }

        probe_transport(problem.as_ref())?;

        let logger = logger.unwrap_or_else(|| Arc::new(|msg: &str| println!("{msg}")));
        let environment = Arc::new(Environment::new(
            Arc::new(DefaultRandom::new_with_seed(seed)),
            quota,
            ThreadPool::new(threads),
            logger.clone(),
        ));
        let telemetry = Telemetry::new(
            telemetry.unwrap_or_else(|| TelemetryMode::OnlyLogging { logger, log_best: DEFAULT_LOG_BEST }),
        );

        let invalid_cost = Arc::new(InvalidCostTracker::default());
        insertion_listeners.add(invalid_cost.clone());

        let cheapest: Arc<dyn Recreate + Send + Sync> =
            Arc::new(RecreateWithCheapest::new(insertion_listeners.clone()));

        let mut strategies = match strategies {
            Some(strategies) => strategies,
            None => create_default_strategies(problem.as_ref(), &cheapest, insertion_listeners, probability),
        };

        for (key, value) in flat_weight_settings {
            let strategy = strategies
                .iter_mut()
                .find(|strategy| strategy.id == key)
                .ok_or_else(|| GenericError::from(format!("unknown configuration key: '{key}'")))?;
            strategy.weight = parse_value::<f64>(key, value)?;
        }

        for (id, weight) in typed_weights {
            let strategy = strategies
                .iter_mut()
                .find(|strategy| strategy.id == id)
                .ok_or_else(|| GenericError::from(format!("unknown search strategy: '{id}'")))?;
            strategy.weight = weight;
        }

        if let Some(strategy) =
            strategies.iter().find(|strategy| !(strategy.weight.is_finite() && strategy.weight >= 0.))
        {
            return Err(format!("strategy weight of '{}' must be a non negative number", strategy.id).into());
        }

        if !strategies.iter().any(|strategy| strategy.weight > 0.) {
            return Err("at least one search strategy must have a positive weight".into());
        }

        let weights = strategies.iter().map(|strategy| strategy.weight).collect();

        let mut terminations: Vec<Box<dyn Termination + Send + Sync>> =
            vec![Box::new(MaxGeneration::new(iterations))];
        if let Some(limit) = max_time {
            terminations.push(Box::new(MaxTime::new(limit)));
        }

        Ok(Solver {
            problem,
            environment,
            strategies,
            weights,
            initial: cheapest,
            objective: Box::new(penalty_base.map_or_else(PenalizeUnassigned::default, PenalizeUnassigned::new)),
            termination: CompositeTermination::new(terminations),
            telemetry,
            strategy_listeners,
            ruin_listeners,
            invalid_cost,
        })
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> GenericResult<T> {
    value.parse::<T>().map_err(|_| format!("cannot parse value '{value}' of '{key}'").into())
}

/// Checks the transport seam with one vehicle and job location pair.
fn probe_transport(problem: &Problem) -> GenericResult<()> {
    let vehicle = problem.fleet.vehicles.first();
    let job_location = problem.jobs.all().next().and_then(|job| job.places().next().map(|place| place.location));

    if let (Some(vehicle), Some(location)) = (vehicle, job_location) {
        let distance = problem.transport.distance(vehicle.start, location);
        let duration = problem.transport.duration(vehicle.start, location);

        if !distance.is_finite() || !duration.is_finite() {
            return Err("transport costs between fleet and jobs are not finite".into());
        }
    }

    Ok(())
}

fn create_default_strategies(
    problem: &Problem,
    cheapest: &Arc<dyn Recreate + Send + Sync>,
    insertion_listeners: InsertionListeners,
    probability: Option<f64>,
) -> Vec<SearchStrategy> {
    let limits = RemovalLimits::new(problem);

    let radial_ruin: Arc<dyn Ruin + Send + Sync> = Arc::new(CompositeRuin::new(vec![
        (Arc::new(NeighbourRemoval::new(limits.clone())), 1.),
        (Arc::new(RandomJobRemoval::new(limits.clone())), 0.1),
    ]));
    let random_ruin: Arc<dyn Ruin + Send + Sync> =
        Arc::new(CompositeRuin::new(vec![(Arc::new(RandomJobRemoval::new(limits.clone())), 1.)]));
    let worst_ruin: Arc<dyn Ruin + Send + Sync> = Arc::new(CompositeRuin::new(vec![
        (Arc::new(WorstJobRemoval::new(DEFAULT_WORST_SKIP, limits.clone())), 1.),
        (Arc::new(RandomJobRemoval::new(limits)), 0.1),
    ]));

    let regret: Arc<dyn Recreate + Send + Sync> = Arc::new(RecreateWithRegret::new(insertion_listeners));

    let acceptance: Arc<dyn Acceptance + Send + Sync> = match probability {
        Some(probability) => Arc::new(RandomizedGreedy::new(Box::new(Greedy::default()), probability)),
        None => Arc::new(Greedy::default()),
    };

    [
        ("radial_best", &radial_ruin, cheapest, 0.),
        ("radial_regret", &radial_ruin, &regret, 0.5),
        ("random_best", &random_ruin, cheapest, 0.5),
        ("random_regret", &random_ruin, &regret, 0.5),
        ("worst_best", &worst_ruin, cheapest, 0.),
        ("worst_regret", &worst_ruin, &regret, 1.),
    ]
    .into_iter()
    .map(|(id, ruin, recreate, weight)| SearchStrategy {
        id: id.to_string(),
        ruin: ruin.clone(),
        recreate: recreate.clone(),
        acceptance: acceptance.clone(),
        weight,
    })
    .collect()
}
