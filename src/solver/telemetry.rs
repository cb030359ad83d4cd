#[cfg(test)]
#[path = "../../tests/unit/solver/telemetry_test.rs"]
mod telemetry_test;

use crate::construction::heuristics::InsertionContext;
use crate::solver::{ObjectiveCost, RefinementContext, SolutionPool};
use crate::utils::{InfoLogger, Timer};
use std::ops::Deref;

/// Specifies a telemetry mode.
pub enum TelemetryMode {
    /// No telemetry at all.
    None,
    /// Telemetry which writes progress messages with the given logger.
    OnlyLogging {
        /// A logger used to write progress messages.
        logger: InfoLogger,
        /// Specifies how often generation progress is logged.
        log_best: usize,
    },
}

/// Provides a way to log progress of the search.
pub struct Telemetry {
    mode: TelemetryMode,
    time: Timer,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode) -> Self {
        Self { mode, time: Timer::start() }
    }

    /// Starts telemetry reporting.
    pub fn start(&mut self) {
        self.time = Timer::start();
    }

    /// Reports initial solution statistics.
    pub fn on_initial(&self, insertion_ctx: &InsertionContext, cost: &ObjectiveCost, construction_time: Timer) {
        self.log(
            format!(
                "[{}s] created initial solution in {}ms, cost: {:.2}, routes: {}, unassigned: {}",
                self.time.elapsed_secs(),
                construction_time.elapsed_millis(),
                cost.total(),
                insertion_ctx.solution.routes.len(),
                insertion_ctx.solution.unassigned.len()
            )
            .as_str(),
        );
    }

    /// Reports generation statistics. Accepted generations are always logged, the others
    /// based on the configured frequency.
    pub fn on_generation(
        &self,
        generation: usize,
        generation_time: Timer,
        pool: &SolutionPool,
        candidate: (&InsertionContext, &ObjectiveCost),
        is_accepted: bool,
    ) {
        let log_best = match &self.mode {
            TelemetryMode::None => return,
            TelemetryMode::OnlyLogging { log_best, .. } => *log_best,
        };

        if generation % log_best == 0 || is_accepted {
            let (insertion_ctx, cost) = candidate;
            self.log(
                format!(
                    "[{}s] generation {} took {}ms, cost: ({:.2}, {:.2}), best: {:.2}, routes: {}, accepted: {}",
                    self.time.elapsed_secs(),
                    generation,
                    generation_time.elapsed_millis(),
                    cost.actual,
                    cost.penalty,
                    pool.best().map_or(cost.total(), |(_, best)| best.total()),
                    insertion_ctx.solution.routes.len(),
                    is_accepted
                )
                .as_str(),
            );
        }
    }

    /// Reports final statistics.
    pub fn on_result(&self, refinement_ctx: &RefinementContext) {
        let best = refinement_ctx.pool.best().map_or("none".to_string(), |(_, cost)| format!("{:.2}", cost.total()));

        self.log(
            format!(
                "[{}s] total generations: {}, speed: {:.2} gen/sec, best cost: {}",
                self.time.elapsed_secs(),
                refinement_ctx.generation,
                refinement_ctx.generation as f64 / self.time.elapsed_secs_as_f64(),
                best
            )
            .as_str(),
        );
    }

    /// Writes the message to the log.
    pub fn log(&self, message: &str) {
        match &self.mode {
            TelemetryMode::OnlyLogging { logger, .. } => logger.deref()(message),
            TelemetryMode::None => {}
        }
    }
}
