use crate::utils::{DefaultRandom, Random, ThreadPool};
use std::sync::Arc;

/// Specifies a logging function type.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// A trait which tracks the state of the external interruption request.
pub trait Quota: Send + Sync {
    /// Returns true when search should be stopped.
    fn is_reached(&self) -> bool;
}

/// Keeps track of environmental parameters shared by the search.
pub struct Environment {
    /// A random generator. Drawn from only on the thread which runs the search loop.
    pub random: Arc<dyn Random + Send + Sync>,
    /// An interruption quota checked between iterations.
    pub quota: Option<Arc<dyn Quota>>,
    /// A dedicated thread pool which runs all parallelized work.
    pub thread_pool: ThreadPool,
    /// A logging function.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates a new instance of `Environment`.
    pub fn new(
        random: Arc<dyn Random + Send + Sync>,
        quota: Option<Arc<dyn Quota>>,
        thread_pool: ThreadPool,
        logger: InfoLogger,
    ) -> Self {
        Self { random, quota, thread_pool, logger }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(
            Arc::new(DefaultRandom::default()),
            None,
            ThreadPool::default(),
            Arc::new(|msg| println!("{msg}")),
        )
    }
}
