//! A collection of various utility helpers.

mod comparison;
pub use self::comparison::*;

mod environment;
pub use self::environment::{Environment, InfoLogger, Quota};

mod error;
pub use self::error::{GenericError, GenericResult};

mod parallel;
pub use self::parallel::*;

mod random;
pub use self::random::{DefaultRandom, Random, DEFAULT_SEED};

mod time_quota;
pub use self::time_quota::TimeQuota;

mod timing;
pub use self::timing::Timer;
