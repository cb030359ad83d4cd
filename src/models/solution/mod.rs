//! Solution domain models.

mod registry;
pub use self::registry::Registry;

mod route;
pub use self::route::{Activity, Place, Route};

mod tour;
pub use self::tour::Tour;
