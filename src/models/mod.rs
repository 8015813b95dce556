//! Domain model types.
//!
//! Locations with demands, homogeneous fleet constraints, routes framed by
//! the depot, solutions, and the validated problem that ties them together.

mod fleet;
mod location;
mod problem;
mod route;
mod solution;

pub use fleet::FleetConstraints;
pub use location::Location;
pub use problem::RoutingProblem;
pub use route::Route;
pub use solution::Solution;

pub(crate) use solution::assert_complete;

/// Matrix index of the depot.
pub const DEPOT: usize = 0;
