//! Route evaluation, feasibility certificates and solution metrics.

mod evaluator;
mod feasibility;
mod metrics;

pub use evaluator::{RouteEvaluator, RouteSummary, Violation};
pub use feasibility::prove_infeasible;
pub use metrics::SolutionMetrics;

pub(crate) use evaluator::DISTANCE_TOLERANCE;
