//! Algorithm selection.
//!
//! Every routing method implements [`RoutingAlgorithm`]. [`Algorithm`] is the
//! serializable choice between them that a host passes in with a request, and
//! [`optimize`] is the single entry point that validates the input, builds
//! the distance matrix and dispatches.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constructive::{NearestNeighbor, NearestNeighborConfig};
use crate::error::RoutingError;
use crate::models::{FleetConstraints, Location, RoutingProblem, Solution};
use crate::solver::{SolverAdapter, SolverConfig};

/// A method that turns a validated [`RoutingProblem`] into a [`Solution`].
///
/// Implementations return a solution with one route per vehicle slot that
/// serves every customer exactly once and respects every fleet constraint,
/// or an [`Infeasible`](RoutingError::Infeasible) error. They never return a
/// partial assignment.
pub trait RoutingAlgorithm {
    /// Human-readable name, recorded on the solution.
    fn name(&self) -> String;

    fn solve(&self, problem: &RoutingProblem) -> Result<Solution, RoutingError>;
}

/// Selectable routing algorithm and its configuration.
///
/// # Examples
///
/// ```
/// use fleet_routing::algorithm::Algorithm;
/// use fleet_routing::solver::FirstSolutionStrategy;
///
/// let algo: Algorithm = serde_json::from_str(
///     r#"{"algorithm": "solver", "first_solution": "SWEEP", "time_limit": 5}"#,
/// ).unwrap();
/// let Algorithm::Solver(config) = algo else { unreachable!() };
/// assert_eq!(config.first_solution, FirstSolutionStrategy::Sweep);
///
/// let nn: Algorithm = serde_json::from_str(r#"{"algorithm": "nearest_neighbor"}"#).unwrap();
/// assert!(matches!(nn, Algorithm::NearestNeighbor(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Algorithm {
    /// Greedy nearest-neighbor construction.
    NearestNeighbor(NearestNeighborConfig),
    /// Construction plus metaheuristic search through [`SolverAdapter`].
    Solver(SolverConfig),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::NearestNeighbor(NearestNeighborConfig::default())
    }
}

impl RoutingAlgorithm for Algorithm {
    fn name(&self) -> String {
        match self {
            Algorithm::NearestNeighbor(config) => NearestNeighbor::new(config.clone()).name(),
            Algorithm::Solver(config) => SolverAdapter::new(config.clone()).name(),
        }
    }

    fn solve(&self, problem: &RoutingProblem) -> Result<Solution, RoutingError> {
        match self {
            Algorithm::NearestNeighbor(config) => {
                NearestNeighbor::new(config.clone()).solve(problem)
            }
            Algorithm::Solver(config) => SolverAdapter::new(config.clone()).solve(problem),
        }
    }
}

/// Validates the request, builds the haversine distance matrix and runs
/// `algorithm`.
///
/// # Errors
///
/// [`RoutingError::InvalidInput`] for malformed locations or fleet data,
/// [`RoutingError::Infeasible`] when no complete assignment was produced.
///
/// The haversine matrix needs at least two locations, so a depot-only
/// request fails with
/// [`InvalidInput::TooFewLocations`](crate::error::InvalidInput::TooFewLocations).
/// Build such a problem with [`RoutingProblem::with_matrix`] and a 1×1
/// matrix, then call [`RoutingAlgorithm::solve`]: every vehicle gets an
/// empty route.
///
/// # Examples
///
/// ```
/// use fleet_routing::algorithm::{optimize, Algorithm};
/// use fleet_routing::models::{FleetConstraints, Location};
///
/// let locations = vec![
///     Location::depot(-23.5505, -46.6333),
///     Location::new(1, "Paulista", -23.5613, -46.6565).with_demand(15),
///     Location::new(2, "Pinheiros", -23.5629, -46.6544).with_demand(20),
///     Location::new(3, "Vila Madalena", -23.5489, -46.6388).with_demand(18),
///     Location::new(4, "Jardins", -23.5505, -46.6333).with_demand(12),
/// ];
/// let fleet = FleetConstraints::new(2).with_capacity(50);
///
/// let solution = optimize(locations, fleet, &Algorithm::default()).unwrap();
/// assert_eq!(solution.num_served(), 4);
/// assert_eq!(solution.vehicles_used(), 2);
/// ```
pub fn optimize(
    locations: Vec<Location>,
    fleet: FleetConstraints,
    algorithm: &Algorithm,
) -> Result<Solution, RoutingError> {
    let problem = RoutingProblem::new(locations, fleet)?;
    debug!(
        locations = problem.num_locations(),
        vehicles = problem.num_vehicles(),
        algorithm = %algorithm.name(),
        "optimizing"
    );
    let solution = algorithm.solve(&problem)?;
    info!(
        algorithm = %solution.algorithm_name(),
        objective = solution.objective_value(),
        "optimization finished"
    );
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::error::InvalidInput;

    fn scenario() -> Vec<Location> {
        vec![
            Location::depot(-23.5505, -46.6333),
            Location::new(1, "Paulista", -23.5613, -46.6565).with_demand(15),
            Location::new(2, "Pinheiros", -23.5629, -46.6544).with_demand(20),
            Location::new(3, "Vila Madalena", -23.5489, -46.6388).with_demand(18),
            Location::new(4, "Jardins", -23.5505, -46.6333).with_demand(12),
        ]
    }

    #[test]
    fn test_default_is_nearest_neighbor() {
        assert_eq!(Algorithm::default().name(), "Nearest Neighbor");
    }

    #[test]
    fn test_solver_dispatch() {
        let config = SolverConfig::default()
            .with_time_limit(Duration::from_secs(5))
            .with_iteration_limit(50);
        let solution = optimize(
            scenario(),
            FleetConstraints::new(2).with_capacity(50),
            &Algorithm::Solver(config),
        )
        .expect("feasible");
        assert_eq!(solution.num_served(), 4);
        assert!(solution.algorithm_name().starts_with("LocalSearchSolver"));
    }

    #[test]
    fn test_invalid_input_surfaces_first() {
        let err = optimize(scenario(), FleetConstraints::new(0), &Algorithm::default())
            .unwrap_err();
        assert_eq!(err, RoutingError::InvalidInput(InvalidInput::NoVehicles));
    }

    #[test]
    fn test_depot_only_needs_explicit_matrix() {
        let depot = vec![Location::depot(-23.5505, -46.6333)];
        let err = optimize(depot.clone(), FleetConstraints::new(2), &Algorithm::default())
            .unwrap_err();
        assert_eq!(
            err,
            RoutingError::InvalidInput(InvalidInput::TooFewLocations {
                count: 1,
                required: 2
            })
        );

        let matrix = DistanceMatrix::from_data(1, vec![0.0]).expect("1x1 matrix");
        let problem = RoutingProblem::with_matrix(depot, FleetConstraints::new(2), matrix)
            .expect("valid input");
        let solution = Algorithm::default().solve(&problem).expect("empty routes");
        assert_eq!(solution.num_routes(), 2);
        assert_eq!(solution.vehicles_used(), 0);
    }

    #[test]
    fn test_serde_tag() {
        let v = serde_json::to_value(Algorithm::default()).expect("serialize");
        assert_eq!(v["algorithm"], "nearest_neighbor");
    }
}
