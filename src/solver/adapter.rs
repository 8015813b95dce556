//! Bridges a [`RoutingProblem`] to a [`CombinatorialSolver`] and back.

use std::time::Instant;

use tracing::{debug, error, info, warn};

use super::config::SolverConfig;
use super::engine::{CombinatorialSolver, LocalSearchSolver, SearchOutcome};
use super::formulation::RoutingModel;
use crate::algorithm::RoutingAlgorithm;
use crate::error::{Infeasibility, RoutingError, SearchLimit};
use crate::evaluation::{prove_infeasible, RouteEvaluator};
use crate::models::{assert_complete, Route, RoutingProblem, Solution, DEPOT};

/// Largest gap tolerated between an engine's objective and the measured distance.
const OBJECTIVE_TOLERANCE: f64 = 1e-6;

/// Routing through a combinatorial solver.
///
/// Formulates the problem as a [`RoutingModel`] (arc costs, a capacity
/// dimension when capacity is active, a distance dimension when a route
/// length cap is set), runs the engine under the configured budget and
/// translates the result back into a [`Solution`]. The solution's objective
/// value is the route distance in meters, measured on the problem's matrix
/// (see [`Objective::distance_value`](super::Objective::distance_value)).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::algorithm::RoutingAlgorithm;
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
/// use fleet_routing::solver::{SolverAdapter, SolverConfig};
///
/// let locations = vec![
///     Location::depot(-23.5505, -46.6333),
///     Location::new(1, "Paulista", -23.5613, -46.6565).with_demand(15),
///     Location::new(2, "Pinheiros", -23.5629, -46.6544).with_demand(20),
/// ];
/// let fleet = FleetConstraints::new(2).with_capacity(50);
/// let problem = RoutingProblem::new(locations, fleet).unwrap();
/// let config = SolverConfig::default()
///     .with_time_limit(Duration::from_secs(2))
///     .with_iteration_limit(50);
///
/// let solution = SolverAdapter::new(config).solve(&problem).unwrap();
/// assert_eq!(solution.num_served(), 2);
/// assert!(solution.algorithm_name().contains("GUIDED_LOCAL_SEARCH"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverAdapter<S = LocalSearchSolver> {
    config: SolverConfig,
    solver: S,
}

impl SolverAdapter {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            solver: LocalSearchSolver,
        }
    }
}

impl<S: CombinatorialSolver> SolverAdapter<S> {
    /// Uses a different engine.
    pub fn with_solver(config: SolverConfig, solver: S) -> Self {
        Self { config, solver }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl<S: CombinatorialSolver> RoutingAlgorithm for SolverAdapter<S> {
    fn name(&self) -> String {
        format!(
            "{} ({} + {})",
            self.solver.name(),
            self.config.first_solution,
            self.config.metaheuristic
        )
    }

    fn solve(&self, problem: &RoutingProblem) -> Result<Solution, RoutingError> {
        let start = Instant::now();

        if let Some(proof) = prove_infeasible(problem) {
            warn!(%proof, "problem proven infeasible");
            return Err(Infeasibility::Proven(proof).into());
        }

        if problem.num_customers() == 0 {
            let routes = (0..problem.num_vehicles()).map(Route::empty).collect();
            return Ok(Solution::new(routes, self.name(), start.elapsed(), 0.0));
        }

        let model = RoutingModel::from_problem(problem, self.config.objective);
        debug!(
            nodes = model.num_nodes(),
            vehicles = model.num_vehicles(),
            dimensions = model.dimensions().len(),
            "model built"
        );

        let params = self.config.search_parameters();
        match self.solver.search(&model, &params) {
            SearchOutcome::Solved {
                routes,
                objective_value,
                iterations,
                timed_out,
            } => {
                if routes.len() != problem.num_vehicles() {
                    error!(
                        expected = problem.num_vehicles(),
                        returned = routes.len(),
                        "solver returned the wrong number of routes"
                    );
                    let limit = SearchLimit::SearchExhausted { iterations };
                    return Err(Infeasibility::Undecided(limit).into());
                }

                let lengths: Vec<f64> = routes
                    .iter()
                    .map(|r| problem.distances().tour_length(DEPOT, r))
                    .collect();
                let measured = self.config.objective.distance_value(&lengths);
                if (measured - objective_value).abs() > OBJECTIVE_TOLERANCE {
                    warn!(
                        reported = objective_value,
                        measured,
                        "solver objective differs from the route distance"
                    );
                }

                let routes: Vec<Route> = routes
                    .iter()
                    .enumerate()
                    .map(|(vehicle, customers)| Route::from_customers(vehicle, customers))
                    .collect();
                let solution = Solution::new(routes, self.name(), start.elapsed(), measured);
                assert_complete(&solution, problem.num_locations());

                let violations = RouteEvaluator::new(problem).violations(&solution);
                if !violations.is_empty() {
                    error!(?violations, "solver returned an infeasible assignment");
                    let limit = SearchLimit::SearchExhausted { iterations };
                    return Err(Infeasibility::Undecided(limit).into());
                }

                info!(
                    algorithm = %solution.algorithm_name(),
                    objective = measured,
                    vehicles_used = solution.vehicles_used(),
                    iterations,
                    timed_out,
                    elapsed = ?solution.execution_time(),
                    "solved"
                );
                Ok(solution)
            }
            SearchOutcome::NoSolution {
                timed_out,
                iterations,
            } => {
                let limit = if timed_out {
                    SearchLimit::TimeBudgetExhausted {
                        time_limit: self.config.time_limit,
                    }
                } else {
                    SearchLimit::SearchExhausted { iterations }
                };
                warn!(%limit, "no feasible solution found");
                Err(Infeasibility::Undecided(limit).into())
            }
        }
    }
}
