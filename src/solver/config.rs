//! Solver adapter configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::engine::SearchParameters;
use super::formulation::Objective;
use super::metaheuristic::Metaheuristic;

/// How the initial solution is built before local search starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirstSolutionStrategy {
    /// Extend each route with the cheapest arc from its last node.
    #[default]
    PathCheapestArc,
    /// Polar-angle sweep around the depot.
    Sweep,
    /// Clarke-Wright savings.
    Savings,
}

impl FirstSolutionStrategy {
    pub const ALL: [FirstSolutionStrategy; 3] = [
        FirstSolutionStrategy::PathCheapestArc,
        FirstSolutionStrategy::Sweep,
        FirstSolutionStrategy::Savings,
    ];
}

impl fmt::Display for FirstSolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FirstSolutionStrategy::PathCheapestArc => "PATH_CHEAPEST_ARC",
            FirstSolutionStrategy::Sweep => "SWEEP",
            FirstSolutionStrategy::Savings => "SAVINGS",
        })
    }
}

/// Configuration for [`SolverAdapter`](super::SolverAdapter).
///
/// Defaults: cheapest-arc start, guided local search, 30 s, seed 42, no
/// iteration limit, total distance plus 100 × longest route.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::solver::{FirstSolutionStrategy, Metaheuristic, SolverConfig};
///
/// let config: SolverConfig = serde_json::from_str(
///     r#"{"first_solution": "SAVINGS", "metaheuristic": "TABU_SEARCH", "time_limit": 2.5}"#,
/// ).unwrap();
/// assert_eq!(config.first_solution, FirstSolutionStrategy::Savings);
/// assert_eq!(config.metaheuristic, Metaheuristic::TabuSearch);
/// assert_eq!(config.time_limit, Duration::from_millis(2500));
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub first_solution: FirstSolutionStrategy,
    pub metaheuristic: Metaheuristic,
    /// Wall-clock search budget, in seconds when serialized. Limits above one
    /// year are treated as one year.
    #[serde(with = "crate::serde_secs")]
    pub time_limit: Duration,
    pub seed: u64,
    /// Caps metaheuristic iterations so runs do not depend on machine speed.
    pub iteration_limit: Option<usize>,
    pub objective: Objective,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            first_solution: FirstSolutionStrategy::default(),
            metaheuristic: Metaheuristic::default(),
            time_limit: Duration::from_secs(30),
            seed: 42,
            iteration_limit: None,
            objective: Objective::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_first_solution(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution = strategy;
        self
    }

    pub fn with_metaheuristic(mut self, metaheuristic: Metaheuristic) -> Self {
        self.metaheuristic = metaheuristic;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// The search-related subset handed to the engine.
    pub fn search_parameters(&self) -> SearchParameters {
        SearchParameters {
            first_solution: self.first_solution,
            metaheuristic: self.metaheuristic,
            time_limit: self.time_limit,
            iteration_limit: self.iteration_limit,
            seed: self.seed,
        }
    }
}
