//! Routing through a general combinatorial solver.
//!
//! The problem is restated as a [`RoutingModel`] (nodes, vehicles, arc costs,
//! capacity and distance dimensions, an [`Objective`]) and handed to a
//! [`CombinatorialSolver`]. The bundled [`LocalSearchSolver`] builds a first
//! solution with one of the [`FirstSolutionStrategy`] heuristics and improves
//! it with a [`Metaheuristic`] under a wall-clock budget.
//!
//! [`SolverAdapter`] wraps the whole pipeline as a
//! [`RoutingAlgorithm`](crate::algorithm::RoutingAlgorithm).

mod adapter;
mod config;
mod engine;
mod formulation;
mod metaheuristic;

pub use adapter::SolverAdapter;
pub use config::{FirstSolutionStrategy, SolverConfig};
pub use engine::{CombinatorialSolver, LocalSearchSolver, SearchOutcome, SearchParameters};
pub use formulation::{Dimension, Objective, RoutingModel, Score};
pub use metaheuristic::Metaheuristic;
