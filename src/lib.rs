//! # fleet-routing
//!
//! Capacitated vehicle routing from geographic coordinates: a greedy
//! nearest-neighbor constructor, a local-search solver behind a pluggable
//! engine trait, and cost and emission reporting for the routes produced.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Location, FleetConstraints, Route, Solution, RoutingProblem)
//! - [`distance`]: Haversine distance and the dense distance matrix
//! - [`evaluation`]: Constraint checks, infeasibility proofs, solution metrics
//! - [`constructive`]: Constructive heuristics (Nearest Neighbor, Sweep, Clarke-Wright, insertion)
//! - [`local_search`]: Neighborhood moves (relocate, exchange, Or-opt, 2-opt, 2-opt*)
//! - [`solver`]: Routing model, first-solution strategies, metaheuristics
//! - [`algorithm`]: Algorithm selection and the [`optimize`] entry point
//! - [`cost`]: Fuel, driver, depreciation, toll and CO2 estimates
//! - [`sample`]: Seeded random instances
//!
//! ## Example
//!
//! ```
//! use fleet_routing::{optimize, Algorithm, CostModel, SolutionMetrics};
//! use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
//!
//! let locations = vec![
//!     Location::depot(-23.5505, -46.6333),
//!     Location::new(1, "Paulista", -23.5613, -46.6565).with_demand(15),
//!     Location::new(2, "Pinheiros", -23.5629, -46.6544).with_demand(20),
//!     Location::new(3, "Vila Madalena", -23.5489, -46.6388).with_demand(18),
//! ];
//! let fleet = FleetConstraints::new(2).with_capacity(50);
//!
//! let solution = optimize(locations.clone(), fleet.clone(), &Algorithm::default()).unwrap();
//!
//! let problem = RoutingProblem::new(locations, fleet).unwrap();
//! let metrics = SolutionMetrics::compute(&solution, &problem);
//! let costs = CostModel::default().compute(&solution, problem.distances());
//! assert_eq!(metrics.customers_served, 3);
//! assert!(costs.total_cost > 0.0);
//! ```

pub mod algorithm;
pub mod constructive;
pub mod cost;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod sample;
pub mod solver;

mod serde_secs;

pub use algorithm::{optimize, Algorithm, RoutingAlgorithm};
pub use cost::{CostBreakdown, CostModel};
pub use error::{Infeasibility, InvalidInput, RoutingError};
pub use evaluation::SolutionMetrics;
