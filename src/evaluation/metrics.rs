//! Solution statistics shared by every algorithm.

use serde::Serialize;

use super::evaluator::RouteEvaluator;
use crate::models::{RoutingProblem, Solution};

/// Per-route and whole-solution statistics.
///
/// Empty routes contribute zero distance and zero load and are not counted
/// in [`SolutionMetrics::vehicles_used`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionMetrics {
    /// Distance of each route slot in meters, including empty slots.
    pub route_distances: Vec<f64>,
    pub total_distance: f64,
    pub max_route_distance: f64,
    /// Routes serving at least one customer.
    pub vehicles_used: usize,
    pub customers_served: usize,
    /// Demand served by each route slot.
    pub route_loads: Vec<i64>,
    /// Load / capacity per route slot, present only when capacity is active.
    pub capacity_utilization: Option<Vec<f64>>,
}

impl SolutionMetrics {
    /// Derives metrics from a solution using the problem's distance matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use fleet_routing::models::{FleetConstraints, Location, Route, RoutingProblem, Solution};
    /// use fleet_routing::evaluation::SolutionMetrics;
    ///
    /// let locations = vec![
    ///     Location::depot(0.0, 0.0),
    ///     Location::new(1, "A", 0.0, 0.01).with_demand(10),
    /// ];
    /// let fleet = FleetConstraints::new(2).with_capacity(40);
    /// let problem = RoutingProblem::new(locations, fleet).unwrap();
    /// let solution = Solution::new(
    ///     vec![Route::from_customers(0, &[1]), Route::empty(1)],
    ///     "manual",
    ///     Duration::ZERO,
    ///     0.0,
    /// );
    /// let m = SolutionMetrics::compute(&solution, &problem);
    /// assert_eq!(m.vehicles_used, 1);
    /// assert_eq!(m.capacity_utilization, Some(vec![0.25, 0.0]));
    /// ```
    pub fn compute(solution: &Solution, problem: &RoutingProblem) -> Self {
        let evaluator = RouteEvaluator::new(problem);
        let summaries: Vec<_> = solution
            .routes()
            .iter()
            .map(|r| evaluator.summarize(r))
            .collect();

        let route_distances: Vec<f64> = summaries.iter().map(|s| s.distance).collect();
        let route_loads: Vec<i64> = summaries.iter().map(|s| s.load).collect();
        let total_distance = route_distances.iter().sum();
        let max_route_distance = route_distances.iter().copied().fold(0.0, f64::max);

        let capacity_utilization = problem.active_capacity().map(|cap| {
            route_loads
                .iter()
                .map(|&load| if cap > 0 { load as f64 / cap as f64 } else { 0.0 })
                .collect()
        });

        Self {
            route_distances,
            total_distance,
            max_route_distance,
            vehicles_used: solution.vehicles_used(),
            customers_served: solution.num_served(),
            route_loads,
            capacity_utilization,
        }
    }

    /// Mean distance over routes that serve at least one customer.
    pub fn average_route_distance(&self) -> f64 {
        if self.vehicles_used == 0 {
            0.0
        } else {
            self.total_distance / self.vehicles_used as f64
        }
    }
}
