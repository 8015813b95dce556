//! Solution type and assignment validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Route, DEPOT};
use crate::error::AssignmentDefect;

/// A complete assignment of customers to vehicle routes.
///
/// Holds one [`Route`] per vehicle slot (unused vehicles keep a depot-only
/// route), the name of the algorithm that produced it, its wall-clock
/// execution time, and the objective value in meters.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::models::{Route, Solution};
///
/// let sol = Solution::new(
///     vec![Route::from_customers(0, &[1, 2]), Route::empty(1)],
///     "Nearest Neighbor",
///     Duration::from_millis(3),
///     1200.0,
/// );
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.vehicles_used(), 1);
/// assert!(sol.check_assignment(3).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    algorithm_name: String,
    #[serde(rename = "execution_time_seconds", with = "crate::serde_secs")]
    execution_time: Duration,
    #[serde(rename = "objective_value_meters")]
    objective_value: f64,
}

impl Solution {
    pub fn new(
        routes: Vec<Route>,
        algorithm_name: impl Into<String>,
        execution_time: Duration,
        objective_value: f64,
    ) -> Self {
        Self {
            routes,
            algorithm_name: algorithm_name.into(),
            execution_time,
            objective_value,
        }
    }

    /// Routes, one per vehicle slot.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of vehicle slots (including unused ones).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of routes serving at least one customer.
    pub fn vehicles_used(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Total number of customers served.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    /// Objective value reported by the producing algorithm, in meters.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Checks that every customer `1..num_locations` is served exactly once
    /// and that every route is closed at the depot.
    pub fn check_assignment(&self, num_locations: usize) -> Result<(), AssignmentDefect> {
        let mut seen = vec![false; num_locations];
        for (idx, route) in self.routes.iter().enumerate() {
            if !route.is_closed() {
                return Err(AssignmentDefect::Malformed(idx));
            }
            for &loc in route.customers() {
                if loc == DEPOT || loc >= num_locations {
                    return Err(AssignmentDefect::UnknownLocation {
                        route: idx,
                        location: loc,
                    });
                }
                if seen[loc] {
                    return Err(AssignmentDefect::Duplicated(loc));
                }
                seen[loc] = true;
            }
        }
        match (1..num_locations).find(|&i| !seen[i]) {
            Some(missing) => Err(AssignmentDefect::Missing(missing)),
            None => Ok(()),
        }
    }
}

/// Panics if `solution` does not serve every customer exactly once.
///
/// Algorithms call this before handing a solution back; a failure is a bug
/// in the algorithm, not something the caller can act on.
pub(crate) fn assert_complete(solution: &Solution, num_locations: usize) {
    if let Err(defect) = solution.check_assignment(num_locations) {
        tracing::error!(%defect, algorithm = solution.algorithm_name(), "partial assignment");
        panic!(
            "{} returned a partial assignment: {defect}",
            solution.algorithm_name()
        );
    }
}
