//! Route evaluator: distance, load and constraint violations.

use serde::Serialize;

use crate::models::{Route, RoutingProblem, Solution};

/// Distance and load of a single route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Sum of consecutive arc lengths including the return leg, in meters.
    pub distance: f64,
    /// Sum of customer demands served.
    pub load: i64,
}

/// A constraint violated by a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// Cumulative demand above the vehicle capacity.
    CapacityExceeded {
        route_index: usize,
        load: i64,
        capacity: i32,
    },
    /// Route length above the fleet's maximum route distance.
    MaxDistanceExceeded {
        route_index: usize,
        distance: f64,
        max_distance: f64,
    },
}

/// Evaluates routes of a [`Solution`] against the problem's constraints.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{FleetConstraints, Location, Route, RoutingProblem};
/// use fleet_routing::evaluation::RouteEvaluator;
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, "A", 0.0, 0.01).with_demand(30),
///     Location::new(2, "B", 0.01, 0.0).with_demand(30),
/// ];
/// let fleet = FleetConstraints::new(1).with_capacity(50);
/// let problem = RoutingProblem::new(locations, fleet).unwrap();
/// let evaluator = RouteEvaluator::new(&problem);
///
/// let summary = evaluator.summarize(&Route::from_customers(0, &[1, 2]));
/// assert_eq!(summary.load, 60);
/// assert_eq!(evaluator.route_violations(0, &Route::from_customers(0, &[1, 2])).len(), 1);
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a RoutingProblem,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(problem: &'a RoutingProblem) -> Self {
        Self { problem }
    }

    /// Computes distance and load of a route. Empty routes are zero on both.
    pub fn summarize(&self, route: &Route) -> RouteSummary {
        RouteSummary {
            distance: self.problem.distances().path_length(route.stops()),
            load: route
                .customers()
                .iter()
                .map(|&c| self.problem.demand(c) as i64)
                .sum(),
        }
    }

    /// Lists the constraints a single route violates.
    pub fn route_violations(&self, route_index: usize, route: &Route) -> Vec<Violation> {
        let summary = self.summarize(route);
        let mut violations = Vec::new();

        if let Some(capacity) = self.problem.active_capacity() {
            if summary.load > capacity as i64 {
                violations.push(Violation::CapacityExceeded {
                    route_index,
                    load: summary.load,
                    capacity,
                });
            }
        }

        if let Some(max_distance) = self.problem.max_route_distance() {
            if summary.distance > max_distance + DISTANCE_TOLERANCE {
                violations.push(Violation::MaxDistanceExceeded {
                    route_index,
                    distance: summary.distance,
                    max_distance,
                });
            }
        }

        violations
    }

    /// Lists every violation across a solution.
    pub fn violations(&self, solution: &Solution) -> Vec<Violation> {
        solution
            .routes()
            .iter()
            .enumerate()
            .flat_map(|(idx, route)| self.route_violations(idx, route))
            .collect()
    }
}

/// Slack for floating-point accumulation when comparing route lengths against
/// the maximum route distance.
pub(crate) const DISTANCE_TOLERANCE: f64 = 1e-6;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMethod;
    use crate::models::{FleetConstraints, Location};
    use std::time::Duration;

    fn problem(fleet: FleetConstraints) -> RoutingProblem {
        let locations = vec![
            Location::depot(0.0, 0.0),
            Location::new(1, "a", 0.0, 3.0).with_demand(10),
            Location::new(2, "b", 4.0, 3.0).with_demand(20),
            Location::new(3, "c", 4.0, 0.0).with_demand(15),
        ];
        RoutingProblem::with_method(locations, fleet, DistanceMethod::Euclidean).expect("valid")
    }

    #[test]
    fn test_summarize_empty() {
        let p = problem(FleetConstraints::new(1));
        let s = RouteEvaluator::new(&p).summarize(&Route::empty(0));
        assert_eq!(s.distance, 0.0);
        assert_eq!(s.load, 0);
    }

    #[test]
    fn test_summarize_rectangle() {
        let p = problem(FleetConstraints::new(1));
        let s = RouteEvaluator::new(&p).summarize(&Route::from_customers(0, &[1, 2, 3]));
        assert!((s.distance - 14.0).abs() < 1e-10);
        assert_eq!(s.load, 45);
    }

    #[test]
    fn test_capacity_violation() {
        let p = problem(FleetConstraints::new(2).with_capacity(30));
        let eval = RouteEvaluator::new(&p);
        let v = eval.route_violations(1, &Route::from_customers(1, &[1, 2, 3]));
        assert_eq!(
            v,
            vec![Violation::CapacityExceeded {
                route_index: 1,
                load: 45,
                capacity: 30
            }]
        );
    }

    #[test]
    fn test_distance_violation() {
        let p = problem(FleetConstraints::new(1).with_max_route_distance(10.0));
        let eval = RouteEvaluator::new(&p);
        let sol = Solution::new(
            vec![Route::from_customers(0, &[1, 2, 3])],
            "t",
            Duration::ZERO,
            14.0,
        );
        let v = eval.violations(&sol);
        assert_eq!(v.len(), 1);
        assert!(matches!(v[0], Violation::MaxDistanceExceeded { route_index: 0, .. }));
    }

    #[test]
    fn test_feasible_route_has_no_violations() {
        let p = problem(FleetConstraints::new(1).with_capacity(50).with_max_route_distance(20.0));
        let eval = RouteEvaluator::new(&p);
        assert!(eval.route_violations(0, &Route::from_customers(0, &[1, 2, 3])).is_empty());
    }
}
