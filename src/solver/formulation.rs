//! Solver-facing formulation of a routing problem.
//!
//! A [`RoutingModel`] is what a [`CombinatorialSolver`](super::CombinatorialSolver)
//! sees: nodes, vehicles, a depot, the arc-cost matrix, constraint
//! dimensions and an objective. It knows nothing about locations or names.

use serde::{Deserialize, Serialize};

use crate::constructive::ConstructionContext;
use crate::distance::{Coordinate, DistanceMatrix};
use crate::models::{RoutingProblem, DEPOT};

const SCORE_EPSILON: f64 = 1e-9;

/// What the search minimizes over per-route lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Sum of route lengths.
    TotalDistance,
    /// Length of the longest route, ties broken on the sum.
    MaxRouteDistance,
    /// Sum of route lengths plus `span_coefficient` × the longest route.
    TotalWithSpan { span_coefficient: f64 },
}

impl Default for Objective {
    fn default() -> Self {
        Objective::TotalWithSpan {
            span_coefficient: 100.0,
        }
    }
}

impl Objective {
    /// Scores a solution from its route lengths (empty routes are 0).
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_routing::solver::Objective;
    ///
    /// let lengths = [10.0, 4.0, 0.0];
    /// assert_eq!(Objective::TotalDistance.score(&lengths).primary, 14.0);
    /// assert_eq!(Objective::MaxRouteDistance.score(&lengths).primary, 10.0);
    /// let span = Objective::TotalWithSpan { span_coefficient: 2.0 };
    /// assert_eq!(span.score(&lengths).primary, 34.0);
    /// ```
    pub fn score(&self, lengths: &[f64]) -> Score {
        let total: f64 = lengths.iter().sum();
        let longest = lengths.iter().copied().fold(0.0, f64::max);
        match *self {
            Objective::TotalDistance => Score {
                primary: total,
                secondary: longest,
            },
            Objective::MaxRouteDistance => Score {
                primary: longest,
                secondary: total,
            },
            Objective::TotalWithSpan { span_coefficient } => Score {
                primary: total + span_coefficient * longest,
                secondary: total,
            },
        }
    }
}

impl Objective {
    /// The distance in meters this objective is about: the longest route for
    /// [`Objective::MaxRouteDistance`], the sum of route lengths otherwise.
    /// Span weighting only steers the search and is never reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use fleet_routing::solver::Objective;
    ///
    /// let lengths = [10.0, 4.0, 0.0];
    /// assert_eq!(Objective::default().distance_value(&lengths), 14.0);
    /// assert_eq!(Objective::MaxRouteDistance.distance_value(&lengths), 10.0);
    /// ```
    pub fn distance_value(&self, lengths: &[f64]) -> f64 {
        match self {
            Objective::MaxRouteDistance => lengths.iter().copied().fold(0.0, f64::max),
            Objective::TotalDistance | Objective::TotalWithSpan { .. } => lengths.iter().sum(),
        }
    }
}

/// Lexicographic objective value: `primary` first, `secondary` on ties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub primary: f64,
    pub secondary: f64,
}

impl Score {
    /// Returns `true` if `self` is strictly better than `other`.
    pub fn improves_on(&self, other: &Score) -> bool {
        if self.primary < other.primary - SCORE_EPSILON {
            return true;
        }
        (self.primary - other.primary).abs() <= SCORE_EPSILON
            && self.secondary < other.secondary - SCORE_EPSILON
    }
}

/// A quantity accumulated along each route and bounded per vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum Dimension {
    /// Unary transit: each visited node adds its demand.
    Capacity { demands: Vec<i64>, vehicle_limit: i64 },
    /// Arc transit: each traversed arc adds its cost.
    Distance { vehicle_limit: f64 },
}

/// A routing formulation handed to a combinatorial solver.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
/// use fleet_routing::solver::{Dimension, Objective, RoutingModel};
///
/// let locations = vec![
///     Location::depot(-23.5505, -46.6333),
///     Location::new(1, "A", -23.5489, -46.6388).with_demand(15),
/// ];
/// let fleet = FleetConstraints::new(2).with_capacity(50);
/// let problem = RoutingProblem::new(locations, fleet).unwrap();
/// let model = RoutingModel::from_problem(&problem, Objective::TotalDistance);
///
/// assert_eq!(model.num_nodes(), 2);
/// assert!(matches!(model.dimensions()[0], Dimension::Capacity { vehicle_limit: 50, .. }));
/// ```
#[derive(Debug, Clone)]
pub struct RoutingModel<'a> {
    arc_costs: &'a DistanceMatrix,
    num_vehicles: usize,
    dimensions: Vec<Dimension>,
    coordinates: Option<Vec<Coordinate>>,
    objective: Objective,
}

impl<'a> RoutingModel<'a> {
    /// An unconstrained model over `arc_costs` with node 0 as depot.
    pub fn new(arc_costs: &'a DistanceMatrix, num_vehicles: usize) -> Self {
        Self {
            arc_costs,
            num_vehicles,
            dimensions: Vec::new(),
            coordinates: None,
            objective: Objective::default(),
        }
    }

    /// Formulates a validated problem: a `Capacity` dimension when capacity
    /// is active, a `Distance` dimension when a route length cap is set.
    pub fn from_problem(problem: &'a RoutingProblem, objective: Objective) -> Self {
        let mut model = Self::new(problem.distances(), problem.num_vehicles())
            .with_objective(objective)
            .with_coordinates(problem.locations().iter().map(|l| l.coordinate()).collect());

        if let Some(capacity) = problem.active_capacity() {
            model = model.with_dimension(Dimension::Capacity {
                demands: (0..problem.num_locations())
                    .map(|i| problem.demand(i) as i64)
                    .collect(),
                vehicle_limit: capacity as i64,
            });
        }
        if let Some(max) = problem.max_route_distance() {
            model = model.with_dimension(Dimension::Distance { vehicle_limit: max });
        }
        model
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    pub fn with_coordinates(mut self, coordinates: Vec<Coordinate>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn num_nodes(&self) -> usize {
        self.arc_costs.size()
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    pub fn depot(&self) -> usize {
        DEPOT
    }

    pub fn arc_costs(&self) -> &'a DistanceMatrix {
        self.arc_costs
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn coordinates(&self) -> Option<&[Coordinate]> {
        self.coordinates.as_deref()
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Flattens the dimensions into the limits the heuristics check. With
    /// several dimensions of one kind, the tightest limit wins.
    pub fn construction_context(&self) -> ConstructionContext<'a> {
        let mut demands = vec![0; self.num_nodes()];
        let mut capacity: Option<i64> = None;
        let mut max_route_distance: Option<f64> = None;

        for dimension in &self.dimensions {
            match dimension {
                Dimension::Capacity {
                    demands: d,
                    vehicle_limit,
                } => {
                    demands = d.clone();
                    capacity = Some(capacity.map_or(*vehicle_limit, |c| c.min(*vehicle_limit)));
                }
                Dimension::Distance { vehicle_limit } => {
                    max_route_distance =
                        Some(max_route_distance.map_or(*vehicle_limit, |m| m.min(*vehicle_limit)));
                }
            }
        }

        ConstructionContext {
            distances: self.arc_costs,
            demands,
            capacity,
            max_route_distance,
            num_vehicles: self.num_vehicles,
            coordinates: self.coordinates.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::test_support::planar_problem;
    use crate::models::FleetConstraints;

    #[test]
    fn test_score_ordering() {
        let a = Score {
            primary: 10.0,
            secondary: 5.0,
        };
        let b = Score {
            primary: 10.0,
            secondary: 4.0,
        };
        let c = Score {
            primary: 9.0,
            secondary: 100.0,
        };
        assert!(b.improves_on(&a));
        assert!(!a.improves_on(&b));
        assert!(c.improves_on(&a));
        assert!(!a.improves_on(&a));
    }

    #[test]
    fn test_objective_default_weights_span() {
        assert_eq!(
            Objective::default(),
            Objective::TotalWithSpan {
                span_coefficient: 100.0
            }
        );
    }

    #[test]
    fn test_distance_value_ignores_span_weight() {
        let lengths = [3000.0, 5000.0];
        let span = Objective::default();
        assert!((span.score(&lengths).primary - 508_000.0).abs() < 1e-9);
        assert!((span.distance_value(&lengths) - 8000.0).abs() < 1e-9);
        assert!((Objective::TotalDistance.distance_value(&lengths) - 8000.0).abs() < 1e-9);
        assert!((Objective::MaxRouteDistance.distance_value(&lengths) - 5000.0).abs() < 1e-9);
        assert_eq!(span.distance_value(&[]), 0.0);
    }

    #[test]
    fn test_objective_serde() {
        let o: Objective = serde_json::from_str(r#"{"kind":"max_route_distance"}"#).expect("parse");
        assert_eq!(o, Objective::MaxRouteDistance);
    }

    #[test]
    fn test_model_without_limits() {
        let p = planar_problem(&[(1.0, 0.0, 0)], FleetConstraints::new(1).with_capacity(5));
        let model = RoutingModel::from_problem(&p, Objective::TotalDistance);
        // capacity inactive: no customer has demand
        assert!(model.dimensions().is_empty());
        let ctx = model.construction_context();
        assert_eq!(ctx.capacity, None);
        assert_eq!(ctx.max_route_distance, None);
    }

    #[test]
    fn test_model_context_limits() {
        let p = planar_problem(
            &[(1.0, 0.0, 3), (2.0, 0.0, 4)],
            FleetConstraints::new(2).with_capacity(5).with_max_route_distance(9.0),
        );
        let model = RoutingModel::from_problem(&p, Objective::TotalDistance)
            .with_dimension(Dimension::Distance { vehicle_limit: 7.0 });
        let ctx = model.construction_context();
        assert_eq!(ctx.demands, vec![0, 3, 4]);
        assert_eq!(ctx.capacity, Some(5));
        assert_eq!(ctx.max_route_distance, Some(7.0));
        assert_eq!(ctx.num_vehicles, 2);
    }
}
