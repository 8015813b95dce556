//! Constructive heuristics for building initial VRP solutions.
//!
//! - [`nearest_neighbor`]: Greedy nearest-neighbor construction, O(V·C²)
//! - [`sweep`]: Polar-angle sweep clustering (Gillett & Miller, 1974), O(n log n)
//! - [`clarke_wright_savings`]: Clarke-Wright savings algorithm (1964), O(n² log n)
//! - [`cheapest_insertion`]: Inserts leftover customers at their cheapest feasible position
//!
//! All heuristics work on a [`ConstructionContext`] and return a
//! [`Construction`] holding one customer sequence per vehicle slot plus any
//! customers they could not place.

mod clarke_wright;
mod insertion;
mod nearest_neighbor;
mod sweep;

pub use clarke_wright::clarke_wright_savings;
pub use insertion::cheapest_insertion;
pub use nearest_neighbor::{nearest_neighbor, NearestNeighbor, NearestNeighborConfig};
pub use sweep::sweep;

use crate::distance::{Coordinate, DistanceMatrix};
use crate::evaluation::DISTANCE_TOLERANCE;
use crate::models::{RoutingProblem, DEPOT};

/// Problem data the constructive heuristics read.
#[derive(Debug, Clone)]
pub struct ConstructionContext<'a> {
    pub distances: &'a DistanceMatrix,
    /// Demand per location; index 0 (depot) is zero.
    pub demands: Vec<i64>,
    /// Load limit per route, when capacity is active.
    pub capacity: Option<i64>,
    /// Length limit per route including the return leg.
    pub max_route_distance: Option<f64>,
    pub num_vehicles: usize,
    /// Location coordinates, needed only by [`sweep`].
    pub coordinates: Option<Vec<Coordinate>>,
}

impl<'a> ConstructionContext<'a> {
    /// Builds a context from a validated problem.
    pub fn from_problem(problem: &'a RoutingProblem) -> Self {
        Self {
            distances: problem.distances(),
            demands: (0..problem.num_locations())
                .map(|i| problem.demand(i) as i64)
                .collect(),
            capacity: problem.active_capacity().map(i64::from),
            max_route_distance: problem.max_route_distance(),
            num_vehicles: problem.num_vehicles(),
            coordinates: Some(problem.locations().iter().map(|l| l.coordinate()).collect()),
        }
    }

    /// Number of locations including the depot.
    pub fn num_locations(&self) -> usize {
        self.distances.size()
    }

    /// Returns `true` if `load` fits the capacity limit.
    pub fn load_fits(&self, load: i64) -> bool {
        self.capacity.map_or(true, |cap| load <= cap)
    }

    /// Returns `true` if a route of the given length respects the distance cap.
    pub fn length_fits(&self, length: f64) -> bool {
        self.max_route_distance
            .map_or(true, |max| length <= max + DISTANCE_TOLERANCE)
    }

    /// Returns `true` if the customer sequence respects both route limits.
    pub fn route_fits(&self, customers: &[usize]) -> bool {
        let load: i64 = customers.iter().map(|&c| self.demands[c]).sum();
        self.load_fits(load) && self.length_fits(self.distances.tour_length(DEPOT, customers))
    }
}

/// Output of a constructive heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    /// Customer sequences (depot excluded), one per vehicle slot.
    pub routes: Vec<Vec<usize>>,
    /// Customers that could not be placed, in ascending index order.
    pub unassigned: Vec<usize>,
}

impl Construction {
    /// Returns `true` if every customer was placed.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Trims `routes` to `num_vehicles` slots, keeping the heaviest routes and
    /// moving customers of the dropped ones to `unassigned`.
    pub(crate) fn fit_to_fleet(mut routes: Vec<Vec<usize>>, ctx: &ConstructionContext) -> Self {
        routes.retain(|r| !r.is_empty());
        let mut unassigned = Vec::new();

        if routes.len() > ctx.num_vehicles {
            let load = |r: &Vec<usize>| -> i64 { r.iter().map(|&c| ctx.demands[c]).sum() };
            routes.sort_by(|a, b| {
                load(b)
                    .cmp(&load(a))
                    .then(b.len().cmp(&a.len()))
                    .then(a[0].cmp(&b[0]))
            });
            for dropped in routes.drain(ctx.num_vehicles..) {
                unassigned.extend(dropped);
            }
            unassigned.sort_unstable();
        }

        routes.resize(ctx.num_vehicles, Vec::new());
        Self { routes, unassigned }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::planar_problem;
    use super::*;
    use crate::models::FleetConstraints;

    #[test]
    fn test_context_from_problem() {
        let p = planar_problem(
            &[(1.0, 0.0, 10), (2.0, 0.0, 20)],
            FleetConstraints::new(2).with_capacity(25),
        );
        let ctx = ConstructionContext::from_problem(&p);
        assert_eq!(ctx.demands, vec![0, 10, 20]);
        assert_eq!(ctx.capacity, Some(25));
        assert!(ctx.load_fits(25));
        assert!(!ctx.load_fits(26));
        assert!(ctx.route_fits(&[1]));
        assert!(!ctx.route_fits(&[1, 2]));
    }

    #[test]
    fn test_fit_to_fleet_drops_lightest() {
        let p = planar_problem(
            &[(1.0, 0.0, 10), (2.0, 0.0, 20), (3.0, 0.0, 5)],
            FleetConstraints::new(2),
        );
        let ctx = ConstructionContext::from_problem(&p);
        let c = Construction::fit_to_fleet(vec![vec![1], vec![3], vec![2]], &ctx);
        assert_eq!(c.routes, vec![vec![2], vec![1]]);
        assert_eq!(c.unassigned, vec![3]);
        assert!(!c.is_complete());
    }

    #[test]
    fn test_fit_to_fleet_pads_slots() {
        let p = planar_problem(&[(1.0, 0.0, 0)], FleetConstraints::new(3));
        let ctx = ConstructionContext::from_problem(&p);
        let c = Construction::fit_to_fleet(vec![vec![1]], &ctx);
        assert_eq!(c.routes, vec![vec![1], vec![], vec![]]);
        assert!(c.is_complete());
    }
}
