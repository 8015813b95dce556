//! Working solution with cached route loads and lengths.

use super::Move;
use crate::constructive::ConstructionContext;
use crate::models::DEPOT;

/// A rewritten route with its recomputed load and length.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteChange {
    pub index: usize,
    pub customers: Vec<usize>,
    pub load: i64,
    pub length: f64,
}

/// The feasible outcome of a move: every route it rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub routes: Vec<RouteChange>,
}

/// Per-vehicle customer sequences plus cached loads and lengths.
///
/// Only feasible moves can be applied, so a state built from feasible routes
/// stays feasible.
///
/// # Examples
///
/// ```
/// use fleet_routing::constructive::ConstructionContext;
/// use fleet_routing::distance::DistanceMethod;
/// use fleet_routing::local_search::{Move, RouteState};
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, "A", 0.0, 2.0),
///     Location::new(2, "B", 0.0, 1.0),
/// ];
/// let fleet = FleetConstraints::new(1);
/// let problem = RoutingProblem::with_method(locations, fleet, DistanceMethod::Euclidean).unwrap();
/// let ctx = ConstructionContext::from_problem(&problem);
///
/// let mut state = RouteState::new(&ctx, vec![vec![1, 2]]);
/// let change = state.evaluate(&Move::TwoOpt { route: 0, i: 0, j: 1 }).unwrap();
/// state.apply(change);
/// assert_eq!(state.routes(), &[vec![2, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct RouteState<'c, 'a> {
    ctx: &'c ConstructionContext<'a>,
    routes: Vec<Vec<usize>>,
    loads: Vec<i64>,
    lengths: Vec<f64>,
}

impl<'c, 'a> RouteState<'c, 'a> {
    pub fn new(ctx: &'c ConstructionContext<'a>, routes: Vec<Vec<usize>>) -> Self {
        let loads = routes.iter().map(|r| load_of(ctx, r)).collect();
        let lengths = routes
            .iter()
            .map(|r| ctx.distances.tour_length(DEPOT, r))
            .collect();
        Self {
            ctx,
            routes,
            loads,
            lengths,
        }
    }

    pub fn context(&self) -> &ConstructionContext<'a> {
        self.ctx
    }

    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Route lengths including the depot legs.
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn total_length(&self) -> f64 {
        self.lengths.iter().sum()
    }

    /// Rewrites the routes `mv` touches and checks them against capacity and
    /// the distance cap. Returns `None` if any rewritten route is infeasible.
    pub fn evaluate(&self, mv: &Move) -> Option<Change> {
        let mut routes = Vec::with_capacity(2);
        for (index, customers) in mv.rewrite(&self.routes) {
            let load = load_of(self.ctx, &customers);
            if !self.ctx.load_fits(load) {
                return None;
            }
            let length = self.ctx.distances.tour_length(DEPOT, &customers);
            if !self.ctx.length_fits(length) {
                return None;
            }
            routes.push(RouteChange {
                index,
                customers,
                load,
                length,
            });
        }
        Some(Change { routes })
    }

    /// Route lengths as they would be after `change`.
    pub fn lengths_after(&self, change: &Change) -> Vec<f64> {
        let mut lengths = self.lengths.clone();
        for rc in &change.routes {
            lengths[rc.index] = rc.length;
        }
        lengths
    }

    pub fn apply(&mut self, change: Change) {
        for rc in change.routes {
            self.loads[rc.index] = rc.load;
            self.lengths[rc.index] = rc.length;
            self.routes[rc.index] = rc.customers;
        }
    }

    pub fn into_routes(self) -> Vec<Vec<usize>> {
        self.routes
    }
}

fn load_of(ctx: &ConstructionContext, customers: &[usize]) -> i64 {
    customers.iter().map(|&c| ctx.demands[c]).sum()
}
