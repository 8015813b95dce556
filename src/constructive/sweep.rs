//! Sweep constructive heuristic.
//!
//! # Algorithm
//!
//! Sorts customers by polar angle relative to the depot, then groups them
//! into routes by sweeping through angles while respecting capacity and the
//! route distance cap. Nearby customers tend to have similar angles and end
//! up on the same route.
//!
//! Angles use longitude as x and latitude as y. Over the few hundred
//! kilometres a fleet covers the distortion does not change the ordering in
//! any way that matters for a seed solution.
//!
//! # Complexity
//!
//! O(n log n) where n = number of customers (dominated by angle sorting).
//!
//! # Reference
//!
//! Gillett, B.E. & Miller, L.R. (1974). "A Heuristic Algorithm for the
//! Vehicle-Dispatch Problem", *Operations Research* 22(2), 340-349.

use super::{Construction, ConstructionContext};
use crate::models::DEPOT;

/// Constructs routes using the sweep heuristic.
///
/// Returns every customer as unassigned when the context carries no
/// coordinates. Routes beyond the fleet size are dropped via
/// [`Construction::unassigned`].
///
/// # Examples
///
/// ```
/// use fleet_routing::constructive::{sweep, ConstructionContext};
/// use fleet_routing::distance::DistanceMethod;
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, "NE", 1.0, 1.0).with_demand(10),
///     Location::new(2, "NW", 1.0, -1.0).with_demand(10),
///     Location::new(3, "SW", -1.0, -1.0).with_demand(10),
///     Location::new(4, "SE", -1.0, 1.0).with_demand(10),
/// ];
/// let fleet = FleetConstraints::new(2).with_capacity(20);
/// let problem = RoutingProblem::with_method(locations, fleet, DistanceMethod::Euclidean).unwrap();
///
/// let c = sweep(&ConstructionContext::from_problem(&problem));
/// assert!(c.is_complete());
/// assert_eq!(c.routes.len(), 2);
/// ```
pub fn sweep(ctx: &ConstructionContext) -> Construction {
    let n = ctx.num_locations();
    let Some(coords) = ctx.coordinates.as_deref() else {
        return Construction {
            routes: vec![Vec::new(); ctx.num_vehicles],
            unassigned: (1..n).collect(),
        };
    };

    let depot = coords[DEPOT];
    let mut angle_order: Vec<(usize, f64)> = (1..n)
        .map(|i| {
            let dx = coords[i].longitude - depot.longitude;
            let dy = coords[i].latitude - depot.latitude;
            (i, dy.atan2(dx))
        })
        .collect();
    angle_order.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let mut routes: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_load: i64 = 0;

    for &(cid, _) in &angle_order {
        let demand = ctx.demands[cid];
        let fits = ctx.load_fits(current_load + demand) && {
            current.push(cid);
            let ok = ctx.length_fits(ctx.distances.tour_length(DEPOT, &current));
            current.pop();
            ok
        };

        if !fits && !current.is_empty() {
            routes.push(std::mem::take(&mut current));
            current_load = 0;
        }

        current.push(cid);
        current_load += demand;
    }

    if !current.is_empty() {
        routes.push(current);
    }

    Construction::fit_to_fleet(routes, ctx)
}
