//! Clarke-Wright savings algorithm.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own route (depot → customer → depot). It then merges routes by
//! computing the "savings" of combining the end of one route with the start
//! of another:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! Routes are merged in decreasing order of savings, subject to capacity
//! and the route distance cap.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use super::{Construction, ConstructionContext};
use crate::models::DEPOT;

/// A savings value for merging two customers' routes.
#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

/// Constructs routes using the Clarke-Wright savings algorithm.
///
/// Starts with one route per customer, then merges routes in order of
/// decreasing savings while respecting vehicle capacity and the maximum
/// route distance. Equal savings are merged in `(i, j)` order. If more
/// routes remain than vehicles, the lightest are dropped into
/// [`Construction::unassigned`].
///
/// # Examples
///
/// ```
/// use fleet_routing::constructive::{clarke_wright_savings, ConstructionContext};
/// use fleet_routing::distance::DistanceMethod;
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, "A", 0.0, 1.0).with_demand(10),
///     Location::new(2, "B", 0.0, 2.0).with_demand(10),
///     Location::new(3, "C", 0.0, 3.0).with_demand(10),
/// ];
/// let fleet = FleetConstraints::new(1).with_capacity(30);
/// let problem = RoutingProblem::with_method(locations, fleet, DistanceMethod::Euclidean).unwrap();
///
/// let c = clarke_wright_savings(&ConstructionContext::from_problem(&problem));
/// assert!(c.is_complete());
/// assert_eq!(c.routes[0].len(), 3);
/// ```
pub fn clarke_wright_savings(ctx: &ConstructionContext) -> Construction {
    let n = ctx.num_locations();
    let d = |a: usize, b: usize| ctx.distances.get(a, b);

    let num_customers = n - 1;
    let mut savings = Vec::with_capacity(num_customers * num_customers.saturating_sub(1) / 2);
    for i in 1..n {
        for j in (i + 1)..n {
            let s = d(DEPOT, i) + d(DEPOT, j) - d(i, j);
            if s > 0.0 {
                savings.push(Saving { i, j, value: s });
            }
        }
    }

    // Sort by decreasing savings
    savings.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then(a.i.cmp(&b.i))
            .then(a.j.cmp(&b.j))
    });

    // route_of[customer] = route index; route r starts as customer r alone
    let mut route_of: Vec<usize> = (0..n).collect();
    let mut route_load: Vec<i64> = ctx.demands.clone();
    let mut route_members: Vec<Vec<usize>> = (0..n)
        .map(|i| if i == DEPOT { Vec::new() } else { vec![i] })
        .collect();

    for saving in &savings {
        let ri = route_of[saving.i];
        let rj = route_of[saving.j];

        if ri == rj {
            continue;
        }

        let combined_load = route_load[ri] + route_load[rj];
        if !ctx.load_fits(combined_load) {
            continue;
        }

        // i and j must both be route endpoints
        let i_at_end = route_members[ri].last() == Some(&saving.i);
        let j_at_start = route_members[rj].first() == Some(&saving.j);
        let i_at_start = route_members[ri].first() == Some(&saving.i);
        let j_at_end = route_members[rj].last() == Some(&saving.j);

        let (merge_from, merge_into, reverse_from, reverse_into) = if i_at_end && j_at_start {
            (rj, ri, false, false)
        } else if j_at_end && i_at_start {
            (ri, rj, false, false)
        } else if i_at_end && j_at_end {
            (rj, ri, true, false)
        } else if i_at_start && j_at_start {
            (rj, ri, false, true)
        } else {
            continue;
        };

        let mut merged = route_members[merge_into].clone();
        if reverse_into {
            merged.reverse();
        }
        let mut from_members = route_members[merge_from].clone();
        if reverse_from {
            from_members.reverse();
        }
        merged.extend(from_members);

        if !ctx.length_fits(ctx.distances.tour_length(DEPOT, &merged)) {
            continue;
        }

        route_members[merge_from].clear();
        for &cid in &merged {
            route_of[cid] = merge_into;
        }
        route_members[merge_into] = merged;
        route_load[merge_into] = combined_load;
        route_load[merge_from] = 0;
    }

    Construction::fit_to_fleet(route_members, ctx)
}
