//! Cheapest-insertion repair for partially built solutions.

use super::{Construction, ConstructionContext};
use crate::models::DEPOT;

/// Inserts each unassigned customer at the feasible position with the
/// smallest added distance.
///
/// Customers are placed in order of decreasing demand (then ascending
/// index), so the hardest to fit go first. Any position on any vehicle slot
/// is considered, including empty slots. Customers with no feasible
/// position stay in [`Construction::unassigned`].
///
/// # Examples
///
/// ```
/// use fleet_routing::constructive::{cheapest_insertion, Construction, ConstructionContext};
/// use fleet_routing::distance::DistanceMethod;
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, "A", 0.0, 1.0),
///     Location::new(2, "B", 0.0, 2.0),
/// ];
/// let fleet = FleetConstraints::new(1);
/// let problem = RoutingProblem::with_method(locations, fleet, DistanceMethod::Euclidean).unwrap();
/// let ctx = ConstructionContext::from_problem(&problem);
///
/// let partial = Construction { routes: vec![vec![2]], unassigned: vec![1] };
/// let repaired = cheapest_insertion(&ctx, partial);
/// assert_eq!(repaired.routes, vec![vec![1, 2]]);
/// ```
pub fn cheapest_insertion(ctx: &ConstructionContext, construction: Construction) -> Construction {
    let Construction {
        mut routes,
        unassigned,
    } = construction;
    routes.resize(ctx.num_vehicles.max(routes.len()), Vec::new());

    let mut loads: Vec<i64> = routes
        .iter()
        .map(|r| r.iter().map(|&c| ctx.demands[c]).sum())
        .collect();
    let mut lengths: Vec<f64> = routes
        .iter()
        .map(|r| ctx.distances.tour_length(DEPOT, r))
        .collect();

    let mut pending = unassigned;
    pending.sort_by(|&a, &b| ctx.demands[b].cmp(&ctx.demands[a]).then(a.cmp(&b)));

    let mut stranded = Vec::new();
    for customer in pending {
        let demand = ctx.demands[customer];
        let mut best: Option<(usize, usize, f64)> = None;

        for (r, route) in routes.iter().enumerate() {
            if !ctx.load_fits(loads[r] + demand) {
                continue;
            }
            for pos in 0..=route.len() {
                let prev = if pos == 0 { DEPOT } else { route[pos - 1] };
                let next = if pos == route.len() { DEPOT } else { route[pos] };
                let delta = ctx.distances.get(prev, customer) + ctx.distances.get(customer, next)
                    - ctx.distances.get(prev, next);
                if !ctx.length_fits(lengths[r] + delta) {
                    continue;
                }
                if best.map_or(true, |(_, _, d)| delta < d) {
                    best = Some((r, pos, delta));
                }
            }
        }

        match best {
            Some((r, pos, delta)) => {
                routes[r].insert(pos, customer);
                loads[r] += demand;
                lengths[r] += delta;
            }
            None => stranded.push(customer),
        }
    }

    stranded.sort_unstable();
    Construction {
        routes,
        unassigned: stranded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::test_support::planar_problem;
    use crate::models::FleetConstraints;

    #[test]
    fn test_insertion_fills_empty_slot() {
        let p = planar_problem(
            &[(1.0, 0.0, 10), (-1.0, 0.0, 10)],
            FleetConstraints::new(2).with_capacity(10),
        );
        let ctx = ConstructionContext::from_problem(&p);
        let partial = Construction {
            routes: vec![vec![1], vec![]],
            unassigned: vec![2],
        };
        let c = cheapest_insertion(&ctx, partial);
        assert_eq!(c.routes, vec![vec![1], vec![2]]);
        assert!(c.is_complete());
    }

    #[test]
    fn test_insertion_prefers_cheapest_position() {
        let p = planar_problem(
            &[(1.0, 0.0, 0), (2.0, 0.0, 0), (3.0, 0.0, 0)],
            FleetConstraints::new(1),
        );
        let ctx = ConstructionContext::from_problem(&p);
        let partial = Construction {
            routes: vec![vec![1, 3]],
            unassigned: vec![2],
        };
        let c = cheapest_insertion(&ctx, partial);
        assert_eq!(c.routes, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_insertion_leaves_unplaceable() {
        let p = planar_problem(
            &[(1.0, 0.0, 10), (2.0, 0.0, 10)],
            FleetConstraints::new(1).with_capacity(15),
        );
        let ctx = ConstructionContext::from_problem(&p);
        let partial = Construction {
            routes: vec![vec![1]],
            unassigned: vec![2],
        };
        let c = cheapest_insertion(&ctx, partial);
        assert_eq!(c.unassigned, vec![2]);
    }

    #[test]
    fn test_insertion_respects_distance_cap() {
        let p = planar_problem(
            &[(1.0, 0.0, 0), (0.0, 1.0, 0)],
            FleetConstraints::new(2).with_max_route_distance(3.0),
        );
        let ctx = ConstructionContext::from_problem(&p);
        let partial = Construction {
            routes: vec![vec![1], vec![]],
            unassigned: vec![2],
        };
        let c = cheapest_insertion(&ctx, partial);
        assert_eq!(c.routes, vec![vec![1], vec![2]]);
    }
}
