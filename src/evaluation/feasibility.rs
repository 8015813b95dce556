//! Cheap infeasibility certificates checked before any search runs.

use tracing::debug;

use super::evaluator::DISTANCE_TOLERANCE;
use crate::error::InfeasibilityProof;
use crate::models::{RoutingProblem, DEPOT};

/// Returns a proof that no assignment can satisfy the constraints, if one of
/// the following holds:
///
/// - a single customer's demand exceeds the vehicle capacity;
/// - total demand exceeds the combined capacity of the fleet;
/// - a customer's depot round trip alone exceeds the maximum route distance.
///
/// `None` does not imply feasibility.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
/// use fleet_routing::evaluation::prove_infeasible;
///
/// let locations = vec![
///     Location::depot(0.0, 0.0),
///     Location::new(1, "A", 0.0, 0.01).with_demand(30),
///     Location::new(2, "B", 0.01, 0.0).with_demand(30),
/// ];
/// let fleet = FleetConstraints::new(1).with_capacity(50);
/// let problem = RoutingProblem::new(locations, fleet).unwrap();
/// assert!(prove_infeasible(&problem).is_some());
/// ```
pub fn prove_infeasible(problem: &RoutingProblem) -> Option<InfeasibilityProof> {
    let proof = capacity_proof(problem).or_else(|| range_proof(problem));
    if let Some(proof) = &proof {
        debug!(%proof, "problem proven infeasible");
    }
    proof
}

fn capacity_proof(problem: &RoutingProblem) -> Option<InfeasibilityProof> {
    let capacity = problem.active_capacity()?;

    if let Some(location) = (1..problem.num_locations()).find(|&i| problem.demand(i) > capacity) {
        return Some(InfeasibilityProof::DemandExceedsCapacity {
            location,
            demand: problem.demand(location),
            capacity,
        });
    }

    let total_demand = problem.total_demand();
    let fleet_capacity = capacity as i64 * problem.num_vehicles() as i64;
    (total_demand > fleet_capacity).then_some(InfeasibilityProof::TotalDemandExceedsFleet {
        total_demand,
        fleet_capacity,
    })
}

fn range_proof(problem: &RoutingProblem) -> Option<InfeasibilityProof> {
    let max_route_distance = problem.max_route_distance()?;
    (1..problem.num_locations()).find_map(|location| {
        let round_trip = problem.distance(DEPOT, location) + problem.distance(location, DEPOT);
        (round_trip > max_route_distance + DISTANCE_TOLERANCE).then_some(
            InfeasibilityProof::OutOfRange {
                location,
                round_trip,
                max_route_distance,
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMethod;
    use crate::models::{FleetConstraints, Location};

    fn problem(demands: &[i32], fleet: FleetConstraints) -> RoutingProblem {
        let mut locations = vec![Location::depot(0.0, 0.0)];
        for (i, &d) in demands.iter().enumerate() {
            locations.push(Location::new(i + 1, "c", 0.0, (i + 1) as f64).with_demand(d));
        }
        RoutingProblem::with_method(locations, fleet, DistanceMethod::Euclidean).expect("valid")
    }

    #[test]
    fn test_no_constraints_no_proof() {
        assert!(prove_infeasible(&problem(&[5, 5], FleetConstraints::new(1))).is_none());
    }

    #[test]
    fn test_single_demand_too_large() {
        let p = problem(&[5, 60], FleetConstraints::new(3).with_capacity(50));
        assert_eq!(
            prove_infeasible(&p),
            Some(InfeasibilityProof::DemandExceedsCapacity {
                location: 2,
                demand: 60,
                capacity: 50
            })
        );
    }

    #[test]
    fn test_total_demand_too_large() {
        let p = problem(&[15, 20, 18, 12], FleetConstraints::new(1).with_capacity(50));
        assert_eq!(
            prove_infeasible(&p),
            Some(InfeasibilityProof::TotalDemandExceedsFleet {
                total_demand: 65,
                fleet_capacity: 50
            })
        );
    }

    #[test]
    fn test_fits_in_fleet() {
        let p = problem(&[15, 20, 18, 12], FleetConstraints::new(2).with_capacity(50));
        assert!(prove_infeasible(&p).is_none());
    }

    #[test]
    fn test_out_of_range() {
        // customer 3 sits 3 units away: round trip 6 > 5
        let p = problem(&[0, 0, 0], FleetConstraints::new(3).with_max_route_distance(5.0));
        assert!(matches!(
            prove_infeasible(&p),
            Some(InfeasibilityProof::OutOfRange { location: 3, .. })
        ));
    }
}
