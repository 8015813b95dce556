//! A validated routing request.

use tracing::debug;

use super::{FleetConstraints, Location, DEPOT};
use crate::distance::{DistanceMatrix, DistanceMethod};
use crate::error::InvalidInput;

/// A validated routing problem: locations, fleet constraints and the distance
/// matrix built from them.
///
/// Construction validates everything up front, so algorithms can assume
/// well-formed data. Instances own all their data and are never mutated.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{FleetConstraints, Location, RoutingProblem};
///
/// let locations = vec![
///     Location::depot(-23.5505, -46.6333),
///     Location::new(1, "A", -23.5489, -46.6388).with_demand(15),
///     Location::new(2, "B", -23.5613, -46.6565).with_demand(20),
/// ];
/// let fleet = FleetConstraints::new(1).with_capacity(50);
/// let problem = RoutingProblem::new(locations, fleet).unwrap();
/// assert_eq!(problem.num_customers(), 2);
/// assert_eq!(problem.active_capacity(), Some(50));
/// ```
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    locations: Vec<Location>,
    fleet: FleetConstraints,
    distances: DistanceMatrix,
}

impl RoutingProblem {
    /// Validates the request and builds a haversine distance matrix.
    pub fn new(locations: Vec<Location>, fleet: FleetConstraints) -> Result<Self, InvalidInput> {
        Self::with_method(locations, fleet, DistanceMethod::Haversine)
    }

    /// Validates the request and builds a matrix with the given method.
    pub fn with_method(
        locations: Vec<Location>,
        fleet: FleetConstraints,
        method: DistanceMethod,
    ) -> Result<Self, InvalidInput> {
        fleet.validate()?;
        validate_demands(&locations)?;
        let distances = DistanceMatrix::build_with(&locations, method)?;
        Ok(Self::assemble(locations, fleet, distances))
    }

    /// Validates the request against an explicitly supplied matrix.
    ///
    /// Accepts a depot-only request (one location, 1×1 matrix), which
    /// [`DistanceMatrix::build`] rejects.
    pub fn with_matrix(
        locations: Vec<Location>,
        fleet: FleetConstraints,
        distances: DistanceMatrix,
    ) -> Result<Self, InvalidInput> {
        fleet.validate()?;
        if locations.is_empty() {
            return Err(InvalidInput::TooFewLocations {
                count: 0,
                required: 1,
            });
        }
        validate_demands(&locations)?;
        if distances.size() != locations.len() {
            return Err(InvalidInput::MatrixSizeMismatch {
                expected: locations.len() * locations.len(),
                actual: distances.size() * distances.size(),
            });
        }
        Ok(Self::assemble(locations, fleet, distances))
    }

    fn assemble(
        locations: Vec<Location>,
        fleet: FleetConstraints,
        distances: DistanceMatrix,
    ) -> Self {
        debug!(
            locations = locations.len(),
            vehicles = fleet.num_vehicles(),
            capacity = ?fleet.capacity(),
            max_route_distance = ?fleet.max_route_distance(),
            "routing problem ready"
        );
        Self {
            locations,
            fleet,
            distances,
        }
    }

    /// All locations (index 0 = depot).
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn fleet(&self) -> &FleetConstraints {
        &self.fleet
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    /// Number of customers (excluding depot).
    pub fn num_customers(&self) -> usize {
        self.locations.len() - 1
    }

    pub fn num_vehicles(&self) -> usize {
        self.fleet.num_vehicles()
    }

    /// Travel distance from location `from` to location `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Demand of a location; the depot always reports zero.
    pub fn demand(&self, index: usize) -> i32 {
        if index == DEPOT {
            0
        } else {
            self.locations[index].demand()
        }
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> i64 {
        (1..self.locations.len()).map(|i| self.demand(i) as i64).sum()
    }

    /// The capacity limit in force: configured and at least one customer has
    /// nonzero demand.
    pub fn active_capacity(&self) -> Option<i32> {
        let cap = self.fleet.capacity()?;
        (1..self.locations.len())
            .any(|i| self.demand(i) != 0)
            .then_some(cap)
    }

    pub fn max_route_distance(&self) -> Option<f64> {
        self.fleet.max_route_distance()
    }
}

fn validate_demands(locations: &[Location]) -> Result<(), InvalidInput> {
    match locations.iter().enumerate().find(|(_, l)| l.demand() < 0) {
        Some((index, l)) => Err(InvalidInput::NegativeDemand {
            index,
            demand: l.demand(),
        }),
        None => Ok(()),
    }
}
