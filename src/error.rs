//! Error taxonomy.
//!
//! Two kinds of failure reach the caller: [`InvalidInput`] (the request was
//! malformed and no algorithm ran) and [`Infeasibility`] (an algorithm ran and
//! could not produce a complete assignment). Infeasibility is an expected
//! outcome, so it is an ordinary `Err` value rather than a panic.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Top-level error returned by every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// The request was rejected before any algorithm ran.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// No complete assignment was produced.
    #[error("infeasible: {0}")]
    Infeasible(#[from] Infeasibility),
}

impl RoutingError {
    /// Returns the infeasibility payload, if this is an infeasibility error.
    pub fn infeasibility(&self) -> Option<&Infeasibility> {
        match self {
            RoutingError::Infeasible(inf) => Some(inf),
            RoutingError::InvalidInput(_) => None,
        }
    }
}

/// Malformed request data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("at least {required} locations are required, got {count}")]
    TooFewLocations { count: usize, required: usize },

    #[error("location {index}: latitude {latitude} outside [-90, 90]")]
    LatitudeOutOfRange { index: usize, latitude: f64 },

    #[error("location {index}: longitude {longitude} outside [-180, 180]")]
    LongitudeOutOfRange { index: usize, longitude: f64 },

    #[error("location {index}: demand {demand} is negative")]
    NegativeDemand { index: usize, demand: i32 },

    #[error("vehicle count must be at least 1")]
    NoVehicles,

    #[error("vehicle capacity {0} is negative")]
    NegativeCapacity(i32),

    #[error("maximum route distance {0} must be positive and finite")]
    InvalidMaxRouteDistance(f64),

    #[error("distance matrix has {actual} entries, expected {expected}")]
    MatrixSizeMismatch { expected: usize, actual: usize },

    #[error("distance matrix entry ({from}, {to}) = {value} is negative or not finite")]
    InvalidMatrixEntry { from: usize, to: usize, value: f64 },
}

/// Why no complete assignment was returned.
///
/// A proof and an exhausted search are never conflated: only
/// [`Infeasibility::Proven`] means that relaxing nothing but the search budget
/// cannot help.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Infeasibility {
    /// No assignment satisfies the constraints.
    #[error("proven infeasible: {0}")]
    Proven(InfeasibilityProof),
    /// The search stopped without a feasible assignment; feasibility is unknown.
    #[error("no feasible solution found: {0}")]
    Undecided(SearchLimit),
}

impl Infeasibility {
    /// Returns `true` for [`Infeasibility::Proven`].
    pub fn is_proven(&self) -> bool {
        matches!(self, Infeasibility::Proven(_))
    }
}

/// A certificate that the constraints cannot all be met.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InfeasibilityProof {
    #[error("location {location} has demand {demand} above vehicle capacity {capacity}")]
    DemandExceedsCapacity {
        location: usize,
        demand: i32,
        capacity: i32,
    },

    #[error("total demand {total_demand} exceeds fleet capacity {fleet_capacity}")]
    TotalDemandExceedsFleet {
        total_demand: i64,
        fleet_capacity: i64,
    },

    #[error(
        "location {location} needs a {round_trip:.1} m round trip, \
         above the {max_route_distance:.1} m limit"
    )]
    OutOfRange {
        location: usize,
        round_trip: f64,
        max_route_distance: f64,
    },
}

/// The budget that ran out before a feasible assignment was found.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchLimit {
    #[error("time limit of {:.3}s reached", time_limit.as_secs_f64())]
    TimeBudgetExhausted {
        #[serde(serialize_with = "crate::serde_secs::serialize")]
        time_limit: Duration,
    },

    #[error("search exhausted after {iterations} iterations")]
    SearchExhausted { iterations: usize },

    #[error("greedy construction left {unassigned} customers unassigned")]
    ConstructionExhausted { unassigned: usize },
}

/// An algorithm produced a solution that omits or duplicates a customer.
///
/// This signals a bug in the algorithm, not a property of the input, and is
/// never returned to callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignmentDefect {
    #[error("customer {0} is not served by any route")]
    Missing(usize),

    #[error("customer {0} is served more than once")]
    Duplicated(usize),

    #[error("route {route} visits unknown location {location}")]
    UnknownLocation { route: usize, location: usize },

    #[error("route {0} does not start and end at the depot")]
    Malformed(usize),
}
