//! Vehicle routes.

use serde::{Deserialize, Serialize};

use super::DEPOT;

/// The ordered stops of one vehicle slot, depot at both ends.
///
/// A depot-only route `[0, 0]` is valid and marks an unused vehicle.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Route;
///
/// let route = Route::from_customers(0, &[3, 1]);
/// assert_eq!(route.stops(), &[0, 3, 1, 0]);
/// assert_eq!(route.customers(), &[3, 1]);
///
/// let idle = Route::empty(1);
/// assert!(idle.is_empty());
/// assert_eq!(idle.stops(), &[0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    vehicle: usize,
    stops: Vec<usize>,
}

impl Route {
    /// Creates a depot-only route for the given vehicle slot.
    pub fn empty(vehicle: usize) -> Self {
        Self {
            vehicle,
            stops: vec![DEPOT, DEPOT],
        }
    }

    /// Creates a route visiting `customers` in order, framed by the depot.
    pub fn from_customers(vehicle: usize, customers: &[usize]) -> Self {
        let mut stops = Vec::with_capacity(customers.len() + 2);
        stops.push(DEPOT);
        stops.extend_from_slice(customers);
        stops.push(DEPOT);
        Self { vehicle, stops }
    }

    /// Vehicle slot serving this route.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Full stop sequence including both depot visits.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Customer stops, depot visits excluded.
    pub fn customers(&self) -> &[usize] {
        if self.stops.len() < 2 {
            return &[];
        }
        &self.stops[1..self.stops.len() - 1]
    }

    /// Number of customers visited.
    pub fn len(&self) -> usize {
        self.customers().len()
    }

    /// Returns `true` if this vehicle serves no customers.
    pub fn is_empty(&self) -> bool {
        self.customers().is_empty()
    }

    /// Returns `true` if the sequence starts and ends at the depot.
    pub fn is_closed(&self) -> bool {
        self.stops.len() >= 2 && self.stops[0] == DEPOT && self.stops[self.stops.len() - 1] == DEPOT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::empty(2);
        assert_eq!(r.vehicle(), 2);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert!(r.is_closed());
    }

    #[test]
    fn test_route_from_customers() {
        let r = Route::from_customers(0, &[5, 3]);
        assert_eq!(r.stops(), &[0, 5, 3, 0]);
        assert_eq!(r.customers(), &[5, 3]);
        assert_eq!(r.len(), 2);
        assert!(r.is_closed());
    }

    #[test]
    fn test_route_serde_shape() {
        let r = Route::from_customers(1, &[2]);
        let json = serde_json::to_value(&r).expect("serializable");
        assert_eq!(json["vehicle"], 1);
        assert_eq!(json["stops"], serde_json::json!([0, 2, 0]));
    }
}
