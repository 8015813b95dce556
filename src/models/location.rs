//! Depot and customer locations.

use serde::{Deserialize, Serialize};

use crate::distance::Coordinate;

/// A depot or customer location.
///
/// The position of a location in the request's location list is its matrix
/// index; index 0 is the depot.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Location;
///
/// let depot = Location::depot(-23.5505, -46.6333);
/// assert_eq!(depot.demand(), 0);
///
/// let c = Location::new(1, "Cliente 1", -23.56, -46.64).with_demand(15);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: usize,
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    demand: i32,
}

impl Location {
    /// Creates a location with zero demand.
    pub fn new(id: usize, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
            demand: 0,
        }
    }

    /// Creates a depot (id 0, zero demand).
    pub fn depot(latitude: f64, longitude: f64) -> Self {
        Self::new(0, "Depot", latitude, longitude)
    }

    /// Sets the demand served at this location.
    pub fn with_demand(mut self, demand: i32) -> Self {
        self.demand = demand;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Units to deliver at this location.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_new() {
        let l = Location::new(3, "Shop", 10.0, 20.0);
        assert_eq!(l.id(), 3);
        assert_eq!(l.name(), "Shop");
        assert_eq!(l.latitude(), 10.0);
        assert_eq!(l.longitude(), 20.0);
        assert_eq!(l.demand(), 0);
    }

    #[test]
    fn test_location_depot() {
        let d = Location::depot(-23.5, -46.6);
        assert_eq!(d.id(), 0);
        assert_eq!(d.demand(), 0);
        assert_eq!(d.coordinate(), Coordinate::new(-23.5, -46.6));
    }

    #[test]
    fn test_deserialize_default_demand() {
        let json = r#"{"id": 1, "name": "A", "latitude": 1.0, "longitude": 2.0}"#;
        let l: Location = serde_json::from_str(json).expect("valid json");
        assert_eq!(l.demand(), 0);
    }
}
