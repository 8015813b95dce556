//! Fleet constraints shared by every vehicle.

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// A homogeneous fleet: vehicle count, optional capacity, optional route length cap.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::FleetConstraints;
///
/// let fleet = FleetConstraints::new(2)
///     .with_capacity(50)
///     .with_max_route_distance(100_000.0);
/// assert_eq!(fleet.num_vehicles(), 2);
/// assert_eq!(fleet.capacity(), Some(50));
/// assert!(fleet.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetConstraints {
    num_vehicles: usize,
    #[serde(default)]
    capacity: Option<i32>,
    #[serde(default)]
    max_route_distance: Option<f64>,
}

impl FleetConstraints {
    /// Creates an uncapacitated fleet with no route length cap.
    pub fn new(num_vehicles: usize) -> Self {
        Self {
            num_vehicles,
            capacity: None,
            max_route_distance: None,
        }
    }

    /// Sets the per-vehicle capacity.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the per-vehicle maximum route distance in meters.
    pub fn with_max_route_distance(mut self, meters: f64) -> Self {
        self.max_route_distance = Some(meters);
        self
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Per-vehicle capacity, if configured.
    pub fn capacity(&self) -> Option<i32> {
        self.capacity
    }

    /// Maximum length of a single route including the return leg, if configured.
    pub fn max_route_distance(&self) -> Option<f64> {
        self.max_route_distance
    }

    /// Rejects zero vehicles, negative capacity and non-positive distance caps.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.num_vehicles == 0 {
            return Err(InvalidInput::NoVehicles);
        }
        if let Some(cap) = self.capacity {
            if cap < 0 {
                return Err(InvalidInput::NegativeCapacity(cap));
            }
        }
        if let Some(max) = self.max_route_distance {
            if !max.is_finite() || max <= 0.0 {
                return Err(InvalidInput::InvalidMaxRouteDistance(max));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fleet_defaults() {
        let f = FleetConstraints::new(3);
        assert_eq!(f.num_vehicles(), 3);
        assert!(f.capacity().is_none());
        assert!(f.max_route_distance().is_none());
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_fleet_validation() {
        assert_eq!(FleetConstraints::new(0).validate(), Err(InvalidInput::NoVehicles));
        assert_eq!(
            FleetConstraints::new(1).with_capacity(-5).validate(),
            Err(InvalidInput::NegativeCapacity(-5))
        );
        assert!(matches!(
            FleetConstraints::new(1).with_max_route_distance(0.0).validate(),
            Err(InvalidInput::InvalidMaxRouteDistance(_))
        ));
        assert!(FleetConstraints::new(1).with_capacity(0).validate().is_ok());
    }

    #[test]
    fn test_fleet_deserialize() {
        let f: FleetConstraints =
            serde_json::from_str(r#"{"num_vehicles": 2, "capacity": 50}"#).expect("valid json");
        assert_eq!(f, FleetConstraints::new(2).with_capacity(50));
    }
}
