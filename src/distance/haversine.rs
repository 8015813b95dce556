//! Point-to-point distance functions.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`haversine_distance`], in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A latitude/longitude pair in signed degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` if both components are finite and within geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance in meters between two coordinates.
///
/// Identical points yield exactly `0.0`. The intermediate haversine term is
/// clamped to `[0, 1]` so rounding near antipodes cannot produce `NaN`.
///
/// # Examples
///
/// ```
/// use fleet_routing::distance::{haversine_distance, Coordinate};
///
/// let sao_paulo = Coordinate::new(-23.5505, -46.6333);
/// let rio = Coordinate::new(-22.9068, -43.1729);
/// let d = haversine_distance(sao_paulo, rio);
/// assert!((d - 361_000.0).abs() < 5_000.0);
/// assert_eq!(haversine_distance(rio, rio), 0.0);
/// ```
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Planar distance treating latitude as `y` and longitude as `x`.
///
/// Only meaningful for synthetic instances laid out on a plane.
pub fn euclidean_distance(from: Coordinate, to: Coordinate) -> f64 {
    let dx = to.longitude - from.longitude;
    let dy = to.latitude - from.latitude;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        let p = Coordinate::new(-23.5505, -46.6333);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let expected = EARTH_RADIUS_METERS * 1.0_f64.to_radians();
        assert!((haversine_distance(a, b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinate::new(48.8566, 2.3522);
        let b = Coordinate::new(51.5074, -0.1278);
        assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_antipodes_not_nan() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = haversine_distance(a, b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1e-3);
    }

    #[test]
    fn test_euclidean() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(4.0, 3.0);
        assert!((euclidean_distance(a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_coordinate_validity() {
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }
}
