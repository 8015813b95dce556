//! Random sample instances for demos and benchmarks.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::distance::Coordinate;
use crate::models::Location;

/// Kilometers per degree, near enough for placing sample points.
const KM_PER_DEGREE: f64 = 111.0;

/// Shape of a generated instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Locations including the depot.
    pub num_locations: usize,
    pub depot: Coordinate,
    pub radius_km: f64,
    /// Draw customer demands in `1..20`; otherwise every demand is 0.
    pub include_demands: bool,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            num_locations: 15,
            depot: Coordinate::new(-23.5505, -46.6333),
            radius_km: 50.0,
            include_demands: false,
            seed: 42,
        }
    }
}

impl SampleConfig {
    pub fn with_num_locations(mut self, n: usize) -> Self {
        self.num_locations = n;
        self
    }

    pub fn with_depot(mut self, depot: Coordinate) -> Self {
        self.depot = depot;
        self
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_demands(mut self, include: bool) -> Self {
        self.include_demands = include;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generates a depot followed by customers scattered around it.
///
/// Each customer sits at a uniformly drawn bearing and a uniformly drawn
/// offset of up to `radius_km` (in degrees, so the cloud is slightly squashed
/// east-west away from the equator). Customers are named `Cliente 1`,
/// `Cliente 2`, ... and the output is fully determined by `seed`.
///
/// # Examples
///
/// ```
/// use fleet_routing::sample::{generate, SampleConfig};
///
/// let config = SampleConfig::default().with_num_locations(10).with_demands(true);
/// let locations = generate(&config);
/// assert_eq!(locations.len(), 10);
/// assert_eq!(locations[0].demand(), 0);
/// assert!(locations[1..].iter().all(|l| (1..20).contains(&l.demand())));
/// assert_eq!(locations, generate(&config));
/// ```
pub fn generate(config: &SampleConfig) -> Vec<Location> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let radius_deg = config.radius_km / KM_PER_DEGREE;
    let depot = config.depot;

    let mut locations = Vec::with_capacity(config.num_locations);
    if config.num_locations == 0 {
        return locations;
    }
    locations.push(Location::depot(depot.latitude, depot.longitude));

    // all positions are drawn before any demand
    let offsets: Vec<(f64, f64)> = (1..config.num_locations)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let r = if radius_deg > 0.0 {
                rng.random_range(0.0..radius_deg)
            } else {
                0.0
            };
            (r * angle.cos(), r * angle.sin())
        })
        .collect();

    for (id, (dlat, dlon)) in (1..).zip(offsets) {
        let demand = if config.include_demands {
            rng.random_range(1..20)
        } else {
            0
        };
        let (latitude, longitude) = (depot.latitude + dlat, depot.longitude + dlon);
        locations.push(
            Location::new(id, format!("Cliente {id}"), latitude, longitude).with_demand(demand),
        );
    }

    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::haversine_distance;

    #[test]
    fn test_within_radius() {
        let config = SampleConfig::default().with_num_locations(50).with_radius_km(10.0);
        let locations = generate(&config);
        for l in &locations[1..] {
            let d = (l.latitude() - config.depot.latitude)
                .hypot(l.longitude() - config.depot.longitude);
            assert!(d <= 10.0 / KM_PER_DEGREE + 1e-12);
            // a degree of longitude is shorter than 111 km, never longer
            assert!(haversine_distance(config.depot, l.coordinate()) <= 10_100.0);
        }
    }

    #[test]
    fn test_seed_changes_output() {
        let a = generate(&SampleConfig::default().with_seed(1));
        let b = generate(&SampleConfig::default().with_seed(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_names_and_ids() {
        let locations = generate(&SampleConfig::default().with_num_locations(3));
        assert_eq!(locations[0].id(), 0);
        assert_eq!(locations[2].id(), 2);
        assert_eq!(locations[2].name(), "Cliente 2");
        assert!(locations.iter().all(|l| l.demand() == 0));
    }

    #[test]
    fn test_zero_radius_and_empty() {
        let config = SampleConfig::default().with_num_locations(4).with_radius_km(0.0);
        let locations = generate(&config);
        assert!(locations.iter().all(|l| l.coordinate() == locations[0].coordinate()));
        assert!(generate(&SampleConfig::default().with_num_locations(0)).is_empty());
    }
}
