//! Operating cost and emission estimates for a routing solution.
//!
//! Every component is linear in distance:
//!
//! ```text
//! km           = Σ route meters / 1000
//! fuel liters  = km / consumption
//! fuel         = liters × fuel price
//! driver       = km / average speed × hourly rate
//! depreciation = km × depreciation rate
//! toll         = km × toll rate            (0 when tolls are disabled)
//! operational  = km × operational rate
//! total        = fuel + driver + depreciation + toll + operational
//! CO2 kg       = fuel liters × CO2 per liter
//! ```
//!
//! so a solution's breakdown is the sum of its routes' breakdowns.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::models::{Route, Solution};

const METERS_PER_KM: f64 = 1000.0;

/// Cost rates. Monetary values share one currency.
///
/// `fuel_consumption_km_per_liter` and `average_speed_kmh` must be positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    pub fuel_price_per_liter: f64,
    pub fuel_consumption_km_per_liter: f64,
    pub driver_hourly_rate: f64,
    pub average_speed_kmh: f64,
    pub depreciation_rate_per_km: f64,
    pub toll_rate_per_km: f64,
    pub tolls_enabled: bool,
    /// Diesel emits about 2.68 kg of CO2 per liter burned.
    pub co2_kg_per_liter: f64,
    /// Any further per-km cost (maintenance, insurance).
    pub operational_rate_per_km: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            fuel_price_per_liter: 6.50,
            fuel_consumption_km_per_liter: 8.0,
            driver_hourly_rate: 25.0,
            average_speed_kmh: 60.0,
            depreciation_rate_per_km: 0.50,
            toll_rate_per_km: 0.15,
            tolls_enabled: true,
            co2_kg_per_liter: 2.68,
            operational_rate_per_km: 0.0,
        }
    }
}

impl CostConfig {
    pub fn with_fuel_price(mut self, per_liter: f64) -> Self {
        self.fuel_price_per_liter = per_liter;
        self
    }

    pub fn with_fuel_consumption(mut self, km_per_liter: f64) -> Self {
        self.fuel_consumption_km_per_liter = km_per_liter;
        self
    }

    pub fn with_driver_hourly_rate(mut self, rate: f64) -> Self {
        self.driver_hourly_rate = rate;
        self
    }

    pub fn with_average_speed(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = kmh;
        self
    }

    pub fn with_depreciation_rate(mut self, per_km: f64) -> Self {
        self.depreciation_rate_per_km = per_km;
        self
    }

    pub fn with_toll_rate(mut self, per_km: f64) -> Self {
        self.toll_rate_per_km = per_km;
        self
    }

    pub fn with_tolls(mut self, enabled: bool) -> Self {
        self.tolls_enabled = enabled;
        self
    }

    pub fn with_co2_per_liter(mut self, kg: f64) -> Self {
        self.co2_kg_per_liter = kg;
        self
    }

    pub fn with_operational_rate(mut self, per_km: f64) -> Self {
        self.operational_rate_per_km = per_km;
        self
    }
}

/// Cost components for a distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub distance_km: f64,
    pub fuel_liters: f64,
    pub fuel_cost: f64,
    pub driver_cost: f64,
    pub depreciation_cost: f64,
    pub toll_cost: f64,
    pub operational_cost: f64,
    pub total_cost: f64,
    pub driving_hours: f64,
    pub co2_kg: f64,
    /// `total_cost / distance_km`, or 0 for zero distance.
    pub cost_per_km: f64,
}

/// Savings of a candidate solution relative to a baseline.
///
/// Positive values mean the candidate is cheaper, shorter or cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    pub distance_saved_km: f64,
    pub cost_saved: f64,
    pub time_saved_hours: f64,
    pub co2_saved_kg: f64,
    pub fuel_cost_saved: f64,
    /// `cost_saved / baseline total × 100`, or 0 when the baseline costs nothing.
    pub cost_reduction_percent: f64,
}

impl CostComparison {
    pub fn between(baseline: &CostBreakdown, candidate: &CostBreakdown) -> Self {
        let cost_saved = baseline.total_cost - candidate.total_cost;
        let cost_reduction_percent = if baseline.total_cost > 0.0 {
            cost_saved / baseline.total_cost * 100.0
        } else {
            0.0
        };
        Self {
            distance_saved_km: baseline.distance_km - candidate.distance_km,
            cost_saved,
            time_saved_hours: baseline.driving_hours - candidate.driving_hours,
            co2_saved_kg: baseline.co2_kg - candidate.co2_kg,
            fuel_cost_saved: baseline.fuel_cost - candidate.fuel_cost,
            cost_reduction_percent,
        }
    }
}

/// Prices routing solutions. Never modifies them.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fleet_routing::cost::CostModel;
/// use fleet_routing::distance::DistanceMatrix;
/// use fleet_routing::models::{Route, Solution};
///
/// // depot and one customer 5 km apart
/// let matrix = DistanceMatrix::from_data(2, vec![0.0, 5000.0, 5000.0, 0.0]).unwrap();
/// let routes = vec![Route::from_customers(0, &[1])];
/// let solution = Solution::new(routes, "manual", Duration::ZERO, 10_000.0);
///
/// let costs = CostModel::default().compute(&solution, &matrix);
/// assert!((costs.distance_km - 10.0).abs() < 1e-9);
/// assert!((costs.fuel_liters - 1.25).abs() < 1e-9);
/// assert!((costs.co2_kg - 3.35).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    config: CostConfig,
}

impl CostModel {
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Prices a distance in kilometers.
    pub fn breakdown(&self, distance_km: f64) -> CostBreakdown {
        let c = &self.config;
        let fuel_liters = distance_km / c.fuel_consumption_km_per_liter;
        let fuel_cost = fuel_liters * c.fuel_price_per_liter;
        let driving_hours = distance_km / c.average_speed_kmh;
        let driver_cost = driving_hours * c.driver_hourly_rate;
        let depreciation_cost = distance_km * c.depreciation_rate_per_km;
        let toll_cost = if c.tolls_enabled {
            distance_km * c.toll_rate_per_km
        } else {
            0.0
        };
        let operational_cost = distance_km * c.operational_rate_per_km;
        let total_cost = fuel_cost + driver_cost + depreciation_cost + toll_cost + operational_cost;

        CostBreakdown {
            distance_km,
            fuel_liters,
            fuel_cost,
            driver_cost,
            depreciation_cost,
            toll_cost,
            operational_cost,
            total_cost,
            driving_hours,
            co2_kg: fuel_liters * c.co2_kg_per_liter,
            cost_per_km: if distance_km > 0.0 {
                total_cost / distance_km
            } else {
                0.0
            },
        }
    }

    /// Prices the whole solution, with route lengths taken from `distances`.
    pub fn compute(&self, solution: &Solution, distances: &DistanceMatrix) -> CostBreakdown {
        let meters: f64 = solution
            .routes()
            .iter()
            .map(|r| route_meters(r, distances))
            .sum();
        self.breakdown(meters / METERS_PER_KM)
    }

    /// One breakdown per route, in route order. Empty routes cost nothing.
    pub fn route_costs(
        &self,
        solution: &Solution,
        distances: &DistanceMatrix,
    ) -> Vec<CostBreakdown> {
        solution
            .routes()
            .iter()
            .map(|r| self.breakdown(route_meters(r, distances) / METERS_PER_KM))
            .collect()
    }

    /// Compares `candidate` against `baseline`.
    pub fn compare(
        &self,
        baseline: &Solution,
        candidate: &Solution,
        distances: &DistanceMatrix,
    ) -> CostComparison {
        CostComparison::between(
            &self.compute(baseline, distances),
            &self.compute(candidate, distances),
        )
    }
}

fn route_meters(route: &Route, distances: &DistanceMatrix) -> f64 {
    distances.path_length(route.stops())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    /// Depot plus two customers; every leg is `leg_km` long.
    fn triangle(leg_km: f64) -> DistanceMatrix {
        let m = leg_km * 1000.0;
        DistanceMatrix::from_data(3, vec![0.0, m, m, m, 0.0, m, m, m, 0.0]).expect("valid matrix")
    }

    fn solution(routes: Vec<Route>) -> Solution {
        Solution::new(routes, "test", Duration::ZERO, 0.0)
    }

    #[test]
    fn test_breakdown_defaults() {
        let b = CostModel::default().breakdown(100.0);
        assert!((b.fuel_liters - 12.5).abs() < 1e-9);
        assert!((b.fuel_cost - 81.25).abs() < 1e-9);
        assert!((b.driving_hours - 100.0 / 60.0).abs() < 1e-9);
        assert!((b.driver_cost - 2500.0 / 60.0).abs() < 1e-9);
        assert!((b.depreciation_cost - 50.0).abs() < 1e-9);
        assert!((b.toll_cost - 15.0).abs() < 1e-9);
        assert_eq!(b.operational_cost, 0.0);
        assert!((b.co2_kg - 33.5).abs() < 1e-9);
        let total = b.fuel_cost + b.driver_cost + b.depreciation_cost + b.toll_cost;
        assert!((b.total_cost - total).abs() < 1e-9);
        assert!((b.cost_per_km - total / 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tolls_disabled() {
        let model = CostModel::new(CostConfig::default().with_tolls(false));
        assert_eq!(model.breakdown(100.0).toll_cost, 0.0);
    }

    #[test]
    fn test_operational_rate() {
        let model = CostModel::new(CostConfig::default().with_operational_rate(0.2));
        let b = model.breakdown(10.0);
        assert!((b.operational_cost - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance() {
        let b = CostModel::default().breakdown(0.0);
        assert_eq!(b.total_cost, 0.0);
        assert_eq!(b.cost_per_km, 0.0);
    }

    #[test]
    fn test_compute_sums_routes() {
        let d = triangle(2.0);
        let sol = solution(vec![Route::from_customers(0, &[1, 2]), Route::empty(1)]);
        let model = CostModel::default();
        let total = model.compute(&sol, &d);
        assert!((total.distance_km - 6.0).abs() < 1e-9);

        let per_route = model.route_costs(&sol, &d);
        assert_eq!(per_route.len(), 2);
        assert_eq!(per_route[1].total_cost, 0.0);
        let summed: f64 = per_route.iter().map(|b| b.total_cost).sum();
        assert!((summed - total.total_cost).abs() < 1e-9);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let d = triangle(3.0);
        let sol = solution(vec![Route::from_customers(0, &[1]), Route::from_customers(1, &[2])]);
        let model = CostModel::default();
        let before = sol.clone();
        assert_eq!(model.compute(&sol, &d), model.compute(&sol, &d));
        assert_eq!(sol, before);
    }

    #[test]
    fn test_compare() {
        let d = triangle(1.0);
        // two out-and-back routes (4 km) against one tour (3 km)
        let baseline = solution(vec![
            Route::from_customers(0, &[1]),
            Route::from_customers(1, &[2]),
        ]);
        let candidate = solution(vec![Route::from_customers(0, &[1, 2]), Route::empty(1)]);
        let model = CostModel::default();
        let cmp = model.compare(&baseline, &candidate, &d);

        assert!((cmp.distance_saved_km - 1.0).abs() < 1e-9);
        assert!((cmp.cost_reduction_percent - 25.0).abs() < 1e-9);
        assert!((cmp.co2_saved_kg - 2.68 / 8.0).abs() < 1e-9);
        assert!(cmp.fuel_cost_saved > 0.0);
    }

    #[test]
    fn test_compare_zero_baseline() {
        let zero = CostBreakdown::default();
        let cmp = CostComparison::between(&zero, &zero);
        assert_eq!(cmp.cost_reduction_percent, 0.0);
    }

    #[test]
    fn test_config_from_partial_json() {
        let c: CostConfig =
            serde_json::from_str(r#"{"fuel_price_per_liter": 5.0, "tolls_enabled": false}"#)
                .expect("parse");
        assert_eq!(c.fuel_price_per_liter, 5.0);
        assert!(!c.tolls_enabled);
        assert_eq!(c.average_speed_kmh, 60.0);
    }
}
