//! Dense distance matrix.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::haversine::{euclidean_distance, haversine_distance};
use crate::error::InvalidInput;
use crate::models::Location;

/// How pairwise distances are derived from location coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMethod {
    /// Great-circle meters on a spherical Earth.
    #[default]
    Haversine,
    /// Planar distance in coordinate units.
    Euclidean,
}

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per request and never mutated afterwards. Geographic matrices
/// are symmetric with a zero diagonal; matrices supplied through
/// [`DistanceMatrix::from_data`] may be asymmetric and need not satisfy the
/// triangle inequality.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Location;
/// use fleet_routing::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::depot(-23.5505, -46.6333),
///     Location::new(1, "A", -23.5605, -46.6433),
///     Location::new(2, "B", -23.5405, -46.6233),
/// ];
/// let dm = DistanceMatrix::build(&locations).unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(1, 1), 0.0);
/// assert_eq!(dm.get(0, 2), dm.get(2, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds a haversine matrix (meters) from locations.
    ///
    /// Fails if fewer than two locations are given or a coordinate is out of
    /// range.
    pub fn build(locations: &[Location]) -> Result<Self, InvalidInput> {
        Self::build_with(locations, DistanceMethod::Haversine)
    }

    /// Builds a matrix from locations with the given distance method.
    pub fn build_with(
        locations: &[Location],
        method: DistanceMethod,
    ) -> Result<Self, InvalidInput> {
        if locations.len() < 2 {
            return Err(InvalidInput::TooFewLocations {
                count: locations.len(),
                required: 2,
            });
        }
        validate_coordinates(locations)?;

        let n = locations.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (locations[i].coordinate(), locations[j].coordinate());
                let d = match method {
                    DistanceMethod::Haversine => haversine_distance(a, b),
                    DistanceMethod::Euclidean => euclidean_distance(a, b),
                };
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        debug!(locations = n, ?method, "distance matrix built");
        Ok(Self { data, size: n })
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Entries must be finite and non-negative; the matrix may be asymmetric.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self, InvalidInput> {
        if data.len() != size * size {
            return Err(InvalidInput::MatrixSizeMismatch {
                expected: size * size,
                actual: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(InvalidInput::InvalidMatrixEntry {
                from: pos / size,
                to: pos % size,
                value: data[pos],
            });
        }
        Ok(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest of `candidates` to `from`.
    ///
    /// Equal distances resolve to the lowest location index regardless of the
    /// order of `candidates`. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            let better = match best {
                None => true,
                Some((b, bd)) => d < bd || (d == bd && c < b),
            };
            if better {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Length of the closed tour `depot → path[0] → … → path[k-1] → depot`.
    pub fn tour_length(&self, depot: usize, path: &[usize]) -> f64 {
        let Some((&first, _)) = path.split_first() else {
            return 0.0;
        };
        let mut dist = self.get(depot, first);
        for w in path.windows(2) {
            dist += self.get(w[0], w[1]);
        }
        dist + self.get(path[path.len() - 1], depot)
    }

    /// Sum of consecutive arc lengths along `path`, which already contains
    /// its endpoints.
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}

fn validate_coordinates(locations: &[Location]) -> Result<(), InvalidInput> {
    for (index, loc) in locations.iter().enumerate() {
        let lat = loc.latitude();
        let lon = loc.longitude();
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidInput::LatitudeOutOfRange {
                index,
                latitude: lat,
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidInput::LongitudeOutOfRange {
                index,
                longitude: lon,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar_locations() -> Vec<Location> {
        vec![
            Location::depot(0.0, 0.0),
            Location::new(1, "a", 4.0, 3.0),
            Location::new(2, "b", 8.0, 0.0),
        ]
    }

    #[test]
    fn test_build_euclidean() {
        let dm = DistanceMatrix::build_with(&planar_locations(), DistanceMethod::Euclidean)
            .expect("valid");
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert_eq!(dm.get(0, 0), 0.0);
    }

    #[test]
    fn test_build_haversine_symmetric_zero_diagonal() {
        let locations = vec![
            Location::depot(-23.5505, -46.6333),
            Location::new(1, "a", -23.5489, -46.6388),
            Location::new(2, "b", -23.5613, -46.6565),
            Location::new(3, "c", -23.5329, -46.6395),
        ];
        let dm = DistanceMatrix::build(&locations).expect("valid");
        assert!(dm.is_symmetric(0.0));
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0.0);
        }
        assert!(dm.get(0, 1) > 0.0);
    }

    #[test]
    fn test_build_rejects_single_location() {
        let err = DistanceMatrix::build(&[Location::depot(0.0, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::TooFewLocations {
                count: 1,
                required: 2
            }
        );
    }

    #[test]
    fn test_build_rejects_bad_coordinates() {
        let locations = vec![Location::depot(0.0, 0.0), Location::new(1, "x", 91.0, 0.0)];
        assert!(matches!(
            DistanceMatrix::build(&locations),
            Err(InvalidInput::LatitudeOutOfRange { index: 1, .. })
        ));

        let locations = vec![Location::depot(0.0, -180.5), Location::new(1, "x", 0.0, 0.0)];
        assert!(matches!(
            DistanceMatrix::build(&locations),
            Err(InvalidInput::LongitudeOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 7.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 7.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data_invalid() {
        assert!(matches!(
            DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]),
            Err(InvalidInput::MatrixSizeMismatch { expected: 4, actual: 3 })
        ));
        assert!(matches!(
            DistanceMatrix::from_data(2, vec![0.0, -1.0, 1.0, 0.0]),
            Err(InvalidInput::InvalidMatrixEntry { from: 0, to: 1, .. })
        ));
    }

    #[test]
    fn test_nearest_neighbor_ties_to_lowest_index() {
        let dm = DistanceMatrix::from_data(
            4,
            vec![
                0.0, 2.0, 1.0, 1.0, //
                2.0, 0.0, 1.0, 1.0, //
                1.0, 1.0, 0.0, 1.0, //
                1.0, 1.0, 1.0, 0.0,
            ],
        )
        .expect("valid");
        assert_eq!(dm.nearest_neighbor(0, &[3, 2, 1]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[1]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_tour_and_path_length() {
        let dm = DistanceMatrix::build_with(&planar_locations(), DistanceMethod::Euclidean)
            .expect("valid");
        // 0→1 (5) + 1→2 (5) + 2→0 (8)
        assert!((dm.tour_length(0, &[1, 2]) - 18.0).abs() < 1e-10);
        assert!((dm.path_length(&[0, 1, 2, 0]) - 18.0).abs() < 1e-10);
        assert_eq!(dm.tour_length(0, &[]), 0.0);
        assert_eq!(dm.path_length(&[0, 0]), 0.0);
    }
}
