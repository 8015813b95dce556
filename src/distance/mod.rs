//! Distance model.
//!
//! Point-to-point distances (haversine, planar) and the dense matrix every
//! algorithm reads from.

mod haversine;
mod matrix;

pub use haversine::{euclidean_distance, haversine_distance, Coordinate, EARTH_RADIUS_METERS};
pub use matrix::{DistanceMatrix, DistanceMethod};
