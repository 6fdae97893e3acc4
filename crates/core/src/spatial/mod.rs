//! Spatial helpers.

pub mod queries;

pub use queries::{haversine_distance_km, EARTH_RADIUS_KM};
