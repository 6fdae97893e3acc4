//! Spatial query utilities for distance calculations.
//!
//! Uses the Haversine formula for distances on Earth's surface. The radius is
//! the conventional 6371 km, which every distance-derived figure in the crate
//! (notably ETA labels) is defined against.

use geo::Point;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
///
/// Points are (x = lng, y = lat) in decimal degrees.
pub fn haversine_distance_km(p1: Point, p2: Point) -> f64 {
    let lat1 = p1.y().to_radians();
    let lat2 = p2.y().to_radians();
    let delta_lat = (p2.y() - p1.y()).to_radians();
    let delta_lng = (p2.x() - p1.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
