//! Straight-line ETA estimation.

use std::fmt;

use geo::Point;

use crate::spatial::queries::haversine_distance_km;

/// Assumed average bus speed. A documented design constant, not derived from
/// any route data.
pub const ASSUMED_SPEED_KMH: f64 = 25.0;

/// Rider-facing arrival estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eta {
    ArrivingNow,
    Minutes(u64),
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::ArrivingNow => write!(f, "Arriving now"),
            Eta::Minutes(1) => write!(f, "1 minute"),
            Eta::Minutes(n) => write!(f, "{} minutes", n),
        }
    }
}

/// Estimate arrival time from the live bus position to the rider.
///
/// Great-circle distance at [`ASSUMED_SPEED_KMH`], rounded to the nearest
/// whole minute. Straight-line only: no traffic or road-network modeling,
/// and none is planned. Callers must already hold both positions; there is
/// no "unknown" variant.
pub fn estimate_eta(bus: Point, rider: Point) -> Eta {
    let distance_km = haversine_distance_km(bus, rider);
    let minutes = (distance_km / ASSUMED_SPEED_KMH * 60.0).round() as u64;

    if minutes == 0 {
        Eta::ArrivingNow
    } else {
        Eta::Minutes(minutes)
    }
}
