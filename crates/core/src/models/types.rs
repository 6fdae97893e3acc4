//! Core data types and the crate error.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::identifiers::*;
use crate::position::{Position, PositionError};

// ============================================================================
// Data Structures
// ============================================================================

/// One driver's published route.
///
/// Replaced wholesale on every edit; there are no partial updates. Deleted
/// when the owning driver is deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Public "bus number" riders search for.
    pub route_id: RouteIdentifier,
    /// Owning driver; the store keys the route entry by this.
    pub driver_id: DriverIdentifier,
    /// Informational time-of-day bounds, never enforced by matching.
    pub start_time: String,
    pub end_time: String,
    /// Stop names in first-to-last ride order. Ordered for display,
    /// unordered for search.
    pub stops: Vec<String>,
}

impl RouteConfig {
    pub fn new(
        route_id: impl Into<RouteIdentifier>,
        driver_id: impl Into<DriverIdentifier>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        stops: Vec<String>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            driver_id: driver_id.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            stops,
        }
    }

    /// A route takes part in search only if it has at least one non-blank stop.
    pub fn is_searchable(&self) -> bool {
        self.stops.iter().any(|s| !s.trim().is_empty())
    }
}

/// One live-position sample for a route.
///
/// At most one record exists per route at any time; every new sample
/// overwrites the previous one. A record past the liveness threshold is
/// stale, not deleted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub lat: f64,
    pub lng: f64,
    /// Milliseconds since epoch, set at capture time.
    pub timestamp_ms: i64,
}

impl LocationRecord {
    pub fn new(lat: f64, lng: f64, timestamp_ms: i64) -> Self {
        Self {
            lat,
            lng,
            timestamp_ms,
        }
    }

    pub fn from_position(position: &Position) -> Self {
        Self {
            lat: position.lat,
            lng: position.lng,
            timestamp_ms: position.timestamp_ms,
        }
    }

    /// Coordinates as a `geo::Point` (x = lng, y = lat).
    pub fn point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

/// A registered driver account.
///
/// The password is stored verbatim; credential hardening is out of scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverAccount {
    pub id: DriverIdentifier,
    pub name: String,
    pub phone: String,
    pub password: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("start and destination are required")]
    BlankQuery,

    #[error("start and destination must differ")]
    IdenticalQuery,

    #[error("position unavailable: {0}")]
    Position(#[from] PositionError),

    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackingError>;
