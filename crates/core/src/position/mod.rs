//! Device position source seam.
//!
//! The engine never talks to a real geolocation backend itself; the hosting
//! shell implements [`PositionSource`] over whatever the platform provides
//! (browser geolocation, platform location services, a replay file in tests).
//! Failures are reported as values, never as positions.

use std::time::Duration;

use geo::Point;

/// One position fix from the device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
    /// Reported horizontal accuracy in meters, when the source knows it.
    pub accuracy_m: Option<f64>,
    /// Milliseconds since epoch, set by the source at capture time.
    pub timestamp_ms: i64,
}

impl Position {
    pub fn new(lat: f64, lng: f64, timestamp_ms: i64) -> Self {
        Self {
            lat,
            lng,
            accuracy_m: None,
            timestamp_ms,
        }
    }

    /// Coordinates as a `geo::Point` (x = lng, y = lat).
    pub fn point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

/// Accuracy/timeout hints passed through to the underlying source.
#[derive(Clone, Copy, Debug)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Option<Duration>,
    /// Maximum age of a cached fix the source may hand back.
    pub maximum_age: Option<Duration>,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Some(Duration::from_secs(10)),
            maximum_age: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    Unavailable,

    #[error("position request timed out")]
    Timeout,
}

/// Identifies one continuous watch subscription on a source.
pub type WatchId = u64;

/// Callback invoked for every update of a continuous watch.
pub type PositionCallback = Box<dyn FnMut(Result<Position, PositionError>) + Send>;

/// Provider of device positions.
///
/// `watch_position` yields repeated updates until `clear_watch` is called
/// with the returned id. Sources must tolerate `clear_watch` being invoked
/// from inside a callback.
pub trait PositionSource: Send + Sync {
    /// One-shot current position request.
    fn current_position(&self, options: PositionOptions)
        -> Result<Position, PositionError>;

    /// Subscribe to continuous updates.
    fn watch_position(&self, options: PositionOptions, callback: PositionCallback)
        -> WatchId;

    /// Cancel a watch. Unknown ids are ignored.
    fn clear_watch(&self, id: WatchId);
}
