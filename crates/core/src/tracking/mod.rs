//! Live bus status: liveness, ETA, and the composed map-screen read path.

pub mod eta;
pub mod liveness;

pub use eta::{estimate_eta, Eta, ASSUMED_SPEED_KMH};
pub use liveness::{is_online, ONLINE_THRESHOLD_MS};

use std::time::Duration;

use chrono::Utc;
use geo::Point;

use crate::models::types::{LocationRecord, Result};
use crate::position::{PositionOptions, PositionSource};

/// Cadence at which live-position readers re-read the store.
///
/// Plain polling: no event is raised on write, so readers approximating
/// real-time tracking re-read at this interval.
pub const LIVE_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Current wall-clock time in milliseconds since epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// What a live-tracking view shows for one route on a poll tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LiveStatus {
    Offline,
    Online {
        position: Point,
        /// Present only when the rider's own position was available.
        eta: Option<Eta>,
    },
}

/// Compose liveness and ETA for one poll tick.
///
/// A stale or absent record is `Offline`; staleness never removes the record
/// itself. The ETA is computed only for an online bus and a known rider
/// position.
pub fn live_status(
    record: Option<&LocationRecord>,
    rider: Option<Point>,
    now_ms: i64,
) -> LiveStatus {
    match record {
        Some(record) if is_online(Some(record), now_ms) => LiveStatus::Online {
            position: record.point(),
            eta: rider.map(|rider| estimate_eta(record.point(), rider)),
        },
        _ => LiveStatus::Offline,
    }
}

/// One-shot rider position for the map screen.
///
/// Degrades to an error the UI can show as "location unavailable"; it never
/// aborts tracking of the bus itself.
pub fn locate_rider(
    source: &dyn PositionSource,
    options: PositionOptions,
) -> Result<Point> {
    let position = source.current_position(options)?;
    Ok(position.point())
}
