//! # citybus-core
//!
//! Live-tracking and route-matching engine for community bus tracking.
//!
//! ## Features
//!
//! - **Route search**: loose free-text matching of start/destination against
//!   registered stop lists
//! - **Liveness**: a single shared staleness threshold decides whether a bus
//!   is online
//! - **ETA**: great-circle distance at an assumed average speed, as a
//!   rider-facing label
//! - **Location sharing**: cancellable watch sessions that overwrite one
//!   record per route
//! - **Pluggable storage and positioning**: the host injects the store and
//!   the device position source
//!
//! The crate is a pure in-process library; screen routing and presentation
//! live in the hosting shell.
//!
//! ## Example
//!
//! ```
//! use citybus_core::prelude::*;
//!
//! let store = MemoryRouteStore::new();
//! store
//!     .put_route(
//!         &DriverIdentifier::new("d1"),
//!         RouteConfig::new(
//!             "42A",
//!             "d1",
//!             "06:00",
//!             "22:00",
//!             vec!["Central Market".into(), "Airport Road".into()],
//!         ),
//!     )
//!     .unwrap();
//!
//! let results = filter_routes("central", "airport", &store.all_routes().unwrap()).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].route_id, RouteIdentifier::new("42A"));
//! ```

pub mod identifiers;
pub mod models;
pub mod position;
pub mod publisher;
pub mod search;
pub mod spatial;
pub mod store;
pub mod tracking;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::types::*;
    pub use crate::position::{
        Position, PositionCallback, PositionError, PositionOptions, PositionSource, WatchId,
    };
    pub use crate::publisher::{LocationPublisher, SharingHandle};
    pub use crate::search::{filter_routes, stop_matches, RouteSearchEngine};
    pub use crate::store::{JsonFileStore, MemoryRouteStore, RouteStore};
    pub use crate::tracking::{
        estimate_eta, is_online, live_status, now_ms, Eta, LiveStatus, ASSUMED_SPEED_KMH,
        LIVE_POLL_INTERVAL, ONLINE_THRESHOLD_MS,
    };
}

pub use prelude::*;
