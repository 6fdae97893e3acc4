//! Route, location, and driver persistence.
//!
//! Everything in the engine reads and writes through the [`RouteStore`]
//! trait; screens never reach into ambient storage directly. Writes are
//! whole-value replacements of a single key — no transactions and no
//! read-modify-write sequences, so last-writer-wins is the only ordering
//! guarantee.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryRouteStore;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::identifiers::{DriverIdentifier, RouteIdentifier};
use crate::models::types::{DriverAccount, LocationRecord, Result, RouteConfig};

/// Synchronous key-value persistence for the tracking engine.
///
/// Three logical key spaces: route configuration keyed by owning driver,
/// live location keyed by route id, and the driver registry. Enumeration
/// returns entries in insertion order.
pub trait RouteStore: Send + Sync {
    // ---- Routes ----

    /// Replace the owner's route wholesale.
    fn put_route(&self, owner: &DriverIdentifier, route: RouteConfig) -> Result<()>;
    fn route_for_driver(&self, owner: &DriverIdentifier) -> Result<Option<RouteConfig>>;
    fn route(&self, id: &RouteIdentifier) -> Result<Option<RouteConfig>>;
    fn all_routes(&self) -> Result<Vec<RouteConfig>>;
    /// Remove the owner's route and its live location, if any.
    fn remove_route(&self, owner: &DriverIdentifier) -> Result<()>;

    // ---- Live locations ----

    /// Replace the route's single location record.
    fn put_location(&self, id: &RouteIdentifier, record: LocationRecord) -> Result<()>;
    fn location(&self, id: &RouteIdentifier) -> Result<Option<LocationRecord>>;
    fn remove_location(&self, id: &RouteIdentifier) -> Result<()>;

    // ---- Driver registry ----

    fn put_driver(&self, account: DriverAccount) -> Result<()>;
    fn driver(&self, id: &DriverIdentifier) -> Result<Option<DriverAccount>>;
    fn all_drivers(&self) -> Result<Vec<DriverAccount>>;
    /// Remove the driver and cascade to their route and its location.
    fn remove_driver(&self, id: &DriverIdentifier) -> Result<()>;
}

/// Shared backing state for the store implementations.
///
/// `IndexMap` keeps enumeration in insertion order, which the search
/// contract relies on.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    drivers: IndexMap<String, DriverAccount>,
    /// Keyed by owning driver id.
    routes: IndexMap<String, RouteConfig>,
    /// Keyed by route id.
    locations: IndexMap<String, LocationRecord>,
}

impl StoreState {
    pub(crate) fn put_route(&mut self, owner: &DriverIdentifier, route: RouteConfig) {
        self.routes.insert(owner.as_str().to_owned(), route);
    }

    pub(crate) fn route_for_driver(&self, owner: &DriverIdentifier) -> Option<RouteConfig> {
        self.routes.get(owner.as_str()).cloned()
    }

    pub(crate) fn route(&self, id: &RouteIdentifier) -> Option<RouteConfig> {
        self.routes.values().find(|r| r.route_id == *id).cloned()
    }

    pub(crate) fn all_routes(&self) -> Vec<RouteConfig> {
        self.routes.values().cloned().collect()
    }

    pub(crate) fn remove_route(&mut self, owner: &DriverIdentifier) {
        if let Some(route) = self.routes.shift_remove(owner.as_str()) {
            self.locations.shift_remove(route.route_id.as_str());
        }
    }

    pub(crate) fn put_location(&mut self, id: &RouteIdentifier, record: LocationRecord) {
        self.locations.insert(id.as_str().to_owned(), record);
    }

    pub(crate) fn location(&self, id: &RouteIdentifier) -> Option<LocationRecord> {
        self.locations.get(id.as_str()).copied()
    }

    pub(crate) fn remove_location(&mut self, id: &RouteIdentifier) {
        self.locations.shift_remove(id.as_str());
    }

    pub(crate) fn put_driver(&mut self, account: DriverAccount) {
        self.drivers.insert(account.id.as_str().to_owned(), account);
    }

    pub(crate) fn driver(&self, id: &DriverIdentifier) -> Option<DriverAccount> {
        self.drivers.get(id.as_str()).cloned()
    }

    pub(crate) fn all_drivers(&self) -> Vec<DriverAccount> {
        self.drivers.values().cloned().collect()
    }

    pub(crate) fn remove_driver(&mut self, id: &DriverIdentifier) {
        self.remove_route(id);
        self.drivers.shift_remove(id.as_str());
    }
}
