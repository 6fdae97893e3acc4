//! In-memory store, the substitution target for tests and demos.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identifiers::{DriverIdentifier, RouteIdentifier};
use crate::models::types::{DriverAccount, LocationRecord, Result, RouteConfig};
use crate::store::{RouteStore, StoreState};

#[derive(Debug, Default)]
pub struct MemoryRouteStore {
    state: RwLock<StoreState>,
}

impl MemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RouteStore for MemoryRouteStore {
    fn put_route(&self, owner: &DriverIdentifier, route: RouteConfig) -> Result<()> {
        self.write().put_route(owner, route);
        Ok(())
    }

    fn route_for_driver(&self, owner: &DriverIdentifier) -> Result<Option<RouteConfig>> {
        Ok(self.read().route_for_driver(owner))
    }

    fn route(&self, id: &RouteIdentifier) -> Result<Option<RouteConfig>> {
        Ok(self.read().route(id))
    }

    fn all_routes(&self) -> Result<Vec<RouteConfig>> {
        Ok(self.read().all_routes())
    }

    fn remove_route(&self, owner: &DriverIdentifier) -> Result<()> {
        self.write().remove_route(owner);
        Ok(())
    }

    fn put_location(&self, id: &RouteIdentifier, record: LocationRecord) -> Result<()> {
        self.write().put_location(id, record);
        Ok(())
    }

    fn location(&self, id: &RouteIdentifier) -> Result<Option<LocationRecord>> {
        Ok(self.read().location(id))
    }

    fn remove_location(&self, id: &RouteIdentifier) -> Result<()> {
        self.write().remove_location(id);
        Ok(())
    }

    fn put_driver(&self, account: DriverAccount) -> Result<()> {
        self.write().put_driver(account);
        Ok(())
    }

    fn driver(&self, id: &DriverIdentifier) -> Result<Option<DriverAccount>> {
        Ok(self.read().driver(id))
    }

    fn all_drivers(&self) -> Result<Vec<DriverAccount>> {
        Ok(self.read().all_drivers())
    }

    fn remove_driver(&self, id: &DriverIdentifier) -> Result<()> {
        self.write().remove_driver(id);
        Ok(())
    }
}
