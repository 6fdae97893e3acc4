//! Single-document JSON file store.
//!
//! The Rust analogue of the origin-scoped browser key-value store the app
//! grew up on: one JSON document, loaded once at open, rewritten
//! synchronously after every mutation. No expiry, no transactions.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::identifiers::{DriverIdentifier, RouteIdentifier};
use crate::models::types::{DriverAccount, LocationRecord, Result, RouteConfig};
use crate::store::{RouteStore, StoreState};

pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing state if the file is present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            StoreState::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a mutation and rewrite the document.
    fn mutate(&self, apply: impl FnOnce(&mut StoreState)) -> Result<()> {
        let mut state = self.write();
        apply(&mut state);
        self.flush(&state)
    }

    fn flush(&self, state: &StoreState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json).inspect_err(|err| {
            warn!(path = %self.path.display(), %err, "failed to persist store");
        })?;
        Ok(())
    }
}

impl RouteStore for JsonFileStore {
    fn put_route(&self, owner: &DriverIdentifier, route: RouteConfig) -> Result<()> {
        self.mutate(|state| state.put_route(owner, route))
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
        self.mutate(|state| state.remove_route(owner))
    }

    fn put_location(&self, id: &RouteIdentifier, record: LocationRecord) -> Result<()> {
        self.mutate(|state| state.put_location(id, record))
    }

    fn location(&self, id: &RouteIdentifier) -> Result<Option<LocationRecord>> {
        Ok(self.read().location(id))
    }

    fn remove_location(&self, id: &RouteIdentifier) -> Result<()> {
        self.mutate(|state| state.remove_location(id))
    }

    fn put_driver(&self, account: DriverAccount) -> Result<()> {
        self.mutate(|state| state.put_driver(account))
    }

    fn driver(&self, id: &DriverIdentifier) -> Result<Option<DriverAccount>> {
        Ok(self.read().driver(id))
    }

    fn all_drivers(&self) -> Result<Vec<DriverAccount>> {
        Ok(self.read().all_drivers())
    }

    fn remove_driver(&self, id: &DriverIdentifier) -> Result<()> {
        self.mutate(|state| state.remove_driver(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(route_id: &str, driver_id: &str) -> RouteConfig {
        RouteConfig::new(
            route_id,
            driver_id,
            "06:00",
            "22:00",
            vec!["Central Market".into(), "Airport Road".into()],
        )
    }

    #[test]
    fn test_reopen_sees_previous_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citybus.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.put_route(&"d1".into(), route("12", "d1")).unwrap();
            store
                .put_location(&"12".into(), LocationRecord::new(12.97, 77.59, 42))
                .unwrap();
            store
                .put_driver(DriverAccount {
                    id: "d1".into(),
                    name: "Asha".into(),
                    phone: "555-0100".into(),
                    password: "secret".into(),
                })
                .unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.route_for_driver(&"d1".into()).unwrap().unwrap(),
            route("12", "d1")
        );
        assert_eq!(
            store.location(&"12".into()).unwrap().unwrap().timestamp_ms,
            42
        );
        assert_eq!(store.all_drivers().unwrap().len(), 1);
    }

    #[test]
    fn test_open_without_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("missing.json")).unwrap();
        assert!(store.all_routes().unwrap().is_empty());
        assert!(store.all_drivers().unwrap().is_empty());
    }

    #[test]
    fn test_cascade_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citybus.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.put_route(&"d1".into(), route("12", "d1")).unwrap();
            store
                .put_location(&"12".into(), LocationRecord::new(12.97, 77.59, 42))
                .unwrap();
            store.remove_route(&"d1".into()).unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.route_for_driver(&"d1".into()).unwrap().is_none());
        assert!(store.location(&"12".into()).unwrap().is_none());
    }

    #[test]
    fn test_open_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citybus.json");
        fs::write(&path, "not json").unwrap();

        assert!(JsonFileStore::open(&path).is_err());
    }
}
