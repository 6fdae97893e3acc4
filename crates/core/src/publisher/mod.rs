//! Driver-side location sharing.
//!
//! The publisher is the only writer of [`LocationRecord`]s; search, map, and
//! admin paths only read. Each session holds one continuous watch on the
//! position source and overwrites the route's single record on every update.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::identifiers::RouteIdentifier;
use crate::models::types::{LocationRecord, Result};
use crate::position::{PositionError, PositionOptions, PositionSource, WatchId};
use crate::store::RouteStore;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct LocationPublisher {
    store: Arc<dyn RouteStore>,
    source: Arc<dyn PositionSource>,
    options: PositionOptions,
}

impl LocationPublisher {
    pub fn new(store: Arc<dyn RouteStore>, source: Arc<dyn PositionSource>) -> Self {
        Self::with_options(store, source, PositionOptions::default())
    }

    pub fn with_options(
        store: Arc<dyn RouteStore>,
        source: Arc<dyn PositionSource>,
        options: PositionOptions,
    ) -> Self {
        Self {
            store,
            source,
            options,
        }
    }

    /// Begin sharing live positions for a route.
    ///
    /// Every source update overwrites the route's single location record. A
    /// source error ends the session (no automatic retry); the error stays
    /// readable on the handle so the UI can show why sharing stopped.
    pub fn start_sharing(&self, route_id: RouteIdentifier) -> Result<SharingHandle> {
        let state = Arc::new(SessionState {
            route_id,
            active: AtomicBool::new(true),
            watch: Mutex::new(None),
            last_error: Mutex::new(None),
            source: Arc::clone(&self.source),
        });

        let store = Arc::clone(&self.store);
        let session = Arc::clone(&state);
        let watch_id = self.source.watch_position(
            self.options,
            Box::new(move |update| {
                // Guards the stop race: a late update delivered after stop()
                // returned must not write.
                if !session.active.load(Ordering::SeqCst) {
                    return;
                }
                match update {
                    Ok(position) => {
                        debug!(
                            route = %session.route_id,
                            lat = position.lat,
                            lng = position.lng,
                            "location update"
                        );
                        let record = LocationRecord::from_position(&position);
                        if let Err(err) = store.put_location(&session.route_id, record) {
                            warn!(route = %session.route_id, %err, "failed to persist location");
                        }
                    }
                    Err(err) => {
                        warn!(route = %session.route_id, %err, "position source failed; sharing stopped");
                        *lock(&session.last_error) = Some(err);
                        session.stop();
                    }
                }
            }),
        );

        // The source may have failed synchronously during registration, in
        // which case the session is already stopped and the watch must not
        // outlive it.
        if state.active.load(Ordering::SeqCst) {
            *lock(&state.watch) = Some(watch_id);
        } else {
            self.source.clear_watch(watch_id);
        }

        Ok(SharingHandle { state })
    }

    /// Stop a session. Idempotent; a no-op if it already ended.
    pub fn stop_sharing(&self, handle: &SharingHandle) {
        handle.stop();
    }
}

struct SessionState {
    route_id: RouteIdentifier,
    active: AtomicBool,
    watch: Mutex<Option<WatchId>>,
    last_error: Mutex<Option<PositionError>>,
    source: Arc<dyn PositionSource>,
}

impl SessionState {
    fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(id) = lock(&self.watch).take() {
            self.source.clear_watch(id);
        }
    }
}

/// Controls one live sharing session.
///
/// Dropping the handle stops the session as well, so a watch can never
/// outlive the code that asked for it.
pub struct SharingHandle {
    state: Arc<SessionState>,
}

impl SharingHandle {
    pub fn route_id(&self) -> &RouteIdentifier {
        &self.state.route_id
    }

    /// False once stopped, whether by `stop()` or by a source failure.
    pub fn is_active(&self) -> bool {
        self.state.active.load(Ordering::SeqCst)
    }

    /// The source error that ended the session, if one did.
    pub fn error(&self) -> Option<PositionError> {
        *lock(&self.state.last_error)
    }

    /// Stop sharing. Synchronously cancels the watch; idempotent.
    pub fn stop(&self) {
        self.state.stop();
    }
}

impl Drop for SharingHandle {
    fn drop(&mut self) {
        self.state.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::position::{Position, PositionCallback};
    use crate::store::MemoryRouteStore;

    /// Scripted position source: updates are delivered only when the test
    /// calls `emit`, so the stop race can be exercised deterministically.
    #[derive(Default)]
    struct FakeSource {
        next_id: Mutex<WatchId>,
        watches: Mutex<HashMap<WatchId, PositionCallback>>,
        cleared: Mutex<Vec<WatchId>>,
    }

    impl FakeSource {
        fn emit(&self, update: std::result::Result<Position, PositionError>) {
            // Take callbacks out before invoking so a callback may re-enter
            // clear_watch without deadlocking.
            let taken: Vec<(WatchId, PositionCallback)> =
                lock(&self.watches).drain().collect();
            for (id, mut callback) in taken {
                callback(update);
                if !lock(&self.cleared).contains(&id) {
                    lock(&self.watches).insert(id, callback);
                }
            }
        }

        fn cleared(&self) -> Vec<WatchId> {
            lock(&self.cleared).clone()
        }
    }

    impl PositionSource for FakeSource {
        fn current_position(
            &self,
            _options: PositionOptions,
        ) -> std::result::Result<Position, PositionError> {
            Err(PositionError::Unavailable)
        }

        fn watch_position(
            &self,
            _options: PositionOptions,
            callback: PositionCallback,
        ) -> WatchId {
            let mut next = lock(&self.next_id);
            let id = *next;
            *next += 1;
            lock(&self.watches).insert(id, callback);
            id
        }

        fn clear_watch(&self, id: WatchId) {
            lock(&self.watches).remove(&id);
            lock(&self.cleared).push(id);
        }
    }

    fn setup() -> (Arc<MemoryRouteStore>, Arc<FakeSource>, LocationPublisher) {
        let store = Arc::new(MemoryRouteStore::new());
        let source = Arc::new(FakeSource::default());
        let publisher = LocationPublisher::new(
            Arc::clone(&store) as Arc<dyn RouteStore>,
            Arc::clone(&source) as Arc<dyn PositionSource>,
        );
        (store, source, publisher)
    }

    #[test]
    fn test_updates_overwrite_the_single_record() {
        let (store, source, publisher) = setup();
        let handle = publisher.start_sharing("12".into()).unwrap();

        source.emit(Ok(Position::new(12.97, 77.59, 1)));
        source.emit(Ok(Position::new(12.98, 77.60, 2)));

        let record = store.location(&"12".into()).unwrap().unwrap();
        assert_eq!(record.lat, 12.98);
        assert_eq!(record.timestamp_ms, 2);
        assert!(handle.is_active());
    }

    #[test]
    fn test_no_write_after_stop() {
        let (store, source, publisher) = setup();
        let handle = publisher.start_sharing("12".into()).unwrap();

        source.emit(Ok(Position::new(12.97, 77.59, 1)));
        handle.stop();
        assert!(!handle.is_active());

        // A late update from the source must not write.
        source.emit(Ok(Position::new(99.0, 99.0, 2)));

        let record = store.location(&"12".into()).unwrap().unwrap();
        assert_eq!(record.timestamp_ms, 1);
        assert_eq!(source.cleared(), vec![0]);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (_store, source, publisher) = setup();
        let handle = publisher.start_sharing("12".into()).unwrap();

        handle.stop();
        handle.stop();
        publisher.stop_sharing(&handle);

        // The watch was cleared exactly once.
        assert_eq!(source.cleared(), vec![0]);
    }

    #[test]
    fn test_source_error_ends_the_session() {
        let (store, source, publisher) = setup();
        let handle = publisher.start_sharing("12".into()).unwrap();

        source.emit(Err(PositionError::PermissionDenied));

        assert!(!handle.is_active());
        assert_eq!(handle.error(), Some(PositionError::PermissionDenied));
        assert_eq!(source.cleared(), vec![0]);

        // Nothing was ever written, and later updates are ignored.
        source.emit(Ok(Position::new(12.97, 77.59, 1)));
        assert!(store.location(&"12".into()).unwrap().is_none());
    }

    #[test]
    fn test_drop_stops_the_session() {
        let (_store, source, publisher) = setup();
        {
            let _handle = publisher.start_sharing("12".into()).unwrap();
        }
        assert_eq!(source.cleared(), vec![0]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let (store, source, publisher) = setup();
        let a = publisher.start_sharing("12".into()).unwrap();
        let b = publisher.start_sharing("7B".into()).unwrap();

        a.stop();
        source.emit(Ok(Position::new(12.97, 77.59, 1)));

        assert!(store.location(&"12".into()).unwrap().is_none());
        assert!(store.location(&"7B".into()).unwrap().is_some());
        assert!(b.is_active());
    }
}
