//! Route search over the store.

use std::sync::Arc;

use crate::models::types::{Result, RouteConfig, TrackingError};
use crate::search::matcher::{normalize, stop_matches};
use crate::store::RouteStore;

/// Filter routes whose stop lists match both ends of a journey.
///
/// A route qualifies when at least one stop matches the start query and at
/// least one stop (possibly the same one) matches the destination query.
/// Routes without a single non-blank stop never qualify. Iteration order of
/// `routes` is preserved; there is no relevance ranking.
///
/// Errors with [`TrackingError::BlankQuery`] if either query is blank after
/// trimming, and [`TrackingError::IdenticalQuery`] if both normalize to the
/// same string. An empty result is `Ok`, not an error.
pub fn filter_routes(
    start: &str,
    destination: &str,
    routes: &[RouteConfig],
) -> Result<Vec<RouteConfig>> {
    let start = normalize(start);
    let destination = normalize(destination);

    if start.is_empty() || destination.is_empty() {
        return Err(TrackingError::BlankQuery);
    }
    if start == destination {
        return Err(TrackingError::IdenticalQuery);
    }

    Ok(routes
        .iter()
        .filter(|route| {
            route.is_searchable()
                && route.stops.iter().any(|stop| stop_matches(&start, stop))
                && route
                    .stops
                    .iter()
                    .any(|stop| stop_matches(&destination, stop))
        })
        .cloned()
        .collect())
}

/// Store-backed search: scans every registered route on each call.
pub struct RouteSearchEngine {
    store: Arc<dyn RouteStore>,
}

impl RouteSearchEngine {
    pub fn new(store: Arc<dyn RouteStore>) -> Self {
        Self { store }
    }

    pub fn search(&self, start: &str, destination: &str) -> Result<Vec<RouteConfig>> {
        let routes = self.store.all_routes()?;
        filter_routes(start, destination, &routes)
    }
}
