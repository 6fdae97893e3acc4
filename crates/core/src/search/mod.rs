//! Route search: free-text stop matching over registered routes.

pub mod engine;
pub mod matcher;

pub use engine::{filter_routes, RouteSearchEngine};
pub use matcher::stop_matches;
