//! Data types for routes, live locations, and driver accounts.

pub mod types;

pub use types::*;
