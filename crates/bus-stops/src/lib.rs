//! # Bus Stops
//!
//! Queries the bus stop information service and tracks the stops currently
//! shown on the map.

pub mod api;
mod model;
mod pool;

pub use realtime::{Error, LatLng, Result};

pub use self::model::*;
pub use self::pool::*;

/// Provider entry point implemented by the host application.
pub trait Provider: realtime::Config + realtime::HttpRequest {}

impl<T> Provider for T where T: realtime::Config + realtime::HttpRequest {}
