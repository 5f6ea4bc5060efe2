//! # Provider
//!
//! Provider defines external data interfaces for the crate.

use std::any::Any;
use std::error::Error;
use std::time::Duration;

use anyhow::Result;
use bytes::Bytes;
use http::{Request, Response};
use http_body::Body;
use serde::{Deserialize, Serialize};

/// The `HttpRequest` trait defines the behavior for fetching data from a source.
pub trait HttpRequest: Send + Sync {
    /// Make outbound HTTP request.
    fn fetch<T>(&self, request: Request<T>) -> impl Future<Output = Result<Response<Bytes>>> + Send
    where
        T: Body + Any + Send,
        T::Data: Into<Vec<u8>>,
        T::Error: Into<Box<dyn Error + Send + Sync + 'static>>;
}

/// The `Config` trait is used by implementers to provide host configuration
/// (such as the bus stop service URL) to dependent crates.
pub trait Config: Send + Sync {
    /// Request configuration setting.
    fn get(&self, key: &str) -> impl Future<Output = Result<String>> + Send;
}

/// A geographic position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// The `Geolocation` trait resolves the device's current position.
///
/// Implementations are expected to give up after `timeout` and report
/// [`crate::Error::Timeout`]; a refusal or missing fix should surface as
/// [`crate::Error::Location`].
pub trait Geolocation: Send + Sync {
    /// Locate the device.
    fn locate(
        &self, timeout: Duration, high_accuracy: bool,
    ) -> impl Future<Output = crate::Result<LatLng>> + Send;
}
