//! Bus mapper errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = anyhow::Result<T, Error>;

/// Domain level error type returned by the stop client and host providers.
///
/// None of these are fatal: fetch failures skip a refresh cycle and location
/// failures fall back to the default map view.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Error {
    /// The bus stop service could not be reached or returned a non-success
    /// status.
    #[error("code: bad_gateway, description: {0}")]
    BadGateway(String),

    /// The bus stop service returned a payload that could not be decoded.
    #[error("code: invalid_format, description: {0}")]
    InvalidFormat(String),

    /// The requested stop is unknown.
    #[error("code: not_found, description: {0}")]
    NotFound(String),

    /// Device geolocation was denied or is unavailable.
    #[error("code: location_unavailable, description: {0}")]
    Location(String),

    /// Device geolocation did not answer in time.
    #[error("code: location_timeout, description: {0}")]
    Timeout(String),

    /// A non recoverable internal error occurred.
    #[error("code: internal, description: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the stable error code associated with the variant.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadGateway(_) => "bad_gateway",
            Self::InvalidFormat(_) => "invalid_format",
            Self::NotFound(_) => "not_found",
            Self::Location(_) => "location_unavailable",
            Self::Timeout(_) => "location_timeout",
            Self::Internal(_) => "internal",
        }
    }

    /// Returns the error description.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Whether the error came from querying the bus stop service.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::BadGateway(_) | Self::InvalidFormat(_) | Self::NotFound(_))
    }

    /// Whether the error came from device geolocation.
    #[must_use]
    pub const fn is_locate(&self) -> bool {
        matches!(self, Self::Location(_) | Self::Timeout(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        let chain = err.chain().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");

        // if type is Error, return it with the newly added context
        if let Some(inner) = err.downcast_ref::<Self>() {
            tracing::debug!("Error: {err}, caused by: {inner}");

            return match inner {
                Self::BadGateway(_) => Self::BadGateway(chain),
                Self::InvalidFormat(_) => Self::InvalidFormat(chain),
                Self::NotFound(_) => Self::NotFound(chain),
                Self::Location(_) => Self::Location(chain),
                Self::Timeout(_) => Self::Timeout(chain),
                Self::Internal(_) => Self::Internal(chain),
            };
        }

        if err.downcast_ref::<serde_json::Error>().is_some() {
            return Self::InvalidFormat(chain);
        }

        // otherwise, return an Internal error
        Self::Internal(chain)
    }
}

#[macro_export]
macro_rules! bad_gateway {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::BadGateway(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::BadGateway(format!($err))
    };
}

#[macro_export]
macro_rules! not_found {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::NotFound(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::NotFound(format!($err))
    };
}

#[macro_export]
macro_rules! invalid_format {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::InvalidFormat(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::InvalidFormat(format!($err))
    };
}
