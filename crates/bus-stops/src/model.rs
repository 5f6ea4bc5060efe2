//! Bus stop service data types

use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use realtime::LatLng;
use serde::{Deserialize, Deserializer, Serialize};

/// Bus stop identifier.
///
/// The service is not consistent about sending ids as strings or numbers so
/// both are accepted and normalised to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StopId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(id) => Self(id),
            Raw::Number(id) => Self(id.to_string()),
        })
    }
}

impl Display for StopId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StopId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StopId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StopId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A physical bus stop as reported by the stop service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Viewport bounds, as the north-east and south-west corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub north_east: LatLng,
    pub south_west: LatLng,
}

impl Bounds {
    #[must_use]
    pub const fn new(north_east: LatLng, south_west: LatLng) -> Self {
        Self { north_east, south_west }
    }

    /// Query string understood by the stop service.
    #[must_use]
    pub fn to_query(&self) -> String {
        let Self { north_east: ne, south_west: sw } = self;
        format!("northEast={},{}&southWest={},{}", ne.lat, ne.lng, sw.lat, sw.lng)
    }
}

/// Response to a stops-in-bounds query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StopsResponse {
    pub markers: Vec<Stop>,
}

/// One expected vehicle arrival at a stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Departure {
    pub route_name: String,
    pub estimated_wait: String,
    pub scheduled_time: String,
    pub is_cancelled: bool,
}

/// Live departures for a single stop.
///
/// The service only guarantees `arrivals`; stop metadata is kept when it is
/// echoed back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StopId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub arrivals: Vec<Departure>,
}
