use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use realtime::LatLng;

use crate::map::Icon;

/// Map UI settings.
///
/// The stop service URL is not part of this: it is requested from the host
/// `Config` provider on each query.
#[derive(Debug, Clone, PartialEq)]
pub struct MapperConfig {
    /// Below this zoom level stops are not fetched and a notice is shown.
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub initial_zoom: u8,
    /// Map centre used before, or instead of, device location.
    pub default_center: LatLng,
    pub images_path: String,
    pub zoom_warning: String,
    pub locate_timeout: Duration,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            min_zoom: 15,
            max_zoom: 20,
            initial_zoom: 16,
            default_center: LatLng::new(51.505, -0.09),
            images_path: "/images".to_string(),
            zoom_warning: "Zoom in to see bus stops".to_string(),
            locate_timeout: Duration::from_secs(15),
        }
    }
}

impl MapperConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            min_zoom: env_or("MIN_ZOOM_LEVEL", defaults.min_zoom),
            max_zoom: env_or("MAX_ZOOM_LEVEL", defaults.max_zoom),
            initial_zoom: env_or("INITIAL_ZOOM_LEVEL", defaults.initial_zoom),
            default_center: LatLng::new(
                env_or("DEFAULT_CENTER_LAT", defaults.default_center.lat),
                env_or("DEFAULT_CENTER_LNG", defaults.default_center.lng),
            ),
            images_path: env_or("IMAGES_PATH", defaults.images_path),
            zoom_warning: env_or("ZOOM_WARNING_TEXT", defaults.zoom_warning),
            locate_timeout: Duration::from_millis(env_or(
                "LOCATE_TIMEOUT_MS",
                u64::try_from(defaults.locate_timeout.as_millis()).unwrap_or(15_000),
            )),
        }
        .clamped()
    }

    // keep min <= initial <= max
    fn clamped(mut self) -> Self {
        self.max_zoom = self.max_zoom.max(self.min_zoom);
        self.initial_zoom = self.initial_zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    /// Whether stops are shown at this zoom level.
    #[must_use]
    pub const fn shows_stops(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom
    }

    /// The bus stop marker icon.
    #[must_use]
    pub fn bus_icon(&self) -> Icon {
        Icon {
            url: format!("{}/bus-icon25x25.png", self.images_path.trim_end_matches('/')),
            size: (25, 25),
            anchor: (13, 13),
            popup_anchor: (-1, -15),
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    parse_or(key, env::var(key).ok(), default)
}

// Unset or unparseable values fall back to the default.
fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    let Some(value) = value else {
        tracing::trace!("{key} not set, using default: {default}");
        return default;
    };

    if let Ok(parsed) = value.trim().parse() {
        parsed
    } else {
        tracing::warn!("{key} has invalid value {value:?}, using default: {default}");
        default
    }
}
