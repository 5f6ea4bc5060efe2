//! # Bus Mapper
//!
//! Shows nearby bus stops on a map and their live departures in a
//! collapsible panel. The map widget, panel and banner surfaces, and device
//! location are provided by the host through the traits in [`map`],
//! [`panel`], [`notice`] and [`realtime`].

mod config;
pub mod controller;
pub mod map;
pub mod notice;
pub mod panel;

pub use bus_stops::{Bounds, Departure, Stop, StopDetail, StopId, StopsPool};
pub use realtime::{Error, Geolocation, LatLng, Result};

pub use self::config::MapperConfig;
pub use self::controller::{Departures, Located, MapController, Refresh};
pub use self::map::{Icon, MapEvent, MapWidget, MarkerSpec};
pub use self::notice::{NoticeState, NoticeView};
pub use self::panel::{DepartureRow, Glyph, PanelState, PanelView};
