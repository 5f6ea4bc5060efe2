//! # Map
//!
//! Interface to the map widget that renders tiles and markers. The widget is
//! owned by the host; the controller only places and removes markers and moves
//! the view.

use std::fmt::Debug;

use bus_stops::{Bounds, StopId};
use realtime::{Error, LatLng};

/// Marker icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub url: String,
    pub size: (u32, u32),
    pub anchor: (i32, i32),
    pub popup_anchor: (i32, i32),
}

/// A marker to place for a bus stop.
///
/// The widget reports clicks on it as [`MapEvent::MarkerClicked`] carrying
/// `stop_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub stop_id: StopId,
    pub position: LatLng,
    pub icon: Icon,
    pub popup: String,
}

/// The map widget collaborator.
pub trait MapWidget: Send + Sync {
    /// Opaque handle to a placed marker.
    type Marker: Clone + Debug + Send + Sync;

    fn add_marker(&self, marker: &MarkerSpec) -> Self::Marker;

    fn remove_marker(&self, marker: &Self::Marker);

    fn set_view(&self, center: LatLng, zoom: u8);

    fn bounds(&self) -> Bounds;

    fn zoom(&self) -> u8;
}

/// Events emitted by the map widget and its surrounding controls.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The map is ready.
    Loaded,

    /// Panning or zooming has finished.
    ViewportSettled,

    /// The zoom level changed.
    ZoomChanged(u8),

    /// The map background was clicked.
    Clicked,

    /// The info panel title was clicked.
    PanelTitleClicked,

    /// A stop marker was clicked.
    MarkerClicked(StopId),

    /// The user asked to be located.
    LocateRequested,

    /// The widget resolved the device location itself.
    LocationFound(LatLng),

    /// The widget failed to resolve the device location.
    LocationFailed(Error),
}
