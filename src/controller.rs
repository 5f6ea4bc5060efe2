//! # Map Controller
//!
//! Reacts to map events: keeps the stop markers in line with the viewport,
//! opens the info panel for clicked stops and drives the zoom notice.
//!
//! Handlers take `&self` and never hold a lock across a network call, so a
//! second refresh can start before the first resolves. Each refresh and each
//! departures request is numbered and only the latest one issued is applied.

use std::sync::atomic::{AtomicU64, Ordering};

use bus_stops::{PoolEntry, Reconciliation, StopId, StopsPool, api};
use realtime::{Error, Geolocation, LatLng};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::config::MapperConfig;
use crate::map::{MapEvent, MapWidget, MarkerSpec};
use crate::notice::{Notice, NoticeState, NoticeView};
use crate::panel::{InfoPanel, PanelState, PanelView};

/// Outcome of a viewport refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh {
    /// The pool now mirrors the response.
    Applied { added: usize, evicted: usize },

    /// Zoomed out too far; nothing was fetched.
    OutOfZoom,

    /// A newer refresh was issued while this one was in flight.
    Superseded,

    /// The stop service query failed; nothing changed.
    Failed(Error),
}

/// Outcome of opening a stop's departures.
#[derive(Debug, Clone, PartialEq)]
pub enum Departures {
    /// The panel shows `rows` departures.
    Shown { rows: usize },

    /// The stop is no longer on the map.
    UnknownStop,

    /// Another stop was opened while this one was in flight.
    Superseded,

    /// The stop service query failed; the panel was left as is.
    Failed(Error),
}

/// Outcome of a device location lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Located {
    Found(LatLng),

    /// Location failed; the map shows the default centre.
    Fallback(Error),
}

pub struct MapController<P, M, V, N>
where
    M: MapWidget,
{
    config: MapperConfig,
    provider: P,
    map: M,
    pool: Mutex<StopsPool<M::Marker>>,
    panel: Mutex<InfoPanel<V>>,
    notice: Mutex<Notice<N>>,
    refresh_seq: AtomicU64,
    departures_seq: AtomicU64,
}

impl<P, M, V, N> MapController<P, M, V, N>
where
    P: bus_stops::Provider + Geolocation,
    M: MapWidget,
    V: PanelView,
    N: NoticeView,
{
    pub fn new(config: MapperConfig, provider: P, map: M, panel: V, notice: N) -> Self {
        let notice = Notice::new(notice, config.zoom_warning.clone());

        Self {
            config,
            provider,
            map,
            pool: Mutex::new(StopsPool::new()),
            panel: Mutex::new(InfoPanel::new(panel)),
            notice: Mutex::new(notice),
            refresh_seq: AtomicU64::new(0),
            departures_seq: AtomicU64::new(0),
        }
    }

    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub const fn map(&self) -> &M {
        &self.map
    }

    /// Stops currently on the map.
    pub async fn pool(&self) -> MutexGuard<'_, StopsPool<M::Marker>> {
        self.pool.lock().await
    }

    pub async fn panel(&self) -> MutexGuard<'_, InfoPanel<V>> {
        self.panel.lock().await
    }

    pub async fn panel_state(&self) -> PanelState {
        self.panel.lock().await.state()
    }

    pub async fn notice_state(&self) -> NoticeState {
        self.notice.lock().await.state()
    }

    /// Dispatch a map event. Failures are logged, never returned.
    pub async fn handle(&self, event: MapEvent) {
        debug!(?event, "map event");

        match event {
            MapEvent::Loaded => {
                self.load().await;
            }
            MapEvent::ViewportSettled => {
                self.on_viewport_settled().await;
            }
            MapEvent::ZoomChanged(zoom) => self.on_zoom_changed(zoom).await,
            MapEvent::Clicked => self.on_map_clicked().await,
            MapEvent::PanelTitleClicked => {
                self.panel.lock().await.toggle_collapse();
            }
            MapEvent::MarkerClicked(stop_id) => {
                self.on_marker_clicked(&stop_id).await;
            }
            MapEvent::LocateRequested => {
                self.locate(true).await;
            }
            MapEvent::LocationFound(position) => {
                self.on_location_found(position).await;
            }
            MapEvent::LocationFailed(err) => self.on_location_failed(&err),
        }
    }

    /// Show the default view, then try to move to the device location.
    pub async fn load(&self) -> Located {
        self.map.set_view(self.config.default_center, self.config.initial_zoom);
        self.locate(false).await
    }

    /// Centre the map on the device. High accuracy is only asked for when the
    /// user requests it.
    pub async fn locate(&self, high_accuracy: bool) -> Located {
        match Geolocation::locate(&self.provider, self.config.locate_timeout, high_accuracy).await
        {
            Ok(position) => {
                self.on_location_found(position).await;
                Located::Found(position)
            }
            Err(err) => {
                self.on_location_failed(&err);
                Located::Fallback(err)
            }
        }
    }

    pub async fn on_location_found(&self, position: LatLng) -> Refresh {
        info!(lat = position.lat, lng = position.lng, "location found");
        self.map.set_view(position, self.config.initial_zoom);
        self.on_viewport_settled().await
    }

    pub fn on_location_failed(&self, err: &Error) {
        warn!(monotonic_counter.locate_errors = 1, error = %err, "location failed, using default view");
        self.map.set_view(self.config.default_center, self.config.initial_zoom);
    }

    pub async fn on_zoom_changed(&self, zoom: u8) {
        if !self.config.shows_stops(zoom) {
            self.notice.lock().await.zoom_warning();
        }
    }

    pub async fn on_map_clicked(&self) {
        self.panel.lock().await.hide();
    }

    /// Refresh stops for the current viewport, or show the zoom notice when
    /// zoomed out too far.
    pub async fn on_viewport_settled(&self) -> Refresh {
        let zoom = self.map.zoom();

        if !self.config.shows_stops(zoom) {
            // a refresh still in flight must not place markers out of zoom
            self.refresh_seq.fetch_add(1, Ordering::SeqCst);
            self.notice.lock().await.zoom_warning();
            debug!(zoom, min_zoom = self.config.min_zoom, "below minimum zoom, skipping refresh");
            return Refresh::OutOfZoom;
        }

        self.notice.lock().await.normal();
        self.refresh_stops().await
    }

    /// Fetch stops in the current bounds and reconcile the markers: evict
    /// stops no longer reported, place markers for new ones and leave the
    /// rest alone.
    pub async fn refresh_stops(&self) -> Refresh {
        let bounds = self.map.bounds();
        let seq = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let stops = match api::stops_in_bounds(&self.provider, &bounds).await {
            Ok(stops) => stops,
            Err(err) => {
                warn!(monotonic_counter.fetch_errors = 1, error = %err, "fetching stops failed");
                return Refresh::Failed(err);
            }
        };

        let mut pool = self.pool.lock().await;
        if seq != self.refresh_seq.load(Ordering::SeqCst) {
            debug!(seq, "discarding superseded stops response");
            return Refresh::Superseded;
        }

        let Reconciliation { fresh, evicted } = pool.reconcile(stops);
        for entry in &evicted {
            self.map.remove_marker(&entry.marker);
        }

        let icon = self.config.bus_icon();
        let added = fresh.len();
        for stop in fresh {
            let marker = self.map.add_marker(&MarkerSpec {
                stop_id: stop.id.clone(),
                position: stop.position(),
                icon: icon.clone(),
                popup: stop.name.clone(),
            });
            pool.add(PoolEntry::new(stop, marker));
        }

        info!(added, evicted = evicted.len(), pooled = pool.len(), "reconciled stops");
        Refresh::Applied { added, evicted: evicted.len() }
    }

    /// Centre on a clicked stop and show its live departures.
    pub async fn on_marker_clicked(&self, stop_id: &StopId) -> Departures {
        let Some(stop) = self.pool.lock().await.get(stop_id.as_str()).map(|e| e.stop.clone())
        else {
            debug!(stop_id = %stop_id, "clicked stop is no longer pooled");
            return Departures::UnknownStop;
        };

        self.map.set_view(stop.position(), self.map.zoom());
        let seq = self.departures_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let detail = match api::stop_detail(&self.provider, &stop.id).await {
            Ok(detail) => detail,
            Err(err) => {
                warn!(
                    monotonic_counter.fetch_errors = 1, error = %err, stop_id = %stop.id,
                    "fetching departures failed"
                );
                return Departures::Failed(err);
            }
        };

        let mut panel = self.panel.lock().await;
        if seq != self.departures_seq.load(Ordering::SeqCst) {
            debug!(seq, stop_id = %stop.id, "discarding superseded departures");
            return Departures::Superseded;
        }

        let rows = panel.render(&detail.arrivals, &stop.name);
        Departures::Shown { rows }
    }
}
