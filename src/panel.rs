//! # Info Panel
//!
//! Collapsible card listing live departures for the selected stop.

use std::fmt::{Display, Formatter};

use bus_stops::Departure;
use tracing::debug;

/// Indicator glyph shown in the panel title (Material Icons code points).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Shown while collapsed.
    Expand,

    /// Shown while expanded.
    Collapse,
}

impl Glyph {
    #[must_use]
    pub const fn code_point(self) -> char {
        match self {
            Self::Expand => '\u{E316}',
            Self::Collapse => '\u{E313}',
        }
    }
}

/// One rendered departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRow {
    pub route_name: String,
    pub estimated_wait: String,
    pub scheduled_time: String,
}

impl From<&Departure> for DepartureRow {
    fn from(departure: &Departure) -> Self {
        Self {
            route_name: departure.route_name.clone(),
            estimated_wait: departure.estimated_wait.clone(),
            scheduled_time: departure.scheduled_time.clone(),
        }
    }
}

impl Display for DepartureRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.route_name, self.estimated_wait, self.scheduled_time)
    }
}

/// Rendering surface for the panel.
pub trait PanelView: Send {
    fn clear_rows(&mut self);

    fn set_title(&mut self, title: &str);

    fn append_row(&mut self, row: &DepartureRow);

    fn set_hidden(&mut self, hidden: bool);

    fn set_content_visible(&mut self, visible: bool);

    fn set_indicator(&mut self, glyph: Glyph);
}

/// Visibility and collapse are independent: a panel can be visible and
/// collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub hidden: bool,
    pub collapsed: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self { hidden: true, collapsed: false }
    }
}

#[derive(Debug)]
pub struct InfoPanel<V> {
    view: V,
    state: PanelState,
}

impl<V: PanelView> InfoPanel<V> {
    /// The panel starts hidden and expanded.
    pub fn new(view: V) -> Self {
        Self { view, state: PanelState::default() }
    }

    #[must_use]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Replace the departure table and show the panel. Cancelled departures
    /// are left out. Returns the number of rows rendered.
    pub fn render(&mut self, departures: &[Departure], stop_name: &str) -> usize {
        self.view.clear_rows();
        self.view.set_title(stop_name);

        let mut rows = 0;
        for departure in departures.iter().filter(|d| !d.is_cancelled) {
            self.view.append_row(&DepartureRow::from(departure));
            rows += 1;
        }
        debug!(stop = stop_name, rows, skipped = departures.len() - rows, "rendered departures");

        self.apply_collapsed();
        self.show();

        rows
    }

    /// Returns true if the panel was hidden.
    pub fn show(&mut self) -> bool {
        if !self.state.hidden {
            return false;
        }
        self.view.set_hidden(false);
        self.state.hidden = false;
        true
    }

    /// Returns true if the panel was visible.
    pub fn hide(&mut self) -> bool {
        if self.state.hidden {
            return false;
        }
        self.view.set_hidden(true);
        self.state.hidden = true;
        true
    }

    /// Flip between collapsed and expanded, returning the new collapsed value.
    pub fn toggle_collapse(&mut self) -> bool {
        self.state.collapsed = !self.state.collapsed;
        self.apply_collapsed();
        self.state.collapsed
    }

    fn apply_collapsed(&mut self) {
        let glyph = if self.state.collapsed { Glyph::Expand } else { Glyph::Collapse };
        self.view.set_content_visible(!self.state.collapsed);
        self.view.set_indicator(glyph);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Default)]
    struct MockView {
        title: String,
        rows: Vec<String>,
        hidden_calls: Vec<bool>,
        content_visible: Option<bool>,
        glyph: Option<Glyph>,
    }

    impl PanelView for MockView {
        fn clear_rows(&mut self) {
            self.rows.clear();
        }

        fn set_title(&mut self, title: &str) {
            self.title = title.to_string();
        }

        fn append_row(&mut self, row: &DepartureRow) {
            self.rows.push(row.to_string());
        }

        fn set_hidden(&mut self, hidden: bool) {
            self.hidden_calls.push(hidden);
        }

        fn set_content_visible(&mut self, visible: bool) {
            self.content_visible = Some(visible);
        }

        fn set_indicator(&mut self, glyph: Glyph) {
            self.glyph = Some(glyph);
        }
    }

    fn departure(route: &str, cancelled: bool) -> Departure {
        Departure {
            route_name: route.to_string(),
            estimated_wait: "2 min".to_string(),
            scheduled_time: "10:02".to_string(),
            is_cancelled: cancelled,
        }
    }

    #[test]
    fn cancelled_left_out() {
        let mut panel = InfoPanel::new(MockView::default());

        let rows = panel.render(&[departure("9", true), departure("24", false)], "Stop A");

        assert_eq!(rows, 1);
        assert_eq!(panel.view().rows, vec!["24 / 2 min / 10:02".to_string()]);
        assert_eq!(panel.view().title, "Stop A");
        assert!(!panel.state().hidden);
    }

    #[test]
    fn render_replaces_rows() {
        let mut panel = InfoPanel::new(MockView::default());

        panel.render(&[departure("24", false), departure("29", false)], "Stop A");
        panel.render(&[departure("176", false)], "Stop B");

        assert_eq!(panel.view().rows, vec!["176 / 2 min / 10:02".to_string()]);
        assert_eq!(panel.view().title, "Stop B");
        assert_eq!(panel.view().hidden_calls, vec![false]);
    }

    #[test]
    fn show_is_idempotent() {
        let mut panel = InfoPanel::new(MockView::default());

        assert!(panel.show());
        assert!(!panel.show());
        assert_eq!(panel.view().hidden_calls, vec![false]);

        assert!(panel.hide());
        assert!(!panel.hide());
        assert_eq!(panel.view().hidden_calls, vec![false, true]);
        assert!(panel.state().hidden);
    }

    #[test]
    fn toggle_twice_restores() {
        let mut panel = InfoPanel::new(MockView::default());

        assert!(panel.toggle_collapse());
        assert_eq!(panel.view().glyph, Some(Glyph::Expand));
        assert_eq!(panel.view().content_visible, Some(false));

        assert!(!panel.toggle_collapse());
        assert_eq!(panel.view().glyph, Some(Glyph::Collapse));
        assert_eq!(panel.view().content_visible, Some(true));
        assert_eq!(panel.state(), PanelState::default());
    }

    #[test]
    fn render_keeps_collapsed() {
        let mut panel = InfoPanel::new(MockView::default());
        panel.toggle_collapse();

        panel.render(&[departure("24", false)], "Stop A");

        let state = panel.state();
        assert!(state.collapsed);
        assert!(!state.hidden);
        assert_eq!(panel.view().glyph, Some(Glyph::Expand));
        assert_eq!(panel.view().content_visible, Some(false));
    }

    #[test]
    fn glyph_code_points() {
        assert_eq!(Glyph::Expand.code_point(), '\u{e316}');
        assert_eq!(Glyph::Collapse.code_point(), '\u{e313}');
    }
}
