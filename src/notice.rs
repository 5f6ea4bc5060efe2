//! # Notice
//!
//! Header banner telling the user to zoom in when stops are not shown.

use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeState {
    #[default]
    Normal,
    ZoomWarning,
}

/// Rendering surface for the banner.
pub trait NoticeView: Send {
    fn show_notice(&mut self, text: &str);

    fn clear_notice(&mut self);
}

/// Two-state banner. The view is only touched on transitions.
#[derive(Debug)]
pub struct Notice<V> {
    view: V,
    state: NoticeState,
    warning: String,
}

impl<V: NoticeView> Notice<V> {
    pub fn new(view: V, warning: impl Into<String>) -> Self {
        Self { view, state: NoticeState::default(), warning: warning.into() }
    }

    #[must_use]
    pub const fn state(&self) -> NoticeState {
        self.state
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Enter `ZoomWarning`. Returns true on transition.
    pub fn zoom_warning(&mut self) -> bool {
        if self.state == NoticeState::ZoomWarning {
            return false;
        }
        debug!("showing zoom warning");
        self.view.show_notice(&self.warning);
        self.state = NoticeState::ZoomWarning;
        true
    }

    /// Return to `Normal`. Returns true on transition.
    pub fn normal(&mut self) -> bool {
        if self.state == NoticeState::Normal {
            return false;
        }
        debug!("clearing zoom warning");
        self.view.clear_notice();
        self.state = NoticeState::Normal;
        true
    }
}
