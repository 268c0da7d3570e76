//! Render effects: what an event handler asks the renderer to do.
//!
//! Two-phase contract: the state transition inside the controller is
//! immediate and pure; the `Effects` value only *describes* follow-up
//! presentation work. `delay_hint_ms` exists because the deployed widgets
//! animated bar widths over 800ms — the renderer may honor or ignore it,
//! and no data correctness depends on it.

/// Bar re-animation duration used by the reference renderer.
pub const BAR_ANIMATION_MS: u64 = 800;

/// Popup follow-up for a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupChange {
    /// Leave the popup as it is.
    None,
    /// Show (or refresh) the popup for this state.
    Show(String),
    /// Hide the popup.
    Hide,
}

/// What to repaint after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Effects {
    /// The table view model changed; re-render bars and totals.
    pub table_dirty: bool,
    pub popup: PopupChange,
    /// Optional presentation delay (bar width animation).
    pub delay_hint_ms: Option<u64>,
}

impl Effects {
    /// The event changed nothing visible.
    pub fn none() -> Self {
        Self { table_dirty: false, popup: PopupChange::None, delay_hint_ms: None }
    }

    pub fn table() -> Self {
        Self {
            table_dirty: true,
            popup: PopupChange::None,
            delay_hint_ms: Some(BAR_ANIMATION_MS),
        }
    }

    pub fn popup_show(state: impl Into<String>) -> Self {
        Self { table_dirty: false, popup: PopupChange::Show(state.into()), delay_hint_ms: None }
    }

    pub fn popup_hide() -> Self {
        Self { table_dirty: false, popup: PopupChange::Hide, delay_hint_ms: None }
    }

    pub fn is_none(&self) -> bool {
        !self.table_dirty && self.popup == PopupChange::None
    }
}
