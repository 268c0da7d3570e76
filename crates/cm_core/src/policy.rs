//! Variant behavior knobs.
//!
//! The deployed widgets disagreed on two points: what a second click does
//! while a state is locked, and whether the map key and the bar key share
//! one color scale. Both are configuration here, not hardcoded guesses.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What clicking the map does once a state is already locked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClickPolicy {
    /// Any further click releases the lock (the popup follows hover again).
    #[default]
    ToggleSelect,
    /// Clicks are ignored while locked; only an explicit clear releases.
    LockUntilClear,
}

/// Relationship between the map-fill legend and the bar-category legend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColorMode {
    /// Two color spaces: the map key shows distinct fill colors from the
    /// payload, the bar key shows the category scale.
    #[default]
    Independent,
    /// One color space: the category scale's swatches serve as the single
    /// legend.
    Shared,
}

/// Per-widget configuration bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WidgetPolicy {
    pub click: ClickPolicy,
    pub color: ColorMode,
}

impl WidgetPolicy {
    pub fn with_click(mut self, click: ClickPolicy) -> Self {
        self.click = click;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }
}
