//! cm_widget — the controller a renderer drives.
//!
//! Owns one session's `FilterState` and selection, recomputes the view model
//! on every relevant event, and hands the renderer render-ready data plus an
//! `Effects` value describing what to repaint. The core never waits on a
//! timer: animation durations are surfaced as hints the renderer may ignore.
//!
//! Event model is single-threaded and synchronous — a newer event simply
//! supersedes the view computed for an older one. For server-side use,
//! construct one `MapWidget` per request; nothing here is process-global.

#![forbid(unsafe_code)]

pub mod controller;
pub mod effects;

pub use controller::{MapSelection, MapWidget};
pub use effects::{Effects, PopupChange, BAR_ANIMATION_MS};

// Conveniences so embedders rarely need the lower crates directly.
pub use cm_core::{
    ClickPolicy, ColorMode, Description, FilterState, SortDirection, SortKey, StateDirectory,
    StateId, WidgetPolicy,
};
pub use cm_io::{load_payload, parse_payload, PayloadError};
