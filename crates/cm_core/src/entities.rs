//! Domain entities shared across the engine.
//!
//! Ordering conventions:
//! - `Vec`-of-pairs fields preserve **source order** (the JSON object key
//!   order of the payload). Entry order drives bar stacking and legend
//!   swatch order, so it is part of the data, not an accident.
//! - `BTreeMap` fields are pure lookups where order carries no meaning.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One category→count pair within a state's series.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: u64) -> Self {
        Self { category: category.into(), count }
    }
}

/// Coordinator contact details. All fields optional; absent fields suppress
/// the corresponding popup line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// The validated per-session snapshot the whole engine runs on.
///
/// Built by `cm_io` from the API payload; by the time a `RawMetrics` exists,
/// structural validation has already passed (counts are non-negative
/// integers, maps were objects). Optional payload fields are empty here.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawMetrics {
    /// Canonical row order for the table. May be empty (no canonical list).
    pub states: Vec<String>,
    /// Per-state category counts, outer and inner order as in the source.
    pub counts: Vec<(String, Vec<CategoryCount>)>,
    /// Pre-assigned map fill per state, first-seen order preserved.
    pub color_code: Vec<(String, String)>,
    /// Coordinator contact per state.
    pub coordinators: BTreeMap<String, ContactInfo>,
    /// Canonical category universe; defines legend order and the color scale
    /// domain. Categories outside this list get the neutral color.
    pub program_types: Vec<String>,
    /// Server-computed totals. Advisory only: derived series always recompute
    /// their own totals, these are just cross-checked at load.
    pub totals: BTreeMap<String, u64>,
    /// Per-state download links (shown in the popup when present).
    pub downloads: BTreeMap<String, String>,
    /// Optional site-wide link target for the whole map.
    pub link: Option<String>,
}

impl RawMetrics {
    /// Counts for one state, in source order. `None` when the state has no
    /// entry at all (distinct from an entry with an empty list).
    pub fn counts_for(&self, state: &str) -> Option<&[CategoryCount]> {
        self.counts
            .iter()
            .find(|(s, _)| s == state)
            .map(|(_, c)| c.as_slice())
    }

    /// Pre-assigned map fill for one state, if the payload carried one.
    pub fn fill_color_for(&self, state: &str) -> Option<&str> {
        self.color_code
            .iter()
            .find(|(s, _)| s == state)
            .map(|(_, c)| c.as_str())
    }
}

/// One state's render-ready series: filtered entries plus a recomputed total.
///
/// Invariant: `total == entries.iter().map(|e| e.count).sum()`. The filter
/// engine recomputes it on every pass; it is never carried over stale.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivedSeries {
    pub title: String,
    pub entries: Vec<CategoryCount>,
    pub total: u64,
    /// False when the unfiltered baseline total is zero — the table and the
    /// popup show an explicit "data unavailable" marker for such rows.
    pub data_available: bool,
}

impl DerivedSeries {
    /// An empty series for a state with no data.
    pub fn empty(title: impl Into<String>) -> Self {
        Self { title: title.into(), entries: Vec::new(), total: 0, data_available: false }
    }
}

/// Popup content for one state.
///
/// `contact` is `None` when no coordinator record exists; the popup header is
/// still shown in that case and only the contact block is omitted. This is
/// the one rule separating "no data" from "no contact".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Description {
    pub state: String,
    pub contact: Option<ContactInfo>,
    /// Unfiltered counts in source order; popups always show the full list.
    pub entries: Vec<CategoryCount>,
    pub total: u64,
    pub data_available: bool,
    pub download: Option<String>,
}
