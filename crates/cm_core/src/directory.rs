//! Geography id → state name directory.
//!
//! Boundary topologies key their features by numeric FIPS ids; everything
//! else in the engine keys by state name. The directory is the bridge.
//! Unresolvable ids are a fact of life (territories missing from a payload,
//! topology artifacts) and resolve to `None` — callers skip the feature,
//! they never abort the render.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric feature id from the boundary topology (US: FIPS state code).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateId(pub u32);

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Label placement metadata for map callouts: the label itself sits at
/// `(lx, ly)` relative to the feature centroid, with an optional callout
/// line from `(rx, ry)`. `lw` shifts both when the label is pulled outside
/// a small feature.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelOffsets {
    pub rx: f32,
    pub ry: f32,
    pub lx: f32,
    pub ly: f32,
    pub lw: f32,
}

/// One directory entry: canonical name plus optional label placement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateEntry {
    pub name: String,
    pub label: Option<LabelOffsets>,
}

impl StateEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), label: None }
    }
}

/// Injective id → entry mapping for one topology.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateDirectory {
    entries: BTreeMap<u32, StateEntry>,
}

impl StateDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (StateId, StateEntry)>) -> Self {
        Self { entries: entries.into_iter().map(|(id, e)| (id.0, e)).collect() }
    }

    pub fn insert(&mut self, id: StateId, entry: StateEntry) {
        self.entries.insert(id.0, entry);
    }

    /// Canonical name for a feature id; `None` for unmapped ids.
    pub fn resolve(&self, id: StateId) -> Option<&str> {
        self.entries.get(&id.0).map(|e| e.name.as_str())
    }

    pub fn entry(&self, id: StateId) -> Option<&StateEntry> {
        self.entries.get(&id.0)
    }

    pub fn label_offsets(&self, id: StateId) -> Option<LabelOffsets> {
        self.entries.get(&id.0).and_then(|e| e.label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &StateEntry)> {
        self.entries.iter().map(|(&id, e)| (StateId(id), e))
    }

    /// Static US directory: FIPS state codes for the 50 states, DC, and the
    /// territories present in the standard us-10m topology.
    pub fn builtin_us() -> Self {
        const US: &[(u32, &str)] = &[
            (1, "Alabama"),
            (2, "Alaska"),
            (4, "Arizona"),
            (5, "Arkansas"),
            (6, "California"),
            (8, "Colorado"),
            (9, "Connecticut"),
            (10, "Delaware"),
            (11, "District of Columbia"),
            (12, "Florida"),
            (13, "Georgia"),
            (15, "Hawaii"),
            (16, "Idaho"),
            (17, "Illinois"),
            (18, "Indiana"),
            (19, "Iowa"),
            (20, "Kansas"),
            (21, "Kentucky"),
            (22, "Louisiana"),
            (23, "Maine"),
            (24, "Maryland"),
            (25, "Massachusetts"),
            (26, "Michigan"),
            (27, "Minnesota"),
            (28, "Mississippi"),
            (29, "Missouri"),
            (30, "Montana"),
            (31, "Nebraska"),
            (32, "Nevada"),
            (33, "New Hampshire"),
            (34, "New Jersey"),
            (35, "New Mexico"),
            (36, "New York"),
            (37, "North Carolina"),
            (38, "North Dakota"),
            (39, "Ohio"),
            (40, "Oklahoma"),
            (41, "Oregon"),
            (42, "Pennsylvania"),
            (44, "Rhode Island"),
            (45, "South Carolina"),
            (46, "South Dakota"),
            (47, "Tennessee"),
            (48, "Texas"),
            (49, "Utah"),
            (50, "Vermont"),
            (51, "Virginia"),
            (53, "Washington"),
            (54, "West Virginia"),
            (55, "Wisconsin"),
            (56, "Wyoming"),
            (60, "American Samoa"),
            (66, "Guam"),
            (69, "Northern Mariana Islands"),
            (72, "Puerto Rico"),
            (74, "U.S. Minor Outlying Islands"),
            (78, "U.S. Virgin Islands"),
        ];
        Self {
            entries: US
                .iter()
                .map(|&(id, name)| (id, StateEntry::named(name)))
                .collect(),
        }
    }
}
