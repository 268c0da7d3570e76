//! Session filter/sort state.
//!
//! One instance per widget session, owned by the controller — never a
//! process-wide global, so multiple widgets (or a server-side render per
//! request) can coexist.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the table is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortKey {
    /// Lexicographic by state name.
    #[default]
    Title,
    /// Numeric by (filtered) total.
    Total,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The current sort/selection configuration.
///
/// Exactly one `(sort_key, sort_direction)` pair is active at a time;
/// `selected_category = None` means the table shows all categories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterState {
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub selected_category: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_filtered(&self) -> bool {
        self.selected_category.is_some()
    }

    /// Select a category filter. Returns true when the selection actually
    /// changed (re-selecting the active category is idempotent).
    pub fn select_category(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        if self.selected_category.as_deref() == Some(category.as_str()) {
            return false;
        }
        self.selected_category = Some(category);
        true
    }

    /// Clear the category filter. Returns true when there was one to clear.
    pub fn clear_category(&mut self) -> bool {
        self.selected_category.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_title_asc_unfiltered() {
        let fs = FilterState::new();
        assert_eq!(fs.sort_key, SortKey::Title);
        assert_eq!(fs.sort_direction, SortDirection::Asc);
        assert!(!fs.is_filtered());
    }

    #[test]
    fn category_selection_is_idempotent() {
        let mut fs = FilterState::new();
        assert!(fs.select_category("Adult Drug"));
        assert!(!fs.select_category("Adult Drug"));
        assert!(fs.select_category("Veterans Treatment"));
        assert_eq!(fs.selected_category.as_deref(), Some("Veterans Treatment"));
        assert!(fs.clear_category());
        assert!(!fs.clear_category());
    }
}
