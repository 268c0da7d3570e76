//! Filter/sort engine: baseline series + `FilterState` → ordered view.
//!
//! Full recompute on every call. Entries are re-filtered from the baseline
//! (never from a previous filtered view) and totals re-summed, so a filter
//! change can never leave a stale total behind.

use std::cmp::Ordering;

use cm_core::{DerivedSeries, FilterState, SortDirection, SortKey};

/// A render-ready, ordered view of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilteredView {
    pub series: Vec<DerivedSeries>,
    /// Largest filtered total — the denominator for bar widths.
    pub max_total: u64,
    /// Set when `selected_category` was not in the category universe. The
    /// view is still valid (all rows empty); callers log this, nothing
    /// fails.
    pub unknown_category: Option<String>,
}

/// Apply the current filter and sort to the baseline.
///
/// Filtering keeps only entries matching `selected_category` (all when
/// `None`); a selected category outside `program_types` yields the empty
/// view plus `unknown_category`. Sorting is **stable**: rows with equal sort
/// keys retain their baseline order, in both directions (`sort_by` on a
/// reversed comparator, never a reversed `Vec`).
pub fn apply(
    baseline: &[DerivedSeries],
    filter: &FilterState,
    program_types: &[String],
) -> FilteredView {
    let unknown_category = filter.selected_category.as_ref().and_then(|c| {
        (!program_types.iter().any(|p| p == c)).then(|| c.clone())
    });

    let mut series: Vec<DerivedSeries> = baseline
        .iter()
        .map(|row| {
            let entries: Vec<_> = match (&filter.selected_category, &unknown_category) {
                (Some(_), Some(_)) => Vec::new(),
                (Some(cat), None) => {
                    row.entries.iter().filter(|e| &e.category == cat).cloned().collect()
                }
                (None, _) => row.entries.clone(),
            };
            let total = entries.iter().map(|e| e.count).sum();
            DerivedSeries {
                title: row.title.clone(),
                entries,
                total,
                data_available: row.data_available,
            }
        })
        .collect();

    series.sort_by(|a, b| compare(a, b, filter.sort_key, filter.sort_direction));
    let max_total = series.iter().map(|s| s.total).max().unwrap_or(0);

    FilteredView { series, max_total, unknown_category }
}

fn compare(a: &DerivedSeries, b: &DerivedSeries, key: SortKey, dir: SortDirection) -> Ordering {
    let natural = match key {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Total => a.total.cmp(&b.total),
    };
    match dir {
        SortDirection::Asc => natural,
        SortDirection::Desc => natural.reverse(),
    }
}
