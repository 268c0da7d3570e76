//! Popup description lookup.

use cm_core::{Description, RawMetrics};

/// Popup content for one state: full (unfiltered) counts plus the
/// coordinator contact when one exists.
///
/// `contact = None` means "no coordinator record", not "no data" — the
/// popup header and counts list still render, only the contact block is
/// omitted. A state absent from `counts` altogether yields an empty entries
/// list with `data_available = false`.
pub fn describe(state: &str, metrics: &RawMetrics) -> Description {
    let entries = metrics.counts_for(state).map(<[_]>::to_vec).unwrap_or_default();
    let total: u64 = entries.iter().map(|e| e.count).sum();
    Description {
        state: state.to_string(),
        contact: metrics.coordinators.get(state).cloned(),
        entries,
        total,
        data_available: total >= 1,
        download: metrics.downloads.get(state).cloned(),
    }
}
