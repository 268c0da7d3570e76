//! Metric aggregation: `RawMetrics` → unfiltered baseline series.
//!
//! Row order is the **ordered union** of the canonical `states` list and the
//! `counts` keys: canonical rows first (so the table renders a row even for
//! states with no data), then any counts-only states in source order.
//! Within a row, entry order is the source key order — it drives bar
//! stacking and must survive aggregation untouched.

use std::collections::BTreeSet;

use cm_core::{DerivedSeries, RawMetrics};

/// Build the unfiltered baseline: one series per state, `total` summed over
/// all categories. States with no counts entry become empty rows with
/// `data_available = false`; they never fail.
pub fn aggregate(metrics: &RawMetrics) -> Vec<DerivedSeries> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out = Vec::with_capacity(metrics.states.len().max(metrics.counts.len()));

    for state in &metrics.states {
        if !seen.insert(state.as_str()) {
            continue; // duplicate in the canonical list
        }
        out.push(series_for(metrics, state));
    }
    for (state, _) in &metrics.counts {
        if seen.insert(state.as_str()) {
            out.push(series_for(metrics, state));
        }
    }
    out
}

fn series_for(metrics: &RawMetrics, state: &str) -> DerivedSeries {
    match metrics.counts_for(state) {
        Some(entries) => {
            let total: u64 = entries.iter().map(|e| e.count).sum();
            DerivedSeries {
                title: state.to_string(),
                entries: entries.to_vec(),
                total,
                data_available: total >= 1,
            }
        }
        None => DerivedSeries::empty(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::CategoryCount;

    fn metrics() -> RawMetrics {
        RawMetrics {
            states: vec!["Alabama".into(), "Alaska".into(), "Arizona".into()],
            counts: vec![
                (
                    "Alabama".into(),
                    vec![
                        CategoryCount::new("Adult Drug", 3),
                        CategoryCount::new("Veterans Treatment", 2),
                    ],
                ),
                ("Alaska".into(), vec![CategoryCount::new("Adult Drug", 1)]),
                ("Guam".into(), vec![CategoryCount::new("Adult Drug", 4)]),
            ],
            program_types: vec!["Adult Drug".into(), "Veterans Treatment".into()],
            ..RawMetrics::default()
        }
    }

    #[test]
    fn ordered_union_canonical_first_then_counts_only() {
        let rows = aggregate(&metrics());
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Alabama", "Alaska", "Arizona", "Guam"]);
    }

    #[test]
    fn totals_are_sums_and_entry_order_is_source_order() {
        let rows = aggregate(&metrics());
        assert_eq!(rows[0].total, 5);
        assert_eq!(rows[0].entries[0].category, "Adult Drug");
        assert_eq!(rows[0].entries[1].category, "Veterans Treatment");
        assert_eq!(rows[3].total, 4);
    }

    #[test]
    fn state_without_counts_yields_empty_available_false() {
        let rows = aggregate(&metrics());
        let arizona = &rows[2];
        assert_eq!(arizona.title, "Arizona");
        assert!(arizona.entries.is_empty());
        assert_eq!(arizona.total, 0);
        assert!(!arizona.data_available);
    }

    #[test]
    fn duplicate_canonical_entries_collapse() {
        let mut m = metrics();
        m.states.push("Alabama".into());
        let rows = aggregate(&m);
        assert_eq!(rows.iter().filter(|r| r.title == "Alabama").count(), 1);
    }

    #[test]
    fn no_canonical_list_falls_back_to_counts_order() {
        let mut m = metrics();
        m.states.clear();
        let titles: Vec<String> = aggregate(&m).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Alabama", "Alaska", "Guam"]);
    }
}
