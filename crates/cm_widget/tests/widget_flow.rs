//! End-to-end widget flows: payload text in, renderer-facing views out.

use cm_widget::{
    parse_payload, ClickPolicy, ColorMode, Effects, MapWidget, PopupChange, SortKey, StateId,
    WidgetPolicy,
};

const PAYLOAD: &str = r##"{
    "states": ["Alabama", "Alaska"],
    "counts": {
        "Alabama": { "Adult Drug": 3, "Veterans Treatment": 2 },
        "Alaska": { "Adult Drug": 1 }
    },
    "color_code": {
        "Alabama": { "color": "#0b5d93" },
        "Alaska": { "color": "#205493" },
        "Arizona": { "color": "#0b5d93" }
    },
    "coordinators": {
        "Alabama": { "first_name": "June", "last_name": "Bell", "title": "State Coordinator" }
    },
    "program_types": ["Adult Drug", "Veterans Treatment"]
}"##;

fn widget(policy: WidgetPolicy) -> MapWidget {
    MapWidget::new(parse_payload(PAYLOAD).unwrap(), policy)
}

#[test]
fn sort_and_filter_flow_matches_reference_behavior() {
    let mut w = widget(WidgetPolicy::default());

    // Default view: title asc, unfiltered totals.
    let rows: Vec<(&str, u64)> =
        w.bar_series().iter().map(|s| (s.title.as_str(), s.total)).collect();
    assert_eq!(rows, vec![("Alabama", 5), ("Alaska", 1)]);

    // total asc → [Alaska, Alabama]; flip → [Alabama, Alaska].
    w.on_sort(SortKey::Total);
    let rows: Vec<&str> = w.bar_series().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(rows, vec!["Alaska", "Alabama"]);
    w.on_sort(SortKey::Total);
    let rows: Vec<(&str, u64)> =
        w.bar_series().iter().map(|s| (s.title.as_str(), s.total)).collect();
    assert_eq!(rows, vec![("Alabama", 5), ("Alaska", 1)]);

    // Select a category: totals re-filter, order re-evaluates under the
    // active sort, bar denominators follow.
    let fx = w.on_select_category(Some("Veterans Treatment"));
    assert!(fx.table_dirty);
    let rows: Vec<(&str, u64)> =
        w.bar_series().iter().map(|s| (s.title.as_str(), s.total)).collect();
    assert_eq!(rows, vec![("Alabama", 2), ("Alaska", 0)]);
    assert_eq!(w.max_total(), 2);

    // Clearing the filter restores baseline totals.
    w.on_select_category(None);
    assert_eq!(w.max_total(), 5);
    for s in w.bar_series() {
        assert_eq!(s.total, s.entries.iter().map(|e| e.count).sum::<u64>());
    }
}

#[test]
fn map_and_bar_colors_stay_consistent() {
    let w = widget(WidgetPolicy::default());

    // Bar and bar-legend colors come from one scale.
    assert_eq!(w.color_of("Adult Drug"), "#1f77b4");
    assert_eq!(w.color_of("Veterans Treatment"), "#ff7f0e");
    assert_eq!(w.color_of("Adult Drug"), w.color_of("Adult Drug"));

    // Independent mode: map key is distinct fill colors, first-seen order.
    assert_eq!(w.legend_swatches(), vec!["#0b5d93", "#205493"]);

    // Shared mode: one color space, the category scale.
    let shared = widget(WidgetPolicy::default().with_color(ColorMode::Shared));
    assert_eq!(shared.legend_swatches(), vec!["#1f77b4", "#ff7f0e"]);
}

#[test]
fn popup_flow_hover_lock_and_describe() {
    let mut w = widget(WidgetPolicy::default());
    let alabama = StateId(1);
    let alaska = StateId(2);

    assert_eq!(w.on_hover(alabama), Effects::popup_show("Alabama"));
    let d = w.description_for_id(alabama).unwrap();
    assert_eq!(d.total, 5);
    assert_eq!(d.contact.as_ref().unwrap().last_name.as_deref(), Some("Bell"));

    // Alaska has counts but no coordinator: counts shown, contact omitted.
    let d = w.description("Alaska");
    assert_eq!(d.contact, None);
    assert_eq!(d.total, 1);
    assert!(d.data_available);

    // Arizona is colored on the map but has no data at all.
    let d = w.description("Arizona");
    assert_eq!(d.total, 0);
    assert!(!d.data_available);
    assert_eq!(w.map_fill_for("Arizona"), Some("#0b5d93"));

    // Lock pins the popup; hover elsewhere no longer updates it.
    w.on_click_state(alabama);
    assert!(w.on_hover(alaska).is_none());

    // Toggle policy: next click releases and hides.
    match w.on_click_state(alaska).popup {
        PopupChange::Hide => {}
        other => panic!("expected Hide, got {other:?}"),
    }
}

#[test]
fn lock_until_clear_needs_the_clear_button() {
    let mut w = widget(WidgetPolicy::default().with_click(ClickPolicy::LockUntilClear));
    w.on_click_state(StateId(1));
    assert!(w.on_click_state(StateId(2)).is_none());
    assert!(w.on_hover(StateId(2)).is_none());
    assert_eq!(w.clear_selection(), Effects::popup_hide());
    assert_eq!(w.on_hover(StateId(2)), Effects::popup_show("Alaska"));
}
