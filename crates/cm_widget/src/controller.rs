//! The widget controller: one instance per session.

use log::{debug, warn};

use cm_core::{
    Description, DerivedSeries, FilterState, RawMetrics, SortDirection, SortKey, StateDirectory,
    StateId, WidgetPolicy, ClickPolicy, ColorMode,
};
use cm_view::{aggregate, color, describe, filter_sort, CategoryScale, FilteredView};

use crate::effects::Effects;

/// Map-side selection machine.
///
/// `Locked` pins the popup to one state; whether a further click releases
/// the lock is `ClickPolicy`. The bar-side machine is
/// `FilterState::selected_category`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapSelection {
    #[default]
    Idle,
    Hovering(StateId),
    Locked(StateId),
}

/// Controller owning the session state and the derived view.
///
/// All methods are synchronous and cheap (full recompute over ≤60 rows);
/// accessors borrow the current view, event sinks mutate and return
/// [`Effects`].
pub struct MapWidget {
    metrics: RawMetrics,
    directory: StateDirectory,
    policy: WidgetPolicy,

    filter: FilterState,
    selection: MapSelection,

    baseline: Vec<DerivedSeries>,
    view: FilteredView,
    scale: CategoryScale,
    fill_swatches: Vec<String>,
}

impl MapWidget {
    /// Build a widget over one payload snapshot with the builtin US
    /// directory. Logs (never fails on) totals that disagree with the
    /// derived sums.
    pub fn new(metrics: RawMetrics, policy: WidgetPolicy) -> Self {
        Self::with_directory(metrics, StateDirectory::builtin_us(), policy)
    }

    pub fn with_directory(
        metrics: RawMetrics,
        directory: StateDirectory,
        policy: WidgetPolicy,
    ) -> Self {
        for m in cm_io::totals_mismatches(&metrics) {
            warn!(
                "payload total for {} is {}, derived sum is {}; using derived",
                m.state, m.provided, m.derived
            );
        }

        let baseline = aggregate(&metrics);
        let filter = FilterState::new();
        let view = filter_sort::apply(&baseline, &filter, &metrics.program_types);
        let scale = CategoryScale::new(&metrics.program_types, None);
        let fill_swatches = color::fill_legend_swatches(&metrics.color_code);

        Self {
            metrics,
            directory,
            policy,
            filter,
            selection: MapSelection::Idle,
            baseline,
            view,
            scale,
            fill_swatches,
        }
    }

    /// Replace the category scale with a server-provided legend
    /// (`chart_colors` in the payload family that ships one).
    pub fn with_chart_colors(mut self, colors: Vec<String>) -> Self {
        self.scale = CategoryScale::new(&self.metrics.program_types, Some(colors.as_slice()));
        self
    }

    /* ------------------------------ accessors ------------------------------ */

    /// Map fill for a state name; `None` means "no pre-assigned fill" and
    /// the renderer falls back to [`cm_view::NEUTRAL_COLOR`].
    pub fn map_fill_for(&self, state: &str) -> Option<&str> {
        self.metrics.fill_color_for(state)
    }

    /// Map fill by topology feature id. Unresolvable ids are skipped by the
    /// renderer; they never abort the map.
    pub fn map_fill_for_id(&self, id: StateId) -> Option<&str> {
        self.map_fill_for(self.resolve(id)?)
    }

    /// Legend swatches under the active [`ColorMode`]: distinct payload fill
    /// colors (independent) or the category scale (shared).
    pub fn legend_swatches(&self) -> Vec<&str> {
        match self.policy.color {
            ColorMode::Independent => self.fill_swatches.iter().map(String::as_str).collect(),
            ColorMode::Shared => self.scale.swatches(),
        }
    }

    /// The current table view model, post filter/sort.
    pub fn bar_series(&self) -> &[DerivedSeries] {
        &self.view.series
    }

    /// Bar-width denominator for the current view.
    pub fn max_total(&self) -> u64 {
        self.view.max_total
    }

    /// Bar color for a category (same table the bar legend uses).
    pub fn color_of(&self, category: &str) -> &str {
        self.scale.color_of(category)
    }

    /// Popup content for a state name.
    pub fn description(&self, state: &str) -> Description {
        describe(state, &self.metrics)
    }

    /// Popup content by feature id; `None` for unresolvable ids.
    pub fn description_for_id(&self, id: StateId) -> Option<Description> {
        Some(self.description(self.resolve(id)?))
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selection(&self) -> MapSelection {
        self.selection
    }

    pub fn directory(&self) -> &StateDirectory {
        &self.directory
    }

    pub fn link(&self) -> Option<&str> {
        self.metrics.link.as_deref()
    }

    /* ------------------------------ event sinks ------------------------------ */

    /// Pointer entered a state. Ignored while locked.
    pub fn on_hover(&mut self, id: StateId) -> Effects {
        if matches!(self.selection, MapSelection::Locked(_)) {
            return Effects::none();
        }
        let Some(state) = self.resolve(id) else { return Effects::none() };
        let state = state.to_string();
        self.selection = MapSelection::Hovering(id);
        Effects::popup_show(state)
    }

    /// Pointer left a state. Only clears a hover on that same state, so a
    /// late mouseout after the pointer moved on is harmless.
    pub fn on_mouse_out(&mut self, id: StateId) -> Effects {
        match self.selection {
            MapSelection::Hovering(current) if current == id => {
                self.selection = MapSelection::Idle;
                Effects::popup_hide()
            }
            _ => Effects::none(),
        }
    }

    /// Click on a state: lock, or release per [`ClickPolicy`].
    pub fn on_click_state(&mut self, id: StateId) -> Effects {
        match self.selection {
            MapSelection::Locked(_) => match self.policy.click {
                ClickPolicy::ToggleSelect => {
                    self.selection = MapSelection::Idle;
                    Effects::popup_hide()
                }
                ClickPolicy::LockUntilClear => Effects::none(),
            },
            _ => {
                let Some(state) = self.resolve(id) else { return Effects::none() };
                let state = state.to_string();
                self.selection = MapSelection::Locked(id);
                Effects::popup_show(state)
            }
        }
    }

    /// Explicit unlock (the "clear selection" button).
    pub fn clear_selection(&mut self) -> Effects {
        match self.selection {
            MapSelection::Idle => Effects::none(),
            _ => {
                self.selection = MapSelection::Idle;
                Effects::popup_hide()
            }
        }
    }

    /// Select a category filter (`None` clears). Idempotent re-selects do
    /// not recompute.
    pub fn on_select_category(&mut self, category: Option<&str>) -> Effects {
        let changed = match category {
            Some(c) => self.filter.select_category(c),
            None => self.filter.clear_category(),
        };
        if !changed {
            return Effects::none();
        }
        self.recompute();
        Effects::table()
    }

    /// Sort-link click: same key flips direction, a different key restarts
    /// ascending.
    pub fn on_sort(&mut self, key: SortKey) -> Effects {
        if self.filter.sort_key == key {
            self.filter.sort_direction = self.filter.sort_direction.flipped();
        } else {
            self.filter.sort_key = key;
            self.filter.sort_direction = SortDirection::default();
        }
        self.recompute();
        Effects::table()
    }

    /* ------------------------------ internals ------------------------------ */

    fn recompute(&mut self) {
        self.view = filter_sort::apply(&self.baseline, &self.filter, &self.metrics.program_types);
        if let Some(unknown) = &self.view.unknown_category {
            warn!("selected category {unknown:?} is not in program_types; view is empty");
        }
    }

    fn resolve(&self, id: StateId) -> Option<&str> {
        let name = self.directory.resolve(id);
        if name.is_none() {
            debug!("geography id {id} has no name mapping; skipping");
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::CategoryCount;

    fn widget(policy: WidgetPolicy) -> MapWidget {
        let metrics = RawMetrics {
            states: vec!["Alabama".into(), "Alaska".into()],
            counts: vec![
                (
                    "Alabama".into(),
                    vec![
                        CategoryCount::new("Adult Drug", 3),
                        CategoryCount::new("Veterans Treatment", 2),
                    ],
                ),
                ("Alaska".into(), vec![CategoryCount::new("Adult Drug", 1)]),
            ],
            program_types: vec!["Adult Drug".into(), "Veterans Treatment".into()],
            ..RawMetrics::default()
        };
        MapWidget::new(metrics, policy)
    }

    const ALABAMA: StateId = StateId(1);
    const ALASKA: StateId = StateId(2);

    #[test]
    fn hover_then_mouseout_round_trip() {
        let mut w = widget(WidgetPolicy::default());
        assert_eq!(w.on_hover(ALABAMA), Effects::popup_show("Alabama"));
        assert_eq!(w.selection(), MapSelection::Hovering(ALABAMA));
        assert_eq!(w.on_mouse_out(ALABAMA), Effects::popup_hide());
        assert_eq!(w.selection(), MapSelection::Idle);
    }

    #[test]
    fn stale_mouseout_for_another_state_is_ignored() {
        let mut w = widget(WidgetPolicy::default());
        w.on_hover(ALABAMA);
        w.on_hover(ALASKA);
        assert!(w.on_mouse_out(ALABAMA).is_none());
        assert_eq!(w.selection(), MapSelection::Hovering(ALASKA));
    }

    #[test]
    fn lock_suppresses_hover_and_mouseout() {
        let mut w = widget(WidgetPolicy::default());
        w.on_click_state(ALABAMA);
        assert_eq!(w.selection(), MapSelection::Locked(ALABAMA));
        assert!(w.on_hover(ALASKA).is_none());
        assert!(w.on_mouse_out(ALABAMA).is_none());
        assert_eq!(w.selection(), MapSelection::Locked(ALABAMA));
    }

    #[test]
    fn toggle_select_releases_on_second_click() {
        let mut w = widget(WidgetPolicy::default());
        w.on_click_state(ALABAMA);
        assert_eq!(w.on_click_state(ALASKA), Effects::popup_hide());
        assert_eq!(w.selection(), MapSelection::Idle);
    }

    #[test]
    fn lock_until_clear_ignores_clicks_until_cleared() {
        let mut w = widget(WidgetPolicy::default().with_click(ClickPolicy::LockUntilClear));
        w.on_click_state(ALABAMA);
        assert!(w.on_click_state(ALASKA).is_none());
        assert_eq!(w.selection(), MapSelection::Locked(ALABAMA));
        assert_eq!(w.clear_selection(), Effects::popup_hide());
        assert_eq!(w.selection(), MapSelection::Idle);
    }

    #[test]
    fn unresolved_id_is_skipped_everywhere() {
        let mut w = widget(WidgetPolicy::default());
        let bogus = StateId(3); // unassigned FIPS code
        assert!(w.on_hover(bogus).is_none());
        assert!(w.on_click_state(bogus).is_none());
        assert_eq!(w.map_fill_for_id(bogus), None);
        assert!(w.description_for_id(bogus).is_none());
    }

    #[test]
    fn same_sort_link_flips_direction() {
        let mut w = widget(WidgetPolicy::default());
        assert_eq!(w.filter().sort_direction, SortDirection::Asc);
        w.on_sort(SortKey::Title);
        assert_eq!(w.filter().sort_direction, SortDirection::Desc);
        w.on_sort(SortKey::Title);
        assert_eq!(w.filter().sort_direction, SortDirection::Asc);
    }

    #[test]
    fn switching_columns_restarts_ascending() {
        let mut w = widget(WidgetPolicy::default());
        w.on_sort(SortKey::Total); // switch away from the title default
        assert_eq!(w.filter().sort_direction, SortDirection::Asc);
        w.on_sort(SortKey::Total); // flip to desc
        assert_eq!(w.filter().sort_direction, SortDirection::Desc);
        w.on_sort(SortKey::Title);
        assert_eq!(w.filter().sort_key, SortKey::Title);
        assert_eq!(w.filter().sort_direction, SortDirection::Asc);
        // Revisiting a column starts over at asc; desc is not remembered.
        w.on_sort(SortKey::Total);
        assert_eq!(w.filter().sort_key, SortKey::Total);
        assert_eq!(w.filter().sort_direction, SortDirection::Asc);
    }

    #[test]
    fn idempotent_category_select_does_not_dirty_table() {
        let mut w = widget(WidgetPolicy::default());
        assert!(w.on_select_category(Some("Adult Drug")).table_dirty);
        assert!(w.on_select_category(Some("Adult Drug")).is_none());
        assert!(w.on_select_category(Some("Veterans Treatment")).table_dirty);
        assert!(w.on_select_category(None).table_dirty);
        assert!(w.on_select_category(None).is_none());
    }

    #[test]
    fn category_change_emits_animation_hint() {
        let mut w = widget(WidgetPolicy::default());
        let fx = w.on_select_category(Some("Adult Drug"));
        assert_eq!(fx.delay_hint_ms, Some(crate::BAR_ANIMATION_MS));
    }
}
