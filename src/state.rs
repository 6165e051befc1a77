//! Layout state store.
//!
//! [`DashboardState`] holds the active layout and the transient UI flags.
//! All mutation goes through [`apply`] (in place) or [`reduce`] (pure), keyed
//! by [`LayoutAction`]; both are total and synchronous. [`LayoutStore`] wraps
//! the reducer with a clock and is the single dispatch channel at runtime.

use chrono::{DateTime, Utc};

use crate::actions::LayoutAction;
use crate::layout::DashboardLayout;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub layout: DashboardLayout,
    pub is_editing: bool,
    pub selected_widget: Option<String>,
    pub hovered_widget: Option<String>,
    pub is_dragging: bool,
    pub is_resizing: bool,
}

impl DashboardState {
    pub fn new(layout: DashboardLayout) -> Self {
        Self {
            layout,
            is_editing: false,
            selected_widget: None,
            hovered_widget: None,
            is_dragging: false,
            is_resizing: false,
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_widget.as_deref() == Some(id)
    }

    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered_widget.as_deref() == Some(id)
    }
}

/// Apply `action` to `state` in place. Returns whether the layout changed.
///
/// Updating or removing an id that is not in the layout changes nothing,
/// not even `updated_at`.
pub fn apply(state: &mut DashboardState, action: LayoutAction, now: DateTime<Utc>) -> bool {
    match action {
        LayoutAction::SetLayout(layout) => {
            let changed = state.layout != layout;
            state.layout = layout;
            changed
        }
        LayoutAction::ToggleEditMode => {
            state.is_editing = !state.is_editing;
            false
        }
        LayoutAction::SelectWidget(id) => {
            state.selected_widget = id;
            false
        }
        LayoutAction::HoverWidget(id) => {
            state.hovered_widget = id;
            false
        }
        LayoutAction::SetDragging(on) => {
            state.is_dragging = on;
            false
        }
        LayoutAction::SetResizing(on) => {
            state.is_resizing = on;
            false
        }
        LayoutAction::UpdateWidget(widget) => {
            let Some(slot) = state.layout.widgets.iter_mut().find(|w| w.id == widget.id) else {
                return false;
            };
            *slot = widget;
            state.layout.touch(now);
            true
        }
        LayoutAction::AddWidget(widget) => {
            state.layout.widgets.push(widget);
            state.layout.touch(now);
            true
        }
        LayoutAction::RemoveWidget(id) => {
            let before = state.layout.widgets.len();
            state.layout.widgets.retain(|w| w.id != id);
            if state.layout.widgets.len() == before {
                return false;
            }
            state.layout.touch(now);
            if state.selected_widget.as_deref() == Some(id.as_str()) {
                state.selected_widget = None;
            }
            true
        }
        LayoutAction::ResetLayout => {
            let empty = DashboardLayout::empty(now);
            // timestamps aside, an already-empty layout stays as it is
            let changed = state.layout.id != empty.id
                || state.layout.name != empty.name
                || !state.layout.widgets.is_empty();
            if changed {
                state.layout = empty;
            }
            changed
        }
    }
}

/// Pure form of [`apply`].
pub fn reduce(state: &DashboardState, action: LayoutAction, now: DateTime<Utc>) -> DashboardState {
    let mut next = state.clone();
    apply(&mut next, action, now);
    next
}

pub type Clock = fn() -> DateTime<Utc>;

/// Owner of the dashboard state; the only place layouts are mutated.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    state: DashboardState,
    clock: Clock,
}

impl LayoutStore {
    pub fn new(layout: DashboardLayout) -> Self {
        Self::with_clock(layout, Utc::now)
    }

    pub fn with_clock(layout: DashboardLayout, clock: Clock) -> Self {
        Self {
            state: DashboardState::new(layout),
            clock,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn layout(&self) -> &DashboardLayout {
        &self.state.layout
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Apply `action`; returns whether the layout changed.
    pub fn dispatch(&mut self, action: LayoutAction) -> bool {
        tracing::trace!(action = action.name(), "dispatch");
        let now = self.now();
        apply(&mut self.state, action, now)
    }
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(DashboardLayout::empty(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EMPTY_LAYOUT_ID;
    use crate::layout::{WidgetConfig, presets};
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn later() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn state() -> DashboardState {
        DashboardState::new(presets::default_preset(epoch()))
    }

    #[test]
    fn flags_toggle_without_touching_layout() {
        let mut s = state();
        assert!(!apply(&mut s, LayoutAction::ToggleEditMode, later()));
        assert!(s.is_editing);
        apply(&mut s, LayoutAction::SetDragging(true), later());
        apply(&mut s, LayoutAction::SetResizing(true), later());
        apply(&mut s, LayoutAction::HoverWidget(Some("domain-summary".into())), later());
        assert!(s.is_dragging && s.is_resizing);
        assert!(s.is_hovered("domain-summary"));
        apply(&mut s, LayoutAction::HoverWidget(None), later());
        assert_eq!(s.hovered_widget, None);
        assert_eq!(s.layout.updated_at, epoch());
    }

    #[test]
    fn update_replaces_matching_widget_and_bumps_timestamp() {
        let s = state();
        let moved = s.layout.widgets[0].clone().at(0.0, 14.0, 6.0, 4.0);
        let next = reduce(&s, LayoutAction::UpdateWidget(moved.clone()), later());
        assert_eq!(next.layout.widgets[0], moved);
        assert_eq!(next.layout.updated_at, later());
        // the input state is untouched
        assert_eq!(s.layout.widgets[0].y, 0.0);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let s = state();
        let ghost = WidgetConfig::new("ghost", "k", "Ghost");
        let next = reduce(&s, LayoutAction::UpdateWidget(ghost), later());
        assert_eq!(next, s);
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let s = state();
        let extra = WidgetConfig::new("extra", "students-at-risk", "Risco").at(0.0, 14.0, 6.0, 6.0);
        let next = reduce(&s, LayoutAction::AddWidget(extra), later());
        assert_eq!(next.layout.widgets.len(), 5);
        assert_eq!(next.layout.widgets[4].id, "extra");
        assert_eq!(next.layout.updated_at, later());
    }

    #[test]
    fn remove_clears_selection_of_removed_widget() {
        let mut s = state();
        apply(&mut s, LayoutAction::SelectWidget(Some("tier-distribution".into())), later());
        assert!(apply(&mut s, LayoutAction::RemoveWidget("tier-distribution".into()), later()));
        assert_eq!(s.selected_widget, None);
        assert_eq!(s.layout.widgets.len(), 3);

        apply(&mut s, LayoutAction::SelectWidget(Some("domain-summary".into())), later());
        apply(&mut s, LayoutAction::RemoveWidget("assessment-coverage".into()), later());
        assert!(s.is_selected("domain-summary"));
    }

    #[test]
    fn remove_of_unknown_id_keeps_widgets() {
        let s = state();
        let next = reduce(&s, LayoutAction::RemoveWidget("nope".into()), later());
        assert_eq!(next.layout.widgets.len(), s.layout.widgets.len());
        assert_eq!(next.layout.updated_at, epoch());
    }

    #[test]
    fn reset_returns_to_built_in_empty_layout() {
        let mut s = state();
        assert!(apply(&mut s, LayoutAction::ResetLayout, later()));
        assert_eq!(s.layout.id, EMPTY_LAYOUT_ID);
        assert!(s.layout.widgets.is_empty());
        assert_eq!(s.layout.created_at, later());

        // a second reset has nothing to change
        let settled = s.layout.clone();
        let much_later = later() + chrono::Duration::hours(1);
        assert!(!apply(&mut s, LayoutAction::ResetLayout, much_later));
        assert_eq!(s.layout, settled);
    }

    #[test]
    fn set_layout_reports_change_only_when_different() {
        let mut s = state();
        let same = s.layout.clone();
        assert!(!apply(&mut s, LayoutAction::SetLayout(same), later()));
        let other = presets::wide_preset(epoch());
        assert!(apply(&mut s, LayoutAction::SetLayout(other), later()));
        assert_eq!(s.layout.id, "wide");
    }

    #[test]
    fn store_dispatch_uses_injected_clock() {
        let mut store = LayoutStore::with_clock(presets::default_preset(epoch()), later);
        let moved = store.layout().widgets[1].clone().at(6.0, 1.0, 6.0, 4.0);
        assert!(store.dispatch(LayoutAction::UpdateWidget(moved)));
        assert_eq!(store.layout().updated_at, later());
        assert!(!store.dispatch(LayoutAction::ToggleEditMode));
        assert!(store.state().is_editing);
    }
}
