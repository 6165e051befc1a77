//! High-level dashboard customization API.
//!
//! [`DashboardCustomizer`] owns the [`LayoutStore`] and a
//! [`LayoutPersistence`] and keeps the two in step: every dispatch that
//! changes the layout is written back to storage (optionally debounced) and
//! reported through `on_layout_change`. None of its methods fail; bad input
//! leaves the state untouched.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::actions::LayoutAction;
use crate::layout::{
    self, DashboardLayout, WidgetConfig, export_layout, import_layout, presets, validate_layout,
};
use crate::persistence::{Debouncer, LayoutPersistence, StorageBackend};
use crate::registry::WidgetRegistry;
use crate::state::{Clock, DashboardState, LayoutStore};

pub type LayoutCallback = Box<dyn FnMut(&DashboardLayout)>;

pub struct CustomizationOptions {
    pub default_layout: Option<DashboardLayout>,
    pub on_layout_change: Option<LayoutCallback>,
    pub on_layout_save: Option<LayoutCallback>,
    /// Coalesce writes that arrive within this window into one.
    pub persist_debounce: Option<Duration>,
    pub registry: WidgetRegistry,
    pub clock: Clock,
}

impl Default for CustomizationOptions {
    fn default() -> Self {
        Self {
            default_layout: None,
            on_layout_change: None,
            on_layout_save: None,
            persist_debounce: None,
            registry: WidgetRegistry::builtin(),
            clock: Utc::now,
        }
    }
}

impl CustomizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_layout(mut self, layout: DashboardLayout) -> Self {
        self.default_layout = Some(layout);
        self
    }

    #[must_use]
    pub fn on_layout_change(mut self, f: impl FnMut(&DashboardLayout) + 'static) -> Self {
        self.on_layout_change = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_layout_save(mut self, f: impl FnMut(&DashboardLayout) + 'static) -> Self {
        self.on_layout_save = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.persist_debounce = Some(delay);
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: WidgetRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

/// Dropping the customizer writes any pending debounced layout.
pub struct DashboardCustomizer<S: StorageBackend> {
    store: LayoutStore,
    persistence: LayoutPersistence<S>,
    debouncer: Option<Debouncer<DashboardLayout>>,
    default_layout: Option<DashboardLayout>,
    on_layout_change: Option<LayoutCallback>,
    on_layout_save: Option<LayoutCallback>,
    registry: WidgetRegistry,
    id_seq: u64,
}

impl<S: StorageBackend> DashboardCustomizer<S> {
    /// Build the customizer and pick the initial layout: a valid stored
    /// layout first, then the caller's default, then the built-in empty one.
    pub fn new(persistence: LayoutPersistence<S>, options: CustomizationOptions) -> Self {
        let CustomizationOptions {
            default_layout,
            on_layout_change,
            on_layout_save,
            persist_debounce,
            registry,
            clock,
        } = options;

        let mut store = LayoutStore::with_clock(DashboardLayout::empty(clock()), clock);
        match persistence.load() {
            Some(saved) if validate_layout(&saved) => {
                tracing::debug!(layout_id = %saved.id, "restored saved layout");
                store.dispatch(LayoutAction::SetLayout(saved));
            }
            _ => {
                if let Some(default) = &default_layout {
                    store.dispatch(LayoutAction::SetLayout(default.clone()));
                }
            }
        }

        Self {
            store,
            persistence,
            debouncer: persist_debounce.map(Debouncer::new),
            default_layout,
            on_layout_change,
            on_layout_save,
            registry,
            id_seq: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        self.store.state()
    }

    pub fn layout(&self) -> &DashboardLayout {
        self.store.layout()
    }

    pub fn is_editing(&self) -> bool {
        self.store.state().is_editing
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn persistence(&self) -> &LayoutPersistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut LayoutPersistence<S> {
        &mut self.persistence
    }

    pub fn has_pending_write(&self) -> bool {
        self.debouncer.as_ref().is_some_and(Debouncer::is_pending)
    }

    /// Route an action through the store, persisting and notifying when the
    /// layout changed.
    pub fn dispatch(&mut self, action: LayoutAction) -> bool {
        let changed = self.store.dispatch(action);
        if changed {
            self.persist_current();
            self.notify_change();
        }
        changed
    }

    pub fn toggle_edit_mode(&mut self) {
        self.dispatch(LayoutAction::ToggleEditMode);
    }

    pub fn select_widget(&mut self, id: Option<String>) {
        self.dispatch(LayoutAction::SelectWidget(id));
    }

    pub fn hover_widget(&mut self, id: Option<String>) {
        self.dispatch(LayoutAction::HoverWidget(id));
    }

    pub fn set_dragging(&mut self, on: bool) {
        self.dispatch(LayoutAction::SetDragging(on));
    }

    pub fn set_resizing(&mut self, on: bool) {
        self.dispatch(LayoutAction::SetResizing(on));
    }

    /// Append `widget`, giving it a fresh id when it has none. Returns the id
    /// the widget was stored under.
    pub fn add_widget(&mut self, mut widget: WidgetConfig) -> String {
        if widget.id.trim().is_empty() {
            widget.id = self.fresh_id();
        }
        let id = widget.id.clone();
        tracing::debug!(widget_id = %id, kind = %widget.kind, "adding widget");
        self.dispatch(LayoutAction::AddWidget(widget));
        id
    }

    /// Instantiate a registered widget type below the current content.
    pub fn add_widget_of_type(&mut self, kind: &str) -> Option<String> {
        let y = layout::next_free_row(&self.layout().widgets);
        let Some(widget) = self.registry.instantiate(kind, 0.0, y) else {
            tracing::warn!(kind, "unknown widget type");
            return None;
        };
        Some(self.add_widget(widget))
    }

    pub fn update_widget(&mut self, widget: WidgetConfig) -> bool {
        self.dispatch(LayoutAction::UpdateWidget(widget))
    }

    pub fn remove_widget(&mut self, id: &str) -> bool {
        self.dispatch(LayoutAction::RemoveWidget(id.to_string()))
    }

    /// Hand the current layout to `on_layout_save` and leave edit mode.
    pub fn handle_layout_save(&mut self) {
        self.flush();
        let layout = self.store.layout().clone();
        if let Some(cb) = self.on_layout_save.as_mut() {
            cb(&layout);
        }
        if self.store.state().is_editing {
            self.dispatch(LayoutAction::ToggleEditMode);
        }
    }

    /// Restore the caller's default, or the built-in empty layout.
    pub fn reset_layout(&mut self) {
        self.dispatch(self.reset_action());
    }

    /// Erase the stored layout and restore the default without writing it
    /// back.
    pub fn clear_saved_layout(&mut self) {
        if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.cancel();
        }
        self.persistence.clear();
        let action = self.reset_action();
        if self.store.dispatch(action) {
            self.notify_change();
        }
    }

    pub fn compact(&mut self) -> bool {
        let compacted = layout::compact_layout(self.layout(), self.store.now());
        self.dispatch(LayoutAction::SetLayout(compacted))
    }

    pub fn optimize(&mut self) -> bool {
        let optimized = layout::optimize_layout(self.layout(), self.store.now());
        self.dispatch(LayoutAction::SetLayout(optimized))
    }

    pub fn apply_preset(&mut self, id: &str) -> bool {
        let Some(preset) = presets::preset(id, self.store.now()) else {
            tracing::warn!(preset = id, "unknown preset");
            return false;
        };
        self.dispatch(LayoutAction::SetLayout(preset))
    }

    /// Replace the layout with one parsed from `json`. Returns `false` and
    /// keeps the current layout when the document is rejected.
    pub fn import_json(&mut self, json: &str) -> bool {
        match import_layout(json, self.store.now()) {
            Some(imported) => {
                self.dispatch(LayoutAction::SetLayout(imported));
                true
            }
            None => false,
        }
    }

    pub fn export_json(&self) -> Option<String> {
        match export_layout(self.layout()) {
            Ok(json) => Some(json),
            Err(err) => {
                tracing::warn!(error = %err, "failed to export layout");
                None
            }
        }
    }

    /// Write a debounced layout whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) {
        let due = self.debouncer.as_mut().and_then(|d| d.poll(now));
        if let Some(layout) = due {
            self.persistence.save(&layout);
        }
    }

    /// Write any pending debounced layout immediately.
    pub fn flush(&mut self) {
        let pending = self.debouncer.as_mut().and_then(Debouncer::flush);
        if let Some(layout) = pending {
            self.persistence.save(&layout);
        }
    }

    fn reset_action(&self) -> LayoutAction {
        match &self.default_layout {
            Some(default) => LayoutAction::SetLayout(default.clone()),
            None => LayoutAction::ResetLayout,
        }
    }

    fn persist_current(&mut self) {
        let layout = self.store.layout().clone();
        match self.debouncer.as_mut() {
            Some(debouncer) => debouncer.schedule(layout, Instant::now()),
            None => self.persistence.save(&layout),
        }
    }

    fn notify_change(&mut self) {
        if let Some(cb) = self.on_layout_change.as_mut() {
            cb(self.store.layout());
        }
    }

    fn fresh_id(&mut self) -> String {
        loop {
            self.id_seq += 1;
            let id = format!(
                "widget-{}-{}",
                self.store.now().timestamp_millis(),
                self.id_seq
            );
            if !self.store.layout().contains(&id) {
                return id;
            }
        }
    }
}

impl<S: StorageBackend> Drop for DashboardCustomizer<S> {
    fn drop(&mut self) {
        self.flush();
    }
}
