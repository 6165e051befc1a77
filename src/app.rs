//! Interactive terminal editor for a dashboard layout.
//!
//! Keyboard and mouse input are translated into customizer calls; every
//! geometry change goes through [`DashboardCustomizer::update_widget`] framed
//! by the dragging/resizing flags, the same way a pointer-driven grid would
//! report it.

use std::collections::HashMap;
use std::time::Instant;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::components::{
    Component, ComponentContext, HelpOverlay, StatusBar, WidgetHost,
};
use crate::customization::DashboardCustomizer;
use crate::event_loop::ControlFlow;
use crate::grid::GridGeometry;
use crate::keybindings::{Action, KeyBindings};
use crate::layout::WidgetConfig;
use crate::layout::presets::PRESET_IDS;
use crate::persistence::StorageBackend;
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    /// Pointer offset from the widget origin, in grid units.
    Move { grab_x: f64, grab_y: f64 },
    Resize,
}

#[derive(Debug, Clone, PartialEq)]
struct DragState {
    id: String,
    mode: DragMode,
}

pub struct DashboardApp<S: StorageBackend> {
    customizer: DashboardCustomizer<S>,
    bindings: KeyBindings,
    help: HelpOverlay,
    status: StatusBar,
    hosts: HashMap<String, WidgetHost>,
    columns: u16,
    row_height: u16,
    grid_area: Rect,
    drag: Option<DragState>,
    add_cursor: usize,
    preset_cursor: usize,
    message: Option<String>,
}

impl<S: StorageBackend> DashboardApp<S> {
    pub fn new(customizer: DashboardCustomizer<S>, columns: u16, row_height: u16) -> Self {
        let bindings = KeyBindings::default();
        let help = HelpOverlay::new(&bindings);
        Self {
            customizer,
            bindings,
            help,
            status: StatusBar::new(),
            hosts: HashMap::new(),
            columns: columns.max(1),
            row_height: row_height.max(1),
            grid_area: Rect::default(),
            drag: None,
            add_cursor: 0,
            preset_cursor: 0,
            message: None,
        }
    }

    pub fn customizer(&self) -> &DashboardCustomizer<S> {
        &self.customizer
    }

    pub fn customizer_mut(&mut self) -> &mut DashboardCustomizer<S> {
        &mut self.customizer
    }

    pub fn into_customizer(self) -> DashboardCustomizer<S> {
        self.customizer
    }

    pub fn help_visible(&self) -> bool {
        self.help.visible()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Host for a widget id, for embedding apps that feed payloads or status.
    pub fn host_mut(&mut self, id: &str) -> Option<&mut WidgetHost> {
        self.sync_hosts();
        self.hosts.get_mut(id)
    }

    /// Area the grid was last drawn into. Rendering sets this; tests that
    /// drive the mouse without rendering set it directly.
    pub fn set_grid_area(&mut self, area: Rect) {
        self.grid_area = area;
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.grid_area, self.columns, self.row_height)
    }

    pub fn tick(&mut self, now: Instant) {
        self.customizer.tick(now);
    }

    /// Write anything still pending before the process exits.
    pub fn shutdown(&mut self) {
        self.customizer.flush();
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        if self.help.visible() {
            self.help.handle_event(event, &ComponentContext::new());
            return ControlFlow::Continue;
        }
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        match self.bindings.action_for_key(key) {
            Some(action) => self.run_action(action),
            None => ControlFlow::Continue,
        }
    }

    pub fn run_action(&mut self, action: Action) -> ControlFlow {
        tracing::trace!(%action, "editor action");
        self.message = None;
        let editing = self.customizer.is_editing();
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::ToggleHelp => self.help.toggle(),
            Action::ToggleEdit => self.customizer.toggle_edit_mode(),
            Action::SelectNext => self.cycle_selection(1),
            Action::SelectPrev => self.cycle_selection(-1),
            Action::Deselect => self.customizer.select_widget(None),
            Action::Save => {
                self.customizer.handle_layout_save();
                self.message = Some("Layout salvo".to_string());
            }
            Action::Reset => self.customizer.reset_layout(),
            Action::ClearStorage => {
                self.customizer.clear_saved_layout();
                self.message = Some("Layout salvo removido".to_string());
            }
            Action::CyclePreset => {
                self.preset_cursor = (self.preset_cursor + 1) % PRESET_IDS.len();
                self.customizer.apply_preset(PRESET_IDS[self.preset_cursor]);
            }
            _ if !editing => {
                self.message = Some("Pressione E para editar".to_string());
            }
            Action::MoveLeft => self.nudge(-1.0, 0.0),
            Action::MoveRight => self.nudge(1.0, 0.0),
            Action::MoveUp => self.nudge(0.0, -1.0),
            Action::MoveDown => self.nudge(0.0, 1.0),
            Action::GrowWidth => self.resize_by(1.0, 0.0),
            Action::ShrinkWidth => self.resize_by(-1.0, 0.0),
            Action::GrowHeight => self.resize_by(0.0, 1.0),
            Action::ShrinkHeight => self.resize_by(0.0, -1.0),
            Action::AddWidget => self.add_next_kind(),
            Action::RemoveWidget => {
                if let Some(id) = self.customizer.state().selected_widget.clone() {
                    self.customizer.remove_widget(&id);
                }
            }
            Action::Compact => {
                self.customizer.compact();
            }
            Action::Optimize => {
                self.customizer.optimize();
            }
        }
        ControlFlow::Continue
    }

    fn selected(&self) -> Option<WidgetConfig> {
        let state = self.customizer.state();
        let id = state.selected_widget.as_deref()?;
        state.layout.widget(id).cloned()
    }

    fn cycle_selection(&mut self, step: isize) {
        let widgets = &self.customizer.layout().widgets;
        if widgets.is_empty() {
            return;
        }
        let len = widgets.len() as isize;
        let current = self
            .customizer
            .state()
            .selected_widget
            .as_deref()
            .and_then(|id| widgets.iter().position(|w| w.id == id));
        let next = match current {
            Some(i) => (i as isize + step).rem_euclid(len),
            None if step >= 0 => 0,
            None => len - 1,
        };
        let id = widgets[next as usize].id.clone();
        self.customizer.select_widget(Some(id));
    }

    fn max_x(&self, widget: &WidgetConfig) -> f64 {
        (f64::from(self.columns) - widget.w).max(0.0)
    }

    fn nudge(&mut self, dx: f64, dy: f64) {
        let Some(mut widget) = self.selected() else {
            return;
        };
        widget.x = (widget.x + dx).clamp(0.0, self.max_x(&widget));
        widget.y = (widget.y + dy).max(0.0);
        self.customizer.set_dragging(true);
        self.customizer.update_widget(widget);
        self.customizer.set_dragging(false);
    }

    fn resize_by(&mut self, dw: f64, dh: f64) {
        let Some(mut widget) = self.selected() else {
            return;
        };
        let (w, h) = widget.clamp_size(widget.w + dw, widget.h + dh);
        widget.w = w.min(f64::from(self.columns) - widget.x).max(1.0);
        widget.h = h;
        self.customizer.set_resizing(true);
        self.customizer.update_widget(widget);
        self.customizer.set_resizing(false);
    }

    fn add_next_kind(&mut self) {
        let kinds: Vec<String> = self
            .customizer
            .registry()
            .kinds()
            .into_iter()
            .map(str::to_string)
            .collect();
        if kinds.is_empty() {
            return;
        }
        let kind = &kinds[self.add_cursor % kinds.len()];
        self.add_cursor += 1;
        if let Some(id) = self.customizer.add_widget_of_type(kind) {
            self.customizer.select_widget(Some(id));
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let geometry = self.geometry();
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                let state = self.customizer.state();
                let hit = geometry
                    .widget_at(&state.layout.widgets, col, row)
                    .map(|w| w.id.clone());
                if hit != state.hovered_widget {
                    self.customizer.hover_widget(hit);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = geometry
                    .widget_at(&self.customizer.layout().widgets, col, row)
                    .cloned();
                self.customizer.select_widget(hit.as_ref().map(|w| w.id.clone()));
                let Some(widget) = hit else {
                    return;
                };
                if !self.customizer.is_editing() {
                    return;
                }
                let mode = if geometry.is_resize_handle(&widget, col, row) {
                    self.customizer.set_resizing(true);
                    DragMode::Resize
                } else {
                    let (gx, gy) = geometry.to_grid(col, row);
                    self.customizer.set_dragging(true);
                    DragMode::Move {
                        grab_x: gx - widget.x,
                        grab_y: gy - widget.y,
                    }
                };
                self.drag = Some(DragState {
                    id: widget.id,
                    mode,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(drag) = self.drag.clone() else {
                    return;
                };
                let Some(mut widget) = self.customizer.layout().widget(&drag.id).cloned() else {
                    self.drag = None;
                    return;
                };
                match drag.mode {
                    DragMode::Move { grab_x, grab_y } => {
                        let (gx, gy) = geometry.to_grid(col, row);
                        widget.x = (gx - grab_x).clamp(0.0, self.max_x(&widget));
                        widget.y = (gy - grab_y).max(0.0);
                    }
                    DragMode::Resize => {
                        // the pointer cell becomes the last cell of the widget
                        let (gx, gy) =
                            geometry.to_grid(col.saturating_add(1), row.saturating_add(1));
                        let (w, h) = widget.clamp_size(gx - widget.x, gy - widget.y);
                        widget.w = w.min(f64::from(self.columns) - widget.x).max(1.0);
                        widget.h = h;
                    }
                }
                self.customizer.update_widget(widget);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.take() else {
                    return;
                };
                match drag.mode {
                    DragMode::Move { .. } => self.customizer.set_dragging(false),
                    DragMode::Resize => self.customizer.set_resizing(false),
                }
                self.customizer.optimize();
            }
            _ => {}
        }
    }

    fn sync_hosts(&mut self) {
        let widgets = &self.customizer.layout().widgets;
        self.hosts.retain(|id, _| widgets.iter().any(|w| &w.id == id));
        for widget in widgets {
            self.hosts
                .entry(widget.id.clone())
                .and_modify(|host| host.set_widget(widget.clone()))
                .or_insert_with(|| WidgetHost::new(widget.clone()));
        }
    }

    fn update_status(&mut self) {
        let state = self.customizer.state();
        let mode = if state.is_editing { "EDITAR" } else { "VER" };
        let mut left = format!(" {mode}  {}", state.layout.name);
        if let Some(id) = &state.selected_widget {
            left.push_str(&format!("  [{id}]"));
        }
        let right = match &self.message {
            Some(message) => format!("{message} "),
            None => format!("{} widgets  ? ajuda ", state.layout.widgets.len()),
        };
        self.status.set_left(left);
        self.status.set_right(right);
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let grid_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        let status_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        self.grid_area = grid_area;
        self.sync_hosts();
        self.update_status();

        let geometry = self.geometry();
        let state = self.customizer.state();
        for widget in &state.layout.widgets {
            let Some(rect) = geometry.to_cells(widget) else {
                continue;
            };
            let Some(host) = self.hosts.get_mut(&widget.id) else {
                continue;
            };
            let ctx = ComponentContext::new()
                .with_selected(state.is_selected(&widget.id))
                .with_hovered(state.is_hovered(&widget.id))
                .with_editing(state.is_editing);
            host.render(frame, rect, &ctx);
        }

        let ctx = ComponentContext::new().with_editing(state.is_editing);
        self.status.render(frame, status_area, &ctx);
        self.help.render(frame, area, &ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GRID_COLUMNS, ROW_HEIGHT, STORAGE_KEY};
    use crate::customization::CustomizationOptions;
    use crate::layout::presets;
    use crate::persistence::{LayoutPersistence, MemoryStorage};
    use chrono::Utc;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::buffer::Buffer;

    fn app() -> DashboardApp<MemoryStorage> {
        let customizer = DashboardCustomizer::new(
            LayoutPersistence::new(MemoryStorage::new()),
            CustomizationOptions::new().with_default_layout(presets::default_preset(Utc::now())),
        );
        let mut app = DashboardApp::new(customizer, GRID_COLUMNS, ROW_HEIGHT);
        app.set_grid_area(Rect::new(0, 0, 120, 40));
        app
    }

    fn key(code: KeyCode, mods: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, mods))
    }

    fn press(app: &mut DashboardApp<MemoryStorage>, code: KeyCode) -> ControlFlow {
        app.handle_event(&key(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn widget<'a>(app: &'a DashboardApp<MemoryStorage>, id: &str) -> &'a WidgetConfig {
        app.customizer().layout().widget(id).unwrap()
    }

    #[test]
    fn edits_require_edit_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        assert_eq!(widget(&app, "tier-distribution").x, 0.0);
        assert!(app.message().is_some());

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Down);
        assert_eq!(widget(&app, "tier-distribution").y, 1.0);
        assert!(!app.customizer().state().is_dragging);
        assert!(app.customizer().persistence().storage().raw(STORAGE_KEY).is_some());
    }

    #[test]
    fn nudges_are_clamped_to_the_grid() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(
            app.customizer().state().selected_widget.as_deref(),
            Some("progress-monitoring")
        );
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Up);
        let w = widget(&app, "progress-monitoring");
        assert_eq!((w.x, w.y), (0.0, 7.0));
    }

    #[test]
    fn resize_respects_bounds_and_grid_width() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab);
        for _ in 0..10 {
            app.handle_event(&key(KeyCode::Right, KeyModifiers::SHIFT));
        }
        assert_eq!(widget(&app, "tier-distribution").w, 12.0);
        for _ in 0..20 {
            app.handle_event(&key(KeyCode::Up, KeyModifiers::SHIFT));
        }
        let w = widget(&app, "tier-distribution");
        assert_eq!(w.h, w.min_h.unwrap_or(1.0));
        assert!(!app.customizer().state().is_resizing);
    }

    #[test]
    fn add_and_remove_widgets() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('a'));
        let added = app.customizer().state().selected_widget.clone().unwrap();
        assert_eq!(app.customizer().layout().widgets.len(), 5);
        assert_eq!(widget(&app, &added).y, 14.0);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.customizer().layout().widgets.len(), 4);
        assert_eq!(app.customizer().state().selected_widget, None);
    }

    #[test]
    fn mouse_drag_moves_with_fractional_coordinates_then_snaps() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        // grab domain-summary (x 60..120, y 0..8) one cell in
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 61, 1));
        assert!(app.customizer().state().is_dragging);
        assert_eq!(
            app.customizer().state().selected_widget.as_deref(),
            Some("domain-summary")
        );

        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 56, 30));
        let w = widget(&app, "domain-summary");
        assert_eq!(w.x, 5.5);
        assert_eq!(w.y, 14.5);

        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 56, 30));
        let w = widget(&app, "domain-summary");
        assert_eq!((w.x, w.y), (6.0, 15.0));
        assert!(!app.customizer().state().is_dragging);
    }

    #[test]
    fn mouse_resize_from_corner() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 59, 7));
        assert!(app.customizer().state().is_resizing);
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 39, 11));
        let w = widget(&app, "tier-distribution");
        assert_eq!((w.w, w.h), (4.0, 6.0));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 39, 11));
        assert!(!app.customizer().state().is_resizing);
    }

    #[test]
    fn hover_and_click_outside_edit_mode_only_select() {
        let mut app = app();
        app.handle_event(&mouse(MouseEventKind::Moved, 10, 20));
        assert_eq!(
            app.customizer().state().hovered_widget.as_deref(),
            Some("progress-monitoring")
        );
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 20));
        assert!(!app.customizer().state().is_dragging);
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 110, 39));
        assert_eq!(app.customizer().state().selected_widget, None);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_visible());
        assert_eq!(press(&mut app, KeyCode::Char('e')), ControlFlow::Continue);
        assert!(!app.customizer().is_editing());
        press(&mut app, KeyCode::Esc);
        assert!(!app.help_visible());
        assert_eq!(press(&mut app, KeyCode::Char('q')), ControlFlow::Quit);
    }

    #[test]
    fn render_draws_every_widget_and_the_status_bar() {
        let mut app = app();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        app.render(&mut UiFrame::from_parts(area, &mut buf));
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        for w in &app.customizer().layout().widgets {
            assert!(text.contains(&w.title), "missing {}", w.title);
        }
        let status: String = (0..120).map(|x| buf[(x, 29)].symbol().to_string()).collect();
        assert!(status.contains("VER"));
        assert!(status.contains("4 widgets"));
    }
}
