//! Shared component rendering context
//!
//! `ComponentContext` carries the interaction state a widget frame needs
//! while rendering and handling events, so the component trait stays stable
//! instead of growing ad-hoc boolean parameters.

/// Context passed to `Component` trait methods describing UI state.
///
/// - `selected`: the component's widget is the selected one.
/// - `hovered`: the pointer is over the component's widget.
/// - `editing`: the dashboard is in edit mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentContext {
    selected: bool,
    hovered: bool,
    editing: bool,
}

impl ComponentContext {
    pub const fn new() -> Self {
        Self {
            selected: false,
            hovered: false,
            editing: false,
        }
    }

    pub const fn selected(&self) -> bool {
        self.selected
    }

    pub const fn hovered(&self) -> bool {
        self.hovered
    }

    pub const fn editing(&self) -> bool {
        self.editing
    }

    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub const fn with_hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    pub const fn with_editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }
}
