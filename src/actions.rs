use std::fmt;

use crate::layout::{DashboardLayout, WidgetConfig};

/// Every mutation the layout store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutAction {
    SetLayout(DashboardLayout),
    ToggleEditMode,
    SelectWidget(Option<String>),
    HoverWidget(Option<String>),
    SetDragging(bool),
    SetResizing(bool),
    UpdateWidget(WidgetConfig),
    AddWidget(WidgetConfig),
    RemoveWidget(String),
    ResetLayout,
}

impl LayoutAction {
    /// Stable tag used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutAction::SetLayout(_) => "SET_LAYOUT",
            LayoutAction::ToggleEditMode => "TOGGLE_EDIT_MODE",
            LayoutAction::SelectWidget(_) => "SELECT_WIDGET",
            LayoutAction::HoverWidget(_) => "HOVER_WIDGET",
            LayoutAction::SetDragging(_) => "SET_DRAGGING",
            LayoutAction::SetResizing(_) => "SET_RESIZING",
            LayoutAction::UpdateWidget(_) => "UPDATE_WIDGET",
            LayoutAction::AddWidget(_) => "ADD_WIDGET",
            LayoutAction::RemoveWidget(_) => "REMOVE_WIDGET",
            LayoutAction::ResetLayout => "RESET_LAYOUT",
        }
    }
}

impl fmt::Display for LayoutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutAction::SetLayout(layout) => write!(f, "Set layout '{}'", layout.id),
            LayoutAction::ToggleEditMode => write!(f, "Toggle edit mode"),
            LayoutAction::SelectWidget(Some(id)) => write!(f, "Select widget '{}'", id),
            LayoutAction::SelectWidget(None) => write!(f, "Clear selection"),
            LayoutAction::HoverWidget(Some(id)) => write!(f, "Hover widget '{}'", id),
            LayoutAction::HoverWidget(None) => write!(f, "Clear hover"),
            LayoutAction::SetDragging(on) => write!(f, "Dragging {}", if *on { "on" } else { "off" }),
            LayoutAction::SetResizing(on) => write!(f, "Resizing {}", if *on { "on" } else { "off" }),
            LayoutAction::UpdateWidget(w) => write!(f, "Update widget '{}'", w.id),
            LayoutAction::AddWidget(w) => write!(f, "Add widget '{}'", w.id),
            LayoutAction::RemoveWidget(id) => write!(f, "Remove widget '{}'", id),
            LayoutAction::ResetLayout => write!(f, "Reset layout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_names() {
        let a = LayoutAction::RemoveWidget("w1".into());
        assert_eq!(a.name(), "REMOVE_WIDGET");
        assert_eq!(a.to_string(), "Remove widget 'w1'");
        assert_eq!(LayoutAction::SelectWidget(None).to_string(), "Clear selection");
        assert_eq!(LayoutAction::SetDragging(true).to_string(), "Dragging on");
    }
}
