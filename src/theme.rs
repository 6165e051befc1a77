use ratatui::style::{Color, Modifier, Style};

// Centralized theme colors for the dashboard editor.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn accent() -> Color {
    Color::Rgb(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2)
}

// Widget frames
pub fn widget_border() -> Color {
    Color::DarkGray
}
pub fn widget_border_hovered() -> Color {
    Color::Gray
}
pub fn widget_border_selected() -> Color {
    accent()
}
pub fn widget_border_editing() -> Color {
    Color::Blue
}
pub fn widget_title() -> Color {
    Color::White
}
pub fn widget_muted() -> Color {
    Color::DarkGray
}
pub fn widget_error() -> Color {
    Color::Red
}

// Status bar
pub fn status_bg() -> Color {
    Color::DarkGray
}
pub fn status_fg() -> Color {
    Color::White
}
pub fn status_edit_bg() -> Color {
    Color::Blue
}

/// Border style for a widget frame given its interaction state. Selection
/// wins over hover; edit mode only changes the idle color.
pub fn border_style(selected: bool, hovered: bool, editing: bool) -> Style {
    if selected {
        Style::default()
            .fg(widget_border_selected())
            .add_modifier(Modifier::BOLD)
    } else if hovered {
        Style::default().fg(widget_border_hovered())
    } else if editing {
        Style::default().fg(widget_border_editing())
    } else {
        Style::default().fg(widget_border())
    }
}
