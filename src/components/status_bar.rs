use ratatui::layout::Rect;
use ratatui::style::Style;

use super::{Component, ComponentContext};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

/// One-line bar with left- and right-aligned segments.
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            style: Style::default().bg(theme::status_bg()).fg(theme::status_fg()),
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let Some(area) = frame.clip_rect(area) else {
            return;
        };
        let style = if ctx.editing() {
            self.style.bg(theme::status_edit_bg())
        } else {
            self.style
        };
        let width = area.width as usize;
        frame.set_line(area, area.x, area.y, &" ".repeat(width), style);
        frame.set_line(area, area.x, area.y, &self.left, style);

        if !self.right.is_empty() {
            let right = truncate_to_width(&self.right, width);
            let right_width = right.chars().count();
            let left_width = self.left.chars().count();
            if right_width + left_width < width {
                let start_x = area.x.saturating_add((width - right_width) as u16);
                frame.set_line(area, start_x, area.y, &right, style);
            }
        }
    }
}
