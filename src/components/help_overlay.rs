use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear};

use super::{Component, ComponentContext};
use crate::keybindings::KeyBindings;
use crate::theme;
use crate::ui::UiFrame;

/// Centered dialog listing every key binding.
#[derive(Debug, Default)]
pub struct HelpOverlay {
    visible: bool,
    lines: Vec<(String, String)>,
}

impl HelpOverlay {
    pub fn new(bindings: &KeyBindings) -> Self {
        let lines = bindings
            .help_entries()
            .into_iter()
            .map(|(action, keys)| (keys.join(", "), action.to_string()))
            .collect();
        Self {
            visible: false,
            lines,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Clamp the dialog to the available area.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let key_width = self.lines.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let text_width = self.lines.iter().map(|(_, t)| t.chars().count()).max().unwrap_or(0);
        let want_w = (key_width + text_width + 6) as u16;
        let want_h = self.lines.len() as u16 + 2;
        let width = area.width.min(want_w).max(1);
        let height = area.height.min(want_h).max(1);
        Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }
}

impl Component for HelpOverlay {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(" Teclas ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::accent()));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let key_width = self.lines.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let key_style = Style::default().add_modifier(Modifier::BOLD);
        for (row, (keys, text)) in self.lines.iter().enumerate().take(inner.height as usize) {
            let y = inner.y + row as u16;
            frame.set_line(inner, inner.x + 1, y, keys, key_style);
            frame.set_line(inner, inner.x + key_width as u16 + 3, y, text, Style::default());
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if !self.visible {
            return false;
        }
        if let Event::Key(key) = event
            && matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q'))
        {
            self.visible = false;
        }
        // swallow everything else while open
        true
    }
}
