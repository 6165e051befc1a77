//! Frame around one dashboard widget.
//!
//! The host owns everything about a widget except its content: the border,
//! the title bar, the interaction styling, and the loading and error
//! placeholders. Content is drawn by a [`WidgetRenderer`] that only ever
//! sees the inner area and an opaque JSON payload.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};
use serde_json::Value;

use super::{Component, ComponentContext};
use crate::layout::WidgetConfig;
use crate::theme;
use crate::ui::{UiFrame, ellipsize};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WidgetStatus {
    #[default]
    Ready,
    Loading,
    Error(String),
}

/// Draws a widget's content.
pub trait WidgetRenderer {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, payload: &Value);
}

/// Renders the widget type and the top-level fields of an object payload,
/// one per line.
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    kind: String,
}

impl PlaceholderRenderer {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl WidgetRenderer for PlaceholderRenderer {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, payload: &Value) {
        let muted = Style::default().fg(theme::widget_muted());
        let mut lines = vec![(self.kind.clone(), muted)];
        match payload {
            Value::Object(map) => {
                for (key, value) in map {
                    let value = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    lines.push((format!("{key}: {value}"), Style::default()));
                }
            }
            Value::Null => {}
            other => lines.push((other.to_string(), Style::default())),
        }
        for (row, (text, style)) in lines.iter().enumerate().take(area.height as usize) {
            frame.set_line(area, area.x, area.y + row as u16, text, *style);
        }
    }
}

pub struct WidgetHost {
    widget: WidgetConfig,
    status: WidgetStatus,
    payload: Value,
    renderer: Box<dyn WidgetRenderer>,
}

impl WidgetHost {
    pub fn new(widget: WidgetConfig) -> Self {
        let renderer = Box::new(PlaceholderRenderer::new(widget.kind.clone()));
        Self::with_renderer(widget, renderer)
    }

    pub fn with_renderer(widget: WidgetConfig, renderer: Box<dyn WidgetRenderer>) -> Self {
        Self {
            widget,
            status: WidgetStatus::Ready,
            payload: Value::Null,
            renderer,
        }
    }

    pub fn widget(&self) -> &WidgetConfig {
        &self.widget
    }

    /// Track the latest geometry and title for this widget id.
    pub fn set_widget(&mut self, widget: WidgetConfig) {
        self.widget = widget;
    }

    pub fn status(&self) -> &WidgetStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: WidgetStatus) {
        self.status = status;
    }

    pub fn set_payload(&mut self, payload: Value) {
        self.payload = payload;
    }

    fn title(&self, ctx: &ComponentContext, width: u16) -> String {
        let title = if ctx.editing() {
            let w = &self.widget;
            format!(" {} [{}:{} {}x{}] ", w.title, w.x, w.y, w.w, w.h)
        } else {
            format!(" {} ", self.widget.title)
        };
        ellipsize(&title, width.saturating_sub(2) as usize)
    }
}

impl Component for WidgetHost {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let border = theme::border_style(ctx.selected(), ctx.hovered(), ctx.editing());
        let title = Span::styled(
            self.title(ctx, area.width),
            Style::default().fg(theme::widget_title()),
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match &self.status {
            WidgetStatus::Ready => self.renderer.render(frame, inner, &self.payload),
            WidgetStatus::Loading => frame.set_line(
                inner,
                inner.x,
                inner.y,
                "Carregando...",
                Style::default().fg(theme::widget_muted()),
            ),
            WidgetStatus::Error(message) => frame.set_line(
                inner,
                inner.x,
                inner.y,
                &format!("Erro: {message}"),
                Style::default().fg(theme::widget_error()),
            ),
        }
    }
}
