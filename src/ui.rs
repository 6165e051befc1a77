//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Widget rectangles are computed from grid coordinates and routinely extend
//! past the bottom or right edge of the terminal (a tall layout on a short
//! window, a drag past the last column). Writing out-of-bounds into the
//! underlying `Buffer` panics, so every draw call goes through `UiFrame`,
//! which intersects the requested area with the visible one first.
//!
//! In paint closures construct a `UiFrame` from a `ratatui::Frame` via
//! `UiFrame::new(&mut frame)`; offscreen and test rendering builds one from a
//! bare `Buffer` with `UiFrame::from_parts`.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// The part of `rect` that is on screen, if any.
    pub fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Write one line of text at `(x, y)`, cut at the right edge of `bounds`.
    pub fn set_line(&mut self, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
        let Some(bounds) = self.clip_rect(bounds) else {
            return;
        };
        safe_set_string(self.buffer, bounds, x, y, text, style);
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Like [`truncate_to_width`] but marks the cut with a trailing `…`.
pub(crate) fn ellipsize(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::{Block, Borders};

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn truncation_helpers() {
        assert_eq!(truncate_to_width("Distribuição", 20), "Distribuição");
        assert_eq!(truncate_to_width("Distribuição", 5), "Distr");
        assert_eq!(ellipsize("Distribuição", 5), "Dist…");
        assert_eq!(ellipsize("abc", 0), "");
    }

    #[test]
    fn set_line_stops_at_the_frame_edge() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.set_line(Rect::new(0, 0, 40, 1), 2, 0, "overflow", Style::default());
        // off-screen rows are ignored
        ui.set_line(Rect::new(0, 5, 40, 1), 0, 5, "x", Style::default());
        assert_eq!(row(&buf, 0), "  over");
    }

    #[test]
    fn block_partially_below_the_frame_is_clipped() {
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.render_widget(Block::default().borders(Borders::ALL), Rect::new(1, 1, 4, 6));
        assert_eq!(row(&buf, 0), "     ");
        assert_eq!(row(&buf, 1), " ┌──┐");
    }

    #[test]
    fn fully_off_screen_rect_clips_to_nothing() {
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        let ui = UiFrame::from_parts(area, &mut buf);
        assert!(ui.clip_rect(Rect::new(5, 5, 2, 2)).is_none());
    }
}
