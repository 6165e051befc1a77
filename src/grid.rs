//! Mapping between grid units and terminal cells.
//!
//! A column is `area.width / columns` cells wide (fractional), a row is a fixed
//! number of cells tall. Widget edges are rounded to the nearest cell so that
//! adjacent widgets share no cells and leave no gaps.

use ratatui::layout::{Position, Rect};

use crate::constants::{GRID_COLUMNS, ROW_HEIGHT};
use crate::layout::WidgetConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    area: Rect,
    columns: u16,
    row_height: u16,
}

impl GridGeometry {
    pub fn new(area: Rect, columns: u16, row_height: u16) -> Self {
        Self {
            area,
            columns: columns.max(1),
            row_height: row_height.max(1),
        }
    }

    pub fn with_defaults(area: Rect) -> Self {
        Self::new(area, GRID_COLUMNS, ROW_HEIGHT)
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn row_height(&self) -> u16 {
        self.row_height
    }

    pub fn column_width(&self) -> f64 {
        f64::from(self.area.width) / f64::from(self.columns)
    }

    fn col_to_x(&self, col: f64) -> i64 {
        i64::from(self.area.x) + (col * self.column_width()).round() as i64
    }

    fn row_to_y(&self, row: f64) -> i64 {
        i64::from(self.area.y) + (row * f64::from(self.row_height)).round() as i64
    }

    /// Cell rectangle for `widget`, clipped to the grid area. `None` when the
    /// widget is entirely off screen or collapses to nothing.
    pub fn to_cells(&self, widget: &WidgetConfig) -> Option<Rect> {
        let x0 = self.col_to_x(widget.x);
        let x1 = self.col_to_x(widget.right());
        let y0 = self.row_to_y(widget.y);
        let y1 = self.row_to_y(widget.bottom());

        let left = x0.max(i64::from(self.area.x));
        let top = y0.max(i64::from(self.area.y));
        let right = x1.min(i64::from(self.area.right()));
        let bottom = y1.min(i64::from(self.area.bottom()));
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }

    /// Fractional grid position of a terminal cell.
    pub fn to_grid(&self, column: u16, row: u16) -> (f64, f64) {
        let dx = f64::from(column.saturating_sub(self.area.x));
        let dy = f64::from(row.saturating_sub(self.area.y));
        (dx / self.column_width(), dy / f64::from(self.row_height))
    }

    /// Topmost widget under the cell, i.e. the last one drawn.
    pub fn widget_at<'w>(
        &self,
        widgets: &'w [WidgetConfig],
        column: u16,
        row: u16,
    ) -> Option<&'w WidgetConfig> {
        let pos = Position::new(column, row);
        widgets
            .iter()
            .rev()
            .find(|w| self.to_cells(w).is_some_and(|r| r.contains(pos)))
    }

    /// Whether the cell is the bottom-right corner of the widget's frame.
    pub fn is_resize_handle(&self, widget: &WidgetConfig, column: u16, row: u16) -> bool {
        self.to_cells(widget).is_some_and(|r| {
            column == r.right().saturating_sub(1) && row == r.bottom().saturating_sub(1)
        })
    }
}
