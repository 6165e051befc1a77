//! Pure geometry over widget placements: overlap detection, occupied
//! bounding box, rounding and vertical compaction.

use chrono::{DateTime, Utc};

use super::{DashboardLayout, WidgetConfig};

/// Occupied bounding box of a layout, in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSize {
    pub width: f64,
    pub height: f64,
}

/// Returns `true` as soon as any two widgets overlap.
///
/// Pairwise O(n²) scan using the strict test in [`WidgetConfig::overlaps`].
pub fn calculate_widget_overlap(widgets: &[WidgetConfig]) -> bool {
    for (i, a) in widgets.iter().enumerate() {
        for b in &widgets[i + 1..] {
            if a.overlaps(b) {
                return true;
            }
        }
    }
    false
}

/// Every overlapping pair, by id, in scan order.
pub fn overlapping_pairs(widgets: &[WidgetConfig]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (i, a) in widgets.iter().enumerate() {
        for b in &widgets[i + 1..] {
            if a.overlaps(b) {
                pairs.push((a.id.clone(), b.id.clone()));
            }
        }
    }
    pairs
}

/// `width = max(x + w)`, `height = max(y + h)`. `None` when there are no
/// widgets.
pub fn calculate_grid_size(widgets: &[WidgetConfig]) -> Option<GridSize> {
    if widgets.is_empty() {
        return None;
    }
    let width = widgets
        .iter()
        .map(WidgetConfig::right)
        .fold(f64::NEG_INFINITY, f64::max);
    let height = widgets
        .iter()
        .map(WidgetConfig::bottom)
        .fold(f64::NEG_INFINITY, f64::max);
    Some(GridSize { width, height })
}

/// First grid row below every placed widget; 0 for an empty layout.
pub fn next_free_row(widgets: &[WidgetConfig]) -> f64 {
    calculate_grid_size(widgets)
        .map(|size| size.height.max(0.0))
        .unwrap_or(0.0)
}

/// Round every widget's `x`, `y`, `w`, `h` to the nearest integer.
///
/// Ordering and overlaps are left as they are.
pub fn optimize_layout(layout: &DashboardLayout, now: DateTime<Utc>) -> DashboardLayout {
    let mut next = layout.clone();
    for widget in &mut next.widgets {
        widget.x = widget.x.round();
        widget.y = widget.y.round();
        widget.w = widget.w.round();
        widget.h = widget.h.round();
    }
    next.touch(now);
    next
}

/// Stack widgets vertically in ascending-`y` order.
///
/// After a stable sort by `y`, each widget's `y` becomes `index * h` using
/// its own height. `x` and `w` are ignored, so side-by-side arrangements
/// collapse into one column of placements; this is a gap-removal heuristic,
/// not a packing solver.
pub fn compact_layout(layout: &DashboardLayout, now: DateTime<Utc>) -> DashboardLayout {
    let mut next = layout.clone();
    next.widgets.sort_by(|a, b| a.y.total_cmp(&b.y));
    for (index, widget) in next.widgets.iter_mut().enumerate() {
        widget.y = index as f64 * widget.h;
    }
    next.touch(now);
    next
}
