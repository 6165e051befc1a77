//! Dashboard layout model.
//!
//! A [`DashboardLayout`] is the persisted aggregate: a named, ordered list of
//! [`WidgetConfig`] placements on a column grid. Only `x`, `y`, `w` and `h`
//! determine placement; the order of `widgets` is insertion order and carries
//! no meaning for rendering.
//!
//! Submodules hold the pure utilities that operate on these records:
//! geometry (overlap, bounding box, compaction), structural validation,
//! clone/merge/export/import, and the named presets.

pub mod geometry;
pub mod presets;
pub mod transfer;
pub mod validate;

pub use geometry::*;
pub use transfer::*;
pub use validate::{Violation, ViolationKind, validate_layout, validate_widget};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{EMPTY_LAYOUT_ID, EMPTY_LAYOUT_NAME};

/// One placed instance of a widget type on the grid.
///
/// Coordinates are grid units with a top-left origin. They are carried as
/// `f64` because pointer-driven moves land between cells until
/// [`optimize_layout`] snaps them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub id: String,
    /// Widget-type tag owned by the host application; opaque to the engine.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<f64>,
}

impl WidgetConfig {
    /// Create a 1x1 widget at the origin.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            title: title.into(),
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
        }
    }

    #[must_use]
    pub fn at(mut self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
        self
    }

    #[must_use]
    pub fn with_min(mut self, min_w: f64, min_h: f64) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max_w: f64, max_h: f64) -> Self {
        self.max_w = Some(max_w);
        self.max_h = Some(max_h);
        self
    }

    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Strict open-interval overlap test. Widgets sharing only an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &WidgetConfig) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Clamp a proposed size to the widget's declared bounds.
    ///
    /// The engine never applies this on its own; it is offered to the
    /// interaction layer that turns pointer motion into sizes.
    pub fn clamp_size(&self, w: f64, h: f64) -> (f64, f64) {
        let mut w = w.max(self.min_w.unwrap_or(1.0));
        let mut h = h.max(self.min_h.unwrap_or(1.0));
        if let Some(max_w) = self.max_w {
            w = w.min(max_w);
        }
        if let Some(max_h) = self.max_h {
            h = h.min(max_h);
        }
        (w, h)
    }
}

/// The persisted aggregate: a named collection of widget placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayout {
    /// Distinguishes presets (`default`, `compact`, `wide`) from custom layouts.
    pub id: String,
    pub name: String,
    pub widgets: Vec<WidgetConfig>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl DashboardLayout {
    pub fn new(id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            widgets: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The built-in layout the store starts from and returns to on reset.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self::new(EMPTY_LAYOUT_ID, EMPTY_LAYOUT_NAME, now)
    }

    #[must_use]
    pub fn with_widgets(mut self, widgets: Vec<WidgetConfig>) -> Self {
        self.widgets = widgets;
        self
    }

    pub fn widget(&self, id: &str) -> Option<&WidgetConfig> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widget(id).is_some()
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Partial layout applied on top of a base by [`merge_layouts`].
///
/// `widgets`, when present, replaces the base collection wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets: Option<Vec<WidgetConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(x: f64, y: f64, w: f64, h: f64) -> WidgetConfig {
        WidgetConfig::new("w", "tier-distribution", "Tiers").at(x, y, w, h)
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = widget(0.0, 0.0, 2.0, 2.0);
        let b = widget(2.0, 0.0, 2.0, 2.0);
        assert!(!a.overlaps(&b));
        let below = widget(0.0, 2.0, 2.0, 2.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn interior_intersection_overlaps() {
        let a = widget(0.0, 0.0, 2.0, 2.0);
        let b = widget(1.0, 1.0, 2.0, 2.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn clamp_size_respects_declared_bounds() {
        let w = widget(0.0, 0.0, 4.0, 4.0).with_min(2.0, 3.0).with_max(6.0, 8.0);
        assert_eq!(w.clamp_size(1.0, 1.0), (2.0, 3.0));
        assert_eq!(w.clamp_size(10.0, 10.0), (6.0, 8.0));
        // no bounds: only the 1x1 floor applies
        let free = widget(0.0, 0.0, 1.0, 1.0);
        assert_eq!(free.clamp_size(0.0, 40.0), (1.0, 40.0));
    }

    #[test]
    fn widget_json_uses_type_and_camel_case_bounds() {
        let w = widget(1.0, 2.0, 3.0, 4.0).with_min(2.0, 2.0);
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["type"], "tier-distribution");
        assert_eq!(json["minW"], 2.0);
        assert!(json.get("maxW").is_none());
    }

    #[test]
    fn layout_without_timestamps_still_deserializes() {
        let raw = r#"{"id":"x","name":"X","widgets":[]}"#;
        let layout: DashboardLayout = serde_json::from_str(raw).unwrap();
        assert_eq!(layout.id, "x");
        assert!(layout.widgets.is_empty());
    }
}
