//! Copying, merging and JSON exchange of whole layouts.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::validate::json_violations;
use super::{DashboardLayout, LayoutPatch};
use crate::constants::{CLONE_ID_SUFFIX, CLONE_NAME_SUFFIX};

/// Deep copy under a derived identity (`{id}_clone`, `{name} (Cópia)`) with
/// fresh timestamps.
pub fn clone_layout(layout: &DashboardLayout, now: DateTime<Utc>) -> DashboardLayout {
    DashboardLayout {
        id: format!("{}{}", layout.id, CLONE_ID_SUFFIX),
        name: format!("{}{}", layout.name, CLONE_NAME_SUFFIX),
        widgets: layout.widgets.clone(),
        created_at: now,
        updated_at: now,
    }
}

/// Shallow merge: every field present in `overlay` replaces the base value.
/// There is no per-widget merge.
pub fn merge_layouts(base: &DashboardLayout, overlay: LayoutPatch) -> DashboardLayout {
    DashboardLayout {
        id: overlay.id.unwrap_or_else(|| base.id.clone()),
        name: overlay.name.unwrap_or_else(|| base.name.clone()),
        widgets: overlay.widgets.unwrap_or_else(|| base.widgets.clone()),
        created_at: overlay.created_at.unwrap_or(base.created_at),
        updated_at: overlay.updated_at.unwrap_or(base.updated_at),
    }
}

/// Pretty-printed JSON, the same shape the storage slot holds minus the
/// version.
pub fn export_layout(layout: &DashboardLayout) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(layout)
}

/// Parse and validate a layout document.
///
/// Returns `None` when the text is not JSON, fails the structural rules, or
/// does not deserialize. A successful import has `updated_at` set to `now`.
pub fn import_layout(json: &str, now: DateTime<Utc>) -> Option<DashboardLayout> {
    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "layout import is not valid json");
            return None;
        }
    };
    let violations = json_violations(&value);
    if let Some(first) = violations.first() {
        tracing::warn!(
            count = violations.len(),
            first = %first,
            "rejected imported layout"
        );
        return None;
    }
    match serde_json::from_value::<DashboardLayout>(value) {
        Ok(mut layout) => {
            layout.touch(now);
            Some(layout)
        }
        Err(err) => {
            tracing::warn!(error = %err, "imported layout did not deserialize");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{WidgetConfig, presets, validate_layout};

    #[test]
    fn clone_derives_identity_and_copies_widgets() {
        let now = Utc::now();
        let base = presets::default_preset(now);
        let later = now + chrono::Duration::minutes(1);
        let copy = clone_layout(&base, later);
        assert_eq!(copy.id, "default_clone");
        assert_eq!(copy.name, format!("{} (Cópia)", base.name));
        assert_eq!(copy.widgets, base.widgets);
        assert_eq!(copy.created_at, later);
        assert_eq!(copy.updated_at, later);
    }

    #[test]
    fn merge_replaces_widgets_wholesale_or_keeps_base() {
        let base = presets::default_preset(Utc::now());
        let renamed = merge_layouts(
            &base,
            LayoutPatch {
                name: Some("Renomeado".into()),
                ..LayoutPatch::default()
            },
        );
        assert_eq!(renamed.name, "Renomeado");
        assert_eq!(renamed.id, base.id);
        assert_eq!(renamed.widgets, base.widgets);

        let only = vec![WidgetConfig::new("solo", "k", "Solo").at(0.0, 0.0, 2.0, 2.0)];
        let replaced = merge_layouts(
            &base,
            LayoutPatch {
                widgets: Some(only.clone()),
                ..LayoutPatch::default()
            },
        );
        assert_eq!(replaced.widgets, only);
    }

    #[test]
    fn export_then_import_round_trips_except_updated_at() {
        let original = presets::wide_preset(Utc::now());
        assert!(validate_layout(&original));
        let json = export_layout(&original).unwrap();
        let later = original.updated_at + chrono::Duration::seconds(30);
        let imported = import_layout(&json, later).unwrap();
        assert_eq!(imported.updated_at, later);
        let mut expected = original.clone();
        expected.updated_at = later;
        assert_eq!(imported, expected);
    }

    #[test]
    fn fractional_coordinates_survive_the_round_trip() {
        let now = Utc::now();
        let layout = DashboardLayout::new("f", "F", now)
            .with_widgets(vec![WidgetConfig::new("a", "k", "A").at(0.1, 2.35, 3.3, 1.7)]);
        let imported = import_layout(&export_layout(&layout).unwrap(), now).unwrap();
        assert_eq!(imported.widgets, layout.widgets);
    }

    #[test]
    fn untitled_widgets_import_intact() {
        let now = Utc::now();
        let raw = r#"{"id":"mine","name":"Mine","widgets":[
            {"id":"w","type":"tier-distribution","title":"","x":0,"y":0,"w":6,"h":4}
        ]}"#;
        let imported = import_layout(raw, now).unwrap();
        assert_eq!(imported.widgets.len(), 1);
        assert_eq!(imported.widgets[0].title, "");
        assert!(validate_layout(&imported));
    }

    #[test]
    fn import_rejects_garbage_and_invalid_documents() {
        let now = Utc::now();
        assert!(import_layout("not json", now).is_none());
        assert!(import_layout("[]", now).is_none());
        assert!(import_layout(r#"{"id":"","name":"x","widgets":[]}"#, now).is_none());
        assert!(
            import_layout(
                r#"{"id":"a","name":"b","widgets":[{"id":"w","type":"k","title":"t","x":0,"y":0,"w":1}]}"#,
                now
            )
            .is_none()
        );
    }
}
