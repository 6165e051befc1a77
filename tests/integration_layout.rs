use chrono::{Duration, Utc};
use proptest::prelude::*;
use rti_dash::layout::{
    DashboardLayout, WidgetConfig, calculate_widget_overlap, clone_layout, export_layout,
    import_layout, merge_layouts, presets, validate_layout,
};
use rti_dash::LayoutPatch;

#[test]
fn touching_edges_do_not_overlap_but_shared_area_does() {
    let a = WidgetConfig::new("a", "k", "A").at(0.0, 0.0, 6.0, 4.0);
    let b = WidgetConfig::new("b", "k", "B").at(6.0, 0.0, 6.0, 4.0);
    let c = WidgetConfig::new("c", "k", "C").at(5.0, 3.0, 2.0, 2.0);
    assert!(!calculate_widget_overlap(&[a.clone(), b.clone()]));
    assert!(calculate_widget_overlap(&[a, b, c]));
}

#[test]
fn export_import_round_trip_refreshes_only_updated_at() {
    let original = presets::default_preset(Utc::now() - Duration::days(2));
    let json = export_layout(&original).unwrap();
    let later = Utc::now();
    let imported = import_layout(&json, later).unwrap();
    assert_eq!(imported.updated_at, later);
    assert_eq!(
        DashboardLayout {
            updated_at: original.updated_at,
            ..imported
        },
        original
    );
}

#[test]
fn clone_and_merge() {
    let now = Utc::now();
    let base = presets::compact_preset(now);
    let copy = clone_layout(&base, now);
    assert_eq!(copy.id, "compact_clone");
    assert_eq!(copy.name, "Layout Compacto (Cópia)");
    assert_eq!(copy.widgets, base.widgets);

    let merged = merge_layouts(
        &base,
        LayoutPatch {
            name: Some("Equipe A".into()),
            ..LayoutPatch::default()
        },
    );
    assert_eq!(merged.name, "Equipe A");
    assert_eq!(merged.widgets, base.widgets);
    assert!(validate_layout(&merged));
}

#[test]
fn import_rejects_malformed_documents() {
    let now = Utc::now();
    assert!(import_layout("not json", now).is_none());
    assert!(import_layout(r#"{"id":"x","name":"X"}"#, now).is_none());
    assert!(import_layout(r#"{"id":"x","name":"X","widgets":[{"id":"a"}]}"#, now).is_none());
}

proptest! {
    #[test]
    fn overlap_detection_ignores_order(
        ax in 0.0f64..12.0, ay in 0.0f64..20.0, aw in 1.0f64..6.0, ah in 1.0f64..6.0,
        bx in 0.0f64..12.0, by in 0.0f64..20.0, bw in 1.0f64..6.0, bh in 1.0f64..6.0,
    ) {
        let a = WidgetConfig::new("a", "k", "A").at(ax, ay, aw, ah);
        let b = WidgetConfig::new("b", "k", "B").at(bx, by, bw, bh);
        prop_assert_eq!(
            calculate_widget_overlap(&[a.clone(), b.clone()]),
            calculate_widget_overlap(&[b, a])
        );
    }
}
