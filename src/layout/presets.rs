//! Named built-in layouts.

use chrono::{DateTime, Utc};

use super::{DashboardLayout, WidgetConfig};

pub const PRESET_IDS: [&str; 3] = ["default", "compact", "wide"];

fn tier_distribution() -> WidgetConfig {
    WidgetConfig::new("tier-distribution", "tier-distribution", "Distribuição por Tier")
        .with_min(3.0, 3.0)
}

fn domain_summary() -> WidgetConfig {
    WidgetConfig::new("domain-summary", "domain-summary", "Resumo por Domínio").with_min(3.0, 3.0)
}

fn assessment_coverage() -> WidgetConfig {
    WidgetConfig::new(
        "assessment-coverage",
        "assessment-coverage",
        "Cobertura de Avaliações",
    )
    .with_min(4.0, 3.0)
}

fn progress_monitoring() -> WidgetConfig {
    WidgetConfig::new(
        "progress-monitoring",
        "progress-monitoring",
        "Monitoramento de Progresso",
    )
    .with_min(6.0, 4.0)
}

/// Two half-width summaries over two full-width charts (12 x 14).
pub fn default_preset(now: DateTime<Utc>) -> DashboardLayout {
    DashboardLayout::new("default", "Layout Padrão", now).with_widgets(vec![
        tier_distribution().at(0.0, 0.0, 6.0, 4.0),
        domain_summary().at(6.0, 0.0, 6.0, 4.0),
        assessment_coverage().at(0.0, 4.0, 12.0, 4.0),
        progress_monitoring().at(0.0, 8.0, 12.0, 6.0),
    ])
}

/// Three summaries in one band above the progress chart.
pub fn compact_preset(now: DateTime<Utc>) -> DashboardLayout {
    DashboardLayout::new("compact", "Layout Compacto", now).with_widgets(vec![
        tier_distribution().at(0.0, 0.0, 4.0, 3.0),
        domain_summary().at(4.0, 0.0, 4.0, 3.0),
        assessment_coverage().at(8.0, 0.0, 4.0, 3.0),
        progress_monitoring().at(0.0, 3.0, 12.0, 5.0),
    ])
}

/// Summaries and coverage side by side, tall progress chart below.
pub fn wide_preset(now: DateTime<Utc>) -> DashboardLayout {
    DashboardLayout::new("wide", "Layout Amplo", now).with_widgets(vec![
        tier_distribution().at(0.0, 0.0, 3.0, 4.0),
        domain_summary().at(3.0, 0.0, 3.0, 4.0),
        assessment_coverage().at(6.0, 0.0, 6.0, 4.0),
        progress_monitoring().at(0.0, 4.0, 12.0, 8.0),
    ])
}

pub fn preset(id: &str, now: DateTime<Utc>) -> Option<DashboardLayout> {
    match id {
        "default" => Some(default_preset(now)),
        "compact" => Some(compact_preset(now)),
        "wide" => Some(wide_preset(now)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{calculate_widget_overlap, validate_layout};

    #[test]
    fn every_preset_is_valid_and_overlap_free() {
        let now = Utc::now();
        for id in PRESET_IDS {
            let layout = preset(id, now).unwrap();
            assert_eq!(layout.id, id);
            assert!(validate_layout(&layout), "{id} invalid");
            assert!(!calculate_widget_overlap(&layout.widgets), "{id} overlaps");
            for w in &layout.widgets {
                assert_eq!(w.clamp_size(w.w, w.h), (w.w, w.h), "{id}/{} out of bounds", w.id);
            }
        }
        assert!(preset("kanban", now).is_none());
    }
}
