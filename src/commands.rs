//! Non-interactive subcommands.
//!
//! Each command takes the resolved [`DashConfig`] and an output sink so the
//! binary can hand it stdout and tests can hand it a `Vec<u8>`.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::Value;

use crate::config::DashConfig;
use crate::error::AppError;
use crate::layout::validate::json_violations;
use crate::layout::{DashboardLayout, export_layout, import_layout, overlapping_pairs, presets};

/// The layout the editor would open with: the saved one, else the
/// configured preset, else the built-in empty layout.
pub fn active_layout(config: &DashConfig) -> DashboardLayout {
    config.customizer().layout().clone()
}

pub fn export(config: &DashConfig, path: Option<&Path>, out: &mut impl Write) -> Result<(), AppError> {
    let json = export_layout(&active_layout(config))?;
    match path {
        Some(path) => {
            fs::write(path, &json)?;
            writeln!(out, "exported layout to {}", path.display())?;
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

fn read_checked(path: &Path) -> Result<String, AppError> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let violations = json_violations(&value);
    if !violations.is_empty() {
        return Err(AppError::InvalidLayout {
            path: path.to_path_buf(),
            violations,
        });
    }
    Ok(raw)
}

pub fn import(config: &DashConfig, path: &Path, out: &mut impl Write) -> Result<(), AppError> {
    let raw = read_checked(path)?;
    let now = Utc::now();
    let Some(layout) = import_layout(&raw, now) else {
        return Err(AppError::InvalidLayout {
            path: path.to_path_buf(),
            violations: Vec::new(),
        });
    };
    config.persistence().try_save(&layout, now)?;
    tracing::debug!(layout_id = %layout.id, key = %config.storage_key, "imported layout");
    writeln!(
        out,
        "imported '{}' ({} widgets)",
        layout.name,
        layout.widgets.len()
    )?;
    Ok(())
}

/// Report structural problems (fatal) and overlaps (warnings).
pub fn validate(path: &Path, out: &mut impl Write) -> Result<(), AppError> {
    let raw = match read_checked(path) {
        Ok(raw) => raw,
        Err(AppError::InvalidLayout { path, violations }) => {
            for violation in &violations {
                writeln!(out, "error: {violation}")?;
            }
            return Err(AppError::InvalidLayout { path, violations });
        }
        Err(err) => return Err(err),
    };
    let layout: DashboardLayout = serde_json::from_str(&raw)?;
    let overlaps = overlapping_pairs(&layout.widgets);
    for (a, b) in &overlaps {
        writeln!(out, "warning: widgets '{a}' and '{b}' overlap")?;
    }
    writeln!(
        out,
        "ok: '{}' ({} widgets, {} overlap(s))",
        layout.name,
        layout.widgets.len(),
        overlaps.len()
    )?;
    Ok(())
}

pub fn clear(config: &DashConfig, out: &mut impl Write) -> Result<(), AppError> {
    config.persistence().try_clear()?;
    writeln!(out, "cleared saved layout '{}'", config.storage_key)?;
    Ok(())
}

pub fn list_presets(out: &mut impl Write) -> Result<(), AppError> {
    let now = Utc::now();
    for id in presets::PRESET_IDS {
        if let Some(layout) = presets::preset(id, now) {
            writeln!(out, "{id:<10} {} ({} widgets)", layout.name, layout.widgets.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> DashConfig {
        DashConfig {
            storage_dir: dir.path().join("store"),
            debounce: None,
            ..DashConfig::default()
        }
    }

    fn output(buf: &[u8]) -> String {
        String::from_utf8_lossy(buf).into_owned()
    }

    #[test]
    fn export_falls_back_to_the_configured_preset() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashConfig {
            preset: Some("wide".into()),
            ..config(&dir)
        };
        let mut out = Vec::new();
        export(&config, None, &mut out).unwrap();
        let value: Value = serde_json::from_str(&output(&out)).unwrap();
        assert_eq!(value["id"], "wide");
    }

    #[test]
    fn import_then_export_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let src = dir.path().join("compact.json");
        fs::write(
            &src,
            export_layout(&presets::compact_preset(Utc::now())).unwrap(),
        )
        .unwrap();

        let mut out = Vec::new();
        import(&config, &src, &mut out).unwrap();
        assert!(output(&out).contains("4 widgets"));

        let dest = dir.path().join("out.json");
        export(&config, Some(&dest), &mut Vec::new()).unwrap();
        let value: Value = serde_json::from_str(&fs::read_to_string(dest).unwrap()).unwrap();
        assert_eq!(value["id"], "compact");

        clear(&config, &mut Vec::new()).unwrap();
        assert_eq!(active_layout(&config).id, "default");
    }

    #[test]
    fn validate_reports_violations_and_overlaps() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(
            &bad,
            json!({"id": "x", "name": "", "widgets": [{"id": "a"}]}).to_string(),
        )
        .unwrap();
        let mut out = Vec::new();
        let err = validate(&bad, &mut out).unwrap_err();
        assert!(matches!(err, AppError::InvalidLayout { ref violations, .. } if !violations.is_empty()));
        assert!(output(&out).contains("error: layout: name is empty"));

        let overlapping = dir.path().join("overlap.json");
        fs::write(
            &overlapping,
            json!({"id": "x", "name": "X", "widgets": [
                {"id": "a", "type": "k", "title": "A", "x": 0, "y": 0, "w": 4, "h": 4},
                {"id": "b", "type": "k", "title": "B", "x": 2, "y": 2, "w": 4, "h": 4}
            ]})
            .to_string(),
        )
        .unwrap();
        let mut out = Vec::new();
        validate(&overlapping, &mut out).unwrap();
        let text = output(&out);
        assert!(text.contains("warning: widgets 'a' and 'b' overlap"));
        assert!(text.contains("1 overlap(s)"));
    }

    #[test]
    fn import_rejects_invalid_files_without_touching_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"id": "x", "widgets": []}"#).unwrap();
        assert!(import(&config, &bad, &mut Vec::new()).is_err());
        assert!(config.persistence().load().is_none());
    }

    #[test]
    fn presets_are_listed() {
        let mut out = Vec::new();
        list_presets(&mut out).unwrap();
        let text = output(&out);
        for id in presets::PRESET_IDS {
            assert!(text.contains(id));
        }
    }
}
