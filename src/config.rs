//! Runtime configuration for the dashboard binary.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use tracing::Level;

use crate::constants::{
    DEFAULT_STORAGE_DIR, GRID_COLUMNS, PERSIST_DEBOUNCE, ROW_HEIGHT, STORAGE_KEY,
};
use crate::customization::{CustomizationOptions, DashboardCustomizer};
use crate::error::AppError;
use crate::layout::{DashboardLayout, presets};
use crate::persistence::{FileStorage, LayoutPersistence};

#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub storage_dir: PathBuf,
    pub storage_key: String,
    /// `None` writes on every change.
    pub debounce: Option<Duration>,
    pub columns: u16,
    pub row_height: u16,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
    /// Layout used when nothing valid is stored.
    pub preset: Option<String>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: STORAGE_KEY.to_string(),
            debounce: Some(PERSIST_DEBOUNCE),
            columns: GRID_COLUMNS,
            row_height: ROW_HEIGHT,
            log_file: None,
            log_level: Level::INFO,
            preset: Some("default".to_string()),
        }
    }
}

impl DashConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=48).contains(&self.columns) {
            return Err(AppError::Config(
                "columns must be between 1 and 48".to_string(),
            ));
        }
        if !(1..=8).contains(&self.row_height) {
            return Err(AppError::Config(
                "row height must be between 1 and 8".to_string(),
            ));
        }
        if self.storage_key.trim().is_empty() {
            return Err(AppError::Config("storage key is empty".to_string()));
        }
        if let Some(preset) = &self.preset
            && !presets::PRESET_IDS.contains(&preset.as_str())
        {
            return Err(AppError::UnknownPreset(preset.clone()));
        }
        Ok(())
    }

    pub fn persistence(&self) -> LayoutPersistence<FileStorage> {
        LayoutPersistence::with_key(
            FileStorage::new(self.storage_dir.clone()),
            self.storage_key.clone(),
        )
    }

    pub fn default_layout(&self) -> Option<DashboardLayout> {
        self.preset
            .as_deref()
            .and_then(|id| presets::preset(id, Utc::now()))
    }

    pub fn customization_options(&self) -> CustomizationOptions {
        let mut options = CustomizationOptions::new();
        options.default_layout = self.default_layout();
        options.persist_debounce = self.debounce;
        options
    }

    pub fn customizer(&self) -> DashboardCustomizer<FileStorage> {
        DashboardCustomizer::new(self.persistence(), self.customization_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DashConfig::default();
        config.validate().unwrap();
        assert_eq!(config.default_layout().unwrap().id, "default");
        assert_eq!(config.customization_options().persist_debounce, Some(PERSIST_DEBOUNCE));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = DashConfig {
            columns: 0,
            ..DashConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
        let config = DashConfig {
            preset: Some("kanban".into()),
            ..DashConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::UnknownPreset(p)) if p == "kanban"));
    }

    #[test]
    fn storage_lives_under_the_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashConfig {
            storage_dir: dir.path().to_path_buf(),
            storage_key: "team_a".into(),
            debounce: None,
            ..DashConfig::default()
        };
        let mut customizer = config.customizer();
        customizer.remove_widget("domain-summary");
        assert!(dir.path().join("team_a.json").exists());
        assert_eq!(config.persistence().load().unwrap().widgets.len(), 3);
    }
}
