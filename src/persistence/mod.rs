//! Versioned storage of the active dashboard layout.
//!
//! Exactly one layout lives under a fixed key, wrapped in a [`StoredLayout`]
//! envelope carrying [`CURRENT_VERSION`]. Loading a document stamped with any
//! other version yields no layout; there is no migration.
//!
//! Persistence is best-effort: [`LayoutPersistence::save`],
//! [`LayoutPersistence::load`] and [`LayoutPersistence::clear`] log failures
//! and never hand them to the caller. The `try_*` variants return the
//! underlying [`PersistenceError`] for callers (and tests) that need to see
//! what went wrong.

mod debounce;
mod storage;

pub use debounce::Debouncer;
pub use storage::{FileStorage, MemoryStorage, StorageBackend};

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constants::{CURRENT_VERSION, STORAGE_KEY};
use crate::layout::DashboardLayout;
use crate::layout::validate::{Violation, json_violations};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("layout serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage quota exceeded writing '{key}' ({len} bytes, limit {limit})")]
    QuotaExceeded { key: String, len: usize, limit: usize },
    #[error("stored layout has no version")]
    MissingVersion,
    #[error("stored layout version {found} does not match {expected}")]
    VersionMismatch { found: String, expected: String },
    #[error("stored layout failed validation: {} violation(s)", .0.len())]
    Invalid(Vec<Violation>),
}

/// Storage envelope: the layout's own fields plus the schema version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLayout {
    #[serde(flatten)]
    pub layout: DashboardLayout,
    pub version: String,
}

#[derive(Debug)]
pub struct LayoutPersistence<S> {
    storage: S,
    key: String,
}

impl<S: StorageBackend> LayoutPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Write `layout` with the current version and `updated_at = now`.
    pub fn try_save(
        &mut self,
        layout: &DashboardLayout,
        now: DateTime<Utc>,
    ) -> Result<(), PersistenceError> {
        let mut layout = layout.clone();
        layout.touch(now);
        let envelope = StoredLayout {
            layout,
            version: CURRENT_VERSION.to_string(),
        };
        let json = serde_json::to_string(&envelope)?;
        self.storage.set(&self.key, &json)
    }

    pub fn save(&mut self, layout: &DashboardLayout) {
        match self.try_save(layout, Utc::now()) {
            Ok(()) => tracing::debug!(key = %self.key, layout_id = %layout.id, "saved layout"),
            Err(err) => tracing::warn!(key = %self.key, error = %err, "failed to save layout"),
        }
    }

    /// `Ok(None)` when the slot is empty.
    pub fn try_load(&self) -> Result<Option<DashboardLayout>, PersistenceError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        let value: Value = serde_json::from_str(&raw)?;
        match value.get("version").and_then(Value::as_str) {
            None => return Err(PersistenceError::MissingVersion),
            Some(found) if found != CURRENT_VERSION => {
                return Err(PersistenceError::VersionMismatch {
                    found: found.to_string(),
                    expected: CURRENT_VERSION.to_string(),
                });
            }
            Some(_) => {}
        }
        let violations = json_violations(&value);
        if !violations.is_empty() {
            return Err(PersistenceError::Invalid(violations));
        }
        let stored: StoredLayout = serde_json::from_value(value)?;
        Ok(Some(stored.layout))
    }

    pub fn load(&self) -> Option<DashboardLayout> {
        match self.try_load() {
            Ok(layout) => layout,
            Err(err @ PersistenceError::VersionMismatch { .. }) => {
                tracing::debug!(key = %self.key, error = %err, "discarding stored layout");
                None
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to load layout");
                None
            }
        }
    }

    pub fn try_clear(&mut self) -> Result<(), PersistenceError> {
        self.storage.remove(&self.key)
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.try_clear() {
            tracing::warn!(key = %self.key, error = %err, "failed to clear layout");
        }
    }
}
