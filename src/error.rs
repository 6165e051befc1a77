use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::layout::Violation;
use crate::persistence::PersistenceError;

/// Failures surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("{} is not a valid layout ({} problem(s))", path.display(), violations.len())]
    InvalidLayout {
        path: PathBuf,
        violations: Vec<Violation>,
    },
}
