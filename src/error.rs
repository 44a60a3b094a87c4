// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a whole run. Problems inside a single cell never end up here.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("could not read {path:?} under any encoding ({})", attempts.join("; "))]
    Unreadable { path: PathBuf, attempts: Vec<String> },

    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("configuration error: {0}")]
    Config(String),
}
