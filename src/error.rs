//! Library errors for the host-facing helpers (registry loading, cache I/O,
//! JSON bridging). Validation problems never surface here; they are reported
//! as diagnostics.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DslError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, DslError>;
