//! Single error type for the public API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing or invalid field: {field}")]
    Validation { field: &'static str },

    #[error("no such record: {0}")]
    NotFound(String),

    #[error("invalid backup document: {0}")]
    InvalidBackup(String),
}

pub type Result<T> = std::result::Result<T, Error>;
