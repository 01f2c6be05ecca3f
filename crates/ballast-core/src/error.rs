//! Error types for Ballast

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Snapshot input violates the caller contract (negative or non-finite values)
    #[error("Invalid snapshot: {field} {reason}")]
    InvalidSnapshot { field: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub(crate) fn invalid_snapshot(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidSnapshot {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
