//! Finder error types

use thiserror::Error;
use shared::{FetchFailure, SharedError};

/// Result type for finder operations
pub type FinderResult<T> = Result<T, FinderError>;

/// Session store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session file I/O failed on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file is not a JSON object: {path}")]
    Corrupt { path: String },

    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Finder error types
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("{service} request failed: {reason}")]
    Fetch { service: String, reason: FetchFailure },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),
}

impl FinderError {
    pub fn config(message: impl Into<String>) -> Self {
        FinderError::Config { message: message.into() }
    }

    pub fn fetch(service: impl Into<String>, reason: FetchFailure) -> Self {
        FinderError::Fetch { service: service.into(), reason }
    }
}
