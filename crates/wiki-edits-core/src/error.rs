//! Error types for wiki-edits-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wiki-edits operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("API error [{code}]: {info}")]
    Api { code: String, info: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error came from talking to the remote API
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. } | Error::HttpStatus { .. } | Error::Api { .. } | Error::Parse(_)
        )
    }
}

/// Result type alias for wiki-edits operations
pub type Result<T> = std::result::Result<T, Error>;
