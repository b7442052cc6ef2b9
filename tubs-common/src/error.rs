//! Common error types for TUBS tooling

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for TUBS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across TUBS tools
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML bootstrap file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A content document could not be read or parsed
    #[error("Failed to parse {}: {message}", .path.display())]
    Document { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An output artifact could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid input (e.g. a path outside its base directory)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build a document error from anything displayable
    pub fn document(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Error::Document {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Build a write error for the given artifact path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}
