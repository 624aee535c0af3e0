//! Custom error types for Quill
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for Quill operations
#[derive(Error, Debug)]
pub enum QuillError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A mandatory field was left blank
    #[error("{0} cannot be empty")]
    MissingField(&'static str),

    /// Tag name outside the known set
    #[error("'{0}' is not a valid tag")]
    InvalidTag(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The backing file exists but could not be parsed
    #[error("Quote file {} is corrupt: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl QuillError {
    /// Create a "not found" error for quotes
    pub fn quote_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Quote",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors that must stop the process before the command loop starts
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CorruptStore { .. })
    }
}

impl From<std::io::Error> for QuillError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QuillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Quill operations
pub type QuillResult<T> = Result<T, QuillError>;
