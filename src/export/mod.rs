//! Export module for Quill
//!
//! Writes the collection next to the backing file in one of three shapes:
//! - Text: one display line per quote, separated by blank lines
//! - Plain JSON: readable fields, never read back by the loader
//! - Encoded JSON: the same obfuscated shape as the backing file

pub mod json;
pub mod text;

pub use json::{export_encoded_json, export_plain_json};
pub use text::{export_text, render_text};

use std::fmt;
use std::path::PathBuf;

use crate::config::QuillPaths;
use crate::error::{QuillError, QuillResult};
use crate::storage::QuoteStore;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Structured JSON (plain or encoded)
    Json,
    /// Human-readable text
    Text,
}

impl ExportFormat {
    /// Parse a format name; blank input means JSON
    pub fn parse(s: &str) -> QuillResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "json" => Ok(Self::Json),
            "txt" | "text" => Ok(Self::Text),
            other => Err(QuillError::Export(format!(
                "Unknown export format '{}' (expected json or txt)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "txt"),
        }
    }
}

/// Export every quote and return the file written
///
/// `encoded` only applies to JSON. The store and its backing file are left
/// untouched.
pub fn export_quotes(
    store: &QuoteStore,
    paths: &QuillPaths,
    format: ExportFormat,
    encoded: bool,
) -> QuillResult<PathBuf> {
    let quotes = store.quotes();

    let output = match (format, encoded) {
        (ExportFormat::Text, _) => paths.text_export_file(),
        (ExportFormat::Json, true) => paths.encoded_export_file(),
        (ExportFormat::Json, false) => paths.plain_export_file(),
    };

    if output == store.path() || output == paths.quotes_file() {
        return Err(QuillError::Export(format!(
            "Refusing to overwrite the quote file {}",
            output.display()
        )));
    }

    match (format, encoded) {
        (ExportFormat::Text, _) => export_text(quotes, &output)?,
        (ExportFormat::Json, true) => export_encoded_json(quotes, &output)?,
        (ExportFormat::Json, false) => export_plain_json(quotes, &output)?,
    }

    Ok(output)
}
