//! Path management for Quill
//!
//! Everything Quill writes lives next to the backing quote file and reuses
//! its base name with a different suffix.
//!
//! ## Path Resolution Order
//!
//! 1. `--file` / `-f` command line flag
//! 2. `QUILL_FILE` environment variable (read by clap)
//! 3. `quotes.json` in the working directory

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::QuillError;

/// Default backing file name, relative to the working directory
pub const DEFAULT_QUOTES_FILE: &str = "quotes.json";

/// Environment variable that overrides the backing file path
pub const QUOTES_FILE_ENV: &str = "QUILL_FILE";

/// Manages all paths used by Quill
#[derive(Debug, Clone)]
pub struct QuillPaths {
    /// The backing quote file
    quotes_file: PathBuf,
}

impl QuillPaths {
    /// Create paths around an explicit backing file
    pub fn new(quotes_file: impl Into<PathBuf>) -> Self {
        Self {
            quotes_file: quotes_file.into(),
        }
    }

    /// Get the backing quote file
    pub fn quotes_file(&self) -> &Path {
        &self.quotes_file
    }

    /// Sibling of the backing file with `extension` in place of its own
    ///
    /// Never the backing file itself: `quotes.txt` exports text to
    /// `quotes.export.txt`.
    fn sibling(&self, extension: &str) -> PathBuf {
        let path = self.quotes_file.with_extension(extension);
        if path == self.quotes_file {
            self.quotes_file.with_extension(format!("export.{}", extension))
        } else {
            path
        }
    }

    /// Plain text export (`quotes.txt`)
    pub fn text_export_file(&self) -> PathBuf {
        self.sibling("txt")
    }

    /// Plain structured export (`quotes.plain.json`)
    pub fn plain_export_file(&self) -> PathBuf {
        self.sibling("plain.json")
    }

    /// Obfuscated structured export (`quotes.encoded.json`)
    pub fn encoded_export_file(&self) -> PathBuf {
        self.sibling("encoded.json")
    }

    /// Append-only audit log (`quotes.audit.log`)
    pub fn audit_log(&self) -> PathBuf {
        self.quotes_file.with_extension("audit.log")
    }

    /// Create the parent directory of the backing file if it is missing
    pub fn ensure_parent_dir(&self) -> Result<(), QuillError> {
        if let Some(parent) = self.quotes_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    QuillError::Config(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }
}

/// Temp file used for atomic writes: `<path>.tmp` in the same directory
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("quill"));
    name.push(".tmp");
    path.with_file_name(name)
}
