//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::config::paths::temp_path_for;
use crate::error::QuillError;

/// Read JSON from a file, returning `None` if the file doesn't exist
///
/// A file that exists but does not parse as `T` is reported as
/// [`QuillError::CorruptStore`].
pub fn read_json<T, P>(path: P) -> Result<Option<T>, QuillError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| QuillError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| QuillError::CorruptStore {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), QuillError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), |writer| {
        serde_json::to_writer_pretty(&mut *writer, data)
            .map_err(|e| QuillError::Storage(format!("Failed to serialize data: {}", e)))?;
        writeln!(writer)
            .map_err(|e| QuillError::Storage(format!("Failed to write data: {}", e)))
    })
}

/// Write text to a file atomically
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), QuillError> {
    write_atomic(path.as_ref(), |writer| {
        writer
            .write_all(contents.as_bytes())
            .map_err(|e| QuillError::Storage(format!("Failed to write data: {}", e)))
    })
}

fn write_atomic<F>(path: &Path, fill: F) -> Result<(), QuillError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), QuillError>,
{
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                QuillError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| QuillError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    let written = fill(&mut writer).and_then(|_| {
        writer
            .flush()
            .map_err(|e| QuillError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| QuillError::Storage(format!("Failed to sync data: {}", e)))
    });

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        QuillError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// First `limit` lines of a text file, plus whether more lines follow
///
/// Returns `None` if the file doesn't exist.
pub fn read_head_lines<P: AsRef<Path>>(
    path: P,
    limit: usize,
) -> Result<Option<(Vec<String>, bool)>, QuillError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| QuillError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut lines = Vec::new();
    let mut truncated = false;

    for line in BufReader::new(file).lines() {
        let line = line
            .map_err(|e| QuillError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        if lines.len() == limit {
            truncated = true;
            break;
        }
        lines.push(line);
    }

    Ok(Some((lines, truncated)))
}
