//! Append-only audit log file

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{QuillError, QuillResult};

use super::entry::AuditEntry;

/// Writes audit entries as JSON lines and reads them back
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a single line
    pub fn append(&self, entry: &AuditEntry) -> QuillResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| QuillError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| {
                QuillError::Io(format!(
                    "Failed to append to {}: {}",
                    self.log_path.display(),
                    e
                ))
            })
    }

    /// Every entry, oldest first; a missing log has none
    pub fn entries(&self) -> QuillResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(QuillError::Io(format!(
                    "Failed to read {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| {
                    QuillError::Json(format!("Bad audit entry on line {}: {}", i + 1, e))
                })
            })
            .collect()
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> QuillResult<Vec<AuditEntry>> {
        let mut entries = self.entries()?;
        let skip = entries.len().saturating_sub(count);
        entries.drain(..skip);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::Quote;
    use tempfile::TempDir;

    fn logger() -> (TempDir, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("quotes.audit.log"));
        (temp_dir, logger)
    }

    fn quote(body: &str) -> Quote {
        Quote::with_date(body, "A", "", vec![], "2024-01-01").unwrap()
    }

    #[test]
    fn test_missing_log_is_empty() {
        let (_temp_dir, logger) = logger();
        assert!(logger.entries().unwrap().is_empty());
        assert!(logger.recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_append_one_line_each() {
        let (temp_dir, logger) = logger();
        logger.append(&AuditEntry::added(&quote("one"))).unwrap();
        logger.append(&AuditEntry::deleted(&quote("one"))).unwrap();

        let contents = fs::read_to_string(temp_dir.path().join("quotes.audit.log")).unwrap();
        assert_eq!(contents.lines().count(), 2);

        let entries = logger.entries().unwrap();
        assert_eq!(entries[0].operation, Operation::Add);
        assert_eq!(entries[1].operation, Operation::Delete);
    }

    #[test]
    fn test_recent_keeps_newest() {
        let (_temp_dir, logger) = logger();
        for i in 0..5 {
            logger
                .append(&AuditEntry::added(&quote(&format!("quote {}", i))))
                .unwrap();
        }

        let recent = logger.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].slug, quote("quote 4").slug().as_str());
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let (temp_dir, logger) = logger();
        logger.append(&AuditEntry::added(&quote("one"))).unwrap();
        let path = temp_dir.path().join("quotes.audit.log");
        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("not json\n");
        fs::write(&path, contents).unwrap();

        let err = logger.entries().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
