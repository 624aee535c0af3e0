//! Audit logging for Quill
//!
//! Every add, edit and delete appends one JSON line to a log next to the
//! backing quote file. Entries name quotes by slug and list which fields an
//! edit touched; quote text never reaches the log, so deleting a quote
//! removes its text from disk.
//!
//! # Example
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.append(&AuditEntry::added(&quote))?;
//! ```

mod entry;
mod logger;

pub use entry::{changed_fields, AuditEntry, Operation};
pub use logger::AuditLogger;
