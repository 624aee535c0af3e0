//! Change history formatting

use crate::audit::AuditEntry;

/// Format audit entries, oldest first
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No changes recorded yet.\n".to_string();
    }

    let mut output = format!("\n=== Recent Changes ({}) ===\n", entries.len());
    for entry in entries {
        output.push_str(&entry.to_string());
        output.push('\n');
    }
    output
}
