//! Audit entry data structures

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Quote;

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Edit,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "ADD"),
            Operation::Edit => write!(f, "EDIT"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// One change to the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change was saved (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Slug of the quote after the change
    pub slug: String,

    /// Slug before an edit that changed the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_slug: Option<String>,

    /// Fields an edit changed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl AuditEntry {
    fn now(operation: Operation, quote: &Quote) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            slug: quote.slug().to_string(),
            previous_slug: None,
            fields: Vec::new(),
        }
    }

    /// Entry for a newly added quote
    pub fn added(quote: &Quote) -> Self {
        Self::now(Operation::Add, quote)
    }

    /// Entry for an edit from `before` to `after`
    pub fn edited(before: &Quote, after: &Quote) -> Self {
        let mut entry = Self::now(Operation::Edit, after);
        if before.slug() != after.slug() {
            entry.previous_slug = Some(before.slug().to_string());
        }
        entry.fields = changed_fields(before, after)
            .into_iter()
            .map(String::from)
            .collect();
        entry
    }

    /// Entry for a deleted quote
    pub fn deleted(quote: &Quote) -> Self {
        Self::now(Operation::Delete, quote)
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<6} {}",
            self.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            self.operation.to_string(),
            self.slug
        )?;
        if let Some(previous) = &self.previous_slug {
            write!(f, " (was {})", previous)?;
        }
        if !self.fields.is_empty() {
            write!(f, " [{}]", self.fields.join(", "))?;
        }
        Ok(())
    }
}

/// Names of the user-editable fields that differ between two versions
pub fn changed_fields(before: &Quote, after: &Quote) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if before.body() != after.body() {
        fields.push("quote");
    }
    if before.author() != after.author() {
        fields.push("author");
    }
    if before.context() != after.context() {
        fields.push("context");
    }
    if before.tags() != after.tags() {
        fields.push("tags");
    }
    fields
}
