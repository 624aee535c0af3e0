//! Quote service
//!
//! Mutating operations on the quote collection. Every successful mutation is
//! saved immediately and recorded in the audit log.

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{QuillError, QuillResult};
use crate::models::{Quote, QuoteUpdate};
use crate::storage::QuoteStore;

/// Result of an edit
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The quote after the edit
    pub quote: Quote,
    /// Whether any field actually changed
    pub changed: bool,
}

/// Service for quote management
pub struct QuoteService<'a> {
    store: &'a mut QuoteStore,
    audit: &'a AuditLogger,
}

impl<'a> QuoteService<'a> {
    /// Create a new quote service
    pub fn new(store: &'a mut QuoteStore, audit: &'a AuditLogger) -> Self {
        Self { store, audit }
    }

    /// Append a quote and save
    ///
    /// If the save fails the quote stays in memory and the storage error is
    /// returned; [`QuoteService::save`] retries.
    pub fn add(&mut self, quote: Quote) -> QuillResult<Quote> {
        self.store.push(quote.clone());
        self.store.save()?;

        self.record(AuditEntry::added(&quote));

        Ok(quote)
    }

    /// Delete the quote at a display position or with a slug, and save
    pub fn delete(&mut self, key: &str) -> QuillResult<Quote> {
        let index = self
            .store
            .position_of(key)
            .ok_or_else(|| QuillError::quote_not_found(key.trim()))?;

        let removed = self
            .store
            .remove(index)
            .ok_or_else(|| QuillError::quote_not_found(key.trim()))?;
        self.store.save()?;

        self.record(AuditEntry::deleted(&removed));

        Ok(removed)
    }

    /// Apply an edit to the quote at a display position or with a slug
    ///
    /// Nothing is saved when the update leaves every field as it was.
    pub fn edit(&mut self, key: &str, update: QuoteUpdate) -> QuillResult<EditOutcome> {
        let index = self
            .store
            .position_of(key)
            .ok_or_else(|| QuillError::quote_not_found(key.trim()))?;

        let quote = self
            .store
            .get_mut(index)
            .ok_or_else(|| QuillError::quote_not_found(key.trim()))?;

        let before = quote.clone();
        let changed = quote.apply(update)?;
        let after = quote.clone();

        if !changed {
            return Ok(EditOutcome {
                quote: after,
                changed,
            });
        }

        self.store.save()?;

        self.record(AuditEntry::edited(&before, &after));

        Ok(EditOutcome {
            quote: after,
            changed,
        })
    }

    /// Save the collection as it is in memory
    pub fn save(&self) -> QuillResult<()> {
        self.store.save()
    }

    fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.append(&entry) {
            eprintln!("Warning: failed to write audit log: {}", e);
        }
    }
}
