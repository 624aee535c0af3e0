//! Storage layer for Quill
//!
//! Holds the quote collection in memory, in file order, and synchronizes it
//! with a single JSON backing file using atomic writes.

pub mod file_io;

pub use file_io::{read_head_lines, read_json, write_json_atomic, write_text_atomic};

use std::path::{Path, PathBuf};

use crate::error::QuillError;
use crate::models::{Quote, StoredQuote};

/// First lines of the backing file as stored on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPreview {
    pub lines: Vec<String>,
    pub truncated: bool,
}

/// The in-memory quote collection and its backing file
#[derive(Debug)]
pub struct QuoteStore {
    path: PathBuf,
    quotes: Vec<Quote>,
    existed: bool,
    load_warnings: Vec<String>,
}

impl QuoteStore {
    /// Create an empty store bound to `path` without touching the disk
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quotes: Vec::new(),
            existed: false,
            load_warnings: Vec::new(),
        }
    }

    /// Load quotes from disk
    ///
    /// A missing file yields an empty store; it is created on the first save.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, QuillError> {
        let mut store = Self::empty(path);

        let Some(stored) = read_json::<Vec<StoredQuote>, _>(&store.path)? else {
            return Ok(store);
        };

        store.existed = true;
        for record in stored {
            let (quote, rejected) = Quote::from_stored(record);
            for name in rejected {
                store
                    .load_warnings
                    .push(format!("Skipping invalid tag '{}'", name));
            }
            store.quotes.push(quote);
        }

        Ok(store)
    }

    /// Save all quotes to disk in their current order
    pub fn save(&self) -> Result<(), QuillError> {
        let stored: Vec<StoredQuote> = self.quotes.iter().map(Quote::to_stored).collect();
        write_json_atomic(&self.path, &stored)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file existed when the store was loaded
    pub fn existed_on_load(&self) -> bool {
        self.existed
    }

    /// Warnings collected while decoding the backing file
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    /// All quotes in display order
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Resolve a display position or slug to a zero-based index
    ///
    /// All-digit input is a 1-based position; anything else is matched
    /// exactly against slugs and the first match wins.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        if key.chars().all(|c| c.is_ascii_digit()) {
            let position: usize = key.parse().ok()?;
            return (1..=self.quotes.len())
                .contains(&position)
                .then(|| position - 1);
        }

        self.quotes.iter().position(|q| q.slug() == key)
    }

    /// Find a quote by display position or slug
    pub fn find(&self, key: &str) -> Option<&Quote> {
        self.position_of(key).map(|i| &self.quotes[i])
    }

    /// Quotes whose body, author or context contain `query`, with 1-based positions
    pub fn search(&self, query: &str) -> Vec<(usize, &Quote)> {
        self.quotes
            .iter()
            .enumerate()
            .filter(|(_, q)| q.matches(query))
            .map(|(i, q)| (i + 1, q))
            .collect()
    }

    /// Append a quote to the end of the collection
    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Remove the quote at a zero-based index
    pub fn remove(&mut self, index: usize) -> Option<Quote> {
        (index < self.quotes.len()).then(|| self.quotes.remove(index))
    }

    /// Mutable access to the quote at a zero-based index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Quote> {
        self.quotes.get_mut(index)
    }

    /// First `limit` lines of the backing file as stored
    pub fn raw_preview(&self, limit: usize) -> Result<Option<RawPreview>, QuillError> {
        Ok(read_head_lines(&self.path, limit)?
            .map(|(lines, truncated)| RawPreview { lines, truncated }))
    }
}
