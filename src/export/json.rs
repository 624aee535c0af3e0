//! JSON export functionality

use std::path::Path;

use crate::error::{QuillError, QuillResult};
use crate::models::{PlainQuote, Quote, StoredQuote};
use crate::storage::write_json_atomic;

/// Export quotes with readable text fields
pub fn export_plain_json(quotes: &[Quote], path: &Path) -> QuillResult<()> {
    let plain: Vec<PlainQuote> = quotes.iter().map(Quote::to_plain).collect();
    write_json_atomic(path, &plain).map_err(|e| QuillError::Export(e.to_string()))
}

/// Export quotes in the obfuscated storage shape
pub fn export_encoded_json(quotes: &[Quote], path: &Path) -> QuillResult<()> {
    let stored: Vec<StoredQuote> = quotes.iter().map(Quote::to_stored).collect();
    write_json_atomic(path, &stored).map_err(|e| QuillError::Export(e.to_string()))
}
