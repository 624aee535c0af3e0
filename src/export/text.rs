//! Plain text export

use std::path::Path;

use crate::error::{QuillError, QuillResult};
use crate::models::Quote;
use crate::storage::write_text_atomic;

/// Render each quote's display line followed by a blank line
pub fn render_text(quotes: &[Quote]) -> String {
    quotes.iter().map(|q| format!("{}\n\n", q)).collect()
}

/// Write the text rendering to `path`
pub fn export_text(quotes: &[Quote], path: &Path) -> QuillResult<()> {
    write_text_atomic(path, &render_text(quotes)).map_err(|e| QuillError::Export(e.to_string()))
}
