//! Quote display formatting
//!
//! Listings number quotes by their 1-based display position, which is also
//! accepted wherever a slug is.

use std::path::Path;

use crate::models::Quote;
use crate::storage::RawPreview;

fn format_numbered(position: usize, quote: &Quote) -> String {
    format!("{:2}. {}\n", position, quote)
}

/// Format every quote with its display position
pub fn format_quote_list(quotes: &[Quote]) -> String {
    if quotes.is_empty() {
        return "No quotes found.\n".to_string();
    }

    let mut output = format!("\n=== All Quotes ({}) ===\n", quotes.len());
    for (i, quote) in quotes.iter().enumerate() {
        output.push_str(&format_numbered(i + 1, quote));
    }
    output
}

/// Format search matches, keeping their original positions
pub fn format_search_results(query: &str, results: &[(usize, &Quote)]) -> String {
    if results.is_empty() {
        return format!("No quotes found matching '{}'\n", query);
    }

    let mut output = format!(
        "\n=== Search Results for '{}' ({}) ===\n",
        query,
        results.len()
    );
    for (position, quote) in results {
        output.push_str(&format_numbered(*position, quote));
    }
    output
}

/// Format the head of the backing file, with `...` when it was cut short
pub fn format_raw_preview(path: &Path, preview: Option<&RawPreview>) -> String {
    let Some(preview) = preview else {
        return "No file exists yet.\n".to_string();
    };

    let mut output = format!("\n=== Raw File Content ({}) ===\n", path.display());
    for line in &preview.lines {
        output.push_str(line);
        output.push('\n');
    }
    if preview.truncated {
        output.push_str("...\n");
    }
    output
}
