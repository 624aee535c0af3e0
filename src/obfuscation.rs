//! Reversible field obfuscation
//!
//! Quote text is stored as standard base64 so the backing file is not
//! readable at a glance. This is not encryption: anyone can decode it.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Encode a field for storage
pub fn encode_field(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a stored field
///
/// Values that are not valid base64, or that do not decode to UTF-8, are
/// returned unchanged. Older files may hold plain text.
pub fn decode_field(stored: &str) -> String {
    STANDARD
        .decode(stored)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| stored.to_string())
}
