//! Content-derived quote identifiers
//!
//! A slug is the first 12 hex characters of the SHA-256 digest of the quote
//! body. Identical bodies share a slug.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters kept from the digest
pub const SLUG_LEN: usize = 12;

/// Short identifier derived from a quote body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive the slug for a quote body
    pub fn from_body(body: &str) -> Self {
        let digest = Sha256::digest(body.as_bytes());
        let mut hex = hex::encode(digest);
        hex.truncate(SLUG_LEN);
        Self(hex)
    }

    /// Wrap a slug read from storage without recomputing it
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the slug text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
