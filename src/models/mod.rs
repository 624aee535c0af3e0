//! Core data models for Quill
//!
//! Quotes, their tags and their content-derived identifiers.

pub mod quote;
pub mod slug;
pub mod tag;

pub use quote::{today, PlainQuote, Quote, QuoteUpdate, StoredQuote};
pub use slug::Slug;
pub use tag::{parse_tag_list, parse_tags, Tag};
