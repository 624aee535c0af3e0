//! Service layer for Quill
//!
//! The service layer sits on top of the store, handling persistence and
//! audit logging for every mutation.

pub mod quote;

pub use quote::{EditOutcome, QuoteService};
