//! Display formatting for terminal output

pub mod history;
pub mod quote;

pub use history::format_history;
pub use quote::{format_quote_list, format_raw_preview, format_search_results};
