//! Quill - Terminal-based personal quote collection manager
//!
//! This library provides the core functionality for Quill. Quotes are kept
//! in a single JSON file whose text fields are base64 encoded, so the file
//! does not read as plain text. Each quote is identified by a short slug
//! derived from its text.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Backing file and derived path management
//! - `error`: Custom error types
//! - `models`: Core data models (quotes, tags, slugs)
//! - `obfuscation`: Field encoding for the backing file
//! - `storage`: JSON file storage layer
//! - `services`: Mutations with immediate save
//! - `audit`: Audit logging system
//! - `export`: Text and JSON exports
//! - `display`: Listing and preview formatting
//! - `cli`: Interactive command loop
//!
//! # Example
//!
//! ```rust,ignore
//! use quill::cli::Shell;
//! use quill::config::QuillPaths;
//! use quill::storage::QuoteStore;
//!
//! let paths = QuillPaths::new("quotes.json");
//! let store = QuoteStore::load(paths.quotes_file())?;
//! Shell::new(store, paths, std::io::stdin().lock(), std::io::stdout()).run()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod obfuscation;
pub mod services;
pub mod storage;

pub use error::QuillError;
