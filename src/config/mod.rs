//! Configuration module for Quill
//!
//! Resolves the backing quote file and every path derived from it
//! (exports, audit log, temp files).

pub mod paths;

pub use paths::{QuillPaths, DEFAULT_QUOTES_FILE, QUOTES_FILE_ENV};
