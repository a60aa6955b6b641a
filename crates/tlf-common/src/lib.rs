//! Shared utilities for TLF crates.
//!
//! This crate provides the Polars helpers used to read subject and event
//! columns into plain Rust values.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{any_to_string, any_to_text, column_texts, find_column, format_numeric};
