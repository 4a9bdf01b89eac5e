//! Storage layer for release stats.
//!
//! This module provides persistence for `ReleaseStats` data: the canonical
//! per-repository stats.json plus a CSV export of the history.

pub mod csv;
pub mod json;

// Re-export key types
pub use csv::{CSV_HEADERS, CsvExporter};
pub use json::StatsStore;
