//! Core aggregation engine for release download stats.
//!
//! This module contains the canonical stats schema, the snapshot builder,
//! the rolling summary calculator and the aggregation session tying them
//! together.

pub mod schema;
pub mod session;
pub mod snapshot;
pub mod summary;

// Re-export key types for convenience
pub use schema::{Asset, Release, ReleaseStats, RepoId, Snapshot, Summary};
pub use summary::SummaryWindows;
