//! Reporting module for the derived download stats.
//!
//! This module provides:
//! - SI-prefixed number rendering shared by badges and the CLI
//! - shields.io endpoint JSON for README badges
//! - Light and dark SVG trend charts of the download history

pub mod badge;
pub mod chart;
pub mod format;

// Re-export key types
pub use badge::{ShieldsResponse, write_badges};
pub use chart::{ChartMode, render_chart, write_chart};
pub use format::si_number;
