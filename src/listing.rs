//! Inbound release listings.
//!
//! A listing is a JSON array in the GitHub REST `releases` shape; how it was
//! fetched is not this crate's concern (`gh api repos/{owner}/{repo}/releases`
//! produces one). Unknown fields are ignored, and the fields the snapshot
//! builder validates are optional here so malformed input fails with a
//! targeted error rather than a deserializer one.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{StatsError, StatsResult};

/// One release as listed upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRelease {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets: Vec<RawAsset>,
}

/// One downloadable asset as listed upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAsset {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub download_count: Option<i64>,
}

/// Parse a listing from any reader.
pub fn from_reader<R: Read>(reader: R) -> StatsResult<Vec<RawRelease>> {
    serde_json::from_reader(reader)
        .map_err(|e| StatsError::InvalidListing(format!("failed to parse listing: {e}")))
}

/// Load a listing from a JSON file.
pub fn load(path: &Path) -> StatsResult<Vec<RawRelease>> {
    let data = fs::read_to_string(path)
        .map_err(|e| StatsError::Message(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&data)
        .map_err(|e| StatsError::InvalidListing(format!("failed to parse {}: {e}", path.display())))
}
