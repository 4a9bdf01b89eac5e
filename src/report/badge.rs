//! shields.io endpoint files for the summary counters.
//!
//! Each counter becomes one small JSON document consumable by
//! <https://img.shields.io/endpoint>, written under the repository's
//! `shieldsio/` directory.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::schema::Summary;
use crate::report::format::si_number;
use crate::{StatsError, StatsResult};

/// Response document of the shields.io endpoint schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldsResponse {
    pub schema_version: u32,
    pub label: String,
    pub message: String,
    pub color: String,
    pub named_logo: String,
}

impl ShieldsResponse {
    /// Badge for one download counter. `suffix` is `""`, `"/day"`, `"/week"`
    /// or `"/month"`.
    pub fn downloads(value: i64, suffix: &str) -> Self {
        ShieldsResponse {
            schema_version: 1,
            label: "downloads".to_string(),
            message: format!("{}{suffix}", si_number(value, 1)),
            color: "brightgreen".to_string(),
            named_logo: "github".to_string(),
        }
    }
}

/// Write the four endpoint files (total, daily, weekly, monthly) into
/// `shields_dir`, creating it as needed.
pub fn write_badges(summary: &Summary, shields_dir: &Path) -> StatsResult<()> {
    let endpoints = [
        ("total.json", summary.latest_total_downloads, ""),
        ("daily.json", summary.daily_total_downloads, "/day"),
        ("weekly.json", summary.weekly_total_downloads, "/week"),
        ("monthly.json", summary.monthly_total_downloads, "/month"),
    ];

    fs::create_dir_all(shields_dir).map_err(|e| {
        StatsError::Message(format!("failed to create {}: {e}", shields_dir.display()))
    })?;

    for (file_name, value, suffix) in endpoints {
        let badge = ShieldsResponse::downloads(value, suffix);
        let json = serde_json::to_string(&badge)
            .map_err(|e| StatsError::Message(format!("failed to serialize badge: {e}")))?;
        let path = shields_dir.join(file_name);
        fs::write(&path, json)
            .map_err(|e| StatsError::Message(format!("failed to write {}: {e}", path.display())))?;
    }

    Ok(())
}
