//! Canonical on-disk schema for release download stats.
//!
//! Field names serialize in camelCase (`timestampSeconds`, `totalDownloadCount`,
//! ...) so stats.json files stay readable by the badge and chart tooling that
//! consumes them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One downloadable artifact attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Identifier, unique within the owning release.
    pub id: i64,

    /// Display name as published. Not necessarily unique.
    #[serde(default)]
    pub name: String,

    /// Cumulative download count observed at sampling time.
    #[serde(default)]
    pub download_count: i64,
}

/// One published release together with its assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Identifier, unique within the project.
    pub id: i64,

    #[serde(default)]
    pub tag_name: String,

    /// Assets in listing order.
    #[serde(default)]
    pub assets: Vec<Asset>,

    /// Sum of `assets[*].download_count`. Derived by the snapshot builder,
    /// never set independently.
    #[serde(default)]
    pub total_download_count: i64,
}

/// One timestamped observation of every release and asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Unix time the sample was taken. History entries are non-decreasing in
    /// this field.
    pub timestamp_seconds: i64,

    /// Releases as observed at that time, in listing order.
    #[serde(default)]
    pub releases: Vec<Release>,

    /// Sum of `releases[*].total_download_count`. Derived by the snapshot
    /// builder.
    #[serde(default)]
    pub total_download_count: i64,
}

impl Snapshot {
    /// RFC 3339 rendering of the sample time, UTC.
    pub fn timestamp_utc(&self) -> Option<String> {
        time::OffsetDateTime::from_unix_timestamp(self.timestamp_seconds)
            .ok()
            .and_then(|t| {
                t.format(&time::format_description::well_known::Rfc3339)
                    .ok()
            })
    }
}

/// Rolling download totals derived from the history, recomputed in full on
/// every append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total downloads in the newest snapshot.
    pub latest_total_downloads: i64,

    /// Downloads gained over the daily window. Deltas can go negative when
    /// upstream counts shrink (deleted releases or assets); they are
    /// surfaced as-is.
    #[serde(default)]
    pub daily_total_downloads: i64,

    #[serde(default)]
    pub weekly_total_downloads: i64,

    #[serde(default)]
    pub monthly_total_downloads: i64,
}

/// Identity of the tracked repository. Fixed when the stats file is first
/// created and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The full persisted aggregate: identity, append-only snapshot history and
/// the summary for the newest snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseStats {
    pub repo: RepoId,

    /// Snapshots in append order, timestamps non-decreasing.
    #[serde(default)]
    pub history: Vec<Snapshot>,

    /// Absent until the first snapshot lands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

impl ReleaseStats {
    /// Empty stats for a repository that has never been sampled.
    pub fn new(repo: RepoId) -> Self {
        ReleaseStats {
            repo,
            history: Vec::new(),
            summary: None,
        }
    }

    /// The most recently appended snapshot, if any.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.history.last()
    }
}
