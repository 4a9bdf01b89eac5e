//! JSON persistence for release stats.
//!
//! Each tracked repository owns one directory under the base directory,
//! `{basedir}/{owner}/{repo}/`, holding `stats.json` plus the derived badge
//! endpoints and charts.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::schema::{ReleaseStats, RepoId};
use crate::{StatsError, StatsResult};

/// Store for per-repository stats files under one base directory.
#[derive(Debug, Clone)]
pub struct StatsStore {
    basedir: PathBuf,
}

impl StatsStore {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        StatsStore {
            basedir: basedir.into(),
        }
    }

    /// Directory holding every artifact for one repository.
    pub fn repo_dir(&self, repo: &RepoId) -> PathBuf {
        self.basedir.join(&repo.owner).join(&repo.repo)
    }

    /// Path of the stats file for one repository.
    pub fn stats_path(&self, repo: &RepoId) -> PathBuf {
        self.repo_dir(repo).join("stats.json")
    }

    /// Directory for the shields.io endpoint files.
    pub fn shields_dir(&self, repo: &RepoId) -> PathBuf {
        self.repo_dir(repo).join("shieldsio")
    }

    /// Load stats for `repo`, or initialize an empty log carrying the
    /// identity when nothing has been collected yet.
    pub fn load_or_init(&self, repo: &RepoId) -> StatsResult<ReleaseStats> {
        if !self.stats_path(repo).exists() {
            return Ok(ReleaseStats::new(repo.clone()));
        }
        self.load(repo)
    }

    /// Load stats for `repo`; the file must exist.
    pub fn load(&self, repo: &RepoId) -> StatsResult<ReleaseStats> {
        let path = self.stats_path(repo);
        let data = fs::read_to_string(&path)
            .map_err(|e| StatsError::Message(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&data)
            .map_err(|e| StatsError::Message(format!("failed to parse {}: {e}", path.display())))
    }

    /// Write the stats, creating the repository directory as needed.
    ///
    /// The JSON goes to a tempfile in the target directory first and is then
    /// persisted over `stats.json`, so an interrupted run cannot truncate an
    /// existing history.
    pub fn save(&self, stats: &ReleaseStats) -> StatsResult<()> {
        let dir = self.repo_dir(&stats.repo);
        fs::create_dir_all(&dir)
            .map_err(|e| StatsError::Message(format!("failed to create {}: {e}", dir.display())))?;

        let json = serde_json::to_string_pretty(stats)
            .map_err(|e| StatsError::Message(format!("failed to serialize stats: {e}")))?;

        let path = self.stats_path(&stats.repo);
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| {
            StatsError::Message(format!("failed to create tempfile in {}: {e}", dir.display()))
        })?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| StatsError::Message(format!("failed to write stats: {e}")))?;
        tmp.persist(&path)
            .map_err(|e| StatsError::Message(format!("failed to persist {}: {e}", path.display())))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Snapshot;

    fn repo() -> RepoId {
        RepoId::new("octo", "spoon")
    }

    #[test]
    fn test_load_or_init_fresh_repo() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path());

        let stats = store.load_or_init(&repo()).unwrap();

        assert_eq!(stats.repo, repo());
        assert!(stats.history.is_empty());
        assert!(stats.summary.is_none());
        // Nothing touched the filesystem yet
        assert!(!store.stats_path(&repo()).exists());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path());

        let mut stats = ReleaseStats::new(repo());
        stats.history.push(Snapshot {
            timestamp_seconds: 1_700_000_000,
            releases: Vec::new(),
            total_download_count: 12,
        });
        store.save(&stats).unwrap();

        assert!(store.stats_path(&repo()).exists());
        let loaded = store.load(&repo()).unwrap();
        assert_eq!(loaded, stats);
        let again = store.load_or_init(&repo()).unwrap();
        assert_eq!(again, stats);
    }

    #[test]
    fn test_save_is_byte_stable() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path());

        let mut stats = ReleaseStats::new(repo());
        stats.history.push(Snapshot {
            timestamp_seconds: 100,
            releases: Vec::new(),
            total_download_count: 3,
        });
        store.save(&stats).unwrap();
        let first = std::fs::read(store.stats_path(&repo())).unwrap();

        let loaded = store.load(&repo()).unwrap();
        store.save(&loaded).unwrap();
        let second = std::fs::read(store.stats_path(&repo())).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_paths_follow_owner_repo_layout() {
        let store = StatsStore::new("/data");
        let repo = RepoId::new("octo", "spoon");

        assert_eq!(
            store.stats_path(&repo),
            PathBuf::from("/data/octo/spoon/stats.json")
        );
        assert_eq!(
            store.shields_dir(&repo),
            PathBuf::from("/data/octo/spoon/shieldsio")
        );
    }

    #[test]
    fn test_corrupt_stats_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path());

        let path = store.stats_path(&repo());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let err = store.load(&repo()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        // load_or_init must not silently reset a corrupt file
        assert!(store.load_or_init(&repo()).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(dir.path());
        let err = store.load(&repo()).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
