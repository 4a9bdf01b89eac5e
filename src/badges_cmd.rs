//! CLI command handler for `badges`.
//!
//! Regenerates the shields.io endpoint files from an existing stats.json
//! without collecting a new sample.

use std::path::PathBuf;

use crate::config::Config;
use crate::core::schema::RepoId;
use crate::report::badge::write_badges;
use crate::storage::StatsStore;
use crate::{StatsError, StatsResult};

/// Run the `badges` command.
pub fn run(
    owner: String,
    repo: String,
    basedir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> StatsResult<()> {
    let config = Config::load_or_default(config_path.as_deref())?;
    let repo_id = RepoId::new(owner, repo);
    let store = StatsStore::new(config.resolve_basedir(basedir));

    let stats = store.load(&repo_id)?;
    let summary = stats.summary.as_ref().ok_or_else(|| {
        StatsError::Message(format!(
            "{repo_id} has no summary yet; run `collect` first"
        ))
    })?;

    let shields_dir = store.shields_dir(&repo_id);
    write_badges(summary, &shields_dir)?;
    eprintln!("Wrote badge endpoints to {}", shields_dir.display());
    Ok(())
}
