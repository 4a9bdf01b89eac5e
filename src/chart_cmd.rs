//! CLI command handler for `chart`.
//!
//! Renders the light and dark SVG trend charts from an existing stats.json.

use std::path::PathBuf;

use crate::config::Config;
use crate::core::schema::RepoId;
use crate::report::chart::{ChartMode, write_chart};
use crate::storage::StatsStore;
use crate::StatsResult;

/// Run the `chart` command.
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
    for mode in [ChartMode::Light, ChartMode::Dark] {
        let path = store.repo_dir(&repo_id).join(mode.file_name());
        write_chart(&stats, mode, &path)?;
        eprintln!("Wrote chart to {}", path.display());
    }
    Ok(())
}
