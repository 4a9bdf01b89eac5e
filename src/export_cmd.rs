//! CLI command handler for `export`.
//!
//! Flattens the snapshot history into CSV, to a file or stdout.

use std::path::PathBuf;

use crate::config::Config;
use crate::core::schema::RepoId;
use crate::storage::{CsvExporter, StatsStore};
use crate::StatsResult;

/// Run the `export` command. Writes to stdout when `output` is `None`.
pub fn run(
    owner: String,
    repo: String,
    basedir: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> StatsResult<()> {
    let config = Config::load_or_default(config_path.as_deref())?;
    let repo_id = RepoId::new(owner, repo);
    let store = StatsStore::new(config.resolve_basedir(basedir));

    let stats = store.load(&repo_id)?;
    let exporter = CsvExporter::new();
    match output {
        Some(path) => {
            exporter.export(&stats.history, &path)?;
            eprintln!(
                "Exported {} snapshot(s) to {}",
                stats.history.len(),
                path.display()
            );
        }
        None => exporter.export_to_stdout(&stats.history)?,
    }
    Ok(())
}
