//! CLI command handler for `collect`.
//!
//! Ingests one release listing, appends a snapshot to the history and
//! rewrites stats.json plus the shields.io badge endpoints.

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::core::schema::RepoId;
use crate::core::session;
use crate::listing;
use crate::report::badge::write_badges;
use crate::storage::StatsStore;
use crate::StatsResult;

/// Run the `collect` command.
///
/// # Arguments
/// * `owner`, `repo` - Repository identity the sample belongs to
/// * `listing_path` - JSON release listing; `-` reads stdin
/// * `basedir` - Base directory override
/// * `timestamp` - Sample time override in unix seconds (defaults to now)
/// * `config_path` - Optional TOML config file
pub fn run(
    owner: String,
    repo: String,
    listing_path: PathBuf,
    basedir: Option<PathBuf>,
    timestamp: Option<i64>,
    config_path: Option<PathBuf>,
) -> StatsResult<()> {
    let config = Config::load_or_default(config_path.as_deref())?;
    let windows = config.windows.to_windows()?;
    let repo_id = RepoId::new(owner, repo);
    let store = StatsStore::new(config.resolve_basedir(basedir));

    info!("loading listing");
    let releases = if listing_path.as_os_str() == "-" {
        listing::from_reader(std::io::stdin().lock())?
    } else {
        listing::load(&listing_path)?
    };

    let mut stats = store.load_or_init(&repo_id)?;
    let sample_time = timestamp.unwrap_or_else(now_unix);

    info!(
        releases = releases.len(),
        sample_time, "appending snapshot"
    );
    session::run(&mut stats, &repo_id, &releases, sample_time, &windows)?;

    store.save(&stats)?;
    if let Some(summary) = &stats.summary {
        write_badges(summary, &store.shields_dir(&repo_id))?;
    }

    info!(
        path = %store.stats_path(&repo_id).display(),
        entries = stats.history.len(),
        total = stats.summary.map(|s| s.latest_total_downloads).unwrap_or(0),
        "stats updated"
    );
    Ok(())
}

fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
