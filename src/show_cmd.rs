//! CLI command handler for `show`.
//!
//! Prints the latest summary of a tracked repository in human-readable form.

use std::path::PathBuf;

use crate::config::Config;
use crate::core::schema::{ReleaseStats, RepoId};
use crate::report::format::si_number;
use crate::storage::StatsStore;
use crate::StatsResult;

/// Run the `show` command.
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
    print!("{}", render(&stats));
    Ok(())
}

/// Render the summary as the text block `show` prints.
fn render(stats: &ReleaseStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", stats.repo));
    out.push_str(&format!("history entries: {}\n", stats.history.len()));
    if let Some(latest) = stats.latest() {
        let when = latest
            .timestamp_utc()
            .unwrap_or_else(|| latest.timestamp_seconds.to_string());
        out.push_str(&format!("last sample:     {when}\n"));
    }

    match &stats.summary {
        Some(summary) => {
            let rows = [
                ("total downloads", summary.latest_total_downloads, ""),
                ("last day", summary.daily_total_downloads, "/day"),
                ("last week", summary.weekly_total_downloads, "/week"),
                ("last month", summary.monthly_total_downloads, "/month"),
            ];
            for (label, value, suffix) in rows {
                out.push_str(&format!(
                    "{label}: {value:>width$} ({}{suffix})\n",
                    si_number(value, 1),
                    width = 28usize.saturating_sub(label.len()),
                ));
            }
        }
        None => out.push_str("no summary yet; run `collect` first\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Snapshot, Summary};

    #[test]
    fn test_render_with_summary() {
        let mut stats = ReleaseStats::new(RepoId::new("octo", "spoon"));
        stats.history = vec![Snapshot {
            timestamp_seconds: 1_700_000_000,
            releases: Vec::new(),
            total_download_count: 125_000,
        }];
        stats.summary = Some(Summary {
            latest_total_downloads: 125_000,
            daily_total_downloads: 300,
            weekly_total_downloads: 2_100,
            monthly_total_downloads: -50,
        });

        let text = render(&stats);
        assert!(text.starts_with("octo/spoon\n"));
        assert!(text.contains("history entries: 1"));
        assert!(text.contains("last sample:     2023-11-14T22:13:20Z"));
        assert!(text.contains("(125k)"));
        assert!(text.contains("(300/day)"));
        assert!(text.contains("(2.1k/week)"));
        assert!(text.contains("(-50/month)"));
    }

    #[test]
    fn test_render_without_summary() {
        let stats = ReleaseStats::new(RepoId::new("octo", "spoon"));
        let text = render(&stats);
        assert!(text.contains("history entries: 0"));
        assert!(text.contains("no summary yet"));
    }
}
