//! Aggregation session: fold one sample into the stats.
//!
//! Validation happens before any mutation, so a failed session leaves the
//! stats exactly as they were.

use crate::core::schema::{ReleaseStats, RepoId};
use crate::core::snapshot;
use crate::core::summary::{self, SummaryWindows};
use crate::listing::RawRelease;
use crate::{StatsError, StatsResult};

/// Append the sample described by `listing` at `sample_time` and recompute
/// the summary over the grown history.
///
/// The stats must belong to `repo`, and `sample_time` must not predate the
/// newest history entry (equal timestamps are allowed). Existing entries are
/// never reordered or rewritten.
pub fn run(
    stats: &mut ReleaseStats,
    repo: &RepoId,
    listing: &[RawRelease],
    sample_time: i64,
    windows: &SummaryWindows,
) -> StatsResult<()> {
    if stats.repo != *repo {
        return Err(StatsError::RepoMismatch {
            expected: repo.clone(),
            found: stats.repo.clone(),
        });
    }

    let snapshot = snapshot::build(sample_time, listing)?;

    if let Some(last) = stats.history.last() {
        if sample_time < last.timestamp_seconds {
            return Err(StatsError::SampleOutOfOrder {
                sample: sample_time,
                last: last.timestamp_seconds,
            });
        }
    }

    stats.history.push(snapshot);
    stats.summary = summary::compute(&stats.history, windows);
    Ok(())
}
