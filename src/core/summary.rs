//! Rolling summary calculator.
//!
//! One backward scan over the history picks a baseline snapshot per window;
//! the summary deltas are the latest total minus each baseline total.

use time::Duration;

use crate::core::schema::{Snapshot, Summary};
use crate::{StatsError, StatsResult};

/// Rolling window configuration.
///
/// A candidate snapshot qualifies for a window when the elapsed time back to
/// it is strictly less than the window period plus `buffer`. The buffer
/// absorbs sampling jitter: a collector firing a few minutes late still lands
/// in the intended bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindows {
    pub daily: Duration,
    pub weekly: Duration,
    pub monthly: Duration,
    pub buffer: Duration,
}

impl Default for SummaryWindows {
    fn default() -> Self {
        SummaryWindows {
            daily: Duration::hours(24),
            weekly: Duration::hours(24 * 7),
            monthly: Duration::hours(24 * 30),
            buffer: Duration::hours(1),
        }
    }
}

impl SummaryWindows {
    /// Validated constructor. The windows must nest (`daily < weekly <
    /// monthly`) for the tightest-first cascade in [`compute`] to make sense,
    /// and the buffer must not be negative.
    pub fn new(
        daily: Duration,
        weekly: Duration,
        monthly: Duration,
        buffer: Duration,
    ) -> StatsResult<Self> {
        if daily <= Duration::ZERO {
            return Err(StatsError::InvalidWindows(
                "daily window must be positive".to_string(),
            ));
        }
        if daily >= weekly || weekly >= monthly {
            return Err(StatsError::InvalidWindows(format!(
                "windows must nest: daily {}s < weekly {}s < monthly {}s",
                daily.whole_seconds(),
                weekly.whole_seconds(),
                monthly.whole_seconds()
            )));
        }
        if buffer < Duration::ZERO {
            return Err(StatsError::InvalidWindows(
                "buffer must not be negative".to_string(),
            ));
        }
        Ok(SummaryWindows {
            daily,
            weekly,
            monthly,
            buffer,
        })
    }

    fn daily_threshold(&self) -> i64 {
        (self.daily + self.buffer).whole_seconds()
    }

    fn weekly_threshold(&self) -> i64 {
        (self.weekly + self.buffer).whole_seconds()
    }

    fn monthly_threshold(&self) -> i64 {
        (self.monthly + self.buffer).whole_seconds()
    }
}

/// Compute the [`Summary`] for the newest snapshot in `history`.
///
/// Returns `None` for an empty history. The scan walks backward from the
/// second-newest snapshot; every candidate inside a window overwrites that
/// window's baseline (and the baselines of every looser window it also falls
/// inside), so the oldest qualifying snapshot wins each window. A candidate
/// at or past the monthly threshold ends the scan: timestamps are
/// non-decreasing, so nothing older can qualify for any window.
pub fn compute(history: &[Snapshot], windows: &SummaryWindows) -> Option<Summary> {
    let latest = history.last()?;

    let daily_threshold = windows.daily_threshold();
    let weekly_threshold = windows.weekly_threshold();
    let monthly_threshold = windows.monthly_threshold();

    let mut daily_start = latest;
    let mut weekly_start = latest;
    let mut monthly_start = latest;

    for candidate in history[..history.len() - 1].iter().rev() {
        let elapsed = latest.timestamp_seconds - candidate.timestamp_seconds;
        if elapsed >= monthly_threshold {
            break;
        }
        if elapsed < daily_threshold {
            daily_start = candidate;
            weekly_start = candidate;
            monthly_start = candidate;
        } else if elapsed < weekly_threshold {
            weekly_start = candidate;
            monthly_start = candidate;
        } else {
            monthly_start = candidate;
        }
    }

    Some(Summary {
        latest_total_downloads: latest.total_download_count,
        daily_total_downloads: latest.total_download_count - daily_start.total_download_count,
        weekly_total_downloads: latest.total_download_count - weekly_start.total_download_count,
        monthly_total_downloads: latest.total_download_count - monthly_start.total_download_count,
    })
}
