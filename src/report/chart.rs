//! SVG trend charts of the download history.
//!
//! Renders a fixed 800x400 line chart of total downloads over time, in a
//! light and a dark palette, written next to stats.json so READMEs can embed
//! them directly.

use std::path::Path;

use time::{Date, Month, OffsetDateTime};

use crate::core::schema::ReleaseStats;
use crate::{StatsError, StatsResult};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_RIGHT: f64 = 70.0;
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// Months between consecutive x axis ticks.
const X_TICK_STEP_MONTHS: i32 = 6;

/// Chart palette selector; one SVG file per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    Light,
    Dark,
}

impl ChartMode {
    /// File name of the rendered chart inside the repository directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartMode::Light => "release_stats_chart_light.svg",
            ChartMode::Dark => "release_stats_chart_dark.svg",
        }
    }

    fn palette(self) -> Palette {
        match self {
            ChartMode::Light => Palette {
                bg: "#ffffff",
                text: "#333333",
                grid: "#dddddd",
                axis: "#666666",
                line: "#8884d8",
            },
            ChartMode::Dark => Palette {
                bg: "#1a1a1a",
                text: "#ffffff",
                grid: "#333333",
                axis: "#999999",
                line: "#bb86fc",
            },
        }
    }
}

struct Palette {
    bg: &'static str,
    text: &'static str,
    grid: &'static str,
    axis: &'static str,
    line: &'static str,
}

/// Render the chart for `stats` as an SVG document.
///
/// Fails on an empty history; a single snapshot renders as one point on the
/// left edge.
pub fn render_chart(stats: &ReleaseStats, mode: ChartMode) -> StatsResult<String> {
    let history = &stats.history;
    if history.is_empty() {
        return Err(StatsError::Message(format!(
            "no history to chart for {}",
            stats.repo
        )));
    }

    let chart_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    // History timestamps are non-decreasing, so first/last bound the x axis.
    let min_ts = history[0].timestamp_seconds;
    let max_ts = history[history.len() - 1].timestamp_seconds;
    let max_downloads = history
        .iter()
        .map(|s| s.total_download_count)
        .max()
        .unwrap_or(0);

    let x_span = ((max_ts - min_ts) as f64).max(1.0);
    let y_span = (max_downloads as f64).max(1.0);
    let x_scale = |ts: i64| MARGIN_LEFT + ((ts - min_ts) as f64 / x_span) * chart_width;
    let y_scale = |value: f64| MARGIN_TOP + chart_height - (value / y_span) * chart_height;

    let axis_bottom = HEIGHT - MARGIN_BOTTOM;
    let axis_right = WIDTH - MARGIN_RIGHT;
    let colors = mode.palette();

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg width=\"{WIDTH}\" height=\"{HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    ));
    svg.push_str("  <style>\n");
    svg.push_str(&format!("    .chart-bg {{ fill: {}; }}\n", colors.bg));
    svg.push_str(&format!(
        "    .chart-line {{ fill: none; stroke: {}; stroke-width: 1.5; }}\n",
        colors.line
    ));
    svg.push_str(&format!(
        "    .axis {{ stroke: {}; stroke-width: 2; }}\n",
        colors.axis
    ));
    svg.push_str(&format!(
        "    .grid {{ stroke: {}; stroke-dasharray: 2,2; }}\n",
        colors.grid
    ));
    svg.push_str(&format!(
        "    .axis-label {{ font-family: Arial, sans-serif; font-size: 12px; fill: {}; }}\n",
        colors.text
    ));
    svg.push_str(&format!(
        "    .title {{ font-family: Arial, sans-serif; font-size: 16px; font-weight: bold; fill: {}; }}\n",
        colors.text
    ));
    svg.push_str("  </style>\n");

    svg.push_str(&format!(
        "  <rect width=\"{WIDTH}\" height=\"{HEIGHT}\" class=\"chart-bg\" />\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"20\" text-anchor=\"middle\" class=\"title\">{} Release Stats: Total Downloads</text>\n",
        WIDTH / 2.0,
        xml_escape(&stats.repo.to_string())
    ));

    // Y axis (right)
    svg.push_str("  <!-- Y axis (right) -->\n");
    svg.push_str(&format!(
        "  <line x1=\"{axis_right}\" y1=\"{MARGIN_TOP}\" x2=\"{axis_right}\" y2=\"{axis_bottom}\" class=\"axis\" />\n"
    ));
    for quarter in 0..=4 {
        let tick = max_downloads as f64 * quarter as f64 / 4.0;
        let y = y_scale(tick);
        svg.push_str(&format!(
            "  <line x1=\"{MARGIN_LEFT}\" y1=\"{y}\" x2=\"{axis_right}\" y2=\"{y}\" class=\"grid\" />\n"
        ));
        svg.push_str(&format!(
            "  <line x1=\"{axis_right}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" class=\"axis\" />\n",
            axis_right + 5.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{y}\" dy=\".32em\" text-anchor=\"start\" class=\"axis-label\">{}</text>\n",
            axis_right + 10.0,
            axis_number(tick)
        ));
    }
    svg.push_str(&format!(
        "  <text x=\"{x}\" y=\"{y}\" transform=\"rotate(90 {x} {y})\" text-anchor=\"middle\" class=\"axis-label\">Total Downloads</text>\n",
        x = axis_right + 55.0,
        y = HEIGHT / 2.0
    ));

    // X axis
    svg.push_str("  <!-- X axis -->\n");
    svg.push_str(&format!(
        "  <line x1=\"{MARGIN_LEFT}\" y1=\"{axis_bottom}\" x2=\"{axis_right}\" y2=\"{axis_bottom}\" class=\"axis\" />\n"
    ));
    for tick in x_ticks(min_ts, max_ts)? {
        let x = x_scale(tick.unix_timestamp());
        svg.push_str(&format!(
            "  <line x1=\"{x}\" y1=\"{MARGIN_TOP}\" x2=\"{x}\" y2=\"{axis_bottom}\" class=\"grid\" />\n"
        ));
        svg.push_str(&format!(
            "  <line x1=\"{x}\" y1=\"{axis_bottom}\" x2=\"{x}\" y2=\"{}\" class=\"axis\" />\n",
            axis_bottom + 5.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{x}\" y=\"{}\" text-anchor=\"middle\" class=\"axis-label\">{}</text>\n",
            axis_bottom + 20.0,
            tick.date()
        ));
    }
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" class=\"axis-label\">Date</text>\n",
        WIDTH / 2.0,
        HEIGHT - 10.0
    ));

    // Data line
    svg.push_str("  <!-- Data line -->\n");
    let points: Vec<String> = history
        .iter()
        .map(|s| {
            format!(
                "{},{}",
                x_scale(s.timestamp_seconds),
                y_scale(s.total_download_count as f64)
            )
        })
        .collect();
    svg.push_str(&format!(
        "  <polyline points=\"{}\" class=\"chart-line\" />\n",
        points.join(" ")
    ));

    // Data points
    svg.push_str("  <!-- Data points -->\n");
    for snapshot in history {
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"2\" fill=\"{}\" />\n",
            x_scale(snapshot.timestamp_seconds),
            y_scale(snapshot.total_download_count as f64),
            colors.line
        ));
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Render the chart and write it to `path`.
pub fn write_chart(stats: &ReleaseStats, mode: ChartMode, path: &Path) -> StatsResult<()> {
    let svg = render_chart(stats, mode)?;
    std::fs::write(path, svg)
        .map_err(|e| StatsError::Message(format!("failed to write {}: {e}", path.display())))?;
    Ok(())
}

/// Calendar ticks from the first sample onward, every six months, up to and
/// including the last sample's half-year boundary.
fn x_ticks(min_ts: i64, max_ts: i64) -> StatsResult<Vec<OffsetDateTime>> {
    let mut current = OffsetDateTime::from_unix_timestamp(min_ts)
        .map_err(|e| StatsError::Message(format!("timestamp {min_ts} out of range: {e}")))?;
    let last = OffsetDateTime::from_unix_timestamp(max_ts)
        .map_err(|e| StatsError::Message(format!("timestamp {max_ts} out of range: {e}")))?;

    let mut ticks = Vec::new();
    while current <= last {
        ticks.push(current);
        current = add_months(current, X_TICK_STEP_MONTHS);
    }
    Ok(ticks)
}

/// Shift `dt` by whole calendar months, clamping the day to the target
/// month's length (Aug 31 + 6 months -> Feb 28/29).
fn add_months(dt: OffsetDateTime, months: i32) -> OffsetDateTime {
    let date = dt.date();
    let zero_based = u8::from(date.month()) as i32 - 1 + months;
    let year = date.year() + zero_based.div_euclid(12);
    let month =
        Month::try_from((zero_based.rem_euclid(12) + 1) as u8).unwrap_or(Month::January);
    let day = date.day().min(time::util::days_in_year_month(year, month));
    let shifted = Date::from_calendar_date(year, month, day).unwrap_or(date);
    dt.replace_date(shifted)
}

/// Axis label rendering: `1500` -> "1.5K", `2000000` -> "2.0M", smaller
/// values print bare. Distinct from the badge formatter, which lowercases
/// prefixes and trims zeros.
fn axis_number(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{value}")
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{RepoId, Snapshot};

    const DAY: i64 = 86_400;

    fn stats_with(history: Vec<(i64, i64)>) -> ReleaseStats {
        let mut stats = ReleaseStats::new(RepoId::new("octo", "spoon"));
        stats.history = history
            .into_iter()
            .map(|(timestamp_seconds, total)| Snapshot {
                timestamp_seconds,
                releases: Vec::new(),
                total_download_count: total,
            })
            .collect();
        stats
    }

    #[test]
    fn test_empty_history_is_an_error() {
        let stats = stats_with(vec![]);
        let err = render_chart(&stats, ChartMode::Light).unwrap_err();
        assert!(err.to_string().contains("no history to chart"));
    }

    #[test]
    fn test_two_point_chart_spans_the_plot_area() {
        // 2024-01-15 to 2025-01-14, totals 0 -> 100: the first point sits at
        // the bottom-left corner of the plot area, the last at the top-right.
        let start = 1_705_276_800; // 2024-01-15T00:00:00Z
        let stats = stats_with(vec![(start, 0), (start + 365 * DAY, 100)]);

        let svg = render_chart(&stats, ChartMode::Light).unwrap();

        assert!(svg.contains("<polyline points=\"40,340 730,40\""));
        assert!(svg.contains("octo/spoon Release Stats: Total Downloads"));
        // Six-month tick between the endpoints
        assert!(svg.contains(">2024-07-15</text>"));
        assert!(svg.contains(">2024-01-15</text>"));
    }

    #[test]
    fn test_palettes_differ_per_mode() {
        let stats = stats_with(vec![(0, 1), (DAY, 2)]);

        let light = render_chart(&stats, ChartMode::Light).unwrap();
        assert!(light.contains("#ffffff"));
        assert!(light.contains("#8884d8"));

        let dark = render_chart(&stats, ChartMode::Dark).unwrap();
        assert!(dark.contains("#1a1a1a"));
        assert!(dark.contains("#bb86fc"));
    }

    #[test]
    fn test_single_snapshot_renders_without_nan() {
        let stats = stats_with(vec![(1_705_276_800, 0)]);
        let svg = render_chart(&stats, ChartMode::Dark).unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }

    #[test]
    fn test_y_axis_labels_use_uppercase_prefixes() {
        let stats = stats_with(vec![(0, 0), (DAY, 2_000_000)]);
        let svg = render_chart(&stats, ChartMode::Light).unwrap();

        // Quarter ticks of 2M: 0, 500K, 1M, 1.5M, 2M
        assert!(svg.contains(">2.0M</text>"));
        assert!(svg.contains(">500.0K</text>"));
        assert!(svg.contains(">0</text>"));
    }

    #[test]
    fn test_axis_number_formatting() {
        assert_eq!(axis_number(0.0), "0");
        assert_eq!(axis_number(500.0), "500");
        assert_eq!(axis_number(612.5), "612.5");
        assert_eq!(axis_number(1_500.0), "1.5K");
        assert_eq!(axis_number(12_000.0), "12.0K");
        assert_eq!(axis_number(2_000_000.0), "2.0M");
    }

    #[test]
    fn test_add_months_clamps_short_target_months() {
        let aug31 = OffsetDateTime::from_unix_timestamp(1_725_062_400).unwrap(); // 2024-08-31
        let shifted = add_months(aug31, 6);
        assert_eq!(shifted.date().to_string(), "2025-02-28");

        let nov14 = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(); // 2023-11-14
        assert_eq!(add_months(nov14, 6).date().to_string(), "2024-05-14");
    }

    #[test]
    fn test_render_is_deterministic() {
        let stats = stats_with(vec![(1_705_276_800, 3), (1_705_276_800 + 90 * DAY, 40)]);
        let first = render_chart(&stats, ChartMode::Dark).unwrap();
        let second = render_chart(&stats, ChartMode::Dark).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_title_is_escaped() {
        let mut stats = stats_with(vec![(0, 1)]);
        stats.repo = RepoId::new("a&b", "c<d>");
        let svg = render_chart(&stats, ChartMode::Light).unwrap();
        assert!(svg.contains("a&amp;b/c&lt;d&gt; Release Stats"));
        assert!(!svg.contains("a&b/c<d>"));
    }

    #[test]
    fn test_write_chart_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let stats = stats_with(vec![(0, 1), (DAY, 5)]);

        for mode in [ChartMode::Light, ChartMode::Dark] {
            let path = dir.path().join(mode.file_name());
            write_chart(&stats, mode, &path).unwrap();
            let contents = std::fs::read_to_string(&path).unwrap();
            assert!(contents.starts_with("<svg"));
            assert!(contents.trim_end().ends_with("</svg>"));
        }

        assert!(dir.path().join("release_stats_chart_light.svg").exists());
        assert!(dir.path().join("release_stats_chart_dark.svg").exists());
    }
}
