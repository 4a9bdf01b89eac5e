//! CSV export for the snapshot history.

use std::io::Write;
use std::path::Path;

use crate::StatsError;
use crate::core::schema::Snapshot;

/// CSV column headers in deterministic order.
pub const CSV_HEADERS: &[&str] = &[
    "timestamp_seconds",
    "timestamp_utc",
    "releases",
    "assets",
    "total_download_count",
];

/// CSV exporter for the snapshot history.
///
/// Exports one row per snapshot, oldest first, with a flat column structure
/// and deterministic column order for spreadsheets and plotting tools.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Create a new CsvExporter.
    pub fn new() -> Self {
        CsvExporter
    }

    /// Export the history to a CSV file.
    ///
    /// # Errors
    /// Returns an error if file operations or CSV writing fails.
    pub fn export(&self, history: &[Snapshot], output: &Path) -> Result<(), StatsError> {
        // Ensure parent directory exists
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StatsError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let file = std::fs::File::create(output)
            .map_err(|e| StatsError::Message(format!("failed to create file: {e}")))?;

        self.export_to_writer(history, file)
    }

    /// Export the history to stdout.
    ///
    /// # Errors
    /// Returns an error if CSV writing fails.
    pub fn export_to_stdout(&self, history: &[Snapshot]) -> Result<(), StatsError> {
        let stdout = std::io::stdout();
        let handle = stdout.lock();
        self.export_to_writer(history, handle)
    }

    /// Export the history to any writer implementing Write.
    ///
    /// # Errors
    /// Returns an error if CSV writing fails.
    pub fn export_to_writer<W: Write>(
        &self,
        history: &[Snapshot],
        writer: W,
    ) -> Result<(), StatsError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write headers
        csv_writer
            .write_record(CSV_HEADERS)
            .map_err(|e| StatsError::Message(format!("failed to write CSV headers: {e}")))?;

        // Write each snapshot
        for snapshot in history {
            let row = self.snapshot_to_row(snapshot);
            csv_writer
                .write_record(&row)
                .map_err(|e| StatsError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| StatsError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(())
    }

    /// Convert a Snapshot to a row of CSV values.
    fn snapshot_to_row(&self, snapshot: &Snapshot) -> Vec<String> {
        let asset_count: usize = snapshot.releases.iter().map(|r| r.assets.len()).sum();
        vec![
            // timestamp_seconds
            snapshot.timestamp_seconds.to_string(),
            // timestamp_utc
            snapshot.timestamp_utc().unwrap_or_default(),
            // releases
            snapshot.releases.len().to_string(),
            // assets
            asset_count.to_string(),
            // total_download_count
            snapshot.total_download_count.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Asset, Release};

    fn make_test_snapshot(timestamp_seconds: i64, count: i64) -> Snapshot {
        Snapshot {
            timestamp_seconds,
            releases: vec![Release {
                id: 1,
                tag_name: "v1.0.0".to_string(),
                assets: vec![Asset {
                    id: 10,
                    name: "tool.tar.gz".to_string(),
                    download_count: count,
                }],
                total_download_count: count,
            }],
            total_download_count: count,
        }
    }

    #[test]
    fn test_snapshot_to_row_length() {
        let exporter = CsvExporter::new();
        let row = exporter.snapshot_to_row(&make_test_snapshot(0, 5));
        assert_eq!(row.len(), CSV_HEADERS.len());
    }

    #[test]
    fn test_export_to_writer() {
        let exporter = CsvExporter::new();
        let history = vec![make_test_snapshot(1_700_000_000, 120)];

        let mut buffer = Vec::new();
        exporter.export_to_writer(&history, &mut buffer).unwrap();

        let csv_str = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();

        // Should have header + 1 data row
        assert_eq!(lines.len(), 2);

        // Check header
        assert!(lines[0].starts_with("timestamp_seconds,timestamp_utc"));

        // Check data: unix time, RFC 3339 time, counts
        assert!(lines[1].starts_with("1700000000,2023-11-14T22:13:20Z"));
        assert!(lines[1].ends_with("1,1,120"));
    }

    #[test]
    fn test_export_keeps_history_order() {
        let exporter = CsvExporter::new();
        let history = vec![
            make_test_snapshot(100, 1),
            make_test_snapshot(200, 2),
            make_test_snapshot(300, 3),
        ];

        let mut buffer = Vec::new();
        exporter.export_to_writer(&history, &mut buffer).unwrap();

        let csv_str = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();

        // Should have header + 3 data rows, oldest first
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("100,"));
        assert!(lines[3].starts_with("300,"));
    }

    #[test]
    fn test_export_to_file() {
        let exporter = CsvExporter::new();
        let history = vec![make_test_snapshot(1_700_000_000, 7)];

        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("nested/history.csv");

        exporter.export(&history, &output_path).unwrap();

        assert!(output_path.exists());

        let contents = std::fs::read_to_string(&output_path).unwrap();
        assert!(contents.contains("timestamp_seconds"));
        assert!(contents.contains("1700000000"));
    }

    #[test]
    fn test_export_empty_history() {
        let exporter = CsvExporter::new();

        let mut buffer = Vec::new();
        exporter.export_to_writer(&[], &mut buffer).unwrap();

        let csv_str = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();

        // Should have only header
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("timestamp_seconds"));
    }
}
