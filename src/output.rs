//! Output formatting and persistence for the dashboard view.
//!
//! Supports pretty-printing, JSON files, dated snapshots, and CSV export of
//! the category tally.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use csv::WriterBuilder;
use tracing::{debug, info};

use crate::analyzers::types::CategoryCount;
use crate::analyzers::view::DashboardView;
use crate::error::Result;

/// Prints the view as pretty JSON on stdout, for piping into other tools.
pub fn print_json(view: &DashboardView) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

/// Writes the view as pretty JSON, creating parent directories as needed.
pub fn write_view(path: &Path, view: &DashboardView) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(view)?)?;
    debug!(path = %path.display(), "view written");
    Ok(())
}

/// Writes the view into `dir` under a date-partitioned name, one file per
/// day. A second run on the same day overwrites that day's snapshot.
pub fn write_dated_snapshot(dir: &Path, view: &DashboardView) -> Result<PathBuf> {
    let path = dir.join(format!("view-{}.json", Utc::now().format("%Y-%m-%d")));
    write_view(&path, view)?;
    info!(path = %path.display(), "snapshot written");
    Ok(path)
}

/// Exports the per-category tally as a two-column CSV, in the same ascending
/// order the view carries.
pub fn export_category_counts(path: &Path, counts: &[CategoryCount]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    for row in counts {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = counts.len(), "category counts exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ratings::rating_histogram;
    use crate::analyzers::view;
    use crate::config::HistogramSpec;
    use std::collections::BTreeMap;

    fn sample_view() -> DashboardView {
        let records = Vec::new();
        let histogram = rating_histogram(&records, &HistogramSpec::default());
        view::build(records, Vec::new(), None, histogram, Vec::new(), None, BTreeMap::new())
    }

    #[test]
    fn test_write_view_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/view.json");

        write_view(&path, &sample_view()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.get("records").is_some());
    }

    #[test]
    fn test_dated_snapshot_is_date_partitioned() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_dated_snapshot(dir.path(), &sample_view()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("view-"));
        assert!(name.ends_with(".json"));
        assert!(path.exists());
    }

    #[test]
    fn test_export_category_counts_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.csv");
        let counts = vec![
            CategoryCount { category: "BEAUTY".to_string(), count: 1 },
            CategoryCount { category: "GAME".to_string(), count: 3 },
        ];

        export_category_counts(&path, &counts).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "category,count");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "BEAUTY,1");
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_view()).unwrap();
    }
}
