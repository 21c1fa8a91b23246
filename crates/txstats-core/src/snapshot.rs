//! Daily snapshot files (`YYYY-MM-DD.json`).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Error;
use crate::stats::StatsReport;

/// `dir/YYYY-MM-DD.json`
pub fn snapshot_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.json", date.format("%Y-%m-%d")))
}

/// Write the report for `date` into `dir`, replacing an earlier snapshot of
/// the same day.
pub fn write_snapshot(
    dir: &Path,
    date: NaiveDate,
    report: &StatsReport,
    pretty: bool,
) -> Result<PathBuf, Error> {
    if !dir.is_dir() {
        return Err(Error::OutputDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let body = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .map_err(|e| Error::SnapshotSerialize { source: e })?;

    let path = snapshot_path(dir, date);
    tracing::info!(path = %path.display(), resources = report.len(), "saving stats");
    std::fs::write(&path, body).map_err(|e| Error::SnapshotWrite {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

pub fn read_snapshot(path: &Path) -> Result<StatsReport, Error> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::SnapshotRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| Error::SnapshotParse {
        path: path.to_path_buf(),
        source: e,
    })
}
