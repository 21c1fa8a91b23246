use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use txstats_core::{AggregateOptions, snapshot};

use crate::client::TransifexClient;
use crate::error::CollectError;
use crate::transport::Transport;

/// Collect today's stats and write them as the snapshot for `date`.
///
/// The output directory is checked before any request is made.
pub async fn collect_snapshot<T: Transport>(
    client: &TransifexClient<T>,
    options: &AggregateOptions,
    dir: &Path,
    date: NaiveDate,
    pretty: bool,
) -> Result<PathBuf, CollectError> {
    if !dir.is_dir() {
        return Err(txstats_core::Error::OutputDirMissing {
            path: dir.to_path_buf(),
        }
        .into());
    }

    tracing::info!(project = %client.project_url(), %date, "running stats collection");
    let report = client.collect(options).await?;
    let path = snapshot::write_snapshot(dir, date, &report, pretty)?;

    Ok(path)
}
