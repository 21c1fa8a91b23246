use std::path::Path;

use txstats_client::collect_snapshot;
use txstats_core::AggregateOptions;

/// Collect stats once and write today's snapshot into `path`.
pub async fn download_stats(
    config_dir: &Path,
    path: &Path,
    pretty: bool,
    group_by_category: bool,
) -> anyhow::Result<()> {
    if !path.is_dir() {
        anyhow::bail!("path '{}' does not exist or is not a directory", path.display());
    }

    let config = super::load_config(config_dir)?;
    let client = super::build_client(&config)?;

    let mut options = AggregateOptions::from(&config.output);
    options.group_by_category |= group_by_category;
    let pretty = pretty || config.output.pretty;

    let saved = collect_snapshot(&client, &options, path, super::today(), pretty).await?;

    println!("Saved stats to {}", saved.display());
    Ok(())
}
