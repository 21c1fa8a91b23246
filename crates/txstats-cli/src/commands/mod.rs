mod doctor;
mod download;
mod resources;
mod schedule;

use std::path::Path;

use chrono::NaiveDate;
use txstats_client::TransifexClient;
use txstats_core::{Credentials, TxStatsConfig};

pub use doctor::doctor;
pub use download::download_stats;
pub use resources::resources;
pub use schedule::schedule;

/// txstats.toml plus environment overrides, validated.
fn load_config(config_dir: &Path) -> anyhow::Result<TxStatsConfig> {
    Ok(TxStatsConfig::load_with_env(config_dir)?)
}

fn build_client(config: &TxStatsConfig) -> anyhow::Result<TransifexClient> {
    let credentials = Credentials::from_env()?;
    Ok(TransifexClient::new(&config.transifex, &credentials)?)
}

/// Snapshots are named after the local calendar day.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
