use std::path::Path;

use txstats_client::{CheckResult, DoctorReport, TransifexClient};
use txstats_core::config::CONFIG_FILE;
use txstats_core::{Credentials, TxStatsConfig};

pub async fn doctor(config_dir: &Path) -> anyhow::Result<()> {
    let mut report = DoctorReport::default();

    let config_path = config_dir.join(CONFIG_FILE);
    let config = match TxStatsConfig::load_with_env(config_dir) {
        Ok(config) => {
            report.config_file = if config_path.exists() {
                CheckResult::ok(&config_path.display().to_string())
            } else {
                CheckResult::ok("not found, using defaults")
            };
            Some(config)
        }
        Err(e) => {
            report.config_file = CheckResult::fail(&e.to_string());
            None
        }
    };

    report.output_dir = match config.as_ref().and_then(|c| c.output.dir.as_ref()) {
        Some(dir) if dir.is_dir() => CheckResult::ok(&dir.display().to_string()),
        Some(dir) => CheckResult::fail(&format!("{} does not exist", dir.display())),
        None => CheckResult::fail("not set — set OUTPUT_DATA or [output].dir"),
    };

    let credentials = match Credentials::from_env() {
        Ok(credentials) => {
            report.token = CheckResult::ok("set");
            Some(credentials)
        }
        Err(e) => {
            report.token = CheckResult::fail(&e.to_string());
            None
        }
    };

    report.api = match (&config, &credentials) {
        (Some(config), Some(credentials)) => {
            match TransifexClient::new(&config.transifex, credentials) {
                Ok(client) => client.check_api().await,
                Err(e) => CheckResult::fail(&e.to_string()),
            }
        }
        _ => CheckResult::fail("skipped — fix the checks above first"),
    };

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(())
}
