use std::fmt;

use crate::client::TransifexClient;
use crate::transport::Transport;

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub token: CheckResult,
    pub config_file: CheckResult,
    pub output_dir: CheckResult,
    pub api: CheckResult,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.token.passed && self.config_file.passed && self.output_dir.passed && self.api.passed
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Transifex token", &self.token),
            ("Config file", &self.config_file),
            ("Output directory", &self.output_dir),
            ("Transifex API", &self.api),
        ];
        for (label, check) in rows {
            writeln!(f, "{label:<18} {}  {}", check.icon(), check.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}

impl<T: Transport> TransifexClient<T> {
    /// Check the project is reachable with the configured token.
    pub async fn check_api(&self) -> CheckResult {
        match self.resources().await {
            Ok(resources) => CheckResult::ok(&format!(
                "{} resources at {}",
                resources.len(),
                self.project_url()
            )),
            Err(e) => CheckResult::fail(&e.to_string()),
        }
    }
}
