use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schedule::DailyTime;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "txstats.toml";

/// txstats.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxStatsConfig {
    #[serde(default)]
    pub transifex: TransifexConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransifexConfig {
    /// Base URL of the Transifex v2 API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Project slug
    #[serde(default = "default_project")]
    pub project: String,
    /// Language code the stats are collected for
    #[serde(default = "default_language")]
    pub language: String,
    /// Maximum number of stats requests in flight
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Local time of the daily run (HH:MM or HH:MM:SS)
    #[serde(default = "default_schedule_at")]
    pub at: String,
    /// Run once immediately when the daemon starts
    #[serde(default = "default_run_on_start")]
    pub run_on_start: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory snapshots are written to. `OUTPUT_DATA` overrides it.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Sum resources sharing the slug prefix before `--`
    #[serde(default)]
    pub group_by_category: bool,
    /// Pretty-print snapshot JSON
    #[serde(default)]
    pub pretty: bool,
    /// Report keys renamed after aggregation (from -> to). Applied once, so a
    /// target may not be another alias's source.
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
}

impl Default for TransifexConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            project: default_project(),
            language: default_language(),
            max_concurrency: default_max_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            at: default_schedule_at(),
            run_on_start: default_run_on_start(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            group_by_category: false,
            pretty: false,
            aliases: default_aliases(),
        }
    }
}

impl TransifexConfig {
    /// Project endpoint, always ending with a slash:
    /// `https://www.transifex.com/api/2/project/python-newest/`.
    pub fn project_url(&self) -> String {
        format!(
            "{}/project/{}/",
            self.api_url.trim_end_matches('/'),
            self.project.trim_matches('/')
        )
    }
}

impl TxStatsConfig {
    /// Load from txstats.toml in the given directory, or return defaults if not found.
    pub fn load(config_dir: &Path) -> crate::Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Load txstats.toml, then apply overrides from the process environment.
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first.
    pub fn load_with_env(config_dir: &Path) -> crate::Result<Self> {
        let dotenv_loaded = dotenvy::dotenv().is_ok();
        tracing::debug!(dotenv = dotenv_loaded, "loading txstats config");

        let mut config = Self::load(config_dir)?;
        // arch-lint: allow(no-silent-result-drop) reason="an unset or non-unicode variable means no override"
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override fields from environment-style lookups.
    ///
    /// Recognized keys: `TRANSIFEX_API_URL`, `TRANSIFEX_PROJECT`,
    /// `TRANSIFEX_LANGUAGE`, `OUTPUT_DATA`. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("TRANSIFEX_API_URL") {
            self.transifex.api_url = url;
        }
        if let Some(project) = get("TRANSIFEX_PROJECT") {
            self.transifex.project = project;
        }
        if let Some(language) = get("TRANSIFEX_LANGUAGE") {
            self.transifex.language = language;
        }
        if let Some(dir) = get("OUTPUT_DATA") {
            self.output.dir = Some(PathBuf::from(dir));
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        let t = &self.transifex;
        if !t.api_url.starts_with("http://") && !t.api_url.starts_with("https://") {
            return Err(invalid(
                "transifex.api_url",
                "must start with http:// or https://",
            ));
        }
        if t.project.trim().is_empty() {
            return Err(invalid("transifex.project", "cannot be empty"));
        }
        if t.language.trim().is_empty() {
            return Err(invalid("transifex.language", "cannot be empty"));
        }
        if t.max_concurrency == 0 {
            return Err(invalid("transifex.max_concurrency", "must be greater than 0"));
        }
        if t.timeout_secs == 0 {
            return Err(invalid("transifex.timeout_secs", "must be greater than 0"));
        }
        let aliases = &self.output.aliases;
        if let Some((from, to)) = aliases
            .iter()
            .find(|(from, to)| from != to && aliases.contains_key(*to))
        {
            return Err(crate::Error::InvalidConfig {
                field: "output.aliases",
                reason: format!("`{from}` is renamed to `{to}`, which is renamed again"),
            });
        }
        self.schedule.daily_time()?;
        Ok(())
    }
}

impl ScheduleConfig {
    pub fn daily_time(&self) -> crate::Result<DailyTime> {
        self.at.parse()
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::Error {
    crate::Error::InvalidConfig {
        field,
        reason: reason.to_owned(),
    }
}

fn default_api_url() -> String {
    "https://www.transifex.com/api/2/".to_owned()
}

fn default_project() -> String {
    "python-newest".to_owned()
}

fn default_language() -> String {
    "pt_BR".to_owned()
}

fn default_max_concurrency() -> usize {
    16
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_schedule_at() -> String {
    "00:00".to_owned()
}

fn default_run_on_start() -> bool {
    true
}

fn default_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("glossary_".to_owned(), "glossary".to_owned())])
}
