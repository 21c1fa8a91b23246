use std::collections::HashMap;
use std::path::PathBuf;

use tempfile::TempDir;
use txstats_core::{Error, TxStatsConfig};

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = TxStatsConfig::load(tmp.path()).unwrap();

    assert_eq!(config.transifex.api_url, "https://www.transifex.com/api/2/");
    assert_eq!(config.transifex.project, "python-newest");
    assert_eq!(config.transifex.language, "pt_BR");
    assert_eq!(config.transifex.max_concurrency, 16);
    assert_eq!(config.transifex.timeout_secs, 30);
    assert_eq!(config.schedule.at, "00:00");
    assert!(config.schedule.run_on_start);
    assert!(config.output.dir.is_none());
    assert!(!config.output.group_by_category);
    assert!(!config.output.pretty);
    assert_eq!(
        config.output.aliases.get("glossary_").map(String::as_str),
        Some("glossary")
    );
    assert!(config.validate().is_ok());
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[transifex]
api_url = "http://localhost:9000/api/2"
project = "python-311"
language = "es"
max_concurrency = 4
timeout_secs = 5

[schedule]
at = "03:30"
run_on_start = false

[output]
dir = "/srv/stats"
group_by_category = true
pretty = true
aliases = { "glossary_" = "glossary", "bugs" = "reporting-bugs" }
"#;
    std::fs::write(tmp.path().join("txstats.toml"), toml).unwrap();

    let config = TxStatsConfig::load(tmp.path()).unwrap();

    assert_eq!(config.transifex.api_url, "http://localhost:9000/api/2");
    assert_eq!(config.transifex.project, "python-311");
    assert_eq!(config.transifex.language, "es");
    assert_eq!(config.transifex.max_concurrency, 4);
    assert_eq!(config.transifex.timeout_secs, 5);
    assert_eq!(config.schedule.at, "03:30");
    assert!(!config.schedule.run_on_start);
    assert_eq!(config.output.dir, Some(PathBuf::from("/srv/stats")));
    assert!(config.output.group_by_category);
    assert!(config.output.pretty);
    assert_eq!(config.output.aliases.len(), 2);
    assert!(config.validate().is_ok());
}

#[test]
fn load_partial_config_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[transifex]
language = "ja"
"#;
    std::fs::write(tmp.path().join("txstats.toml"), toml).unwrap();

    let config = TxStatsConfig::load(tmp.path()).unwrap();

    assert_eq!(config.transifex.language, "ja");
    assert_eq!(config.transifex.project, "python-newest");
    assert_eq!(config.schedule.at, "00:00");
    assert!(config.output.aliases.contains_key("glossary_"));
}

#[test]
fn load_reports_parse_errors_with_path() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("txstats.toml"), "[transifex\nproject = 1").unwrap();

    let err = TxStatsConfig::load(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
    assert!(err.to_string().contains("txstats.toml"));
}

#[test]
fn project_url_joins_with_single_slashes() {
    let mut config = TxStatsConfig::default();
    assert_eq!(
        config.transifex.project_url(),
        "https://www.transifex.com/api/2/project/python-newest/"
    );

    config.transifex.api_url = "http://127.0.0.1:8080/api/2".to_owned();
    config.transifex.project = "docs".to_owned();
    assert_eq!(
        config.transifex.project_url(),
        "http://127.0.0.1:8080/api/2/project/docs/"
    );
}

#[test]
fn env_overrides_file_values() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("TRANSIFEX_API_URL", "http://mock:1234/api/2/"),
        ("TRANSIFEX_PROJECT", "python-312"),
        ("TRANSIFEX_LANGUAGE", "  "),
        ("OUTPUT_DATA", "/data"),
    ]);

    let mut config = TxStatsConfig::default();
    config.apply_env(|key| env.get(key).map(|v| (*v).to_owned()));

    assert_eq!(config.transifex.api_url, "http://mock:1234/api/2/");
    assert_eq!(config.transifex.project, "python-312");
    // blank values do not override
    assert_eq!(config.transifex.language, "pt_BR");
    assert_eq!(config.output.dir, Some(PathBuf::from("/data")));
}

fn assert_invalid(field: &str, mutate: impl FnOnce(&mut TxStatsConfig)) {
    let mut config = TxStatsConfig::default();
    mutate(&mut config);
    match config.validate() {
        Err(Error::InvalidConfig { field: f, .. }) => assert_eq!(f, field),
        other => panic!("expected InvalidConfig for {field}, got {other:?}"),
    }
}

#[test]
fn validate_rejects_bad_values() {
    assert_invalid("transifex.api_url", |c| {
        c.transifex.api_url = "ftp://example.com".to_owned()
    });
    assert_invalid("transifex.project", |c| c.transifex.project = String::new());
    assert_invalid("transifex.language", |c| c.transifex.language = " ".to_owned());
    assert_invalid("transifex.max_concurrency", |c| {
        c.transifex.max_concurrency = 0
    });
    assert_invalid("transifex.timeout_secs", |c| c.transifex.timeout_secs = 0);
}

#[test]
fn validate_rejects_chained_aliases() {
    assert_invalid("output.aliases", |c| {
        c.output.aliases.insert("glossary".to_owned(), "terms".to_owned());
    });

    let mut config = TxStatsConfig::default();
    config.output.aliases.insert("bugs".to_owned(), "reporting-bugs".to_owned());
    config.output.aliases.insert("about".to_owned(), "about".to_owned());
    config.validate().unwrap();
}

#[test]
fn validate_rejects_bad_schedule_time() {
    let mut config = TxStatsConfig::default();
    config.schedule.at = "noon".to_owned();

    let err = config.validate().unwrap_err();
    assert!(matches!(err, Error::InvalidScheduleTime { ref value } if value == "noon"));
}
