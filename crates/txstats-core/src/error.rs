use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid schedule time {value:?}: expected HH:MM or HH:MM:SS")]
    InvalidScheduleTime { value: String },

    // ── Snapshots ──
    #[error("output directory {path} does not exist")]
    OutputDirMissing { path: PathBuf },

    #[error("failed to write snapshot {path}")]
    SnapshotWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read snapshot {path}")]
    SnapshotRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot {path} is not a valid stats report")]
    SnapshotParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize stats report")]
    SnapshotSerialize { source: serde_json::Error },
}
