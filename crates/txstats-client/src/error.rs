#[derive(Debug, thiserror::Error)]
pub enum TransifexError {
    #[error("failed to build HTTP client")]
    ClientBuild { source: reqwest::Error },

    #[error("request to {url} failed")]
    Request { url: String, source: reqwest::Error },

    #[error("Transifex rejected the API token for {url} — check TRANSIFEX_API_TOKEN")]
    Unauthorized { url: String },

    #[error("Transifex returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response from {url}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Failure of a full collect-and-save run.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("failed to collect stats from Transifex")]
    Transifex(#[from] TransifexError),

    #[error("failed to save stats snapshot")]
    Snapshot(#[from] txstats_core::Error),
}
