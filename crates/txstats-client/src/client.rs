use std::time::Duration;

use futures::{StreamExt, TryStreamExt};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use txstats_core::{AggregateOptions, Credentials, ResourceStats, StatsReport, TransifexConfig};

use crate::error::TransifexError;
use crate::transport::{HttpTransport, Transport};

/// A translatable resource of the project, as listed by `resources/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Resource {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Transifex v2 API client for one project and language, parameterized
/// over the transport for testability.
pub struct TransifexClient<T: Transport = HttpTransport> {
    transport: T,
    project_url: String,
    language: String,
    max_concurrency: usize,
}

impl TransifexClient<HttpTransport> {
    pub fn new(config: &TransifexConfig, credentials: &Credentials) -> Result<Self, TransifexError> {
        let transport =
            HttpTransport::new(credentials, Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> TransifexClient<T> {
    pub fn with_transport(transport: T, config: &TransifexConfig) -> Self {
        Self {
            transport,
            project_url: config.project_url(),
            language: config.language.clone(),
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    pub fn project_url(&self) -> &str {
        &self.project_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    async fn get<D: DeserializeOwned>(&self, path: &str) -> Result<D, TransifexError> {
        let url = format!("{}{}", self.project_url, path);
        tracing::debug!(url = %url, "transifex api request");

        let value = self.transport.get_json(&url).await?;
        serde_json::from_value(value).map_err(|e| TransifexError::Decode { url, source: e })
    }

    /// All resources of the project, in API order.
    pub async fn resources(&self) -> Result<Vec<Resource>, TransifexError> {
        self.get("resources/").await
    }

    pub async fn resource_stats(&self, slug: &str) -> Result<ResourceStats, TransifexError> {
        self.get(&format!("resource/{slug}/stats/{}/", self.language))
            .await
    }

    /// Fetch stats for every slug, at most `max_concurrency` requests in
    /// flight. The first failure aborts the remaining requests.
    pub async fn stats(
        &self,
        slugs: &[String],
    ) -> Result<Vec<(String, ResourceStats)>, TransifexError> {
        futures::stream::iter(slugs)
            .map(|slug| async move {
                let stats = self.resource_stats(slug).await?;
                Ok::<_, TransifexError>((slug.clone(), stats))
            })
            .buffer_unordered(self.max_concurrency)
            .try_collect()
            .await
    }

    /// List resources, fetch their stats and aggregate them into a report.
    pub async fn collect(&self, options: &AggregateOptions) -> Result<StatsReport, TransifexError> {
        let slugs: Vec<String> = self
            .resources()
            .await?
            .into_iter()
            .map(|r| r.slug)
            .collect();

        tracing::info!(
            resources = slugs.len(),
            language = %self.language,
            "fetching resource stats"
        );
        let stats = self.stats(&slugs).await?;

        Ok(StatsReport::aggregate(stats, options))
    }
}
