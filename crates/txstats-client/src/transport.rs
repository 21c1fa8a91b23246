use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use txstats_core::Credentials;
use txstats_core::credentials::API_USERNAME;

use crate::error::TransifexError;

/// Abstraction over the HTTP layer for testability.
///
/// Production code uses [`HttpTransport`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// GET `url` and parse the body as JSON.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, TransifexError>;
}

/// reqwest-backed transport authenticating with the Transifex API token.
pub struct HttpTransport {
    client: reqwest::Client,
    token: SecretString,
}

impl HttpTransport {
    pub fn new(credentials: &Credentials, timeout: Duration) -> Result<Self, TransifexError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("txstats/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransifexError::ClientBuild { source: e })?;

        Ok(Self {
            client,
            token: credentials.api_token.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, TransifexError> {
        let response = self
            .client
            .get(url)
            .basic_auth(API_USERNAME, Some(self.token.expose_secret()))
            .send()
            .await
            .map_err(|e| TransifexError::Request {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(TransifexError::Unauthorized {
                url: url.to_owned(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransifexError::Request {
                url: url.to_owned(),
                source: e,
            })?;

        if !status.is_success() {
            return Err(TransifexError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).trim().to_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| TransifexError::Decode {
            url: url.to_owned(),
            source: e,
        })
    }
}
