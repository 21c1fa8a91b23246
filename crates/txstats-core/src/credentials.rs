use std::fmt;

use secrecy::SecretString;

use crate::error::Error;

/// Environment variable holding the Transifex API token.
pub const TOKEN_ENV: &str = "TRANSIFEX_API_TOKEN";

/// Username Transifex expects for token-based basic auth.
pub const API_USERNAME: &str = "api";

/// Transifex API credentials.
///
/// The token is wrapped in [`SecretString`] so it never ends up in logs or
/// debug output.
#[derive(Clone)]
pub struct Credentials {
    pub api_token: SecretString,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: SecretString::from(api_token.into()),
        }
    }

    /// Load credentials from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, Error> {
        let dotenv_loaded = dotenvy::dotenv().is_ok();
        tracing::debug!(dotenv = dotenv_loaded, "loading Transifex credentials");
        // arch-lint: allow(no-silent-result-drop) reason="absence is reported as MissingEnvVar by from_lookup"
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load credentials through an environment-style lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(TOKEN_ENV)
            .filter(|token| !token.trim().is_empty())
            .map(|token| Self::new(token.trim()))
            .ok_or_else(|| Error::MissingEnvVar(TOKEN_ENV.to_owned()))
    }
}
