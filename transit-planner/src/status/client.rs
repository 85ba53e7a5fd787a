//! Live status feed HTTP client.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::StatusError;

/// Default status feed URL.
const DEFAULT_URL: &str = "https://www.diretodostrens.com.br/api/status";

/// Default request timeout. The feed is best-effort, so this stays short.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// One record of the status feed.
///
/// The feed uses Portuguese keys; English keys are accepted too.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LineStatusDto {
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "situacao")]
    pub situation: String,
}

impl LineStatusDto {
    pub fn new(name: impl Into<String>, situation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            situation: situation.into(),
        }
    }
}

/// Something that can produce live status records.
///
/// This abstraction allows the overlay to be tested without network access.
pub trait StatusSource: Send + Sync {
    /// Fetch the current per-line status records.
    fn fetch(&self) -> impl Future<Output = Result<Vec<LineStatusDto>, StatusError>> + Send;
}

/// Configuration for the status feed client.
#[derive(Debug, Clone)]
pub struct StatusClientConfig {
    /// Feed URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StatusClientConfig {
    /// Create a new config for the given feed URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StatusClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}

/// Client for the live line status feed.
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    url: String,
}

impl StatusClient {
    /// Create a new status client.
    pub fn new(config: StatusClientConfig) -> Result<Self, StatusError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Fetch all line status records.
    pub async fn fetch_all(&self) -> Result<Vec<LineStatusDto>, StatusError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StatusError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| StatusError::Json {
            message: e.to_string(),
        })
    }
}

impl StatusSource for StatusClient {
    async fn fetch(&self) -> Result<Vec<LineStatusDto>, StatusError> {
        self.fetch_all().await
    }
}
