// crates/tailorfind-core/src/source/rest.rs
#![cfg(feature = "remote")]

use crate::error::{Result, SourceError};
use crate::model::ProviderRecord;
use crate::traits::RecordProvider;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const DEFAULT_TABLE: &str = "tailors";

/// Connection settings for the hosted REST table.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://xyz.example.co`.
    pub base_url: String,
    /// Anonymous (public) API key.
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// `GET {base}/rest/v1/{table}?select=*&order=name.asc`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}?select=*&order=name.asc",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}

/// Fetches the full tailor table in one request, ordered by name.
pub struct RestRecordProvider {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl RestRecordProvider {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl RecordProvider for RestRecordProvider {
    #[instrument(skip(self), fields(table = %self.config.table))]
    async fn fetch_all(&self) -> Result<Vec<ProviderRecord>> {
        let url = self.config.endpoint();
        debug!(%url, "Fetching tailors");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Tailor fetch request failed");
                SourceError::RecordFetch(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "Tailor fetch rejected");
            return Err(SourceError::RecordFetch(format!("{status}: {}", body.trim())));
        }

        response.json::<Vec<ProviderRecord>>().await.map_err(|e| {
            error!(error = %e, "Failed to parse tailor response");
            SourceError::RecordFetch(format!("unreadable response: {e}"))
        })
    }
}
