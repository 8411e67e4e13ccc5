// SPDX-License-Identifier: MIT

//! Timing-provider adapter seam.
//!
//! A deployment talks to exactly one provider, which serves either an HTML
//! results table or a JSON records array. Both formats reduce to the same
//! raw [`CheckpointRecord`] list so the normalize/derive/estimate pipeline
//! is shared; the concrete adapter is selected by configuration.

use crate::config::{Config, ProviderMode};
use crate::error::AppError;
use crate::models::CheckpointRecord;
use crate::services::{HtmlTableAdapter, JsonRecordsAdapter};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Raw output of a provider adapter, pre-normalization.
#[derive(Debug, Clone, Default)]
pub struct ProviderFeed {
    /// Display name scraped from the response, when the format carries one
    pub runner_name: Option<String>,
    pub records: Vec<CheckpointRecord>,
}

impl ProviderFeed {
    /// An empty feed; downstream treats this as "no data", never an error.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Parses an opaque provider response body into raw checkpoint records.
///
/// Implementations must contain every parse failure: a malformed row or a
/// mis-shaped document yields a smaller (possibly empty) feed, never an
/// error.
pub trait ProviderAdapter: Send + Sync {
    fn parse(&self, body: &str) -> ProviderFeed;
}

/// Build the adapter configured for this deployment.
pub fn adapter_for(mode: ProviderMode) -> Arc<dyn ProviderAdapter> {
    match mode {
        ProviderMode::Html => Arc::new(HtmlTableAdapter::new()),
        ProviderMode::Json => Arc::new(JsonRecordsAdapter::new()),
    }
}

/// Fetches one runner's raw feed body from the timing provider.
///
/// `Ok(None)` means the provider had no data for this bib (any non-success
/// response); `Err` is reserved for transport failures.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, bib_number: &str) -> Result<Option<String>, AppError>;
}

/// HTTP feed source talking to the real provider.
#[derive(Clone)]
pub struct HttpFeedSource {
    http: reqwest::Client,
    base_url: String,
    event_id: String,
}

impl HttpFeedSource {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| AppError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.provider_base_url.clone(),
            event_id: config.event_id.clone(),
        })
    }

    fn player_url(&self, bib_number: &str) -> String {
        format!(
            "{}/api/event/{}/player/{}",
            self.base_url, self.event_id, bib_number
        )
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, bib_number: &str) -> Result<Option<String>, AppError> {
        let url = self.player_url(bib_number);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Provider request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::debug!(
                bib = bib_number,
                status = %response.status(),
                "Provider returned non-success, treating as no data"
            );
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to read provider body: {}", e)))?;

        Ok(Some(body))
    }
}
