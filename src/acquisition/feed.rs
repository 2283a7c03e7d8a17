//! HTTP announcement feed
//!
//! Fetches a JSON array of raw records (or an `{"announcements": [...]}`
//! envelope) from an HTTP endpoint. One request per scan; failures surface as
//! [`SourceError`] and are isolated by the collector.

use crate::config::SourcesConfig;
use crate::pipeline::source::{decode_document, AnnouncementSource, SourceBatch, SourceError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// JSON feed reachable over HTTP(S).
pub struct HttpFeedSource {
    http: reqwest::Client,
    url: String,
    name: String,
}

impl HttpFeedSource {
    /// Build a feed client with the configured timeout and user agent.
    pub fn new(url: &str, config: &SourcesConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|source| SourceError::Http {
                url: url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            url: url.to_string(),
            name: format!("feed:{url}"),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AnnouncementSource for HttpFeedSource {
    async fn fetch(&self) -> Result<SourceBatch, SourceError> {
        debug!(url = %self.url, "Requesting announcement feed");

        let resp = self
            .http
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| SourceError::Http {
                url: self.url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().await.map_err(|source| SourceError::Http {
            url: self.url.clone(),
            source,
        })?;

        let batch = decode_document(&text, &self.name)?;
        info!(
            url = %self.url,
            count = batch.records.len(),
            malformed = batch.malformed,
            "Fetched announcement feed"
        );
        Ok(batch)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
