//! HTTP polling of the alert feed.

use async_trait::async_trait;
use incident_core::{Alert, AlertSource, SourceError};
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::OrefError;
use crate::parse::parse_alerts;

/// Browser user agents rotated between polls; the feed rejects obvious bots.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36 Edg/130.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:131.0) Gecko/20100101 Firefox/131.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.0.1 Safari/605.1.15",
];

/// Polls the alert feed.
#[derive(Debug, Clone)]
pub struct OrefClient {
    http: Client,
    config: SourceConfig,
}

impl OrefClient {
    pub fn new(config: SourceConfig) -> Result<Self, OrefError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OrefError::Http)?;
        Ok(Self { http, config })
    }

    /// Fetch and parse the current feed.
    pub async fn fetch_alerts(&self) -> Result<Vec<Alert>, OrefError> {
        let user_agent = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);

        let response = self
            .http
            .get(&self.config.endpoint)
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(OrefError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let alerts = parse_alerts(&body)?;
        debug!("Fetched {} alerts from {}", alerts.len(), self.config.endpoint);
        Ok(alerts)
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

#[async_trait]
impl AlertSource for OrefClient {
    async fn fetch(&self) -> Result<Vec<Alert>, SourceError> {
        Ok(self.fetch_alerts().await?)
    }

    fn name(&self) -> &str {
        "oref"
    }
}
