//! Configuration for the alert feed client.

use std::time::Duration;

/// Public alert feed.
pub const DEFAULT_ALERTS_ENDPOINT: &str =
    "https://www.oref.org.il/warningMessages/alert/Alerts.json";

/// Configuration for [`OrefClient`](crate::OrefClient).
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// URL polled on every cycle.
    pub endpoint: String,
    /// Timeout for a single poll.
    pub timeout: Duration,
}

impl SourceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ALERTS_ENDPOINT)
    }
}
