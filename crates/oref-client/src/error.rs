//! Error types for oref-client.

use incident_core::SourceError;
use thiserror::Error;

/// Errors that can occur while polling the alert feed.
#[derive(Debug, Error)]
pub enum OrefError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("unexpected status code: {status}, response: {body}")]
    Status { status: u16, body: String },

    /// The body was neither an alert nor a list of alerts.
    #[error("unable to parse value: {body:?}, error: {reason}")]
    Parse { body: String, reason: String },
}

impl From<OrefError> for SourceError {
    fn from(error: OrefError) -> Self {
        match error {
            OrefError::Parse { .. } => SourceError::Parse(error.to_string()),
            other => SourceError::Transport(other.to_string()),
        }
    }
}
