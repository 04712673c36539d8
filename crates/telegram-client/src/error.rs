//! Error types for telegram-client.

use incident_core::ChannelError;
use thiserror::Error;

/// Errors that can occur when talking to the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The Bot API rejected the request.
    #[error("unexpected status code: {status}, response: {body}")]
    Api { status: u16, body: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TelegramError {
    /// Whether the API refused an edit because nothing changed.
    pub fn is_not_modified(&self) -> bool {
        matches!(self, TelegramError::Api { status: 400, body } if body.contains("message is not modified"))
    }
}

impl From<TelegramError> for ChannelError {
    fn from(error: TelegramError) -> Self {
        match error {
            TelegramError::Api { status, body } => ChannelError::Rejected { status, body },
            TelegramError::Json(e) => ChannelError::InvalidResponse(e.to_string()),
            TelegramError::Http(e) if e.is_decode() => ChannelError::InvalidResponse(e.to_string()),
            other => ChannelError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_modified_detection() {
        let err = TelegramError::Api {
            status: 400,
            body: r#"{"ok":false,"error_code":400,"description":"Bad Request: message is not modified"}"#
                .to_string(),
        };
        assert!(err.is_not_modified());

        let other = TelegramError::Api {
            status: 400,
            body: "Bad Request: chat not found".to_string(),
        };
        assert!(!other.is_not_modified());
    }

    #[test]
    fn test_api_error_maps_to_rejection() {
        let err = TelegramError::Api {
            status: 403,
            body: "Forbidden: bot was kicked".to_string(),
        };
        match ChannelError::from(err) {
            ChannelError::Rejected { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("kicked"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
