use incident_core::{CorrelatorError, SourceError};
use thiserror::Error;

/// Errors that end a single poll cycle.
#[derive(Debug, Error)]
pub enum PollError {
    /// Fetching the alert batch failed.
    #[error("fetch failed: {0}")]
    Source(#[from] SourceError),

    /// Turning the batch into a notification failed.
    #[error("correlation failed: {0}")]
    Correlator(#[from] CorrelatorError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_core::MapError;

    #[test]
    fn test_display_keeps_cause() {
        let err = PollError::from(SourceError::Transport("timeout".to_string()));
        assert_eq!(
            err.to_string(),
            "fetch failed: alert source transport error: timeout"
        );

        let err = PollError::from(CorrelatorError::from(MapError::Unavailable("x".to_string())));
        assert!(err.to_string().starts_with("correlation failed: map error"));
    }
}
