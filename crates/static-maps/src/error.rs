//! Error types for static-maps.

use incident_core::GeocodeError;
use thiserror::Error;

/// Errors that can occur when talking to the maps provider.
#[derive(Debug, Error)]
pub enum MapsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned no match for the place.
    #[error("no results found for location: {0}")]
    NoResults(String),

    /// The provider refused the request.
    #[error("provider returned {status}: {message}")]
    Rejected { status: String, message: String },

    /// A URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<MapsError> for GeocodeError {
    fn from(error: MapsError) -> Self {
        match error {
            MapsError::NoResults(place) => GeocodeError::NoResults(place),
            MapsError::Rejected { .. } => GeocodeError::Rejected(error.to_string()),
            MapsError::Http(e) if e.is_decode() => GeocodeError::InvalidResponse(e.to_string()),
            other => GeocodeError::Transport(other.to_string()),
        }
    }
}
