//! Error types shared by the relay crates.
//!
//! Each external collaborator has its own error type so the poller can tell
//! a failed fetch from a rejected notification. None of them is fatal.

use thiserror::Error;

/// Errors returned by an [`AlertSource`](crate::AlertSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request could not be completed (network, timeout, bad status).
    #[error("alert source transport error: {0}")]
    Transport(String),

    /// The response body was not a recognizable alert payload.
    #[error("alert payload could not be parsed: {0}")]
    Parse(String),
}

/// Errors returned by a [`Geocoder`](crate::Geocoder).
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The provider answered but had nothing for this place name.
    #[error("no results found for location: {0}")]
    NoResults(String),

    /// The provider could not be reached.
    #[error("geocoding transport error: {0}")]
    Transport(String),

    /// The provider refused the request (bad key, quota, ...).
    #[error("geocoding request rejected: {0}")]
    Rejected(String),

    /// The response could not be decoded.
    #[error("invalid geocoding response: {0}")]
    InvalidResponse(String),
}

/// Errors returned by a [`MapRenderer`](crate::MapRenderer).
#[derive(Debug, Error)]
pub enum MapError {
    /// The renderer is not able to produce a map at all.
    #[error("map renderer unavailable: {0}")]
    Unavailable(String),

    /// Building the map reference failed.
    #[error("map rendering failed: {0}")]
    RenderFailed(String),
}

/// Errors returned by a [`NotificationChannel`](crate::NotificationChannel).
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The request could not be delivered.
    #[error("channel transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("channel rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The service answered successfully but the body made no sense.
    #[error("invalid channel response: {0}")]
    InvalidResponse(String),
}

/// Errors that end a correlation cycle without touching incident state.
#[derive(Debug, Error)]
pub enum CorrelatorError {
    /// Rendering the map for a new or merged incident failed.
    #[error("map error: {0}")]
    Map(#[from] MapError),

    /// Creating or editing the notification failed.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),
}
