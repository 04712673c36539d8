//! Traits implemented by the relay's external collaborators.

use async_trait::async_trait;

use crate::alert::{Alert, Coordinates};
use crate::error::{ChannelError, GeocodeError, MapError, SourceError};
use crate::incident::{MapReference, MessageHandle};

/// A polled feed of alerts.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Fetch the alerts currently published. An empty feed is `Ok(vec![])`.
    async fn fetch(&self) -> Result<Vec<Alert>, SourceError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Resolves place names to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up a single place. "No results" is [`GeocodeError::NoResults`].
    async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError>;
}

/// Produces a map image reference for a set of locations.
#[async_trait]
pub trait MapRenderer: Send + Sync {
    /// Render a map covering `locations`.
    ///
    /// Implementations skip places they cannot resolve and return an empty
    /// reference when nothing could be placed on the map.
    async fn render(&self, locations: &[String]) -> Result<MapReference, MapError>;
}

/// The outbound messaging surface.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Send a new message with `text` and the map image.
    async fn create(&self, text: &str, media: &MapReference)
        -> Result<MessageHandle, ChannelError>;

    /// Replace the image of a sent message, together with its caption.
    ///
    /// Returns the handle of the message now showing `media`. A channel that
    /// cannot attach an image to an existing message (a text-only message,
    /// for instance) sends a replacement and returns its handle; it must not
    /// report success without the image being shown.
    async fn edit_media(
        &self,
        handle: &MessageHandle,
        media: &MapReference,
        text: &str,
    ) -> Result<MessageHandle, ChannelError>;

    /// Replace only the caption of a sent message.
    async fn edit_caption(&self, handle: &MessageHandle, text: &str) -> Result<(), ChannelError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: AlertSource + ?Sized> AlertSource for std::sync::Arc<T> {
    async fn fetch(&self) -> Result<Vec<Alert>, SourceError> {
        (**self).fetch().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for std::sync::Arc<T> {
    async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError> {
        (**self).geocode(place).await
    }
}

#[async_trait]
impl<T: MapRenderer + ?Sized> MapRenderer for std::sync::Arc<T> {
    async fn render(&self, locations: &[String]) -> Result<MapReference, MapError> {
        (**self).render(locations).await
    }
}

#[async_trait]
impl<T: NotificationChannel + ?Sized> NotificationChannel for std::sync::Arc<T> {
    async fn create(
        &self,
        text: &str,
        media: &MapReference,
    ) -> Result<MessageHandle, ChannelError> {
        (**self).create(text, media).await
    }

    async fn edit_media(
        &self,
        handle: &MessageHandle,
        media: &MapReference,
        text: &str,
    ) -> Result<MessageHandle, ChannelError> {
        (**self).edit_media(handle, media, text).await
    }

    async fn edit_caption(&self, handle: &MessageHandle, text: &str) -> Result<(), ChannelError> {
        (**self).edit_caption(handle, text).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
