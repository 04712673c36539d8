//! Logging channel - used for dry runs.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use incident_core::{ChannelError, MapReference, MessageHandle, NotificationChannel};
use tracing::info;

/// A channel that logs every notification and never fails.
#[derive(Debug, Default)]
pub struct LoggingChannel {
    next_id: AtomicU64,
}

impl LoggingChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationChannel for LoggingChannel {
    async fn create(&self, text: &str, media: &MapReference) -> Result<MessageHandle, ChannelError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        info!("[dry-run] Creating message {} (map: {}):\n{}", id, media, text);
        let id = format!("dry-run-{}", id);
        if media.is_empty() {
            Ok(MessageHandle::text(id))
        } else {
            Ok(MessageHandle::media(id))
        }
    }

    async fn edit_media(
        &self,
        handle: &MessageHandle,
        media: &MapReference,
        text: &str,
    ) -> Result<MessageHandle, ChannelError> {
        if handle.has_media() || media.is_empty() {
            info!("[dry-run] Editing media of {} (map: {}):\n{}", handle, media, text);
            return Ok(handle.clone());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "[dry-run] Replacing text message {} with photo {} (map: {}):\n{}",
            handle, id, media, text
        );
        Ok(MessageHandle::media(format!("dry-run-{}", id)))
    }

    async fn edit_caption(&self, handle: &MessageHandle, text: &str) -> Result<(), ChannelError> {
        info!("[dry-run] Editing caption of {}:\n{}", handle, text);
        Ok(())
    }

    fn name(&self) -> &str {
        "LoggingChannel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_channel() {
        let channel = LoggingChannel::new();

        // Should not error
        let first = channel.create("test", &MapReference::empty()).await.unwrap();
        let second = channel.create("test", &MapReference::empty()).await.unwrap();
        assert_ne!(first, second);

        channel.edit_caption(&first, "test").await.unwrap();
        let photo = channel
            .edit_media(&first, &MapReference::new("map"), "test")
            .await
            .unwrap();
        assert!(photo.has_media());
    }
}
