//! [`NotificationChannel`] implementation for the Bot API.
//!
//! A message sent without a map is a plain text message. Telegram cannot turn
//! a text message into a photo, so once a map is available the text message
//! is replaced by a new photo message and deleted.

use async_trait::async_trait;
use incident_core::{ChannelError, MapReference, MessageHandle, NotificationChannel};
use tracing::{info, warn};

use crate::client::TelegramClient;

#[async_trait]
impl NotificationChannel for TelegramClient {
    async fn create(&self, text: &str, media: &MapReference) -> Result<MessageHandle, ChannelError> {
        if media.is_empty() {
            warn!("No map available, sending text-only message");
            let sent = self.send_message(text).await?;
            return Ok(MessageHandle::text(sent.message_id.to_string()));
        }

        let sent = self.send_photo(media.as_str(), text).await?;
        info!(message_id = sent.message_id, "Sent photo message");
        Ok(MessageHandle::media(sent.message_id.to_string()))
    }

    async fn edit_media(
        &self,
        handle: &MessageHandle,
        media: &MapReference,
        text: &str,
    ) -> Result<MessageHandle, ChannelError> {
        if !handle.has_media() {
            if media.is_empty() {
                self.edit_message_text(handle.id(), text).await?;
                return Ok(handle.clone());
            }

            let sent = self.send_photo(media.as_str(), text).await?;
            info!(
                replaced = %handle,
                message_id = sent.message_id,
                "Replaced text message with photo message"
            );
            if let Err(e) = self.delete_message(handle.id()).await {
                warn!(message_id = %handle, "Failed to delete replaced text message: {}", e);
            }
            return Ok(MessageHandle::media(sent.message_id.to_string()));
        }

        if media.is_empty() {
            warn!(message_id = %handle, "Map became empty, editing caption only");
            self.edit_message_caption(handle.id(), text).await?;
        } else {
            self.edit_message_media(handle.id(), media.as_str(), text).await?;
        }
        Ok(handle.clone())
    }

    async fn edit_caption(&self, handle: &MessageHandle, text: &str) -> Result<(), ChannelError> {
        if handle.has_media() {
            Ok(self.edit_message_caption(handle.id(), text).await?)
        } else {
            Ok(self.edit_message_text(handle.id(), text).await?)
        }
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
