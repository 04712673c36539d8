//! Bot API HTTP client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::TelegramConfig;
use crate::error::TelegramError;
use crate::types::{ApiResponse, InputMediaPhoto, SentMessage};

/// Client for the Telegram Bot API, bound to one chat.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    config: TelegramConfig,
}

impl TelegramClient {
    /// Create a client. Fails if the configuration is incomplete.
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TelegramError::Http)?;

        Ok(Self { http, config })
    }

    /// Send a photo with an HTML caption.
    pub async fn send_photo(&self, photo: &str, caption: &str) -> Result<SentMessage, TelegramError> {
        let form = vec![
            ("chat_id", self.config.chat_id.clone()),
            ("caption", caption.to_string()),
            ("photo", photo.to_string()),
            ("parse_mode", self.config.parse_mode.clone()),
            ("allow_sending_without_reply", "true".to_string()),
            ("protect_content", "false".to_string()),
        ];
        self.call("sendPhoto", &form).await
    }

    /// Send a text message.
    pub async fn send_message(&self, text: &str) -> Result<SentMessage, TelegramError> {
        let form = vec![
            ("chat_id", self.config.chat_id.clone()),
            ("text", text.to_string()),
            ("parse_mode", self.config.parse_mode.clone()),
            ("allow_sending_without_reply", "true".to_string()),
        ];
        self.call("sendMessage", &form).await
    }

    /// Replace the photo and caption of a sent message.
    pub async fn edit_message_media(
        &self,
        message_id: &str,
        photo: &str,
        caption: &str,
    ) -> Result<(), TelegramError> {
        let media = InputMediaPhoto::new(photo, caption, &self.config.parse_mode);
        let form = vec![
            ("chat_id", self.config.chat_id.clone()),
            ("message_id", message_id.to_string()),
            ("media", serde_json::to_string(&media)?),
        ];
        self.edit("editMessageMedia", &form).await
    }

    /// Replace the caption of a sent photo.
    pub async fn edit_message_caption(
        &self,
        message_id: &str,
        caption: &str,
    ) -> Result<(), TelegramError> {
        let form = vec![
            ("chat_id", self.config.chat_id.clone()),
            ("message_id", message_id.to_string()),
            ("caption", caption.to_string()),
            ("parse_mode", self.config.parse_mode.clone()),
        ];
        self.edit("editMessageCaption", &form).await
    }

    /// Replace the text of a sent text message.
    pub async fn edit_message_text(&self, message_id: &str, text: &str) -> Result<(), TelegramError> {
        let form = vec![
            ("chat_id", self.config.chat_id.clone()),
            ("message_id", message_id.to_string()),
            ("text", text.to_string()),
            ("parse_mode", self.config.parse_mode.clone()),
        ];
        self.edit("editMessageText", &form).await
    }

    /// Delete a sent message.
    pub async fn delete_message(&self, message_id: &str) -> Result<(), TelegramError> {
        let form = vec![
            ("chat_id", self.config.chat_id.clone()),
            ("message_id", message_id.to_string()),
        ];
        self.call::<Value>("deleteMessage", &form).await.map(|_| ())
    }

    /// Get the configuration.
    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Edits return the edited message or `true`; neither is needed.
    /// An edit that changes nothing counts as success.
    async fn edit(&self, method: &str, form: &[(&str, String)]) -> Result<(), TelegramError> {
        match self.call::<Value>(method, form).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_modified() => {
                debug!("{}: message is not modified", method);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// POST a form-encoded Bot API call and unwrap its `result`.
    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        form: &[(&str, String)],
    ) -> Result<R, TelegramError> {
        debug!("Bot API call: {}", method);

        let response = self
            .http
            .post(self.config.method_url(method))
            .form(form)
            .send()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ApiResponse<R> = serde_json::from_str(&body)?;
        if !parsed.ok {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                body: parsed.description.unwrap_or(body),
            });
        }

        parsed.result.ok_or_else(|| TelegramError::Api {
            status: status.as_u16(),
            body: "No result in response".to_string(),
        })
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("config", &self.config)
            .finish()
    }
}
