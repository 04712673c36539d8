//! Configuration types for telegram-client.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::TelegramError;

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Bot API client.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Base URL of the Bot API (override for a local Bot API server or tests).
    pub api_url: String,
    /// Bot token. Never logged.
    pub bot_token: String,
    /// Chat that receives the notifications.
    pub chat_id: String,
    /// Parse mode for captions and text.
    pub parse_mode: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl TelegramConfig {
    /// Create a configuration for the public Bot API.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            parse_mode: "HTML".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different Bot API server.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `TELEGRAM_BOT_TOKEN`
    /// - `TELEGRAM_CHAT_ID`
    ///
    /// Optional env vars:
    /// - `TELEGRAM_API_URL` (default: https://api.telegram.org)
    pub fn from_env() -> Result<Self, TelegramError> {
        let bot_token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| TelegramError::Config("TELEGRAM_BOT_TOKEN not set".to_string()))?;
        let chat_id = env::var("TELEGRAM_CHAT_ID")
            .map_err(|_| TelegramError::Config("TELEGRAM_CHAT_ID not set".to_string()))?;

        let mut config = Self::new(bot_token, chat_id);
        if let Ok(url) = env::var("TELEGRAM_API_URL") {
            config = config.with_api_url(url);
        }
        Ok(config)
    }

    /// URL of a Bot API method.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.bot_token, method)
    }

    /// Check that the required fields are present.
    pub fn validate(&self) -> Result<(), TelegramError> {
        if self.bot_token.trim().is_empty() {
            return Err(TelegramError::Config("bot token is empty".to_string()));
        }
        if self.chat_id.trim().is_empty() {
            return Err(TelegramError::Config("chat id is empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("parse_mode", &self.parse_mode)
            .field("timeout", &self.timeout)
            .finish()
    }
}
