//! Telegram Bot API client used as the relay's notification channel.
//!
//! This crate provides a small client for the handful of Bot API methods the
//! relay needs:
//!
//! - Sending a photo with an HTML caption (or plain text when there is no map)
//! - Replacing the photo and caption of a sent message
//! - Replacing only the caption (or text) of a sent message
//!
//! [`TelegramClient`] implements [`incident_core::NotificationChannel`].
//!
//! # Example
//!
//! ```no_run
//! use telegram_client::{TelegramClient, TelegramConfig};
//!
//! # async fn example() -> Result<(), telegram_client::TelegramError> {
//! let config = TelegramConfig::new("123456:ABC-DEF", "-1001234567890");
//! let client = TelegramClient::new(config)?;
//!
//! let sent = client
//!     .send_photo("https://example.com/map.png", "<b>Alert</b>")
//!     .await?;
//! client
//!     .edit_message_caption(&sent.message_id.to_string(), "<b>Alert</b> (updated)")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::TelegramClient;
pub use config::TelegramConfig;
pub use error::TelegramError;
pub use types::{InputMediaPhoto, SentMessage};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
