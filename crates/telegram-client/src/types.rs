//! Bot API request and response types.

use serde::{Deserialize, Serialize};

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The part of a sent message the relay keeps.
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    /// Identifier of the message inside the chat.
    pub message_id: i64,
}

/// Photo payload for `editMessageMedia`.
#[derive(Debug, Clone, Serialize)]
pub struct InputMediaPhoto<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media: &'a str,
    pub caption: &'a str,
    pub parse_mode: &'a str,
}

impl<'a> InputMediaPhoto<'a> {
    pub fn new(media: &'a str, caption: &'a str, parse_mode: &'a str) -> Self {
        Self {
            kind: "photo",
            media,
            caption,
            parse_mode,
        }
    }
}
