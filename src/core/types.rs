// Request/response types shared between the HTTP layer and the router

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two translation modes a request specifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "text-to-emoji")]
    TextToEmoji,
    #[serde(rename = "emoji-to-text")]
    EmojiToText,
}

impl Direction {
    /// Map the wire-level `mode` field to a direction.
    ///
    /// Anything other than `text-to-emoji` routes as emoji-to-text, matching
    /// the translate route's else-branch.
    pub fn from_mode(mode: &str) -> Self {
        if mode == "text-to-emoji" {
            Direction::TextToEmoji
        } else {
            Direction::EmojiToText
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TextToEmoji => write!(f, "text-to-emoji"),
            Direction::EmojiToText => write!(f, "emoji-to-text"),
        }
    }
}

/// Inbound body for `POST /translate`.
///
/// Both fields are optional at the serde level so field validation stays in
/// the handler, which answers with the contract's 400 body instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
