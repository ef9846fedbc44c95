pub mod emjis;
pub mod gemini;
pub mod prompt;

use async_trait::async_trait;

use crate::core::errors::TranslationResult;
use crate::core::types::Direction;

/// Bidirectional translation backed by the generative-language provider.
///
/// The trait seam exists so the router can be exercised against fakes; the
/// production implementation is [`gemini::GeminiClient`].
#[async_trait]
pub trait EmojiTranslator: Send + Sync {
    /// Translate, drawing the next credential from the rotation.
    async fn translate(&self, direction: Direction, text: &str) -> TranslationResult<String>;

    /// Translate with an explicitly pinned credential. Used when the
    /// rotation policy fixes one key for all attempts of a request.
    async fn translate_pinned(
        &self,
        direction: Direction,
        text: &str,
        api_key: &str,
    ) -> TranslationResult<String>;
}

/// Forward-only (text to emoji) translation backed by the secondary provider.
#[async_trait]
pub trait ForwardTranslator: Send + Sync {
    async fn text_to_emoji(&self, text: &str) -> TranslationResult<String>;
}

// Re-export commonly used services
pub use emjis::EmjIsClient;
pub use gemini::GeminiClient;
