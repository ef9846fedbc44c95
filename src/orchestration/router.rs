// Translation router
//
// Picks the provider path for a request. Forward translation tries the
// secondary provider first and falls back to Gemini once the secondary's
// retry budget is spent; reverse translation goes straight to Gemini,
// because the secondary provider only translates one way.

use std::sync::Arc;
use tracing::warn;

use crate::core::errors::{RouteError, TranslationResult};
use crate::core::types::Direction;
use crate::middleware::key_rotator::{KeyRotation, KeyRotator};
use crate::middleware::retry::{retry, RetryPolicy};
use crate::services::translation::{EmojiTranslator, ForwardTranslator};
use crate::utils::Metrics;

pub struct TranslationRouter {
    primary: Arc<dyn EmojiTranslator>,
    secondary: Arc<dyn ForwardTranslator>,
    key_rotator: Arc<KeyRotator>,
    retry_policy: RetryPolicy,
    key_rotation: KeyRotation,
    metrics: Option<Metrics>,
}

impl TranslationRouter {
    pub fn new(
        primary: Arc<dyn EmojiTranslator>,
        secondary: Arc<dyn ForwardTranslator>,
        key_rotator: Arc<KeyRotator>,
        retry_policy: RetryPolicy,
        key_rotation: KeyRotation,
        metrics: Option<Metrics>,
    ) -> Self {
        Self {
            primary,
            secondary,
            key_rotator,
            retry_policy,
            key_rotation,
            metrics,
        }
    }

    /// Route one translation request. Each provider call runs under its own
    /// retry budget; failures carry the direction in their message.
    pub async fn route(&self, direction: Direction, text: &str) -> Result<String, RouteError> {
        match direction {
            Direction::TextToEmoji => {
                let secondary =
                    retry(&self.retry_policy, || self.secondary.text_to_emoji(text)).await;

                match secondary {
                    Ok(translation) => Ok(translation),
                    Err(e) => {
                        warn!(error = %e, "emj.is failed, falling back to Gemini");
                        if let Some(ref m) = self.metrics {
                            m.record_fallback();
                        }
                        self.primary_with_retry(direction, text)
                            .await
                            .map_err(|source| RouteError::wrap(direction, source))
                    }
                }
            }
            Direction::EmojiToText => self
                .primary_with_retry(direction, text)
                .await
                .map_err(|source| RouteError::wrap(direction, source)),
        }
    }

    /// Run the primary adapter under the retry budget, honoring the
    /// configured credential rotation policy.
    async fn primary_with_retry(
        &self,
        direction: Direction,
        text: &str,
    ) -> TranslationResult<String> {
        match self.key_rotation {
            KeyRotation::PerAttempt => {
                // Every attempt re-enters translate() and draws the next key
                retry(&self.retry_policy, || self.primary.translate(direction, text)).await
            }
            KeyRotation::PerRequest => {
                let api_key = self.key_rotator.next()?;
                retry(&self.retry_policy, || {
                    self.primary.translate_pinned(direction, text, &api_key)
                })
                .await
            }
        }
    }
}
