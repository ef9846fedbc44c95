// Custom error types for better error handling and debugging
//
// Using thiserror for ergonomic error definitions with:
// - Context preservation
// - Type-safe error matching
// - Automatic Display/Error trait implementations
// - Source error chaining

use thiserror::Error;

use crate::core::types::Direction;

/// Translation provider errors
///
/// Split into a transient subset (eligible for retry) and a deterministic
/// subset that is surfaced immediately. See [`TranslationError::is_retryable`].
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation service not available (no API keys configured)")]
    ServiceUnavailable,

    #[error("provider returned HTTP {status}: {body}")]
    ProviderHttp { status: u16, body: String },

    #[error("response blocked by safety filters: {reason}")]
    SafetyBlocked { reason: String },

    #[error("response hit the output token ceiling before producing content")]
    TruncatedOutput,

    #[error("no usable content in provider response: {0}")]
    MalformedResponse(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl TranslationError {
    /// Whether the failure is transient infrastructure trouble worth retrying.
    ///
    /// Safety blocks, truncation, and malformed envelopes are deterministic
    /// properties of the request itself and are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TranslationError::ProviderHttp { .. } | TranslationError::Network(_)
        )
    }
}

/// Route-level failure: a provider error tagged with the direction that was
/// being translated when it occurred.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Failed to translate text to emoji: {source}")]
    TextToEmoji {
        #[source]
        source: TranslationError,
    },

    #[error("Failed to translate emoji to text: {source}")]
    EmojiToText {
        #[source]
        source: TranslationError,
    },
}

impl RouteError {
    pub fn wrap(direction: Direction, source: TranslationError) -> Self {
        match direction {
            Direction::TextToEmoji => RouteError::TextToEmoji { source },
            Direction::EmojiToText => RouteError::EmojiToText { source },
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("temperature must be in [0.0, 2.0], got {0}")]
    InvalidTemperature(f32),

    #[error("top_p must be in [0.0, 1.0], got {0}")]
    InvalidTopP(f32),

    #[error("max_output_tokens must be > 0")]
    InvalidMaxOutputTokens,

    #[error("max_retry_attempts must be >= 1, got {0}")]
    InvalidRetryAttempts(u32),

    #[error("invalid key rotation mode {0:?} (expected \"per-attempt\" or \"per-request\")")]
    InvalidKeyRotation(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

// Convenience type aliases for Results
pub type TranslationResult<T> = Result<T, TranslationError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
