// Gemini API client for rebus translation
//
// Sends the templated prompt to generateContent, classifies the response
// envelope into exactly one of four outcomes (success, safety-blocked,
// truncated, malformed), and post-processes the extracted string by
// translation direction.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::core::config::Config;
use crate::core::errors::{TranslationError, TranslationResult};
use crate::core::types::Direction;
use crate::middleware::key_rotator::KeyRotator;
use crate::services::translation::prompt::build_prompt;
use crate::services::translation::EmojiTranslator;
use crate::utils::Metrics;

/// Finish reasons that indicate the provider refused the content.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION"];

/// Finish reason for a length-limit cutoff.
const LENGTH_FINISH_REASON: &str = "MAX_TOKENS";

/// Gemini API client with credential rotation and call metrics
pub struct GeminiClient {
    config: Arc<Config>,
    key_rotator: Arc<KeyRotator>,
    http_client: reqwest::Client,
    metrics: Option<Metrics>,
}

/// `generateContent` response envelope. Every field is optional because the
/// shape varies by outcome; classification happens in [`extract_candidate_text`].
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a new client sharing the process-wide key rotation.
    pub fn new(
        config: Arc<Config>,
        key_rotator: Arc<KeyRotator>,
        metrics: Option<Metrics>,
    ) -> Result<Self> {
        // Get timeout from config (default 30s)
        let timeout = Duration::from_secs(
            std::env::var("API_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        );

        // Create HTTP client with timeout and connection pooling
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            key_rotator,
            http_client,
            metrics,
        })
    }

    /// Get the total number of configured API keys
    pub fn total_keys(&self) -> usize {
        self.key_rotator.len()
    }

    async fn request(
        &self,
        direction: Direction,
        text: &str,
        api_key: &str,
    ) -> TranslationResult<String> {
        let gemini = &self.config.gemini;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            gemini.api_base, gemini.model, api_key
        );

        let prompt = build_prompt(text);
        let request_body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": gemini.temperature,
                "maxOutputTokens": gemini.max_output_tokens,
                "topP": gemini.top_p,
                "topK": gemini.top_k,
            }
        });

        let start = Instant::now();
        let result = self.send(&url, &request_body).await;

        if let Some(ref m) = self.metrics {
            m.record_api_call(result.is_ok(), start.elapsed());
        }

        let raw = result?;
        Ok(postprocess(direction, &raw))
    }

    async fn send(&self, url: &str, body: &serde_json::Value) -> TranslationResult<String> {
        let response = self
            .http_client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ProviderHttp {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let envelope: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| TranslationError::MalformedResponse(format!("invalid JSON body: {e}")))?;

        extract_candidate_text(&envelope)
    }
}

#[async_trait]
impl EmojiTranslator for GeminiClient {
    /// Draws the next credential from the rotation, advancing the cursor
    /// exactly once per call.
    #[instrument(skip(self, text), fields(direction = %direction))]
    async fn translate(&self, direction: Direction, text: &str) -> TranslationResult<String> {
        let api_key = self.key_rotator.next()?;
        debug!("translating with rotated key");
        self.request(direction, text, &api_key).await
    }

    #[instrument(skip(self, text, api_key), fields(direction = %direction))]
    async fn translate_pinned(
        &self,
        direction: Direction,
        text: &str,
        api_key: &str,
    ) -> TranslationResult<String> {
        debug!("translating with pinned key");
        self.request(direction, text, api_key).await
    }
}

/// Classify the response envelope into exactly one of four outcomes and
/// extract the candidate text on success.
fn extract_candidate_text(response: &GenerateContentResponse) -> TranslationResult<String> {
    let candidate = response.candidates.first().ok_or_else(|| {
        TranslationError::MalformedResponse("no candidates in response".to_string())
    })?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            return Err(TranslationError::SafetyBlocked {
                reason: reason.to_string(),
            });
        }
    }

    if let Some(text) = candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.as_deref())
    {
        return Ok(text.trim().to_string());
    }

    if candidate.finish_reason.as_deref() == Some(LENGTH_FINISH_REASON) {
        return Err(TranslationError::TruncatedOutput);
    }

    Err(TranslationError::MalformedResponse(
        "no text content in first candidate".to_string(),
    ))
}

fn postprocess(direction: Direction, raw: &str) -> String {
    match direction {
        Direction::TextToEmoji => extract_emoji(raw),
        Direction::EmojiToText => clean_text(raw),
    }
}

/// Ranges the forward direction keeps from the model reply. Everything else
/// (connective prose, explanations) is dropped.
fn is_pictographic(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F600..=0x1F64F   // emoticons
            | 0x1F300..=0x1F5FF // symbols & pictographs
            | 0x1F680..=0x1F6FF // transport & map
            | 0x1F1E0..=0x1F1FF // regional indicators
            | 0x2600..=0x26FF   // miscellaneous symbols
            | 0x2700..=0x27BF   // dingbats
    )
}

/// Keep only pictographic characters, joined by single spaces. If the reply
/// contains none, it is returned unchanged.
fn extract_emoji(raw: &str) -> String {
    let emoji: Vec<String> = raw
        .chars()
        .filter(|c| is_pictographic(*c))
        .map(String::from)
        .collect();

    if emoji.is_empty() {
        raw.to_string()
    } else {
        emoji.join(" ")
    }
}

/// Strip one leading and one trailing quote character, trim, and collapse
/// all internal whitespace (newlines included) to single spaces.
fn clean_text(raw: &str) -> String {
    const QUOTES: &[char] = &['"', '\''];

    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix(QUOTES).unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix(QUOTES).unwrap_or(unquoted);
    unquoted.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extracts_and_trims_candidate_text() {
        let response = envelope(json!({
            "candidates": [{ "content": { "parts": [{ "text": "  Hot dog  " }] } }]
        }));
        assert_eq!(extract_candidate_text(&response).unwrap(), "Hot dog");
    }

    #[test]
    fn safety_finish_reason_is_blocked() {
        let response = envelope(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }));
        assert!(matches!(
            extract_candidate_text(&response),
            Err(TranslationError::SafetyBlocked { reason }) if reason == "SAFETY"
        ));
    }

    #[test]
    fn recitation_finish_reason_is_blocked() {
        let response = envelope(json!({
            "candidates": [{ "finishReason": "RECITATION" }]
        }));
        assert!(matches!(
            extract_candidate_text(&response),
            Err(TranslationError::SafetyBlocked { .. })
        ));
    }

    #[test]
    fn token_ceiling_without_content_is_truncated() {
        let response = envelope(json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        }));
        assert!(matches!(
            extract_candidate_text(&response),
            Err(TranslationError::TruncatedOutput)
        ));
    }

    #[test]
    fn text_present_wins_over_token_ceiling() {
        // A MAX_TOKENS finish with parseable content still counts as success
        let response = envelope(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hot dog" }] },
                "finishReason": "MAX_TOKENS"
            }]
        }));
        assert_eq!(extract_candidate_text(&response).unwrap(), "Hot dog");
    }

    #[test]
    fn empty_and_unrecognized_shapes_are_malformed() {
        for value in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "finishReason": "STOP" }] }),
        ] {
            let response = envelope(value);
            assert!(matches!(
                extract_candidate_text(&response),
                Err(TranslationError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn forward_direction_keeps_only_pictographs() {
        assert_eq!(
            postprocess(Direction::TextToEmoji, "😀 hello 🎉"),
            "😀 🎉"
        );
    }

    #[test]
    fn forward_direction_returns_raw_reply_without_pictographs() {
        assert_eq!(
            postprocess(Direction::TextToEmoji, "no emoji here"),
            "no emoji here"
        );
    }

    #[test]
    fn reverse_direction_cleans_quotes_and_whitespace() {
        assert_eq!(
            postprocess(Direction::EmojiToText, "  'Hello\nWorld'  "),
            "Hello World"
        );
    }

    #[test]
    fn reverse_direction_strips_at_most_one_quote_pair() {
        assert_eq!(postprocess(Direction::EmojiToText, "\"'Hi'\""), "'Hi'");
    }
}
