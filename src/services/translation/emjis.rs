// emj.is API client
//
// Single-purpose forward translator: POSTs the raw text and returns the
// `emojiText` field of the reply. No credential required.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::EmjIsConfig;
use crate::core::errors::{TranslationError, TranslationResult};
use crate::services::translation::ForwardTranslator;

pub struct EmjIsClient {
    endpoint: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct EmjIsResponse {
    #[serde(rename = "emojiText")]
    emoji_text: String,
}

impl EmjIsClient {
    pub fn new(config: &EmjIsConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl ForwardTranslator for EmjIsClient {
    #[instrument(skip(self, text))]
    async fn text_to_emoji(&self, text: &str) -> TranslationResult<String> {
        debug!("forward translation via emj.is");

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&json!({ "text": text }))
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

        let raw = response.text().await?;
        let body: EmjIsResponse = serde_json::from_str(&raw).map_err(|e| {
            TranslationError::MalformedResponse(format!("missing emojiText field: {e}"))
        })?;

        Ok(body.emoji_text)
    }
}
