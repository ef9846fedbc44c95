// Main entry point for the Emoji Speak translation backend

use emoji_speak::{
    core::{Config, Direction, ErrorResponse, TranslateRequest, TranslateResponse},
    middleware::{KeyRotator, RetryPolicy},
    orchestration::TranslationRouter,
    services::{EmjIsClient, GeminiClient},
    utils::Metrics,
};

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    router: Arc<TranslationRouter>,
    metrics: Metrics,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Arc::new(Config::new().expect("Failed to load configuration"));

    // Initialize logging
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new(format!(
        "emoji_speak={}",
        match config.log_level() {
            tracing::Level::TRACE => "trace",
            tracing::Level::DEBUG => "debug",
            tracing::Level::INFO => "info",
            tracing::Level::WARN => "warn",
            tracing::Level::ERROR => "error",
        }
    ));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("=== EMOJI SPEAK TRANSLATOR BACKEND ===");
    info!(
        "Config: keys={} model={} retries={} rotation={:?}",
        config.api_keys().len(),
        config.gemini.model,
        config.retry.max_attempts,
        config.retry.key_rotation,
    );

    // Initialize metrics
    let metrics = Metrics::new();

    // Wire up the provider stack
    let key_rotator = Arc::new(KeyRotator::new(config.gemini.api_keys.clone()));
    let gemini = Arc::new(GeminiClient::new(
        config.clone(),
        key_rotator.clone(),
        Some(metrics.clone()),
    )?);
    let emjis = Arc::new(EmjIsClient::new(&config.emjis)?);
    let retry_policy = RetryPolicy {
        max_attempts: config.retry.max_attempts,
        delay: config.retry.delay,
    };
    let translation_router = Arc::new(TranslationRouter::new(
        gemini,
        emjis,
        key_rotator,
        retry_policy,
        config.retry.key_rotation,
        Some(metrics.clone()),
    ));

    let state = AppState {
        config: config.clone(),
        router: translation_router,
        metrics,
    };

    let addr = format!("{}:{}", config.server_host(), config.server_port());
    info!("{}", "=".repeat(70));
    info!("Server starting on http://{}", addr);
    info!("{}", "-".repeat(70));
    info!("Endpoints:");
    info!("  GET  /                - Root endpoint");
    info!("  GET  /health          - Health check");
    info!("  GET  /health/api-keys - API key status");
    info!("  GET  /metrics         - Prometheus metrics");
    info!("  GET  /stats           - Detailed statistics");
    info!("  POST /translate       - Translate text (JSON)");
    info!("{}", "=".repeat(70));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Build the HTTP router
fn app(state: AppState) -> Router {
    // Setup CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/health/api-keys", get(health_api_keys))
        .route("/metrics", get(metrics_endpoint))
        .route("/stats", get(stats_endpoint))
        .route("/translate", post(translate))
        .with_state(state)
        .layer(cors)
}

async fn root() -> &'static str {
    "Emoji Speak Translator Backend"
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// API key status endpoint
async fn health_api_keys(State(state): State<AppState>) -> Json<serde_json::Value> {
    let total_keys = state.config.api_keys().len();
    Json(serde_json::json!({
        "status": if total_keys > 0 { "configured" } else { "missing" },
        "total_keys": total_keys,
    }))
}

/// Prometheus metrics endpoint
async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        state.metrics.to_prometheus(),
    )
}

/// Detailed statistics endpoint (JSON)
async fn stats_endpoint(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let snapshot = state.metrics.snapshot();
    serde_json::to_value(snapshot).map(Json).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize metrics: {}", e),
        )
    })
}

/// Translate endpoint
///
/// # Request Format:
/// - JSON body: `{"text": "...", "mode": "text-to-emoji" | "emoji-to-text"}`
///
/// # Response:
/// - `200 {"translation": "..."}` on success
/// - `400 {"error": "Missing text or mode"}` when either field is absent or empty
/// - `500 {"error": "Failed to translate"}` when all providers are exhausted
async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<ErrorResponse>)> {
    state.metrics.record_endpoint_request("/translate");

    let (text, mode) = match (request.text.as_deref(), request.mode.as_deref()) {
        (Some(text), Some(mode)) if !text.is_empty() && !mode.is_empty() => (text, mode),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing text or mode".to_string(),
                }),
            ))
        }
    };

    let direction = Direction::from_mode(mode);
    match state.router.route(direction, text).await {
        Ok(translation) => Ok(Json(TranslateResponse { translation })),
        Err(e) => {
            // Provider detail stays in the server log; the client gets a
            // generic failure.
            error!(error = %e, "Translation error");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to translate".to_string(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use emoji_speak::core::config::{EmjIsConfig, GeminiConfig, RetryConfig, ServerConfig};
    use emoji_speak::core::errors::{TranslationError, TranslationResult};
    use emoji_speak::middleware::KeyRotation;
    use emoji_speak::services::{EmojiTranslator, ForwardTranslator};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    struct FakePrimary {
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl EmojiTranslator for FakePrimary {
        async fn translate(&self, _: Direction, _: &str) -> TranslationResult<String> {
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err(TranslationError::ProviderHttp {
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            }
        }

        async fn translate_pinned(
            &self,
            direction: Direction,
            text: &str,
            _: &str,
        ) -> TranslationResult<String> {
            self.translate(direction, text).await
        }
    }

    struct FakeSecondary {
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl ForwardTranslator for FakeSecondary {
        async fn text_to_emoji(&self, _: &str) -> TranslationResult<String> {
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err(TranslationError::ProviderHttp {
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            }
        }
    }

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                log_level: tracing::Level::INFO,
            },
            gemini: GeminiConfig {
                api_keys: vec!["test-key".to_string()],
                api_base: "http://localhost:1".to_string(),
                model: "gemini-pro".to_string(),
                temperature: 0.7,
                max_output_tokens: 1000,
                top_p: 0.8,
                top_k: 10,
            },
            emjis: EmjIsConfig {
                endpoint: "http://localhost:1".to_string(),
            },
            retry: RetryConfig {
                max_attempts: 2,
                delay: Duration::from_millis(1),
                key_rotation: KeyRotation::PerAttempt,
            },
        })
    }

    fn test_app(primary: FakePrimary, secondary: FakeSecondary) -> Router {
        let config = test_config();
        let key_rotator = Arc::new(KeyRotator::new(config.gemini.api_keys.clone()));
        let retry_policy = RetryPolicy {
            max_attempts: config.retry.max_attempts,
            delay: config.retry.delay,
        };
        let router = Arc::new(TranslationRouter::new(
            Arc::new(primary),
            Arc::new(secondary),
            key_rotator,
            retry_policy,
            config.retry.key_rotation,
            None,
        ));
        app(AppState {
            config,
            router,
            metrics: Metrics::new(),
        })
    }

    async fn post_translate(
        app: Router,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/translate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn translates_emoji_to_text() {
        let app = test_app(
            FakePrimary { reply: Some("Hello") },
            FakeSecondary { reply: None },
        );

        let (status, body) = post_translate(
            app,
            serde_json::json!({ "text": "👋", "mode": "emoji-to-text" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "translation": "Hello" }));
    }

    #[tokio::test]
    async fn missing_mode_is_a_bad_request() {
        let app = test_app(
            FakePrimary { reply: Some("unused") },
            FakeSecondary { reply: Some("unused") },
        );

        let (status, body) = post_translate(app, serde_json::json!({ "text": "👋" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Missing text or mode" }));
    }

    #[tokio::test]
    async fn empty_text_is_a_bad_request() {
        let app = test_app(
            FakePrimary { reply: Some("unused") },
            FakeSecondary { reply: Some("unused") },
        );

        let (status, body) =
            post_translate(app, serde_json::json!({ "text": "", "mode": "emoji-to-text" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Missing text or mode" }));
    }

    #[tokio::test]
    async fn exhausted_providers_collapse_to_a_generic_500() {
        let app = test_app(FakePrimary { reply: None }, FakeSecondary { reply: None });

        let (status, body) = post_translate(
            app,
            serde_json::json!({ "text": "party", "mode": "text-to-emoji" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Failed to translate" }));
    }

    #[tokio::test]
    async fn forward_route_uses_secondary_reply() {
        let app = test_app(
            FakePrimary { reply: None },
            FakeSecondary { reply: Some("🎉") },
        );

        let (status, body) = post_translate(
            app,
            serde_json::json!({ "text": "party", "mode": "text-to-emoji" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "translation": "🎉" }));
    }
}
