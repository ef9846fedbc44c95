use crate::core::errors::ConfigError;
use crate::middleware::key_rotator::KeyRotation;
use std::env;
use std::time::Duration;
use tracing::Level;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub log_level: Level,
}

/// Primary provider (Gemini) configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Ordered credential set, loaded once. May be empty; the adapter then
    /// reports `ServiceUnavailable` per request.
    pub api_keys: Vec<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
}

/// Secondary provider (emj.is) configuration
#[derive(Debug, Clone)]
pub struct EmjIsConfig {
    pub endpoint: String,
}

/// Retry and credential rotation configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub delay: Duration,
    pub key_rotation: KeyRotation,
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub emjis: EmjIsConfig,
    pub retry: RetryConfig,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Self::load_from_env()?;
        config.validate()?;
        Ok(config)
    }

    fn load_from_env() -> Result<Self, ConfigError> {
        // Load API keys from environment (comma-separated) or use empty vec
        let api_keys = env::var("GEMINI_API_KEYS")
            .ok()
            .map(|keys| {
                keys.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        // Parse log level
        let log_level = env::var("LOG_LEVEL")
            .ok()
            .and_then(|s| match s.to_lowercase().as_str() {
                "trace" => Some(Level::TRACE),
                "debug" => Some(Level::DEBUG),
                "info" => Some(Level::INFO),
                "warn" | "warning" => Some(Level::WARN),
                "error" => Some(Level::ERROR),
                _ => None,
            })
            .unwrap_or(Level::INFO);

        let key_rotation = match env::var("KEY_ROTATION") {
            Ok(raw) => raw
                .parse::<KeyRotation>()
                .map_err(|_| ConfigError::InvalidKeyRotation(raw))?,
            Err(_) => KeyRotation::default(),
        };

        Ok(Self {
            server: ServerConfig {
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3000),
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                log_level,
            },
            gemini: GeminiConfig {
                api_keys,
                api_base: env::var("GEMINI_API_BASE").unwrap_or_else(|_| {
                    "https://generativelanguage.googleapis.com/v1beta".to_string()
                }),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
                temperature: env::var("GEMINI_TEMPERATURE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0.7),
                max_output_tokens: env::var("GEMINI_MAX_OUTPUT_TOKENS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
                top_p: env::var("GEMINI_TOP_P")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0.8),
                top_k: env::var("GEMINI_TOP_K")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            },
            emjis: EmjIsConfig {
                endpoint: env::var("EMJIS_ENDPOINT")
                    .unwrap_or_else(|_| "https://www.emj.is/api/translate".to_string()),
            },
            retry: RetryConfig {
                max_attempts: env::var("MAX_RETRY_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
                delay: Duration::from_millis(
                    env::var("RETRY_DELAY_MS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(1000),
                ),
                key_rotation,
            },
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // Note: an empty API key set is allowed; the primary adapter reports
        // ServiceUnavailable per request so the fallback provider keeps working.

        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(ConfigError::InvalidTemperature(self.gemini.temperature));
        }

        if !(0.0..=1.0).contains(&self.gemini.top_p) {
            return Err(ConfigError::InvalidTopP(self.gemini.top_p));
        }

        if self.gemini.max_output_tokens == 0 {
            return Err(ConfigError::InvalidMaxOutputTokens);
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidRetryAttempts(self.retry.max_attempts));
        }

        for endpoint in [&self.gemini.api_base, &self.emjis.endpoint] {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidEndpoint(endpoint.clone()));
            }
        }

        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.server.port
    }

    pub fn server_host(&self) -> &str {
        &self.server.host
    }

    pub fn log_level(&self) -> Level {
        self.server.log_level
    }

    pub fn api_keys(&self) -> &[String] {
        &self.gemini.api_keys
    }
}

// Note: No Default implementation because Config::new() can fail
// Users should explicitly call Config::new()? and handle errors
