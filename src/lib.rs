// Library exports for the Emoji Speak translation backend

// Core modules
pub mod core;
pub mod middleware;
pub mod orchestration;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions
pub use core::{
    config::Config,
    errors::{ConfigError, RouteError, TranslationError},
    types::{Direction, ErrorResponse, TranslateRequest, TranslateResponse},
};

pub use middleware::{KeyRotation, KeyRotator, RetryPolicy};

pub use orchestration::TranslationRouter;

pub use services::{EmjIsClient, EmojiTranslator, ForwardTranslator, GeminiClient};

pub use utils::Metrics;
