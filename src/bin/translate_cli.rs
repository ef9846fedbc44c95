/// Manual test binary for the translation router
///
/// Runs one translation against the live providers using the same wiring as
/// the server.
///
/// Usage: cargo run --bin translate_cli -- <text-to-emoji|emoji-to-text> <text...>

use anyhow::Result;
use std::sync::Arc;

use emoji_speak::core::{Config, Direction};
use emoji_speak::middleware::{KeyRotator, RetryPolicy};
use emoji_speak::orchestration::TranslationRouter;
use emoji_speak::services::{EmjIsClient, GeminiClient};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <text-to-emoji|emoji-to-text> <text...>",
            args[0]
        );
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter("emoji_speak=debug")
        .init();

    let config = Arc::new(Config::new()?);
    let direction = Direction::from_mode(&args[1]);
    let text = args[2..].join(" ");

    let key_rotator = Arc::new(KeyRotator::new(config.gemini.api_keys.clone()));
    let gemini = Arc::new(GeminiClient::new(config.clone(), key_rotator.clone(), None)?);
    let emjis = Arc::new(EmjIsClient::new(&config.emjis)?);
    let retry_policy = RetryPolicy {
        max_attempts: config.retry.max_attempts,
        delay: config.retry.delay,
    };
    let router = TranslationRouter::new(
        gemini,
        emjis,
        key_rotator,
        retry_policy,
        config.retry.key_rotation,
        None,
    );

    println!("[{direction}] {text}");
    match router.route(direction, &text).await {
        Ok(translation) => println!("{translation}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
