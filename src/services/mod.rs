pub mod translation;

// Re-export commonly used services
pub use translation::{EmjIsClient, EmojiTranslator, ForwardTranslator, GeminiClient};
