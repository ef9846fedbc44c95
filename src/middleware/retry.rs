// Bounded retry with a fixed delay between attempts
//
// The whole operation is re-invoked from scratch on each attempt; there is
// no partial resumption. Only transient failures (non-2xx provider status,
// transport errors) consume the retry budget — deterministic rejections
// surface immediately.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::core::errors::{TranslationError, TranslationResult};

/// Retry budget for one logical provider call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total invocations of the operation, including the first.
    pub max_attempts: u32,
    /// Fixed pause between attempts. No backoff growth.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Run `operation` up to `policy.max_attempts` times.
///
/// Returns the first success, or the last error unchanged once the budget is
/// exhausted. Non-retryable errors (see [`TranslationError::is_retryable`])
/// are propagated from the attempt that produced them.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> TranslationResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TranslationResult<T>>,
{
    let mut attempt: u32 = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %e,
                    "attempt failed, retrying after {:?}",
                    policy.delay
                );
                attempt += 1;
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
