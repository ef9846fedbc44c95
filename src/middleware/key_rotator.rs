// Round-robin API key rotation
//
// Hands out credentials from a fixed, ordered set, one per call. Pure
// rotation: no health tracking, no exclusion of previously-failed keys.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::str::FromStr;
use tracing::debug;

use crate::core::errors::{TranslationError, TranslationResult};

/// When a retried request draws its credential.
///
/// `PerAttempt` reproduces the behavior where every retry attempt draws the
/// next key from the rotation; `PerRequest` pins one key for all attempts of
/// a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyRotation {
    #[default]
    PerAttempt,
    PerRequest,
}

impl FromStr for KeyRotation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-attempt" => Ok(KeyRotation::PerAttempt),
            "per-request" => Ok(KeyRotation::PerRequest),
            _ => Err(()),
        }
    }
}

/// Round-robin cursor over an immutable credential set.
///
/// The cursor is a relaxed atomic: concurrent requests may interleave draws
/// and skip or repeat positions relative to each other. Credential order has
/// no correctness requirement, so no stronger synchronization is used.
pub struct KeyRotator {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyRotator {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Return the credential at the cursor and advance by one, wrapping
    /// around. Fails with `ServiceUnavailable` when no keys are configured.
    pub fn next(&self) -> TranslationResult<String> {
        if self.keys.is_empty() {
            return Err(TranslationError::ServiceUnavailable);
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        debug!(key_index = index, total = self.keys.len(), "drew API key");
        Ok(self.keys[index].clone())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_through_all_keys_in_order() {
        let rotator = KeyRotator::new(vec![
            "key1".to_string(),
            "key2".to_string(),
            "key3".to_string(),
        ]);

        assert_eq!(rotator.next().unwrap(), "key1");
        assert_eq!(rotator.next().unwrap(), "key2");
        assert_eq!(rotator.next().unwrap(), "key3");
        // Call N+1 wraps back to the first key
        assert_eq!(rotator.next().unwrap(), "key1");
    }

    #[test]
    fn empty_set_fails_fast() {
        let rotator = KeyRotator::new(Vec::new());
        assert!(matches!(
            rotator.next(),
            Err(TranslationError::ServiceUnavailable)
        ));
    }

    #[test]
    fn rotation_mode_parses() {
        assert_eq!("per-attempt".parse(), Ok(KeyRotation::PerAttempt));
        assert_eq!("per-request".parse(), Ok(KeyRotation::PerRequest));
        assert!("round-robin".parse::<KeyRotation>().is_err());
    }
}
