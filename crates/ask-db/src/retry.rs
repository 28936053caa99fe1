//! Caller-side retry for transient store failures.
//!
//! The store layer never retries on its own: a [`DatabaseError::StoreUnavailable`]
//! is always surfaced. Callers that want to ride out lock contention or a
//! briefly unreachable replica wrap the request in [`with_retry`], which
//! re-runs it with exponential backoff.

use std::future::Future;
use std::time::Duration;

use crate::error::DatabaseError;

/// Configuration for retry behavior on retryable store errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// A single attempt, no retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

/// Detect transient Turso infrastructure errors.
///
/// These occur when Turso cloud nodes are being created, deleted, or
/// recycled, and resolve on their own within seconds. The predicate is
/// intentionally narrow to avoid retrying genuine SQL or constraint errors.
pub fn is_transient_turso_error(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("unable to acquire shared lock") || msg.contains("deletion must be in progress")
}

/// Run `op` until it succeeds, fails permanently, or attempts run out.
///
/// Only errors with [`DatabaseError::is_retryable`] are retried; the last
/// error is returned unchanged when attempts are exhausted.
///
/// # Errors
///
/// Returns the first non-retryable error, or the last retryable one.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T, DatabaseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut delay = config.base_delay;
    let mut attempt = 1;
    loop {
        match op().await {
            Err(error) if error.is_retryable() && attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    ?delay,
                    %error,
                    "store unavailable, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, config.max_delay);
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn retries_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = with_retry(&fast(3), || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(DatabaseError::StoreUnavailable("busy".into()))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), _> = with_retry(&fast(2), || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(DatabaseError::StoreUnavailable("down".into()))
        })
        .await;

        assert!(matches!(result, Err(DatabaseError::StoreUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), _> = with_retry(&fast(5), || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(DatabaseError::not_found("question", 1))
        })
        .await;

        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn none_means_single_attempt() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let _: Result<(), _> = with_retry(&RetryConfig::none(), || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(DatabaseError::StoreUnavailable("down".into()))
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
