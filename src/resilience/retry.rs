//! # Retry Primitive
//!
//! Calls an async operation and re-attempts it on failure, gated by an
//! optional predicate and bounded by `max_retries`. The last error is returned
//! exactly as the operation produced it.

use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Hook invoked before each re-attempt with the failure and the 1-based retry number
pub type OnRetry<'a, E> = &'a (dyn Fn(&E, u32) + Send + Sync);

/// Predicate deciding whether a failure may be retried
pub type ShouldRetryFn<'a, E> = &'a (dyn Fn(&E) -> bool + Send + Sync);

/// Execute `operation`, retrying failures under the given budget
///
/// On each failure the attempt counter is incremented. If `should_retry` is
/// present and rejects the error, it is returned immediately. Once the counter
/// exceeds `max_retries` the error is returned. Otherwise `on_retry` runs, the
/// call sleeps for `delay_ms` (no sleep when zero) and the operation is called
/// again. At most `max_retries + 1` calls are made.
pub async fn with_retry<T, E, F, Fut>(
    mut operation: F,
    max_retries: u32,
    delay_ms: u64,
    on_retry: Option<OnRetry<'_, E>>,
    should_retry: Option<ShouldRetryFn<'_, E>>,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                attempt = attempt.saturating_add(1);

                if let Some(should_retry) = should_retry {
                    if !should_retry(&error) {
                        debug!(attempt, "Retry predicate rejected error, not retrying");
                        return Err(error);
                    }
                }

                if attempt > max_retries {
                    debug!(attempt, max_retries, "Retry budget exhausted");
                    return Err(error);
                }

                if let Some(on_retry) = on_retry {
                    on_retry(&error, attempt);
                }

                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}
