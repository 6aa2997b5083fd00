//! # Retry Policy
//!
//! Immutable retry configuration attached to a step or to one phase of a
//! chunk pipeline.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::retry::{with_retry, OnRetry};
use crate::constants::defaults;
use crate::error::{BatchError, Result};

/// Shared predicate over a failure deciding whether it may be retried
pub type ShouldRetry = Arc<dyn Fn(&BatchError) -> bool + Send + Sync>;

/// Bounded, optionally delayed and predicate-gated retry configuration
///
/// Total attempts for one logical call never exceed `max_retries + 1`. Without
/// a `should_retry` predicate every error is considered retryable.
#[derive(Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay_ms: u64,
    pub should_retry: Option<ShouldRetry>,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            delay_ms: defaults::RETRY_DELAY_MS,
            should_retry: None,
        }
    }

    /// Policy that never retries
    pub fn none() -> Self {
        Self::new(0)
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_should_retry<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&BatchError) -> bool + Send + Sync + 'static,
    {
        self.should_retry = Some(Arc::new(predicate));
        self
    }

    /// Whether `error` may be retried under this policy's predicate
    ///
    /// Does not account for the attempt budget.
    pub fn permits(&self, error: &BatchError) -> bool {
        self.should_retry
            .as_ref()
            .map_or(true, |predicate| predicate(error))
    }

    /// Run `operation` under this policy, calling `on_retry` before every re-attempt
    pub async fn run<T, F, Fut, H>(&self, operation: F, on_retry: H) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        H: Fn(&BatchError, u32) + Send + Sync,
    {
        let hook: OnRetry<'_, BatchError> = &on_retry;
        with_retry(
            operation,
            self.max_retries,
            self.delay_ms,
            Some(hook),
            self.should_retry.as_deref(),
        )
        .await
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(defaults::MAX_RETRIES)
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("delay_ms", &self.delay_ms)
            .field("has_should_retry", &self.should_retry.is_some())
            .finish()
    }
}
