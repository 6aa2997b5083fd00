//! Ready-made `should_retry` predicates for [`RetryPolicy`](super::RetryPolicy).

use crate::error::BatchError;

/// Retry only errors whose message contains `pattern`
pub fn retry_if_message_contains(
    pattern: impl Into<String>,
) -> impl Fn(&BatchError) -> bool + Send + Sync + 'static {
    let pattern = pattern.into();
    move |error| error.message().contains(&pattern)
}

/// Retry only [`BatchError::Transient`] failures
pub fn retry_transient_only() -> impl Fn(&BatchError) -> bool + Send + Sync + 'static {
    |error| error.is_transient()
}
