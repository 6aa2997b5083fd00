//! Retry primitive, policy and tasklet retry behaviour

use batch_core::constants::metrics::{STEP_RETRIES, TASKLET_RETRIES};
use batch_core::resilience::predicates::{retry_if_message_contains, retry_transient_only};
use batch_core::resilience::OnRetry;
use batch_core::{
    with_retry, with_step_retry, BatchError, ExecutionContext, RetryMetrics, RetryPolicy, Step,
    TaskletStep,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

use crate::common::FlakyTasklet;

#[tokio::test]
async fn transient_failures_then_success_returns_value() {
    let calls = AtomicU32::new(0);
    let attempts = Mutex::new(Vec::new());
    let on_retry: OnRetry<'_, BatchError> = &|_, attempt| attempts.lock().push(attempt);

    let result = with_retry(
        || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(BatchError::Transient("Transient".to_string()))
            } else {
                Ok(42)
            }
        },
        2,
        0,
        Some(on_retry),
        None,
    )
    .await;

    assert_eq!(assert_ok!(result), 42);
    assert_eq!(*attempts.lock(), vec![1, 2]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn policy_predicate_stops_non_matching_errors() {
    let calls = AtomicU32::new(0);
    let policy = RetryPolicy::new(5).with_should_retry(retry_if_message_contains("Transient"));

    let result: batch_core::Result<()> = policy
        .run(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BatchError::WriterError("disk full".to_string()))
            },
            |_, _| {},
        )
        .await;

    assert_eq!(
        assert_err!(result),
        BatchError::WriterError("disk full".to_string())
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn tasklet_step_recovers_within_its_budget() {
    let tasklet = Arc::new(FlakyTasklet::new(2));
    let metrics = Arc::new(RetryMetrics::new());
    let step = TaskletStep::new(
        Arc::clone(&tasklet),
        Some(RetryPolicy::new(2).with_should_retry(retry_transient_only())),
    )
    .with_metrics(Arc::clone(&metrics));

    assert_ok!(step.execute(&ExecutionContext::new()).await);

    assert_eq!(tasklet.calls(), 3);
    assert_eq!(metrics.get(TASKLET_RETRIES), 2);
}

#[tokio::test]
async fn exhausted_tasklet_budget_surfaces_last_error() {
    let tasklet = Arc::new(FlakyTasklet::new(5));
    let step = TaskletStep::new(Arc::clone(&tasklet), Some(RetryPolicy::new(1)));

    let result = step.execute(&ExecutionContext::new()).await;

    assert_eq!(
        assert_err!(result),
        BatchError::Transient("call 2 failed".to_string())
    );
    assert_eq!(tasklet.calls(), 2);
}

#[tokio::test]
async fn step_level_retry_multiplies_inner_attempts() {
    let tasklet = Arc::new(FlakyTasklet::new(3));
    let metrics = Arc::new(RetryMetrics::new());
    let inner = TaskletStep::new(Arc::clone(&tasklet), Some(RetryPolicy::new(1)));
    let step = with_step_retry(inner, RetryPolicy::new(1), Some(Arc::clone(&metrics)));

    assert_ok!(step.execute(&ExecutionContext::new()).await);

    // Two outer attempts of two inner attempts each; the fourth call succeeds
    assert_eq!(tasklet.calls(), 4);
    assert_eq!(metrics.get(STEP_RETRIES), 1);
}
