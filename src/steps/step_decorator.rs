//! # Step Retry Decorator
//!
//! Wraps any [`Step`] so that its whole `execute` is retried as one unit. The
//! wrapped step keeps whatever finer-grained retries it has; the decorator adds
//! an outer budget on top.
//!
//! Re-executing a stateful step resumes from that step's current state. A
//! retried chunk step, for example, continues from wherever its reader stopped.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::constants::metrics::STEP_RETRIES;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::logging::log_retry_attempt;
use crate::resilience::{RetryMetrics, RetryPolicy};
use crate::traits::Step;

/// A step executed under a retry policy
pub struct RetryingStep {
    inner: Box<dyn Step>,
    policy: RetryPolicy,
    metrics: Arc<RetryMetrics>,
}

impl RetryingStep {
    pub fn new(step: impl Step + 'static, policy: RetryPolicy) -> Self {
        Self {
            inner: Box::new(step),
            policy,
            metrics: Arc::new(RetryMetrics::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<RetryMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Step-level retry counters (`stepRetries`)
    pub fn metrics(&self) -> Arc<RetryMetrics> {
        Arc::clone(&self.metrics)
    }
}

/// Wrap `step` so a failed execution is retried under `policy`
///
/// Retries are counted in `metrics` when given, otherwise in a fresh instance
/// reachable through [`RetryingStep::metrics`].
pub fn with_step_retry(
    step: impl Step + 'static,
    policy: RetryPolicy,
    metrics: Option<Arc<RetryMetrics>>,
) -> RetryingStep {
    let decorated = RetryingStep::new(step, policy);
    match metrics {
        Some(metrics) => decorated.with_metrics(metrics),
        None => decorated,
    }
}

/// Method-style access to [`with_step_retry`]
pub trait StepExt: Step + Sized + 'static {
    fn retrying(self, policy: RetryPolicy) -> RetryingStep {
        RetryingStep::new(self, policy)
    }
}

impl<S: Step + 'static> StepExt for S {}

#[async_trait]
impl Step for RetryingStep {
    async fn execute(&self, context: &ExecutionContext) -> Result<()> {
        let step_name = self.inner.step_name();
        self.policy
            .run(
                || self.inner.execute(context),
                |error, attempt| {
                    log_retry_attempt("step", step_name, attempt, error);
                    self.metrics.increment(STEP_RETRIES);
                },
            )
            .await?;

        info!(
            step = %step_name,
            step_retries = self.metrics.get(STEP_RETRIES),
            "✅ Step executed successfully (with retry if needed)"
        );
        Ok(())
    }

    fn step_name(&self) -> &str {
        self.inner.step_name()
    }
}
