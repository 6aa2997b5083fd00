//! # Tasklet Step
//!
//! Repeatedly invokes a [`Tasklet`] until it reports [`RepeatStatus::Finished`].
//! Each invocation runs under the step's retry policy with a fresh attempt
//! budget. There is no iteration cap: a tasklet that always answers
//! `Continuable` keeps the step running.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::constants::metrics::TASKLET_RETRIES;
use crate::constants::RepeatStatus;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::resilience::{RetryMetrics, RetryPolicy};
use crate::traits::{Step, Tasklet};

pub struct TaskletStep {
    name: String,
    tasklet: Box<dyn Tasklet>,
    retry_policy: RetryPolicy,
    metrics: Option<Arc<RetryMetrics>>,
}

impl TaskletStep {
    /// Create a tasklet step; without a policy each invocation is attempted once
    pub fn new(tasklet: impl Tasklet + 'static, retry_policy: Option<RetryPolicy>) -> Self {
        Self {
            name: "tasklet_step".to_string(),
            tasklet: Box::new(tasklet),
            retry_policy: retry_policy.unwrap_or_else(RetryPolicy::none),
            metrics: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Count invocation retries under `taskletRetries`
    pub fn with_metrics(mut self, metrics: Arc<RetryMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

#[async_trait]
impl Step for TaskletStep {
    async fn execute(&self, context: &ExecutionContext) -> Result<()> {
        info!(
            step = %self.name,
            max_retries = self.retry_policy.max_retries,
            delay_ms = self.retry_policy.delay_ms,
            "🔧 Executing tasklet step"
        );

        let mut iteration: u64 = 0;
        loop {
            iteration += 1;
            let status = self
                .retry_policy
                .run(
                    || self.tasklet.execute(context),
                    |error, attempt| {
                        warn!(
                            step = %self.name,
                            iteration,
                            attempt,
                            error = %error,
                            "⚠️ Tasklet attempt failed, retrying"
                        );
                        if let Some(metrics) = &self.metrics {
                            metrics.increment(TASKLET_RETRIES);
                        }
                    },
                )
                .await?;

            debug!(step = %self.name, iteration, status = %status, "Tasklet invocation returned");

            if status == RepeatStatus::Finished {
                break;
            }
        }

        info!(step = %self.name, iterations = iteration, "✅ Tasklet step complete");
        Ok(())
    }

    fn step_name(&self) -> &str {
        &self.name
    }
}
