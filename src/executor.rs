//! # Job Executor
//!
//! Holds registered jobs, each paired with the context it will run against,
//! and runs them either one after another or all at once on the tokio runtime.
//!
//! ## Failure semantics
//!
//! - Sequential: the first failing job stops the run; later jobs never start.
//! - Concurrent: the first failure is returned as soon as it is observed, but
//!   sibling jobs are not cancelled. They keep running detached and their
//!   effects on their own contexts still land.

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

use crate::constants::ExecutionMode;
use crate::context::ExecutionContext;
use crate::error::{BatchError, Result};
use crate::job::Job;
use crate::logging::log_error;

#[derive(Debug, Clone)]
struct Registration {
    job: Arc<Job>,
    context: Arc<ExecutionContext>,
}

#[derive(Debug, Default)]
pub struct JobExecutor {
    registrations: Vec<Registration>,
}

impl JobExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job with a fresh context, returning that context for later inspection
    pub fn add_job(&mut self, job: impl Into<Arc<Job>>) -> Arc<ExecutionContext> {
        self.add_job_with_context(job, ExecutionContext::new())
    }

    /// Register a job against a caller-supplied context
    ///
    /// Passing the same `Arc` for several jobs makes them share state.
    pub fn add_job_with_context(
        &mut self,
        job: impl Into<Arc<Job>>,
        context: impl Into<Arc<ExecutionContext>>,
    ) -> Arc<ExecutionContext> {
        let registration = Registration {
            job: job.into(),
            context: context.into(),
        };
        debug!(job = %registration.job.name(), "📋 Job registered");
        let context = Arc::clone(&registration.context);
        self.registrations.push(registration);
        context
    }

    pub fn job_count(&self) -> usize {
        self.registrations.len()
    }

    /// Names of the registered jobs in registration order
    pub fn job_names(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.job.name()).collect()
    }

    pub async fn execute(&self, mode: ExecutionMode) -> Result<()> {
        match mode {
            ExecutionMode::Sequential => self.execute_sequentially().await,
            ExecutionMode::Concurrent => self.execute_all().await,
        }
    }

    /// Run jobs in registration order, stopping at the first failure
    pub async fn execute_sequentially(&self) -> Result<()> {
        info!(jobs = self.registrations.len(), "🚀 Executing jobs sequentially");

        for registration in &self.registrations {
            if let Err(error) = registration.job.execute(&registration.context).await {
                log_error(
                    "executor",
                    "execute_sequentially",
                    &error,
                    Some(registration.job.name()),
                );
                return Err(error);
            }
        }

        info!("✅ All jobs completed");
        Ok(())
    }

    /// Start every job concurrently and wait for all of them
    ///
    /// Returns the first error observed. Jobs still in flight at that point
    /// are left running.
    pub async fn execute_all(&self) -> Result<()> {
        info!(jobs = self.registrations.len(), "🚀 Executing jobs concurrently");

        let handles = self.registrations.iter().map(|registration| {
            let job = Arc::clone(&registration.job);
            let context = Arc::clone(&registration.context);
            let handle = tokio::spawn(async move { job.execute(&context).await });
            let name = registration.job.name().to_string();

            async move {
                let result = match handle.await {
                    Ok(result) => result,
                    Err(join_error) => Err(BatchError::from(join_error)),
                };
                if let Err(error) = &result {
                    log_error("executor", "execute_all", error, Some(&name));
                }
                result
            }
        });

        try_join_all(handles).await?;

        info!("✅ All jobs completed");
        Ok(())
    }
}
