//! # Job
//!
//! A named, ordered sequence of steps run strictly one after another against a
//! single [`ExecutionContext`]. The first failing step aborts the job; steps
//! that already completed are not rolled back.

use std::fmt;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::logging::{log_error, log_job_operation, log_step_operation};
use crate::traits::Step;

pub struct Job {
    name: String,
    steps: Vec<Box<dyn Step>>,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a step; steps always run in the order they were added
    pub fn add_step(&mut self, step: impl Step + 'static) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Builder-style [`add_step`](Self::add_step)
    pub fn with_step(mut self, step: impl Step + 'static) -> Self {
        self.add_step(step);
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Names of the steps in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.step_name()).collect()
    }

    /// Run every step in order, returning the first error unchanged
    pub async fn execute(&self, context: &ExecutionContext) -> Result<()> {
        let execution_id = Uuid::new_v4();
        let span = info_span!("job", job = %self.name, execution_id = %execution_id);
        self.run_steps(context).instrument(span).await
    }

    /// Run the job against a fresh context and hand that context back
    pub async fn execute_with_new_context(&self) -> Result<ExecutionContext> {
        let context = ExecutionContext::new();
        self.execute(&context).await?;
        Ok(context)
    }

    async fn run_steps(&self, context: &ExecutionContext) -> Result<()> {
        log_job_operation("start", &self.name, "started", None);

        for (index, step) in self.steps.iter().enumerate() {
            let step_name = step.step_name();
            log_step_operation("execute", &self.name, step_name, index, "started");

            if let Err(error) = step.execute(context).await {
                log_error("job", "execute_step", &error, Some(step_name));
                log_job_operation("complete", &self.name, "failed", Some(step_name));
                return Err(error);
            }

            log_step_operation("execute", &self.name, step_name, index, "completed");
        }

        log_job_operation("complete", &self.name, "completed", None);
        Ok(())
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("steps", &self.step_names())
            .finish()
    }
}
