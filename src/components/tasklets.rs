//! Ready-made tasklets.

use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::info;

use crate::constants::RepeatStatus;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::traits::Tasklet;

type TaskletFn = Box<dyn Fn(&ExecutionContext) -> Result<RepeatStatus> + Send + Sync>;

/// Tasklet backed by a synchronous closure
pub struct FnTasklet {
    f: TaskletFn,
}

impl FnTasklet {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ExecutionContext) -> Result<RepeatStatus> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl fmt::Debug for FnTasklet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTasklet").finish_non_exhaustive()
    }
}

#[async_trait]
impl Tasklet for FnTasklet {
    async fn execute(&self, context: &ExecutionContext) -> Result<RepeatStatus> {
        (self.f)(context)
    }
}

/// Logs a message on every invocation and finishes after `max_count` runs
#[derive(Debug)]
pub struct RepeatTasklet {
    message: String,
    max_count: u32,
    count: AtomicU32,
}

impl RepeatTasklet {
    pub fn new(message: impl Into<String>, max_count: u32) -> Self {
        Self {
            message: message.into(),
            max_count,
            count: AtomicU32::new(0),
        }
    }

    /// Invocations so far
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Tasklet for RepeatTasklet {
    async fn execute(&self, _context: &ExecutionContext) -> Result<RepeatStatus> {
        let iteration = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        info!(message = %self.message, iteration, "🔁 Tasklet iteration");

        Ok(if iteration < self.max_count {
            RepeatStatus::Continuable
        } else {
            RepeatStatus::Finished
        })
    }
}
