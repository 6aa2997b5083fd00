//! # Engine Constants
//!
//! Shared constants and small enums that define the operational vocabulary of
//! the batch engine: metric labels, defaults, environment variable names,
//! tasklet repeat status and executor modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels under which [`RetryMetrics`](crate::resilience::RetryMetrics) counters are recorded
pub mod metrics {
    pub const READER_RETRIES: &str = "readerRetries";
    pub const PROCESSOR_RETRIES: &str = "processorRetries";
    pub const WRITER_RETRIES: &str = "writerRetries";
    pub const TASKLET_RETRIES: &str = "taskletRetries";
    pub const STEP_RETRIES: &str = "stepRetries";
}

/// Default values used when a caller or configuration does not supply one
pub mod defaults {
    /// Items per chunk for chunk-oriented steps
    pub const CHUNK_SIZE: usize = 10;
    /// Retry budget when no policy is attached
    pub const MAX_RETRIES: u32 = 0;
    pub const RETRY_DELAY_MS: u64 = 0;
    pub const ENVIRONMENT: &str = "development";
}

/// Environment variables read by logging and configuration
pub mod environment {
    pub const BATCH_ENV: &str = "BATCH_ENV";
    pub const APP_ENV: &str = "APP_ENV";
    pub const LOG_FORMAT: &str = "BATCH_LOG_FORMAT";
    /// Prefix for configuration overrides, e.g. `BATCH_CHUNK_SIZE=50`
    pub const CONFIG_PREFIX: &str = "BATCH";
}

/// Returned by a [`Tasklet`](crate::traits::Tasklet) to tell its step whether to run it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatStatus {
    Finished,
    Continuable,
}

impl RepeatStatus {
    pub fn is_continuable(self) -> bool {
        self == RepeatStatus::Continuable
    }
}

impl fmt::Display for RepeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatStatus::Finished => write!(f, "finished"),
            RepeatStatus::Continuable => write!(f, "continuable"),
        }
    }
}

/// How a [`JobExecutor`](crate::executor::JobExecutor) runs its registered jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One job at a time in registration order; the first failure stops the run
    #[default]
    Sequential,
    /// All jobs at once; the first failure resolves the run, the others keep going
    Concurrent,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Concurrent => write!(f, "concurrent"),
        }
    }
}
