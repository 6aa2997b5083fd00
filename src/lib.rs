#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Batch Core
//!
//! An in-process batch engine: jobs made of steps, run against a shared
//! key-value execution context, with predicate-driven retry at every level.
//!
//! ## Architecture
//!
//! - A [`Job`] runs its steps strictly in order; the first failure aborts it.
//! - A [`TaskletStep`] repeats one unit of work until it reports
//!   [`RepeatStatus::Finished`].
//! - A [`ChunkStep`] reads items one at a time, transforms or drops each, and
//!   writes the survivors in fixed-size chunks.
//! - A [`RetryableChunkStep`] adds independent retry policies for the read,
//!   process and write phases; [`RetryingStep`] retries any step as a whole.
//! - A [`JobExecutor`] runs registered jobs sequentially or concurrently.
//!
//! ## Module Organization
//!
//! - [`traits`] - reader, processor, writer, stream, tasklet and step contracts
//! - [`steps`] - tasklet, chunk and retrying step implementations
//! - [`resilience`] - the retry primitive, retry policies and retry counters
//! - [`components`] - ready-made readers, processors, writers and tasklets
//! - [`job`] / [`executor`] - job composition and execution
//! - [`context`] - the execution context shared by a job's steps
//! - [`config`] / [`logging`] / [`error`] - ambient configuration, tracing and errors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use batch_core::components::{CollectingWriter, FnProcessor, RangeReader};
//! use batch_core::{ChunkStep, Job, JobExecutor};
//! use std::sync::Arc;
//!
//! # async fn example() -> batch_core::Result<()> {
//! batch_core::logging::init_structured_logging();
//!
//! let writer = Arc::new(CollectingWriter::new());
//! let step = ChunkStep::new(
//!     RangeReader::new(7),
//!     FnProcessor::new(|n: &u32| Ok(Some(n * 2))),
//!     Arc::clone(&writer),
//!     3,
//! );
//!
//! let mut executor = JobExecutor::new();
//! executor.add_job(Job::new("doubling").with_step(step));
//! executor.execute_sequentially().await?;
//!
//! assert_eq!(writer.chunks(), vec![vec![2, 4, 6], vec![8, 10, 12], vec![14]]);
//! # Ok(())
//! # }
//! ```

pub mod components;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod executor;
pub mod job;
pub mod logging;
pub mod resilience;
pub mod steps;
pub mod traits;

pub use config::BatchConfig;
pub use constants::{ExecutionMode, RepeatStatus};
pub use context::ExecutionContext;
pub use error::{BatchError, Result};
pub use executor::JobExecutor;
pub use job::Job;
pub use resilience::{with_retry, RetryMetrics, RetryPolicy, ShouldRetry};
pub use steps::{
    with_step_retry, ChunkRetryPolicies, ChunkStep, RetryableChunkStep, RetryingStep, StepExt,
    TaskletStep,
};
pub use traits::{ItemProcessor, ItemReader, ItemStream, ItemWriter, Step, Tasklet};
