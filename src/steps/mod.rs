//! # Steps
//!
//! The step shapes a [`Job`](crate::job::Job) can run:
//!
//! - [`TaskletStep`] - repeats a single unit of work until it reports finished
//! - [`ChunkStep`] - read → process → write in fixed-size chunks
//! - [`RetryableChunkStep`] - the chunk pipeline with per-phase retry policies
//! - [`RetryingStep`] - any step retried as a whole

mod chunk;
pub mod chunk_step;
pub mod retryable_chunk_step;
pub mod step_decorator;
pub mod tasklet_step;

pub use chunk_step::ChunkStep;
pub use retryable_chunk_step::{ChunkRetryPolicies, RetryableChunkStep};
pub use step_decorator::{with_step_retry, RetryingStep, StepExt};
pub use tasklet_step::TaskletStep;
