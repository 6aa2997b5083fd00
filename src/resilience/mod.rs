//! # Resilience Module
//!
//! Retry support for batch steps: the retry primitive, immutable retry
//! policies, retry counters and common retry predicates.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use batch_core::resilience::{predicates, RetryPolicy};
//! use batch_core::BatchError;
//!
//! # async fn example() -> Result<(), BatchError> {
//! let policy = RetryPolicy::new(3)
//!     .with_delay_ms(500)
//!     .with_should_retry(predicates::retry_if_message_contains("Transient"));
//!
//! let value = policy
//!     .run(|| async { Ok::<_, BatchError>(42) }, |error, attempt| {
//!         tracing::warn!(attempt, %error, "retrying");
//!     })
//!     .await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

pub mod metrics;
pub mod policy;
pub mod predicates;
pub mod retry;

pub use metrics::RetryMetrics;
pub use policy::{RetryPolicy, ShouldRetry};
pub use retry::{with_retry, OnRetry, ShouldRetryFn};
