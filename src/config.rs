//! # Batch Configuration
//!
//! Engine defaults loaded from an optional configuration file and `BATCH_`
//! prefixed environment variables, e.g. `BATCH_CHUNK_SIZE=50` or
//! `BATCH_EXECUTION_MODE=concurrent`. Environment values override the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{defaults, environment, ExecutionMode};
use crate::error::{BatchError, Result};
use crate::resilience::RetryPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Items per chunk for chunk-oriented steps
    pub chunk_size: usize,
    /// Default retry budget for steps built from this configuration
    pub max_retries: u32,
    /// Default delay between retries in milliseconds
    pub retry_delay_ms: u64,
    /// How a job executor runs its jobs
    pub execution_mode: ExecutionMode,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            max_retries: defaults::MAX_RETRIES,
            retry_delay_ms: defaults::RETRY_DELAY_MS,
            execution_mode: ExecutionMode::default(),
            json_logs: false,
        }
    }
}

impl BatchConfig {
    /// Load from environment variables only
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load from `path` (when given and present) overlaid with environment variables
    ///
    /// The file format is picked from the extension (`.toml`, `.yaml`, `.json`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(environment::CONFIG_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?;

        let config: BatchConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            chunk_size = config.chunk_size,
            max_retries = config.max_retries,
            retry_delay_ms = config.retry_delay_ms,
            execution_mode = %config.execution_mode,
            "Batch configuration loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(BatchError::ConfigurationError(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Retry policy carrying this configuration's retry defaults
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries).with_delay_ms(self.retry_delay_ms)
    }
}
