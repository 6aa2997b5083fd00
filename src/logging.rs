//! # Structured Logging Module
//!
//! Environment-aware structured logging for job and step execution, plus
//! helpers that emit consistently shaped log lines for job, step and retry
//! events.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::BatchConfig;
use crate::constants::{defaults, environment};
use crate::error::BatchError;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
///
/// Output is JSON when `BATCH_LOG_FORMAT=json`, human-readable otherwise.
pub fn init_structured_logging() {
    init_logging(json_requested());
}

/// Initialize structured logging, choosing the output format explicitly
///
/// Only the first call in a process has an effect. `RUST_LOG` overrides the
/// environment-derived level.
pub fn init_logging(json: bool) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

        let console_layer = if json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // An embedding application may already own the global subscriber
        if tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .is_err()
        {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            json = json,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Initialize structured logging using the format chosen in `config`
///
/// `BATCH_LOG_FORMAT=json` still forces JSON output.
pub fn init_logging_from_config(config: &BatchConfig) {
    init_logging(config.json_logs || json_requested());
}

fn json_requested() -> bool {
    std::env::var(environment::LOG_FORMAT)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var(environment::BATCH_ENV)
        .or_else(|_| std::env::var(environment::APP_ENV))
        .unwrap_or_else(|_| defaults::ENVIRONMENT.to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for job lifecycle events
pub fn log_job_operation(operation: &str, job_name: &str, status: &str, details: Option<&str>) {
    tracing::info!(
        operation = %operation,
        job = %job_name,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📋 JOB_OPERATION"
    );
}

/// Log structured data for step lifecycle events inside a job
pub fn log_step_operation(
    operation: &str,
    job_name: &str,
    step_name: &str,
    step_index: usize,
    status: &str,
) {
    tracing::debug!(
        operation = %operation,
        job = %job_name,
        step = %step_name,
        step_index = step_index,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "🔧 STEP_OPERATION"
    );
}

/// Log a retry about to happen for one phase (`reader`, `processor`, `writer`, `step`)
pub fn log_retry_attempt(component: &str, step_name: &str, attempt: u32, error: &BatchError) {
    tracing::warn!(
        component = %component,
        step = %step_name,
        attempt = attempt,
        error = %error,
        timestamp = %Utc::now().to_rfc3339(),
        "🔁 RETRY_ATTEMPT"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &BatchError, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}
