use thiserror::Error;

/// Errors raised by batch components and surfaced by steps, jobs and executors.
///
/// Phase errors (reader, processor, writer, tasklet) travel through retries,
/// steps and jobs exactly as they were returned; the engine never wraps them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    #[error("Reader error: {0}")]
    ReaderError(String),
    #[error("Processor error: {0}")]
    ProcessorError(String),
    #[error("Writer error: {0}")]
    WriterError(String),
    #[error("Tasklet error: {0}")]
    TaskletError(String),
    #[error("Step error: {0}")]
    StepError(String),
    #[error("Transient error: {0}")]
    Transient(String),
    #[error("Context error: {0}")]
    ContextError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Job execution error: {0}")]
    JobExecutionError(String),
}

impl BatchError {
    /// The payload message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            BatchError::ReaderError(msg)
            | BatchError::ProcessorError(msg)
            | BatchError::WriterError(msg)
            | BatchError::TaskletError(msg)
            | BatchError::StepError(msg)
            | BatchError::Transient(msg)
            | BatchError::ContextError(msg)
            | BatchError::ConfigurationError(msg)
            | BatchError::JobExecutionError(msg) => msg,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, BatchError::Transient(_))
    }
}

impl From<serde_json::Error> for BatchError {
    fn from(error: serde_json::Error) -> Self {
        BatchError::ContextError(format!("JSON serialization error: {error}"))
    }
}

impl From<config::ConfigError> for BatchError {
    fn from(error: config::ConfigError) -> Self {
        BatchError::ConfigurationError(error.to_string())
    }
}

impl From<tokio::task::JoinError> for BatchError {
    fn from(error: tokio::task::JoinError) -> Self {
        if error.is_panic() {
            BatchError::JobExecutionError(format!("job task panicked: {error}"))
        } else {
            BatchError::JobExecutionError(format!("job task cancelled: {error}"))
        }
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
