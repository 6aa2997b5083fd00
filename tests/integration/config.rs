//! Configuration Loading Tests
//!
//! File-based loading of `BatchConfig`. Environment overrides are not set here
//! so tests stay independent of each other.

use batch_core::{BatchConfig, BatchError, ExecutionMode};
use std::io::Write;
use tempfile::Builder;

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes())
        .expect("write temp config");
    file
}

#[test]
fn config_file_values_override_defaults() {
    let file = toml_file(
        r#"
chunk_size = 25
max_retries = 3
retry_delay_ms = 100
execution_mode = "concurrent"
"#,
    );

    let config = BatchConfig::load(Some(file.path())).expect("config should load");

    assert_eq!(config.chunk_size, 25);
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.retry_delay_ms, 100);
    assert_eq!(config.execution_mode, ExecutionMode::Concurrent);
    assert!(!config.json_logs);

    let policy = config.retry_policy();
    assert_eq!(policy.max_retries, 3);
    assert_eq!(policy.delay_ms, 100);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("absent.toml");

    let config = BatchConfig::load(Some(path.as_path())).expect("missing file is optional");

    assert_eq!(config, BatchConfig::default());
}

#[test]
fn zero_chunk_size_in_file_is_rejected() {
    let file = toml_file("chunk_size = 0\n");

    let result = BatchConfig::load(Some(file.path()));

    assert!(matches!(result, Err(BatchError::ConfigurationError(_))));
}

#[test]
fn malformed_value_is_a_configuration_error() {
    let file = toml_file("execution_mode = \"sideways\"\n");

    let result = BatchConfig::load(Some(file.path()));

    assert!(matches!(result, Err(BatchError::ConfigurationError(_))));
}
