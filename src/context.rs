//! # Execution Context
//!
//! String-keyed state shared by every step of one job run. Values are untyped
//! `serde_json::Value`s; which keys exist and what they hold is a contract
//! between the steps of a pipeline, not something the engine checks.

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::Result;

/// Key/value store scoped to a single job execution
///
/// Writes are last-write-wins. Steps receive the context by shared reference;
/// the map is concurrent so a context can live behind an `Arc` while its job
/// runs on a spawned task, but steps of one job never touch it concurrently.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    entries: DashMap<String, Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the value stored under `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Deserialize the value under `key` into `T`
    ///
    /// Returns `Ok(None)` when the key is absent and a context error when the
    /// stored value does not have the shape of `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`
    pub fn set_as<T: Serialize>(&self, key: impl Into<String>, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key.into(), value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Point-in-time copy of every entry
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
