//! # Retry Metrics
//!
//! Label-keyed retry counters owned by a step (or step decorator) for its whole
//! lifetime. Counters only grow; nothing resets them automatically.

use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RetryMetrics {
    counters: Mutex<HashMap<String, u64>>,
}

impl RetryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to the counter for `label`, creating it at zero if needed
    pub fn increment(&self, label: &str) {
        let mut counters = self.counters.lock();
        *counters.entry(label.to_string()).or_insert(0) += 1;
    }

    /// Current value for `label`, zero if it was never incremented
    pub fn get(&self, label: &str) -> u64 {
        self.counters.lock().get(label).copied().unwrap_or(0)
    }

    /// Copy of all counters
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counters.lock().clone()
    }

    /// Sum of every counter
    pub fn total(&self) -> u64 {
        self.counters.lock().values().sum()
    }
}
