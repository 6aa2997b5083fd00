//! Shared test doubles for integration tests

use async_trait::async_trait;
use batch_core::{BatchError, ExecutionContext, ItemReader, RepeatStatus, Result, Step, Tasklet};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Tasklet that fails its first `failures` calls with a transient error
pub struct FlakyTasklet {
    failures: u32,
    calls: AtomicU32,
}

impl FlakyTasklet {
    pub fn new(failures: u32) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Tasklet for FlakyTasklet {
    async fn execute(&self, _context: &ExecutionContext) -> Result<RepeatStatus> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            return Err(BatchError::Transient(format!("call {call} failed")));
        }
        Ok(RepeatStatus::Finished)
    }
}

/// Reader over `1..=max` that fails once, transiently, when about to yield `fail_at`
pub struct HiccupReader {
    next: Mutex<u32>,
    max: u32,
    fail_at: u32,
    failed: Mutex<bool>,
}

impl HiccupReader {
    pub fn new(max: u32, fail_at: u32) -> Self {
        Self {
            next: Mutex::new(1),
            max,
            fail_at,
            failed: Mutex::new(false),
        }
    }
}

#[async_trait]
impl ItemReader<u32> for HiccupReader {
    async fn read(&self) -> Result<Option<u32>> {
        let mut next = self.next.lock();
        if *next > self.max {
            return Ok(None);
        }
        if *next == self.fail_at {
            let mut failed = self.failed.lock();
            if !*failed {
                *failed = true;
                return Err(BatchError::Transient("reader hiccup".to_string()));
            }
        }
        let value = *next;
        *next += 1;
        Ok(Some(value))
    }
}

/// Step that records its label into a shared log when executed
pub struct RecordingStep {
    label: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
    fail: bool,
}

impl RecordingStep {
    pub fn ok(label: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self {
            label,
            log: Arc::clone(log),
            fail: false,
        }
    }

    pub fn failing(label: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Self {
        Self {
            label,
            log: Arc::clone(log),
            fail: true,
        }
    }
}

#[async_trait]
impl Step for RecordingStep {
    async fn execute(&self, _context: &ExecutionContext) -> Result<()> {
        self.log.lock().push(self.label);
        if self.fail {
            return Err(BatchError::StepError(format!("{} failed", self.label)));
        }
        Ok(())
    }

    fn step_name(&self) -> &str {
        self.label
    }
}
