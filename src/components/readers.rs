//! In-memory item readers.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::traits::ItemReader;

/// Reads items from a pre-built sequence, in order
#[derive(Debug)]
pub struct IterReader<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> IterReader<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().collect()),
        }
    }

    /// Items not yet read
    pub fn remaining(&self) -> usize {
        self.items.lock().len()
    }
}

#[async_trait]
impl<T> ItemReader<T> for IterReader<T>
where
    T: Send + 'static,
{
    async fn read(&self) -> Result<Option<T>> {
        Ok(self.items.lock().pop_front())
    }
}

/// Reads the integers `1..=max`
#[derive(Debug)]
pub struct RangeReader {
    next: AtomicU64,
    max: u32,
}

impl RangeReader {
    pub fn new(max: u32) -> Self {
        Self {
            next: AtomicU64::new(1),
            max,
        }
    }
}

#[async_trait]
impl ItemReader<u32> for RangeReader {
    async fn read(&self) -> Result<Option<u32>> {
        let max = u64::from(self.max);
        let current = self
            .next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n <= max).then_some(n + 1)
            })
            .ok();
        // `current` never exceeds `max`, which came from a u32
        Ok(current.and_then(|n| u32::try_from(n).ok()))
    }
}
