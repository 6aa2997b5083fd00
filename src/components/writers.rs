//! Item writers that record or log the chunks they receive.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt::Debug;
use tracing::info;

use crate::error::Result;
use crate::traits::ItemWriter;

/// Keeps every chunk it is given, in call order
#[derive(Debug)]
pub struct CollectingWriter<T> {
    chunks: Mutex<Vec<Vec<T>>>,
}

impl<T> Default for CollectingWriter<T> {
    fn default() -> Self {
        Self {
            chunks: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> CollectingWriter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> Vec<Vec<T>> {
        self.chunks.lock().clone()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.lock().len()
    }

    /// Every written item, flattened in write order
    pub fn items(&self) -> Vec<T> {
        self.chunks.lock().iter().flatten().cloned().collect()
    }
}

#[async_trait]
impl<T> ItemWriter<T> for CollectingWriter<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn write(&self, items: &[T]) -> Result<()> {
        self.chunks.lock().push(items.to_vec());
        Ok(())
    }
}

/// Emits each chunk as a structured log line
#[derive(Debug, Clone)]
pub struct LoggingWriter {
    label: String,
}

impl LoggingWriter {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl<T> ItemWriter<T> for LoggingWriter
where
    T: Debug + Send + Sync + 'static,
{
    async fn write(&self, items: &[T]) -> Result<()> {
        info!(writer = %self.label, size = items.len(), items = ?items, "📝 Writing chunk");
        Ok(())
    }
}
