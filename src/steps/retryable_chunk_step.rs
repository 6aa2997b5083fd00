//! # Retryable Chunk Step
//!
//! The chunk loop of [`ChunkStep`](super::ChunkStep) with an independent retry
//! policy for each of the read, process and write phases. Every retry bumps the
//! phase's counter in the step's [`RetryMetrics`].

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::chunk::{default_chunk_size, normalize_chunk_size, ChunkBuffer, ChunkStats};
use crate::constants::metrics::{PROCESSOR_RETRIES, READER_RETRIES, WRITER_RETRIES};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::logging::log_retry_attempt;
use crate::resilience::{RetryMetrics, RetryPolicy};
use crate::traits::{ItemProcessor, ItemReader, ItemWriter, Step};

/// Optional per-phase retry policies; a missing policy means the phase is called once
#[derive(Debug, Clone, Default)]
pub struct ChunkRetryPolicies {
    pub reader: Option<RetryPolicy>,
    pub processor: Option<RetryPolicy>,
    pub writer: Option<RetryPolicy>,
}

impl ChunkRetryPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reader(mut self, policy: RetryPolicy) -> Self {
        self.reader = Some(policy);
        self
    }

    pub fn with_processor(mut self, policy: RetryPolicy) -> Self {
        self.processor = Some(policy);
        self
    }

    pub fn with_writer(mut self, policy: RetryPolicy) -> Self {
        self.writer = Some(policy);
        self
    }
}

/// Chunk-oriented step with per-phase retries and retry metrics
pub struct RetryableChunkStep<I, O> {
    name: String,
    reader: Box<dyn ItemReader<I>>,
    processor: Box<dyn ItemProcessor<I, O>>,
    writer: Box<dyn ItemWriter<O>>,
    chunk_size: usize,
    policies: ChunkRetryPolicies,
    metrics: Arc<RetryMetrics>,
}

impl<I, O> RetryableChunkStep<I, O>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    pub fn new(
        reader: impl ItemReader<I> + 'static,
        processor: impl ItemProcessor<I, O> + 'static,
        writer: impl ItemWriter<O> + 'static,
        chunk_size: usize,
    ) -> Self {
        Self {
            name: "retryable_chunk_step".to_string(),
            reader: Box::new(reader),
            processor: Box::new(processor),
            writer: Box::new(writer),
            chunk_size: normalize_chunk_size(chunk_size),
            policies: ChunkRetryPolicies::default(),
            metrics: Arc::new(RetryMetrics::new()),
        }
    }

    pub fn with_default_chunk_size(
        reader: impl ItemReader<I> + 'static,
        processor: impl ItemProcessor<I, O> + 'static,
        writer: impl ItemWriter<O> + 'static,
    ) -> Self {
        Self::new(reader, processor, writer, default_chunk_size())
    }

    pub fn with_retry_policies(mut self, policies: ChunkRetryPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Record retries into a caller-owned metrics instance
    pub fn with_metrics(mut self, metrics: Arc<RetryMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn retry_policies(&self) -> &ChunkRetryPolicies {
        &self.policies
    }

    /// Retry counters accumulated over every execution of this step
    pub fn metrics(&self) -> Arc<RetryMetrics> {
        Arc::clone(&self.metrics)
    }

    async fn read_item(&self) -> Result<Option<I>> {
        match &self.policies.reader {
            Some(policy) => {
                policy
                    .run(
                        || self.reader.read(),
                        |error, attempt| {
                            log_retry_attempt("reader", &self.name, attempt, error);
                            self.metrics.increment(READER_RETRIES);
                        },
                    )
                    .await
            }
            None => self.reader.read().await,
        }
    }

    async fn process_item(&self, item: &I) -> Result<Option<O>> {
        match &self.policies.processor {
            Some(policy) => {
                policy
                    .run(
                        || self.processor.process(item),
                        |error, attempt| {
                            log_retry_attempt("processor", &self.name, attempt, error);
                            self.metrics.increment(PROCESSOR_RETRIES);
                        },
                    )
                    .await
            }
            None => self.processor.process(item).await,
        }
    }

    async fn write_chunk(&self, items: &[O]) -> Result<()> {
        match &self.policies.writer {
            Some(policy) => {
                policy
                    .run(
                        || self.writer.write(items),
                        |error, attempt| {
                            log_retry_attempt("writer", &self.name, attempt, error);
                            self.metrics.increment(WRITER_RETRIES);
                        },
                    )
                    .await
            }
            None => self.writer.write(items).await,
        }
    }

    async fn flush(&self, buffer: &mut ChunkBuffer<O>, stats: &mut ChunkStats) -> Result<()> {
        debug!(step = %self.name, items = buffer.len(), "Writing chunk");
        self.write_chunk(buffer.as_slice()).await?;
        stats.record_flush(buffer.len());
        buffer.clear();
        Ok(())
    }
}

#[async_trait]
impl<I, O> Step for RetryableChunkStep<I, O>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    async fn execute(&self, _context: &ExecutionContext) -> Result<()> {
        info!(
            step = %self.name,
            chunk_size = self.chunk_size,
            reader_retries = self.policies.reader.as_ref().map(|p| p.max_retries),
            processor_retries = self.policies.processor.as_ref().map(|p| p.max_retries),
            writer_retries = self.policies.writer.as_ref().map(|p| p.max_retries),
            "📦 Starting retryable chunk step"
        );

        let mut buffer = ChunkBuffer::new(self.chunk_size);
        let mut stats = ChunkStats::default();

        loop {
            let Some(item) = self.read_item().await? else {
                if !buffer.is_empty() {
                    self.flush(&mut buffer, &mut stats).await?;
                }
                break;
            };
            stats.items_read += 1;

            match self.process_item(&item).await? {
                Some(processed) => buffer.push(processed),
                None => stats.items_dropped += 1,
            }

            if buffer.is_full() {
                self.flush(&mut buffer, &mut stats).await?;
            }
        }

        info!(
            step = %self.name,
            items_read = stats.items_read,
            items_dropped = stats.items_dropped,
            items_written = stats.items_written,
            chunks_written = stats.chunks_written,
            retry_metrics = ?self.metrics.snapshot(),
            "✅ Retryable chunk step complete"
        );
        Ok(())
    }

    fn step_name(&self) -> &str {
        &self.name
    }
}
