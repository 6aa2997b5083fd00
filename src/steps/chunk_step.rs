//! # Chunk Step
//!
//! Streams items through read → process → buffer → write in batches of
//! `chunk_size`. Any phase error aborts the step immediately and whatever is
//! still buffered is discarded.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::chunk::{default_chunk_size, normalize_chunk_size, ChunkBuffer, ChunkStats};
use crate::components::stream::{StreamProcessor, StreamReader, StreamWriter};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::traits::{ItemProcessor, ItemReader, ItemStream, ItemWriter, Step};

/// Chunk-oriented step without retries
pub struct ChunkStep<I, O> {
    name: String,
    reader: Box<dyn ItemReader<I>>,
    processor: Box<dyn ItemProcessor<I, O>>,
    writer: Box<dyn ItemWriter<O>>,
    chunk_size: usize,
}

impl<I, O> ChunkStep<I, O>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    /// Create a chunk step; a `chunk_size` of zero is treated as one
    pub fn new(
        reader: impl ItemReader<I> + 'static,
        processor: impl ItemProcessor<I, O> + 'static,
        writer: impl ItemWriter<O> + 'static,
        chunk_size: usize,
    ) -> Self {
        Self {
            name: "chunk_step".to_string(),
            reader: Box::new(reader),
            processor: Box::new(processor),
            writer: Box::new(writer),
            chunk_size: normalize_chunk_size(chunk_size),
        }
    }

    /// Create a chunk step with the default chunk size of 10
    pub fn with_default_chunk_size(
        reader: impl ItemReader<I> + 'static,
        processor: impl ItemProcessor<I, O> + 'static,
        writer: impl ItemWriter<O> + 'static,
    ) -> Self {
        Self::new(reader, processor, writer, default_chunk_size())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    async fn flush(&self, buffer: &mut ChunkBuffer<O>, stats: &mut ChunkStats) -> Result<()> {
        debug!(step = %self.name, items = buffer.len(), "Writing chunk");
        self.writer.write(buffer.as_slice()).await?;
        stats.record_flush(buffer.len());
        buffer.clear();
        Ok(())
    }
}

impl<T> ChunkStep<T, T>
where
    T: Send + Sync + 'static,
{
    /// Run an [`ItemStream`] as a chunk step, using it as reader, processor and writer
    pub fn from_stream(stream: impl ItemStream<T> + 'static, chunk_size: usize) -> Self {
        let stream = Arc::new(stream);
        Self::new(
            StreamReader::new(Arc::clone(&stream)),
            StreamProcessor::new(Arc::clone(&stream)),
            StreamWriter::new(stream),
            chunk_size,
        )
    }
}

#[async_trait]
impl<I, O> Step for ChunkStep<I, O>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    async fn execute(&self, _context: &ExecutionContext) -> Result<()> {
        info!(step = %self.name, chunk_size = self.chunk_size, "📦 Starting chunk step");

        let mut buffer = ChunkBuffer::new(self.chunk_size);
        let mut stats = ChunkStats::default();

        loop {
            let Some(item) = self.reader.read().await? else {
                if !buffer.is_empty() {
                    self.flush(&mut buffer, &mut stats).await?;
                }
                break;
            };
            stats.items_read += 1;

            match self.processor.process(&item).await? {
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
            "✅ Chunk step complete"
        );
        Ok(())
    }

    fn step_name(&self) -> &str {
        &self.name
    }
}
