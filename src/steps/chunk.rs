//! Chunk buffer shared by the chunk-oriented steps.

use crate::constants::defaults;

/// Ordered, bounded buffer of processed items awaiting a write
#[derive(Debug)]
pub(crate) struct ChunkBuffer<O> {
    items: Vec<O>,
    capacity: usize,
}

impl<O> ChunkBuffer<O> {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = normalize_chunk_size(capacity);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, item: O) {
        self.items.push(item);
    }

    pub(crate) fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn as_slice(&self) -> &[O] {
        &self.items
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

/// Chunk sizes below one would flush empty chunks; clamp them to one
pub(crate) fn normalize_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

pub(crate) fn default_chunk_size() -> usize {
    defaults::CHUNK_SIZE
}

/// Per-execution counters reported in the completion log line
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ChunkStats {
    pub(crate) items_read: u64,
    pub(crate) items_dropped: u64,
    pub(crate) items_written: u64,
    pub(crate) chunks_written: u64,
}

impl ChunkStats {
    pub(crate) fn record_flush(&mut self, items: usize) {
        self.items_written += items as u64;
        self.chunks_written += 1;
    }
}
