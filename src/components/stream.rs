//! Adapters that split an [`ItemStream`] into reader, processor and writer halves.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::traits::{ItemProcessor, ItemReader, ItemStream, ItemWriter};

#[derive(Debug)]
pub struct StreamReader<S>(Arc<S>);

impl<S> StreamReader<S> {
    pub fn new(stream: Arc<S>) -> Self {
        Self(stream)
    }
}

#[async_trait]
impl<T, S> ItemReader<T> for StreamReader<S>
where
    T: Send + 'static,
    S: ItemStream<T>,
{
    async fn read(&self) -> Result<Option<T>> {
        ItemStream::read(&*self.0).await
    }
}

#[derive(Debug)]
pub struct StreamProcessor<S>(Arc<S>);

impl<S> StreamProcessor<S> {
    pub fn new(stream: Arc<S>) -> Self {
        Self(stream)
    }
}

#[async_trait]
impl<T, S> ItemProcessor<T, T> for StreamProcessor<S>
where
    T: Send + Sync + 'static,
    S: ItemStream<T>,
{
    async fn process(&self, item: &T) -> Result<Option<T>> {
        ItemStream::process(&*self.0, item).await
    }
}

#[derive(Debug)]
pub struct StreamWriter<S>(Arc<S>);

impl<S> StreamWriter<S> {
    pub fn new(stream: Arc<S>) -> Self {
        Self(stream)
    }
}

#[async_trait]
impl<T, S> ItemWriter<T> for StreamWriter<S>
where
    T: Send + Sync + 'static,
    S: ItemStream<T>,
{
    async fn write(&self, items: &[T]) -> Result<()> {
        ItemStream::write(&*self.0, items).await
    }
}
