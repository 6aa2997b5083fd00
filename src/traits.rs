//! # Batch Component Traits
//!
//! The contracts callers implement to plug their own data sources, transforms,
//! sinks and units of work into the engine, plus the [`Step`] contract every
//! step shape satisfies.

use crate::constants::RepeatStatus;
use crate::context::ExecutionContext;
use crate::error::Result;
use async_trait::async_trait;

/// Produces items for a chunk-oriented step
#[async_trait]
pub trait ItemReader<I>: Send + Sync {
    /// Read the next item
    ///
    /// # Returns
    ///
    /// * `Ok(Some(item))` - The next item in read order
    /// * `Ok(None)` - End of stream; further calls must keep returning `None`
    /// * `Err` - The read failed and may be retried by the owning step
    async fn read(&self) -> Result<Option<I>>;
}

/// Transforms one read item into one output item
#[async_trait]
pub trait ItemProcessor<I, O>: Send + Sync {
    /// Process a single item
    ///
    /// Returning `Ok(None)` drops the item: it is not written and does not
    /// count towards the chunk size. The item is borrowed so a retried call
    /// sees the same input.
    async fn process(&self, item: &I) -> Result<Option<O>>;
}

/// Persists or emits one chunk of processed items
#[async_trait]
pub trait ItemWriter<O>: Send + Sync {
    /// Write a non-empty chunk, in read order
    async fn write(&self, items: &[O]) -> Result<()>;
}

/// Reader, processor and writer implemented on one object
///
/// Use [`ChunkStep::from_stream`](crate::steps::ChunkStep::from_stream) to run
/// a stream as a chunk step.
#[async_trait]
pub trait ItemStream<T>: Send + Sync {
    async fn read(&self) -> Result<Option<T>>;

    async fn process(&self, item: &T) -> Result<Option<T>>;

    async fn write(&self, items: &[T]) -> Result<()>;
}

/// A repeatable unit of work driven by a [`TaskletStep`](crate::steps::TaskletStep)
#[async_trait]
pub trait Tasklet: Send + Sync {
    /// Perform one unit of work
    ///
    /// Return [`RepeatStatus::Continuable`] to be invoked again, or
    /// [`RepeatStatus::Finished`] to complete the step. An error triggers the
    /// step's retry policy for this same invocation.
    async fn execute(&self, context: &ExecutionContext) -> Result<RepeatStatus>;
}

/// A single unit of job work
#[async_trait]
pub trait Step: Send + Sync {
    /// Run the step against the job's execution context
    async fn execute(&self, context: &ExecutionContext) -> Result<()>;

    /// Name used in logs
    ///
    /// Default implementation returns the type name.
    fn step_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[async_trait]
impl<S: Step + ?Sized> Step for Box<S> {
    async fn execute(&self, context: &ExecutionContext) -> Result<()> {
        (**self).execute(context).await
    }

    fn step_name(&self) -> &str {
        (**self).step_name()
    }
}

#[async_trait]
impl<S: Step + ?Sized> Step for std::sync::Arc<S> {
    async fn execute(&self, context: &ExecutionContext) -> Result<()> {
        (**self).execute(context).await
    }

    fn step_name(&self) -> &str {
        (**self).step_name()
    }
}

#[async_trait]
impl<I, R> ItemReader<I> for std::sync::Arc<R>
where
    I: Send + 'static,
    R: ItemReader<I> + ?Sized,
{
    async fn read(&self) -> Result<Option<I>> {
        (**self).read().await
    }
}

#[async_trait]
impl<I, O, P> ItemProcessor<I, O> for std::sync::Arc<P>
where
    I: Send + Sync + 'static,
    O: Send + 'static,
    P: ItemProcessor<I, O> + ?Sized,
{
    async fn process(&self, item: &I) -> Result<Option<O>> {
        (**self).process(item).await
    }
}

#[async_trait]
impl<O, W> ItemWriter<O> for std::sync::Arc<W>
where
    O: Send + Sync + 'static,
    W: ItemWriter<O> + ?Sized,
{
    async fn write(&self, items: &[O]) -> Result<()> {
        (**self).write(items).await
    }
}

#[async_trait]
impl<T: Tasklet + ?Sized> Tasklet for std::sync::Arc<T> {
    async fn execute(&self, context: &ExecutionContext) -> Result<RepeatStatus> {
        (**self).execute(context).await
    }
}

#[async_trait]
impl<T, S> ItemStream<T> for std::sync::Arc<S>
where
    T: Send + Sync + 'static,
    S: ItemStream<T> + ?Sized,
{
    async fn read(&self) -> Result<Option<T>> {
        (**self).read().await
    }

    async fn process(&self, item: &T) -> Result<Option<T>> {
        (**self).process(item).await
    }

    async fn write(&self, items: &[T]) -> Result<()> {
        (**self).write(items).await
    }
}
