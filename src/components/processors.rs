//! Closure-backed item processor.

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;
use crate::traits::ItemProcessor;

type ProcessFn<I, O> = Box<dyn Fn(&I) -> Result<Option<O>> + Send + Sync>;

/// Processor backed by a synchronous closure
///
/// Return `Ok(Some(output))` to keep the item, `Ok(None)` to drop it.
pub struct FnProcessor<I, O> {
    f: ProcessFn<I, O>,
}

impl<I, O> FnProcessor<I, O> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&I) -> Result<Option<O>> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl<I, O> fmt::Debug for FnProcessor<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProcessor").finish_non_exhaustive()
    }
}

#[async_trait]
impl<I, O> ItemProcessor<I, O> for FnProcessor<I, O>
where
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    async fn process(&self, item: &I) -> Result<Option<O>> {
        (self.f)(item)
    }
}
