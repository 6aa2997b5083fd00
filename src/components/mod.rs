//! # Components
//!
//! Reusable in-memory readers, processors, writers and tasklets for assembling
//! jobs, plus the adapters that let an [`ItemStream`](crate::traits::ItemStream)
//! run as a chunk step.

pub mod processors;
pub mod readers;
pub mod stream;
pub mod tasklets;
pub mod writers;

pub use processors::FnProcessor;
pub use readers::{IterReader, RangeReader};
pub use stream::{StreamProcessor, StreamReader, StreamWriter};
pub use tasklets::{FnTasklet, RepeatTasklet};
pub use writers::{CollectingWriter, LoggingWriter};
