//! Chunk-oriented step tests through the public API

use batch_core::components::{CollectingWriter, FnProcessor, IterReader, RangeReader};
use batch_core::constants::metrics::{READER_RETRIES, STEP_RETRIES};
use batch_core::{
    BatchError, ChunkRetryPolicies, ChunkStep, ExecutionContext, Job, RetryMetrics, RetryPolicy,
    RetryableChunkStep, Step, StepExt,
};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

use crate::common::HiccupReader;

fn doubler() -> FnProcessor<u32, u32> {
    FnProcessor::new(|n: &u32| Ok(Some(n * 2)))
}

#[tokio::test]
async fn doubled_range_is_written_in_chunks_of_three() {
    let writer = Arc::new(CollectingWriter::new());
    let step = ChunkStep::new(RangeReader::new(7), doubler(), Arc::clone(&writer), 3);

    let job = Job::new("doubling").with_step(step);
    assert_ok!(job.execute(&ExecutionContext::new()).await);

    assert_eq!(
        writer.chunks(),
        vec![vec![2, 4, 6], vec![8, 10, 12], vec![14]]
    );
}

#[tokio::test]
async fn dropped_items_do_not_fill_chunks() {
    let writer = Arc::new(CollectingWriter::new());
    let evens = FnProcessor::new(|n: &u32| Ok((n % 2 == 0).then_some(*n)));
    let step = ChunkStep::new(RangeReader::new(10), evens, Arc::clone(&writer), 2);

    assert_ok!(step.execute(&ExecutionContext::new()).await);

    assert_eq!(writer.chunks(), vec![vec![2, 4], vec![6, 8], vec![10]]);
}

#[tokio::test]
async fn processor_can_change_item_type() {
    let writer = Arc::new(CollectingWriter::new());
    let step = ChunkStep::with_default_chunk_size(
        IterReader::new(vec!["a", "bb", "ccc"]),
        FnProcessor::new(|word: &&'static str| Ok(Some(word.len()))),
        Arc::clone(&writer),
    );

    assert_eq!(step.chunk_size(), 10);
    assert_ok!(step.execute(&ExecutionContext::new()).await);
    assert_eq!(writer.chunks(), vec![vec![1, 2, 3]]);
}

#[tokio::test]
async fn reader_hiccup_is_absorbed_by_reader_policy() {
    let writer = Arc::new(CollectingWriter::new());
    let metrics = Arc::new(RetryMetrics::new());
    let step = RetryableChunkStep::new(HiccupReader::new(5, 3), doubler(), Arc::clone(&writer), 2)
        .with_retry_policies(ChunkRetryPolicies::new().with_reader(RetryPolicy::new(1)))
        .with_metrics(Arc::clone(&metrics));

    assert_ok!(step.execute(&ExecutionContext::new()).await);

    assert_eq!(writer.chunks(), vec![vec![2, 4], vec![6, 8], vec![10]]);
    assert_eq!(metrics.get(READER_RETRIES), 1);
}

#[tokio::test]
async fn reader_hiccup_without_policy_fails_the_step() {
    let writer = Arc::new(CollectingWriter::new());
    let step = RetryableChunkStep::new(HiccupReader::new(5, 3), doubler(), Arc::clone(&writer), 2);

    let result = step.execute(&ExecutionContext::new()).await;

    assert_eq!(
        assert_err!(result),
        BatchError::Transient("reader hiccup".to_string())
    );
    assert_eq!(writer.chunks(), vec![vec![2, 4]]);
}

#[tokio::test]
async fn whole_step_retry_resumes_from_reader_position() {
    let writer = Arc::new(CollectingWriter::new());
    let metrics = Arc::new(RetryMetrics::new());
    let step = RetryableChunkStep::new(HiccupReader::new(5, 4), doubler(), Arc::clone(&writer), 2)
        .retrying(RetryPolicy::new(1))
        .with_metrics(Arc::clone(&metrics));

    assert_ok!(step.execute(&ExecutionContext::new()).await);

    // Item 3 was buffered when the first attempt failed and is not replayed
    assert_eq!(writer.chunks(), vec![vec![2, 4], vec![8, 10]]);
    assert_eq!(metrics.get(STEP_RETRIES), 1);
}
