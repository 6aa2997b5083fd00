//! Job and executor behaviour across multiple jobs

use batch_core::components::{FnTasklet, RepeatTasklet};
use batch_core::{
    BatchError, ExecutionContext, ExecutionMode, Job, JobExecutor, RepeatStatus, TaskletStep,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

use crate::common::RecordingStep;

fn failing_job(name: &str, log: &Arc<Mutex<Vec<&'static str>>>) -> Job {
    Job::new(name).with_step(RecordingStep::failing("job1_step", log))
}

fn recording_job(name: &str, log: &Arc<Mutex<Vec<&'static str>>>) -> Job {
    let log = Arc::clone(log);
    Job::new(name).with_step(TaskletStep::new(
        FnTasklet::new(move |_: &ExecutionContext| {
            log.lock().push("job2_step");
            Ok(RepeatStatus::Finished)
        }),
        None,
    ))
}

#[tokio::test]
async fn sequential_execution_stops_before_later_jobs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut executor = JobExecutor::new();
    executor.add_job(failing_job("job1", &log));
    executor.add_job(recording_job("job2", &log));

    let result = executor.execute_sequentially().await;

    assert_eq!(
        assert_err!(result),
        BatchError::StepError("job1_step failed".to_string())
    );
    assert_eq!(*log.lock(), vec!["job1_step"]);
}

#[tokio::test]
async fn concurrent_execution_still_runs_sibling_jobs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut executor = JobExecutor::new();
    executor.add_job(failing_job("job1", &log));
    let job2_context = executor.add_job(
        Job::new("job2").with_step(TaskletStep::new(
            FnTasklet::new(|context: &ExecutionContext| {
                context.set("job2_ran", true);
                Ok(RepeatStatus::Finished)
            }),
            None,
        )),
    );

    let result = executor.execute(ExecutionMode::Concurrent).await;
    assert_err!(result);

    // job2 may still be in flight when the combined result is reported
    let ran = tokio::time::timeout(Duration::from_secs(5), async {
        while !job2_context.has("job2_ran") {
            tokio::task::yield_now().await;
        }
    })
    .await;
    assert!(ran.is_ok(), "job2 should run despite job1 failing");
}

#[tokio::test]
async fn jobs_in_a_job_run_steps_in_order_and_stop_on_failure() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let job = Job::new("abc")
        .with_step(RecordingStep::ok("A", &log))
        .with_step(RecordingStep::failing("B", &log))
        .with_step(RecordingStep::ok("C", &log));

    let result = job.execute(&ExecutionContext::new()).await;

    assert_eq!(
        assert_err!(result),
        BatchError::StepError("B failed".to_string())
    );
    assert_eq!(*log.lock(), vec!["A", "B"]);
}

#[tokio::test]
async fn repeat_tasklet_runs_until_finished() {
    let tasklet = Arc::new(RepeatTasklet::new("tick", 3));
    let job = Job::new("ticks").with_step(TaskletStep::new(Arc::clone(&tasklet), None));

    let mut executor = JobExecutor::new();
    executor.add_job(job);
    assert_ok!(executor.execute(ExecutionMode::Sequential).await);

    assert_eq!(tasklet.count(), 3);
}

#[tokio::test]
async fn context_values_flow_between_steps() {
    let job = Job::new("matches")
        .with_step(TaskletStep::new(
            FnTasklet::new(|context: &ExecutionContext| {
                context.set_as("matches", &vec!["alpha", "beta"])?;
                Ok(RepeatStatus::Finished)
            }),
            None,
        ))
        .with_step(TaskletStep::new(
            FnTasklet::new(|context: &ExecutionContext| {
                let matches: Vec<String> = context.get_as("matches")?.unwrap_or_default();
                context.set("summary", matches.join(","));
                Ok(RepeatStatus::Finished)
            }),
            None,
        ));

    let context = assert_ok!(job.execute_with_new_context().await);

    assert_eq!(
        context.get("summary"),
        Some(serde_json::json!("alpha,beta"))
    );
}
