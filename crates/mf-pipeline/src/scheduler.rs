//! Bounded concurrent execution with input-aligned results.
//!
//! Every item becomes a tokio task, but a shared [`Semaphore`] lets only
//! `parallelism` of them do work at a time; the rest wait for a permit.
//! Handles are awaited in submission order, so `results[i]` always belongs
//! to `items[i]` no matter which task finished first.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::backend::JobRunner;
use crate::completion::CompletionSender;
use crate::job::{FailureKind, Job, JobOutcome, JobStatus};

/// Run `work` over `items` with at most `parallelism` invocations in flight.
///
/// Waits for every item before returning; a failing or panicking item never
/// cancels its siblings. A panic surfaces as [`mf_core::Error::Internal`] in
/// that item's slot only.
pub async fn run_bounded<T, R, F, Fut>(
    items: Vec<T>,
    parallelism: usize,
    work: F,
) -> Vec<mf_core::Result<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    if items.is_empty() {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));
    let work = Arc::new(work);
    let mut handles = Vec::with_capacity(items.len());

    for item in items {
        let sem = semaphore.clone();
        let work = work.clone();

        handles.push(tokio::spawn(async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|e| mf_core::Error::Internal(format!("scheduler closed: {e}")))?;
            Ok::<_, mf_core::Error>(work(item).await)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = match handle.await {
            Ok(inner) => inner,
            Err(e) => Err(mf_core::Error::Internal(format!("worker task failed: {e}"))),
        };
        results.push(result);
    }
    results
}

/// Runs transmux jobs through a [`JobRunner`] with bounded parallelism.
pub struct Scheduler {
    runner: Arc<dyn JobRunner>,
    parallelism: usize,
    completion: Arc<CompletionSender<JobOutcome>>,
}

impl Scheduler {
    /// Create a scheduler. `parallelism` is clamped to at least 1.
    pub fn new(runner: Arc<dyn JobRunner>, parallelism: usize) -> Self {
        Self {
            runner,
            parallelism: parallelism.max(1),
            completion: Arc::new(CompletionSender::noop()),
        }
    }

    /// Builder: notify `completion` as each job finishes.
    pub fn with_completion(mut self, completion: CompletionSender<JobOutcome>) -> Self {
        self.completion = Arc::new(completion);
        self
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Run every job and return one outcome per job, in job order.
    pub async fn run(&self, jobs: Vec<Job>) -> Vec<JobOutcome> {
        if jobs.is_empty() {
            return Vec::new();
        }

        tracing::info!(
            "running {} job(s) with parallelism {}",
            jobs.len(),
            self.parallelism
        );

        let submitted = jobs.clone();
        let runner = self.runner.clone();
        let completion = self.completion.clone();

        let results = run_bounded(jobs, self.parallelism, move |job: Job| {
            let runner = runner.clone();
            let completion = completion.clone();
            async move {
                tracing::debug!("start {} -> {:?}", job.format, job.output_dir);
                let outcome = runner.run(&job).await;
                completion.send(&outcome);
                outcome
            }
        })
        .await;

        results
            .into_iter()
            .zip(submitted)
            .map(|(result, job)| {
                result.unwrap_or_else(|e| {
                    tracing::error!("{} job aborted: {e}", job.format.label());
                    let outcome = JobOutcome {
                        job,
                        status: JobStatus::Failure {
                            kind: FailureKind::Internal,
                            diagnostic: e.to_string(),
                        },
                    };
                    self.completion.send(&outcome);
                    outcome
                })
            })
            .collect()
    }
}
