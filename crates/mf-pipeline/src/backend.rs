//! Format backends: the bridge from a [`Job`] to an external tool
//! invocation.
//!
//! The [`JobRunner`] trait is the seam between scheduling and execution;
//! [`ToolBackend`] is the production implementation, and tests substitute
//! their own runners to simulate slow, failing, or panicking backends.

use std::sync::Arc;

use async_trait::async_trait;

use crate::job::{Job, JobOutcome, JobStatus};

/// Runs a single job to completion.
///
/// Implementations must never fail the run as a whole: every error is
/// folded into the returned [`JobOutcome`].
#[async_trait]
pub trait JobRunner: Send + Sync {
    async fn run(&self, job: &Job) -> JobOutcome;
}

/// Runs jobs by invoking the external tool registered for each format.
#[derive(Debug, Clone)]
pub struct ToolBackend {
    tools: Arc<mf_av::ToolRegistry>,
}

impl ToolBackend {
    pub fn new(tools: Arc<mf_av::ToolRegistry>) -> Self {
        Self { tools }
    }
}

#[async_trait]
impl JobRunner for ToolBackend {
    async fn run(&self, job: &Job) -> JobOutcome {
        let result = mf_av::transmux(
            &self.tools,
            job.format,
            job.input.path(),
            &job.output_dir,
        )
        .await;

        let status = JobStatus::from_result(result);
        match &status {
            JobStatus::Success { output } => {
                tracing::info!("{} output at {}", job.format.label(), output.display());
            }
            JobStatus::Failure { kind, diagnostic } => {
                tracing::warn!(
                    "{} failed ({kind}): {}",
                    job.format.label(),
                    diagnostic.trim()
                );
            }
        }

        JobOutcome {
            job: job.clone(),
            status,
        }
    }
}
