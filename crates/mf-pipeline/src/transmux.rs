//! Transmuxing entry point: one input, many formats.

use std::path::Path;
use std::sync::Arc;

use mf_av::ToolRegistry;
use mf_core::{Error, Format, Result};

use crate::backend::{JobRunner, ToolBackend};
use crate::completion::CompletionSender;
use crate::job::{InputMedia, Job, JobOutcome};
use crate::report::OrchestrationReport;
use crate::scheduler::Scheduler;

/// Build one job per requested format.
///
/// Duplicates are dropped, keeping the first occurrence, so the job list
/// matches the request order. Each job writes into
/// `<output_root>/<input_stem>/<format_dir>`.
///
/// # Errors
///
/// [`Error::Validation`] if both CMAF backends are requested (they share a
/// directory) or if the input path has no file name.
pub fn plan_jobs(input: &InputMedia, output_root: &Path, formats: &[Format]) -> Result<Vec<Job>> {
    let mut unique: Vec<Format> = Vec::with_capacity(formats.len());
    for &format in formats {
        if !unique.contains(&format) {
            unique.push(format);
        }
    }

    if unique.contains(&Format::Cmaf) && unique.contains(&Format::CmafFfmpeg) {
        return Err(Error::Validation(
            "cmaf and cmaf-ffmpeg both write to cmaf/; request only one".into(),
        ));
    }

    if unique.is_empty() {
        return Ok(Vec::new());
    }

    let stem = input.stem().ok_or_else(|| {
        Error::Validation(format!(
            "input {} has no file name",
            input.path().display()
        ))
    })?;
    let media_root = output_root.join(stem);

    Ok(unique
        .into_iter()
        .map(|format| Job::new(input.clone(), format, media_root.join(format.dir_name())))
        .collect())
}

/// Check that every tool the requested formats need is available.
///
/// Used in strict mode to refuse a run up front instead of reporting a
/// per-format failure.
pub fn preflight(tools: &ToolRegistry, formats: &[Format]) -> Result<()> {
    for format in formats {
        tools.require(format.tool())?;
    }
    Ok(())
}

/// Packages one input into several streaming formats concurrently.
pub struct Transmuxer {
    scheduler: Scheduler,
}

impl Transmuxer {
    /// Run jobs through the external tools in `tools`.
    pub fn new(tools: Arc<ToolRegistry>, parallelism: usize) -> Self {
        Self::with_runner(Arc::new(ToolBackend::new(tools)), parallelism)
    }

    /// Run jobs through a custom [`JobRunner`].
    pub fn with_runner(runner: Arc<dyn JobRunner>, parallelism: usize) -> Self {
        Self {
            scheduler: Scheduler::new(runner, parallelism),
        }
    }

    /// Builder: notify `completion` as each format finishes.
    pub fn with_completion(mut self, completion: CompletionSender<JobOutcome>) -> Self {
        self.scheduler = self.scheduler.with_completion(completion);
        self
    }

    pub fn parallelism(&self) -> usize {
        self.scheduler.parallelism()
    }

    /// Transmux `input` into every format in `formats`.
    ///
    /// Blocks until every job has finished. Job failures are recorded in
    /// the report; only an invalid request or an uncreatable output root
    /// fails the run itself.
    pub async fn run(
        &self,
        input: &Path,
        output_root: &Path,
        formats: &[Format],
    ) -> Result<OrchestrationReport> {
        let input = InputMedia::new(input);
        let jobs = plan_jobs(&input, output_root, formats)?;

        if jobs.is_empty() {
            tracing::info!("no formats requested for {}", input.path().display());
            return Ok(OrchestrationReport::default());
        }

        if let Some(media_root) = jobs[0].output_dir.parent() {
            tokio::fs::create_dir_all(media_root).await.map_err(|e| {
                Error::pipeline(
                    "output-root",
                    format!("cannot create {}: {e}", media_root.display()),
                )
            })?;
        }

        tracing::info!(
            "transmuxing {} into {} format(s)",
            input.path().display(),
            jobs.len()
        );

        let outcomes = self.scheduler.run(jobs).await;
        let report = OrchestrationReport::new(outcomes);

        tracing::info!(
            "transmux finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }
}
