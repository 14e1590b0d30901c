//! Transcoding entry point: fixed-parameter re-encodes of one input.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mf_av::{ToolRegistry, TRANSCODED_DIR};
use mf_core::{Error, Result, TranscodeTask};

use crate::completion::CompletionSender;
use crate::job::{FailureKind, JobStatus, TranscodeOutcome};
use crate::report::TranscodeReport;
use crate::scheduler::run_bounded;

/// Runs transcode tasks concurrently into `<output_root>/transcoded/`.
pub struct Transcoder {
    tools: Arc<ToolRegistry>,
    parallelism: usize,
    completion: Arc<CompletionSender<TranscodeOutcome>>,
}

impl Transcoder {
    pub fn new(tools: Arc<ToolRegistry>, parallelism: usize) -> Self {
        Self {
            tools,
            parallelism: parallelism.max(1),
            completion: Arc::new(CompletionSender::noop()),
        }
    }

    /// Builder: notify `completion` as each task finishes.
    pub fn with_completion(mut self, completion: CompletionSender<TranscodeOutcome>) -> Self {
        self.completion = Arc::new(completion);
        self
    }

    /// Run every task in `tasks` (duplicates dropped) and report one
    /// outcome per task in request order.
    ///
    /// A successful `resolutions` task reports the output directory; the
    /// others report the file they wrote.
    pub async fn run(
        &self,
        input: &Path,
        output_root: &Path,
        tasks: &[TranscodeTask],
    ) -> Result<TranscodeReport> {
        let mut unique: Vec<TranscodeTask> = Vec::with_capacity(tasks.len());
        for &task in tasks {
            if !unique.contains(&task) {
                unique.push(task);
            }
        }

        if unique.is_empty() {
            return Ok(TranscodeReport::default());
        }

        let output_dir = output_root.join(TRANSCODED_DIR);
        tokio::fs::create_dir_all(&output_dir).await.map_err(|e| {
            Error::pipeline(
                "output-root",
                format!("cannot create {}: {e}", output_dir.display()),
            )
        })?;

        let input: Arc<Path> = Arc::from(input);
        let output_dir: Arc<Path> = Arc::from(output_dir.as_path());
        let tools = self.tools.clone();
        let completion = self.completion.clone();
        let submitted = unique.clone();

        let results = run_bounded(unique, self.parallelism, move |task| {
            let tools = tools.clone();
            let completion = completion.clone();
            let input = input.clone();
            let output_dir = output_dir.clone();
            async move {
                let result = mf_av::transcode(&tools, task, &input, &output_dir)
                    .await
                    .map(|files| reported_output(task, &output_dir, files));
                let outcome = TranscodeOutcome {
                    task,
                    status: JobStatus::from_result(result),
                };
                completion.send(&outcome);
                outcome
            }
        })
        .await;

        let outcomes = results
            .into_iter()
            .zip(submitted)
            .map(|(result, task)| {
                result.unwrap_or_else(|e| {
                    tracing::error!("{} task aborted: {e}", task.label());
                    let outcome = TranscodeOutcome {
                        task,
                        status: JobStatus::Failure {
                            kind: FailureKind::Internal,
                            diagnostic: e.to_string(),
                        },
                    };
                    self.completion.send(&outcome);
                    outcome
                })
            })
            .collect();

        Ok(TranscodeReport::new(outcomes))
    }
}

fn reported_output(task: TranscodeTask, output_dir: &Path, files: Vec<PathBuf>) -> PathBuf {
    match task {
        TranscodeTask::Resolutions => output_dir.to_path_buf(),
        TranscodeTask::H265 | TranscodeTask::Mp3Audio => files
            .into_iter()
            .next()
            .unwrap_or_else(|| output_dir.to_path_buf()),
    }
}
