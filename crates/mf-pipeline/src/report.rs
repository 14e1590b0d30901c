//! Per-format (and per-task) completion reports.

use std::path::Path;

use serde::Serialize;

use crate::job::{JobOutcome, JobStatus, TranscodeOutcome};

/// Anything that ends up as one line of a [`Report`].
pub trait Outcome {
    /// Human-readable name, e.g. `HLS` or `MP3 audio`.
    fn label(&self) -> &'static str;
    fn status(&self) -> &JobStatus;
}

impl Outcome for JobOutcome {
    fn label(&self) -> &'static str {
        self.job.format.label()
    }

    fn status(&self) -> &JobStatus {
        &self.status
    }
}

impl Outcome for TranscodeOutcome {
    fn label(&self) -> &'static str {
        self.task.label()
    }

    fn status(&self) -> &JobStatus {
        &self.status
    }
}

/// Ordered outcomes of one run, aligned with the request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report<O> {
    pub outcomes: Vec<O>,
}

/// Report of a transmuxing run, one outcome per requested format.
pub type OrchestrationReport = Report<JobOutcome>;

/// Report of a transcoding run, one outcome per requested task.
pub type TranscodeReport = Report<TranscodeOutcome>;

impl<O> Default for Report<O> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

impl<O: Outcome> Report<O> {
    pub fn new(outcomes: Vec<O>) -> Self {
        Self { outcomes }
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// One display line per outcome, in request order.
    pub fn lines(&self) -> Vec<String> {
        self.outcomes.iter().map(line).collect()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status().is_success())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Distinct tools reported missing, in first-seen order.
    pub fn missing_tools(&self) -> Vec<&str> {
        let mut tools: Vec<&str> = Vec::new();
        for tool in self.outcomes.iter().filter_map(|o| o.status().missing_tool()) {
            if !tools.contains(&tool) {
                tools.push(tool);
            }
        }
        tools
    }
}

/// Format a single outcome as a report line.
pub fn line(outcome: &impl Outcome) -> String {
    match outcome.status() {
        JobStatus::Success { output } => {
            format!("{}: ok -> {}", outcome.label(), display(output))
        }
        JobStatus::Failure { kind, diagnostic } => {
            let diagnostic = diagnostic.trim();
            if diagnostic.is_empty() {
                format!("{}: failed ({kind})", outcome.label())
            } else {
                format!("{}: failed ({kind}): {diagnostic}", outcome.label())
            }
        }
    }
}

/// Console notice printed as a transmux job finishes.
pub fn transmux_notice(outcome: &JobOutcome) -> String {
    notice(outcome, "transmuxing")
}

/// Console notice printed as a transcode task finishes.
pub fn transcode_notice(outcome: &TranscodeOutcome) -> String {
    notice(outcome, "transcoding")
}

fn notice(outcome: &impl Outcome, action: &str) -> String {
    let verb = if outcome.status().is_success() {
        "completed"
    } else {
        "failed"
    };
    format!("{} {action} {verb}.", outcome.label())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
