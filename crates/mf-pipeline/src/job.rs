//! Jobs and their outcomes.
//!
//! A [`Job`] is created once per requested format at the start of a run and
//! is never mutated afterwards. Running it yields exactly one
//! [`JobOutcome`].

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mf_core::{Format, TranscodeTask};
use serde::{Serialize, Serializer};

/// Read-only handle to the source file of a run, shared by all its jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMedia(Arc<Path>);

impl Serialize for InputMedia {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.path().serialize(serializer)
    }
}

impl InputMedia {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name without its extension, e.g. `movie` for `/in/movie.mp4`.
    ///
    /// The name need not be valid UTF-8.
    pub fn stem(&self) -> Option<&OsStr> {
        self.0.file_stem()
    }
}

/// One format to produce from one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub input: InputMedia,
    pub format: Format,
    /// Directory the backend writes into; created by the backend.
    pub output_dir: PathBuf,
}

impl Job {
    pub fn new(input: InputMedia, format: Format, output_dir: PathBuf) -> Self {
        Self {
            input,
            format,
            output_dir,
        }
    }
}

/// Why a job failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FailureKind {
    /// The tool ran and exited non-zero (`None` when killed by a signal).
    Exited { code: Option<i32> },
    /// The tool is not installed or not on `PATH`.
    ToolNotFound { tool: String },
    /// A filesystem operation around the invocation failed.
    Io,
    /// The job could not be run at all (spawn failure, worker panic).
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited { code: Some(c) } => write!(f, "exit {c}"),
            Self::Exited { code: None } => write!(f, "killed"),
            Self::ToolNotFound { tool } => write!(f, "{tool} missing"),
            Self::Io => write!(f, "io"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Result of running one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum JobStatus {
    Success {
        /// Manifest, playlist, or output file written.
        output: PathBuf,
    },
    Failure {
        kind: FailureKind,
        /// For [`FailureKind::Exited`], the tool's stderr verbatim.
        diagnostic: String,
    },
}

impl JobStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Name of the missing tool, if that is why the job failed.
    pub fn missing_tool(&self) -> Option<&str> {
        match self {
            Self::Failure {
                kind: FailureKind::ToolNotFound { tool },
                ..
            } => Some(tool),
            _ => None,
        }
    }

    /// Translate a backend result into a status.
    pub fn from_result(result: mf_core::Result<PathBuf>) -> Self {
        match result {
            Ok(output) => Self::Success { output },
            Err(err) => Self::from_error(err),
        }
    }

    fn from_error(err: mf_core::Error) -> Self {
        use mf_core::Error;

        match err {
            Error::ToolExit { code, stderr, .. } => Self::Failure {
                kind: FailureKind::Exited { code },
                diagnostic: stderr,
            },
            Error::ToolNotFound { ref tool } => Self::Failure {
                kind: FailureKind::ToolNotFound { tool: tool.clone() },
                diagnostic: err.to_string(),
            },
            Error::Io { .. } => Self::Failure {
                kind: FailureKind::Io,
                diagnostic: err.to_string(),
            },
            other => Self::Failure {
                kind: FailureKind::Internal,
                diagnostic: other.to_string(),
            },
        }
    }
}

/// Outcome of a transmux [`Job`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub job: Job,
    pub status: JobStatus,
}

/// Outcome of a transcode task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscodeOutcome {
    pub task: TranscodeTask,
    pub status: JobStatus,
}
