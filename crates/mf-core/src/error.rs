//! Unified error type for muxforge.
//!
//! All crates funnel their failures into [`Error`]. The binary maps an error
//! to a process exit status via [`Error::exit_code`].

/// Unified error type covering all failure modes in muxforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request data (formats, tasks, config) failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An external tool (ffmpeg, MP4Box, etc.) returned an error.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// An external tool ran but exited with a non-zero status.
    #[error("Tool error [{tool}]: exited with {}: {}", exit_label(.code), .stderr.trim())]
    ToolExit {
        /// Name of the tool that failed.
        tool: String,
        /// Exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// Captured standard error, verbatim.
        stderr: String,
    },

    /// An external tool is not installed or not on `PATH`.
    #[error("{tool} not found; is it installed and in PATH?")]
    ToolNotFound {
        /// Name of the missing tool.
        tool: String,
    },

    /// An orchestration step failed.
    #[error("Pipeline error [{step}]: {message}")]
    Pipeline {
        /// The step that failed.
        step: String,
        /// Human-readable error description.
        message: String,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to a process exit code.
    ///
    /// `3` is reserved for a missing external tool so scripts can tell a
    /// misconfigured host apart from a bad input file.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolNotFound { .. } => 3,
            Error::Tool { .. } | Error::ToolExit { .. } => 2,
            Error::Validation(_)
            | Error::Io { .. }
            | Error::Pipeline { .. }
            | Error::Internal(_) => 1,
        }
    }

    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::ToolNotFound`].
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Error::ToolNotFound { tool: tool.into() }
    }

    /// Convenience constructor for [`Error::Pipeline`].
    pub fn pipeline(step: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Pipeline {
            step: step.into(),
            message: message.into(),
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "a signal".to_string(),
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
