//! Builder for executing external tool commands as argument vectors.
//!
//! Arguments are passed straight to the child process; nothing is ever run
//! through a shell, so file names containing spaces, quotes, or `;` reach the
//! tool untouched.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ToolOutput {
    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use mf_av::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example() -> mf_core::Result<()> {
/// let output = ToolCommand::new(PathBuf::from("ffmpeg"))
///     .arg("-hide_banner")
///     .arg("-i")
///     .arg("/path/to/My Movie; rm -rf.mp4")
///     .args(["-c", "copy", "-f", "null", "-"])
///     .execute()
///     .await?;
/// println!("{}", output.stderr);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl AsRef<OsStr>>) -> &mut Self {
        self.args
            .extend(iter.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// The argument vector as it will be passed to the program.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Short program name used in errors and logs (`ffmpeg`, not
    /// `/usr/bin/ffmpeg`).
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Run the command to completion, capturing stdout and stderr.
    ///
    /// A non-zero exit status is *not* an error here; callers inspect
    /// [`ToolOutput::status`] themselves.
    ///
    /// # Errors
    ///
    /// - [`mf_core::Error::ToolNotFound`] if the program does not exist.
    /// - [`mf_core::Error::Tool`] if spawning or waiting fails for any other
    ///   reason.
    pub async fn run(&self) -> mf_core::Result<ToolOutput> {
        let program_name = self.program_name();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!("spawn {program_name} {:?}", self.args);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                mf_core::Error::tool_not_found(program_name.clone())
            } else {
                mf_core::Error::tool(program_name.clone(), format!("failed to spawn: {e}"))
            }
        })?;

        // Drains both pipes concurrently, so a chatty encoder cannot stall on
        // a full stderr buffer.
        let output = child.wait_with_output().await.map_err(|e| {
            mf_core::Error::tool(
                program_name.clone(),
                format!("I/O error waiting for process: {e}"),
            )
        })?;

        Ok(ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Execute the command and require a zero exit status.
    ///
    /// # Errors
    ///
    /// Everything [`run`](Self::run) returns, plus
    /// [`mf_core::Error::ToolExit`] if the process exits non-zero, carrying
    /// the exit code and the verbatim stderr.
    pub async fn execute(&self) -> mf_core::Result<ToolOutput> {
        let output = self.run().await?;
        if !output.success() {
            return Err(mf_core::Error::ToolExit {
                tool: self.program_name(),
                code: output.status.code(),
                stderr: output.stderr,
            });
        }
        Ok(output)
    }
}
