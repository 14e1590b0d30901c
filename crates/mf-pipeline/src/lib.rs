//! # mf-pipeline
//!
//! Orchestration of parallel transmuxing and transcoding runs.
//!
//! This crate provides:
//!
//! - **[`Job`] / [`JobOutcome`]** -- one unit of work per requested format,
//!   and the success-or-diagnostic record it produces.
//! - **[`budget`]** -- how many external processes may run at once.
//! - **[`Scheduler`]** -- bounded concurrent execution whose results line up
//!   with the input order regardless of completion order.
//! - **[`JobRunner`] / [`ToolBackend`]** -- the per-format backend dispatch.
//! - **[`Report`]** -- the per-format completion report.
//! - **[`Transmuxer`] / [`Transcoder`]** -- entry points tying the above
//!   together for one input file.

pub mod backend;
pub mod budget;
pub mod completion;
pub mod job;
pub mod report;
pub mod scheduler;
pub mod transcode;
pub mod transmux;

// Re-export key types at the crate root.
pub use backend::{JobRunner, ToolBackend};
pub use budget::{budget, host_cores, resolve_parallelism};
pub use completion::CompletionSender;
pub use job::{FailureKind, InputMedia, Job, JobOutcome, JobStatus, TranscodeOutcome};
pub use report::{OrchestrationReport, Outcome, Report, TranscodeReport};
pub use scheduler::{run_bounded, Scheduler};
pub use transcode::Transcoder;
pub use transmux::{plan_jobs, preflight, Transmuxer};
