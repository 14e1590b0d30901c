//! # mf-av
//!
//! External tool management and media actions for muxforge.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to ffmpeg
//!   and MP4Box.
//! - **Command execution** ([`ToolCommand`]) -- argument-vector process
//!   builder that captures exit status, stdout, and stderr.
//! - **Action functions** ([`actions`]) -- HLS, MPEG-DASH, and CMAF packaging
//!   plus fixed-parameter transcoding.

pub mod actions;
pub mod command;
pub mod tools;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};

// Action functions
pub use actions::{transcode, transmux, transmux_command, TRANSCODED_DIR};
