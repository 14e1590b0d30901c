//! mf-core: shared types, errors, and configuration.
//!
//! This crate is the foundational dependency for the other mf-* crates,
//! providing the unified error type, the closed set of output formats and
//! transcode tasks, and the application configuration.

pub mod config;
pub mod error;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use media::*;
