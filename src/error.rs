//! Error types for the planner library.
//!
//! Unschedulable work is not an error: it is reported as a
//! [`Shortfall`](crate::models::Shortfall) in the plan outcome.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by the repository, task list, and input parsing layers.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// File system operation failed.
    #[error("File system error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A calendar date string did not match `YYYY-MM-DD`.
    #[error("Invalid date '{input}': {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },
    /// One or more tasks failed validation.
    #[error("Invalid task input: {}", summarize(.0))]
    Validation(Vec<ValidationError>),
    /// Capacity configuration is unusable.
    #[error("Invalid capacity: {reason}")]
    InvalidCapacity { reason: String },
    /// No task at the given position.
    #[error("Task #{index} not found")]
    TaskNotFound { index: usize },
    /// Stored task file was written by a newer schema.
    #[error("Unsupported task file version {version}")]
    UnsupportedVersion { version: u32 },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlannerError>;

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
