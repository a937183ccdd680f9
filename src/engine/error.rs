//! Runner error types

use crate::http::CallerError;
use crate::scenario::{LoadError, ValidationError};

/// Errors that can stop a scenario run before or outside step execution.
///
/// Step-level failures never surface here; they are captured in the
/// step results of the summary.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid scenario: {0}")]
    Validation(#[from] ValidationError),

    #[error("HTTP client error: {0}")]
    Caller(#[from] CallerError),
}
