//! Error types for scheduling operations.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by generation, adjustment and session operations.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Adjustment was asked to work on a schedule with no matches.
    #[error("schedule has no matches to adjust")]
    EmptySchedule,

    /// Tournament config or team list failed validation.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A disruption names a match that does not exist.
    #[error("unknown match: {0}")]
    UnknownMatch(String),

    /// A disruption record is malformed.
    #[error("invalid disruption: {0}")]
    InvalidDisruption(String),

    /// The session has no generated schedule yet.
    #[error("no schedule has been generated")]
    NoSchedule,

    /// An external scheduling backend failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;
